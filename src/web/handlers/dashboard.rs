use actix_web::{get, web, HttpRequest, HttpResponse};

use brandpress::common::AppError;
use brandpress::db;

use crate::web::helpers::{render, require_user};
use crate::web::state::AppState;
use crate::web::templates::DashboardTemplate;

#[get("/admin")]
pub async fn dashboard(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let counts = db::overview_counts(&state.pool).await?;
    let batches = db::list_recent_batches(&state.pool, 5).await?;
    let upcoming = db::list_upcoming_events(&state.pool).await?;

    render(DashboardTemplate {
        counts,
        batches,
        upcoming,
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard);
}
