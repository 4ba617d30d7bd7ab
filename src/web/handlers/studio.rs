use actix_web::{get, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use brandpress::common::AppError;
use brandpress::db;

use crate::web::forms::ListQuery;
use crate::web::helpers::{render, require_user};
use crate::web::state::AppState;
use crate::web::templates::{BatchTemplate, BatchesListTemplate};

#[get("/admin/batches")]
pub async fn batches_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let batches = db::list_recent_batches(&state.pool, 50).await?;

    render(BatchesListTemplate {
        batches,
        flash: query.flash.clone(),
    })
}

/// Batch progress page. While the batch is unsettled the template polls
/// itself with HTMX every couple of seconds.
#[get("/admin/batches/{id}")]
pub async fn batch_show(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let id = path.into_inner();
    let batch = db::get_batch(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Batch"))?;
    let jobs = db::list_jobs_for_batch(&state.pool, id).await?;

    render(BatchTemplate { batch, jobs })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(batches_list).service(batch_show);
}
