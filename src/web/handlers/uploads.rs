use actix_web::http::header::CONTENT_TYPE;
use actix_web::{post, web, HttpRequest, HttpResponse};

use brandpress::common::AppError;

use crate::web::helpers::require_user;
use crate::web::state::AppState;

/// Raw-body upload for hero and reference images: the file bytes are the
/// request body, the media type comes from the Content-Type header, and
/// the public URL comes back as plain text for the form script to slot in.
#[post("/admin/uploads")]
pub async fn upload(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::validation("A Content-Type header is required"))?
        .to_string();

    if body.is_empty() {
        return Err(AppError::validation("The upload body is empty"));
    }

    let url = state.storage.store(&content_type, &body).await?;

    Ok(HttpResponse::Created()
        .content_type("text/plain; charset=utf-8")
        .body(url))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload);
}
