use actix_web::{get, post, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use brandpress::common::AppError;
use brandpress::db;
use brandpress::models::{BuildEventCreate, BuildEventUpdate};

use crate::web::forms::{BuildEventForm, ListQuery};
use crate::web::helpers::{
    flash_url, parse_datetime_field, redirect, render, require_user, trimmed,
};
use crate::web::state::AppState;
use crate::web::templates::{EventEditTemplate, EventsListTemplate};

fn parse_event_form(form: &BuildEventForm) -> Result<BuildEventCreate, AppError> {
    if form.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }

    let scheduled_at = parse_datetime_field(&Some(form.scheduled_at.clone()), "scheduled")?
        .ok_or_else(|| AppError::validation("A scheduled date/time is required"))?;

    let duration_minutes = form.duration_minutes.unwrap_or(60);
    if duration_minutes <= 0 {
        return Err(AppError::validation("Duration must be positive"));
    }

    Ok(BuildEventCreate {
        title: form.title.trim().to_string(),
        description: trimmed(&form.description).unwrap_or_default(),
        stream_url: trimmed(&form.stream_url).unwrap_or_default(),
        scheduled_at,
        duration_minutes,
    })
}

#[get("/admin/events")]
pub async fn events_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let events = db::list_build_events(&state.pool).await?;

    render(EventsListTemplate {
        events,
        flash: query.flash.clone(),
    })
}

#[post("/admin/events")]
pub async fn event_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<BuildEventForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let data = parse_event_form(&form)?;
    db::create_build_event(&state.pool, &data).await?;

    Ok(redirect(&req, &flash_url("/admin/events", "Event created")))
}

#[get("/admin/events/{id}")]
pub async fn event_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let event = db::get_build_event_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Event"))?;

    render(EventEditTemplate {
        scheduled_at_text: event.scheduled_at.format("%Y-%m-%dT%H:%M").to_string(),
        event,
        flash: query.flash.clone(),
    })
}

#[post("/admin/events/{id}")]
pub async fn event_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<BuildEventForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let id = path.into_inner();
    let parsed = parse_event_form(&form)?;

    let data = BuildEventUpdate {
        title: Some(parsed.title),
        description: Some(parsed.description),
        stream_url: Some(parsed.stream_url),
        scheduled_at: Some(parsed.scheduled_at),
        duration_minutes: Some(parsed.duration_minutes),
    };

    db::update_build_event(&state.pool, id, &data)
        .await?
        .ok_or(AppError::NotFound("Event"))?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/events/{id}"), "Saved"),
    ))
}

#[post("/admin/events/{id}/publish")]
pub async fn event_publish(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let id = path.into_inner();
    let event = db::get_build_event_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Event"))?;

    db::set_build_event_published(&state.pool, id, !event.published)
        .await?
        .ok_or(AppError::NotFound("Event"))?;

    Ok(redirect(&req, "/admin/events"))
}

#[post("/admin/events/{id}/delete")]
pub async fn event_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if !db::delete_build_event(&state.pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Event"));
    }

    Ok(redirect(&req, &flash_url("/admin/events", "Event deleted")))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(events_list)
        .service(event_create)
        .service(event_edit)
        .service(event_update)
        .service(event_publish)
        .service(event_delete);
}
