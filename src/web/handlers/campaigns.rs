use std::str::FromStr;

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use brandpress::common::AppError;
use brandpress::db;
use brandpress::models::{CampaignCreate, CampaignStatus, CampaignUpdate};

use crate::web::forms::{CampaignForm, ListQuery, StatusForm};
use crate::web::helpers::{
    flash_url, parse_datetime_field, redirect, render, require_user, trimmed,
};
use crate::web::state::AppState;
use crate::web::templates::{CampaignEditTemplate, CampaignsListTemplate};

fn parse_campaign_form(form: &CampaignForm) -> Result<CampaignCreate, AppError> {
    if form.name.trim().is_empty() {
        return Err(AppError::validation("Campaign name is required"));
    }

    let starts_at = parse_datetime_field(&form.starts_at, "start")?;
    let ends_at = parse_datetime_field(&form.ends_at, "end")?;
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        if end < start {
            return Err(AppError::validation("The campaign ends before it starts"));
        }
    }

    Ok(CampaignCreate {
        name: form.name.trim().to_string(),
        channel: trimmed(&form.channel).unwrap_or_default(),
        description: trimmed(&form.description).unwrap_or_default(),
        budget_label: trimmed(&form.budget_label).unwrap_or_default(),
        starts_at,
        ends_at,
    })
}

#[get("/admin/campaigns")]
pub async fn campaigns_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let campaigns = db::list_campaigns(&state.pool).await?;

    render(CampaignsListTemplate {
        campaigns,
        flash: query.flash.clone(),
    })
}

#[post("/admin/campaigns")]
pub async fn campaign_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<CampaignForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let data = parse_campaign_form(&form)?;
    db::create_campaign(&state.pool, &data).await?;

    Ok(redirect(&req, &flash_url("/admin/campaigns", "Campaign created")))
}

#[get("/admin/campaigns/{id}")]
pub async fn campaign_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let campaign = db::get_campaign_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Campaign"))?;

    let fmt = |value: Option<chrono::DateTime<chrono::Utc>>| {
        value
            .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
            .unwrap_or_default()
    };

    render(CampaignEditTemplate {
        starts_at_text: fmt(campaign.starts_at),
        ends_at_text: fmt(campaign.ends_at),
        campaign,
        flash: query.flash.clone(),
    })
}

#[post("/admin/campaigns/{id}")]
pub async fn campaign_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<CampaignForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let id = path.into_inner();
    let parsed = parse_campaign_form(&form)?;
    let status = match &form.status {
        Some(raw) => Some(CampaignStatus::from_str(raw).map_err(AppError::Validation)?),
        None => None,
    };

    let data = CampaignUpdate {
        name: Some(parsed.name),
        status,
        channel: Some(parsed.channel),
        description: Some(parsed.description),
        budget_label: Some(parsed.budget_label),
        starts_at: Some(parsed.starts_at),
        ends_at: Some(parsed.ends_at),
    };

    db::update_campaign(&state.pool, id, &data)
        .await?
        .ok_or(AppError::NotFound("Campaign"))?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/campaigns/{id}"), "Saved"),
    ))
}

#[post("/admin/campaigns/{id}/status")]
pub async fn campaign_set_status(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let status = CampaignStatus::from_str(&form.status).map_err(AppError::Validation)?;

    db::set_campaign_status(&state.pool, path.into_inner(), status)
        .await?
        .ok_or(AppError::NotFound("Campaign"))?;

    Ok(redirect(&req, "/admin/campaigns"))
}

#[post("/admin/campaigns/{id}/delete")]
pub async fn campaign_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if !db::delete_campaign(&state.pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Campaign"));
    }

    Ok(redirect(&req, &flash_url("/admin/campaigns", "Campaign deleted")))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(campaigns_list)
        .service(campaign_create)
        .service(campaign_edit)
        .service(campaign_update)
        .service(campaign_set_status)
        .service(campaign_delete);
}
