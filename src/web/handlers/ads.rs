use std::collections::HashMap;
use std::str::FromStr;

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use brandpress::common::AppError;
use brandpress::db;
use brandpress::models::{AdPlacement, AdTargetType, Advertisement, AdvertisementCreate, AdvertisementUpdate};
use brandpress::services::AdCreativeRequest;

use crate::web::forms::{AdForm, AdGenerateForm, AdNewQuery, ListQuery};
use crate::web::helpers::{
    flash_url, parse_datetime_field, redirect, render, require_user, trimmed,
};
use crate::web::state::AppState;
use crate::web::templates::{AdEditTemplate, AdNewTemplate, AdPrefill, AdsListTemplate, PlacementSlot};

/// Groups every ad under its placement, in the fixed placement order, so
/// the screen can show a capacity meter per slot.
fn placement_slots(ads: Vec<Advertisement>) -> Vec<PlacementSlot> {
    let mut by_placement: HashMap<AdPlacement, Vec<Advertisement>> = HashMap::new();
    for ad in ads {
        by_placement.entry(ad.placement).or_default().push(ad);
    }

    AdPlacement::ALL
        .into_iter()
        .map(|placement| {
            let ads = by_placement.remove(&placement).unwrap_or_default();
            let capacity = placement.capacity();
            PlacementSlot {
                full: ads.len() >= capacity,
                placement,
                ads,
                capacity,
            }
        })
        .collect()
}

fn parse_placement(value: &str) -> Result<AdPlacement, AppError> {
    AdPlacement::from_str(value).map_err(AppError::Validation)
}

fn parse_dimension(value: &Option<String>, field: &str) -> Result<Option<i32>, AppError> {
    let Some(raw) = trimmed(value) else {
        return Ok(None);
    };

    raw.parse::<i32>()
        .ok()
        .filter(|n| *n > 0)
        .map(Some)
        .ok_or_else(|| AppError::validation(format!("Invalid {field}")))
}

struct ParsedAdForm {
    create: AdvertisementCreate,
}

fn parse_ad_form(form: &AdForm) -> Result<ParsedAdForm, AppError> {
    if form.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    if form.image_url.trim().is_empty() {
        return Err(AppError::validation("Image URL is required"));
    }
    if form.link_url.trim().is_empty() {
        return Err(AppError::validation("Link URL is required"));
    }

    let placement = parse_placement(&form.placement)?;
    let target_type = AdTargetType::from_str(&form.target_type).map_err(AppError::Validation)?;
    let target_value = trimmed(&form.target_value);
    if target_type != AdTargetType::All && target_value.is_none() {
        return Err(AppError::validation(
            "Target value is required for category and specific-post targeting",
        ));
    }

    let starts_at = parse_datetime_field(&form.starts_at, "start")?;
    let ends_at = parse_datetime_field(&form.ends_at, "end")?;
    if let (Some(start), Some(end)) = (starts_at, ends_at) {
        if end < start {
            return Err(AppError::validation("The validity window ends before it starts"));
        }
    }

    Ok(ParsedAdForm {
        create: AdvertisementCreate {
            title: form.title.trim().to_string(),
            image_url: form.image_url.trim().to_string(),
            alt_text: trimmed(&form.alt_text).unwrap_or_default(),
            link_url: form.link_url.trim().to_string(),
            placement,
            target_type,
            target_value,
            width: parse_dimension(&form.width, "width")?,
            height: parse_dimension(&form.height, "height")?,
            starts_at,
            ends_at,
        },
    })
}

fn datetime_text(value: Option<chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

#[get("/admin/ads")]
pub async fn ads_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let ads = db::list_ads(&state.pool).await?;

    render(AdsListTemplate {
        slots: placement_slots(ads),
        flash: query.flash.clone(),
    })
}

#[get("/admin/ads/new")]
pub async fn ad_new(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<AdNewQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let ads = db::list_ads(&state.pool).await?;

    render(AdNewTemplate {
        prefill: AdPrefill {
            placement: query.placement.clone().unwrap_or_default(),
            ..AdPrefill::default()
        },
        placements: placement_slots(ads),
        flash: query.flash.clone(),
    })
}

/// AI prefill: generates a creative for the chosen placement and re-renders
/// the new-ad form with the fields filled in for review.
#[post("/admin/ads/generate")]
pub async fn ad_generate(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<AdGenerateForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let placement = parse_placement(&form.placement)?;

    let request = AdCreativeRequest {
        placement: placement.to_string(),
        product: trimmed(&form.product),
        notes: trimmed(&form.notes),
    };
    let creative = state.generator.generate_ad(&request).await?;

    let ads = db::list_ads(&state.pool).await?;

    render(AdNewTemplate {
        prefill: AdPrefill {
            title: creative.title,
            image_url: creative.image_url.unwrap_or_default(),
            alt_text: creative.alt_text,
            link_url: creative.link_url.unwrap_or_default(),
            placement: placement.to_string(),
        },
        placements: placement_slots(ads),
        flash: Some("Creative generated. Review before saving.".to_string()),
    })
}

#[post("/admin/ads")]
pub async fn ad_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<AdForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    // Capacity is a soft limit: the screen stops offering "create" when a
    // placement is full, but the route accepts the insert regardless.
    let parsed = parse_ad_form(&form)?;
    db::create_ad(&state.pool, &parsed.create).await?;

    Ok(redirect(&req, &flash_url("/admin/ads", "Ad created")))
}

#[get("/admin/ads/{id}")]
pub async fn ad_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let ad = db::get_ad_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Advertisement"))?;

    render(AdEditTemplate {
        starts_at_text: datetime_text(ad.starts_at),
        ends_at_text: datetime_text(ad.ends_at),
        ad,
        flash: query.flash.clone(),
    })
}

#[post("/admin/ads/{id}")]
pub async fn ad_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<AdForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let id = path.into_inner();
    let parsed = parse_ad_form(&form)?.create;

    let data = AdvertisementUpdate {
        title: Some(parsed.title),
        image_url: Some(parsed.image_url),
        alt_text: Some(parsed.alt_text),
        link_url: Some(parsed.link_url),
        placement: Some(parsed.placement),
        target_type: Some(parsed.target_type),
        target_value: Some(parsed.target_value),
        width: Some(parsed.width),
        height: Some(parsed.height),
        starts_at: Some(parsed.starts_at),
        ends_at: Some(parsed.ends_at),
    };

    db::update_ad(&state.pool, id, &data)
        .await?
        .ok_or(AppError::NotFound("Advertisement"))?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/ads/{id}"), "Saved"),
    ))
}

#[post("/admin/ads/{id}/active")]
pub async fn ad_toggle_active(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let id = path.into_inner();
    let ad = db::get_ad_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Advertisement"))?;

    db::set_ad_active(&state.pool, id, !ad.active)
        .await?
        .ok_or(AppError::NotFound("Advertisement"))?;

    Ok(redirect(&req, "/admin/ads"))
}

#[post("/admin/ads/{id}/delete")]
pub async fn ad_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if !db::delete_ad(&state.pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Advertisement"));
    }

    Ok(redirect(&req, &flash_url("/admin/ads", "Ad deleted")))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(ads_list)
        .service(ad_new)
        .service(ad_generate)
        .service(ad_create)
        .service(ad_edit)
        .service(ad_update)
        .service(ad_toggle_active)
        .service(ad_delete);
}
