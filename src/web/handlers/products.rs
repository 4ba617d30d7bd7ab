use std::str::FromStr;

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use brandpress::common::AppError;
use brandpress::db;
use brandpress::models::{ProductCreate, ProductKind, ProductUpdate, Testimonial};

use crate::web::forms::{ListQuery, ProductForm};
use crate::web::helpers::{
    flash_url, is_unique_violation, parse_lines, redirect, render, require_user, trimmed,
};
use crate::web::security::validate_slug;
use crate::web::state::AppState;
use crate::web::templates::{ProductEditTemplate, ProductsListTemplate};

/// Testimonial editor rows: `quote :: author :: company?`, one per line.
/// Lines without an author are dropped rather than saved half-empty.
fn parse_testimonials(value: &str) -> Vec<Testimonial> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut parts = line.splitn(3, "::").map(str::trim);
            let quote = parts.next()?.to_string();
            let author = parts.next()?.to_string();
            if quote.is_empty() || author.is_empty() {
                return None;
            }
            Some(Testimonial {
                quote,
                author,
                company: parts.next().map(str::to_string).filter(|c| !c.is_empty()),
            })
        })
        .collect()
}

fn testimonials_text(testimonials: &[Testimonial]) -> String {
    testimonials
        .iter()
        .map(|t| match &t.company {
            Some(company) => format!("{} :: {} :: {}", t.quote, t.author, company),
            None => format!("{} :: {}", t.quote, t.author),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_product_form(form: &ProductForm) -> Result<ProductCreate, AppError> {
    if form.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if !validate_slug(form.slug.trim()) {
        return Err(AppError::validation(
            "Slug must be lowercase letters, digits, hyphens or underscores",
        ));
    }
    let kind = ProductKind::from_str(&form.kind).map_err(AppError::Validation)?;

    Ok(ProductCreate {
        name: form.name.trim().to_string(),
        slug: form.slug.trim().to_string(),
        kind,
        description: trimmed(&form.description).unwrap_or_default(),
        price_label: trimmed(&form.price_label).unwrap_or_default(),
        features: parse_lines(form.features.as_deref().unwrap_or_default()),
        testimonials: parse_testimonials(form.testimonials.as_deref().unwrap_or_default()),
    })
}

#[get("/admin/products")]
pub async fn products_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let products = db::list_products(&state.pool).await?;

    render(ProductsListTemplate {
        products,
        flash: query.flash.clone(),
    })
}

#[post("/admin/products")]
pub async fn product_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ProductForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let data = parse_product_form(&form)?;

    match db::create_product(&state.pool, &data).await {
        Ok(_) => {}
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::conflict(format!(
                "An offering with slug \"{}\" already exists",
                data.slug
            )));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(redirect(&req, &flash_url("/admin/products", "Offering created")))
}

#[get("/admin/products/{id}")]
pub async fn product_edit(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let product = db::get_product_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    render(ProductEditTemplate {
        features_text: product.features.0.join("\n"),
        testimonials_text: testimonials_text(&product.testimonials.0),
        product,
        flash: query.flash.clone(),
    })
}

#[post("/admin/products/{id}")]
pub async fn product_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<ProductForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let id = path.into_inner();
    let parsed = parse_product_form(&form)?;

    let data = ProductUpdate {
        name: Some(parsed.name),
        slug: Some(parsed.slug),
        kind: Some(parsed.kind),
        description: Some(parsed.description),
        price_label: Some(parsed.price_label),
        features: Some(parsed.features),
        testimonials: Some(parsed.testimonials),
    };

    let updated = match db::update_product(&state.pool, id, &data).await {
        Ok(updated) => updated,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::conflict("That slug is already taken"));
        }
        Err(e) => return Err(e.into()),
    };
    updated.ok_or(AppError::NotFound("Product"))?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/products/{id}"), "Saved"),
    ))
}

#[post("/admin/products/{id}/active")]
pub async fn product_toggle_active(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let id = path.into_inner();
    let product = db::get_product_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    db::set_product_active(&state.pool, id, !product.active)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    Ok(redirect(&req, "/admin/products"))
}

#[post("/admin/products/{id}/delete")]
pub async fn product_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if !db::delete_product(&state.pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Product"));
    }

    Ok(redirect(&req, &flash_url("/admin/products", "Offering deleted")))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(products_list)
        .service(product_create)
        .service(product_edit)
        .service(product_update)
        .service(product_toggle_active)
        .service(product_delete);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testimonial_lines_round_trip() {
        let text = "Great tool :: Ada :: Initech\nJust works :: Grace";
        let parsed = parse_testimonials(text);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].company.as_deref(), Some("Initech"));
        assert_eq!(parsed[1].company, None);
        assert_eq!(testimonials_text(&parsed), text);
    }

    #[test]
    fn testimonial_without_author_is_dropped() {
        assert!(parse_testimonials("only a quote").is_empty());
        assert!(parse_testimonials(" :: author-no-quote").is_empty());
    }
}
