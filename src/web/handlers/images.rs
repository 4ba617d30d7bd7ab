use actix_web::{get, post, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use brandpress::common::AppError;
use brandpress::content::outline;
use brandpress::db;
use brandpress::models::{
    parse_position_tag, position_tag, ContentImageCreate, ContentImageUpdate, ImageSpec,
};

use crate::web::forms::{ContentImageForm, ImageGenerateForm, ListQuery, SuggestionPickForm};
use crate::web::helpers::{flash_url, redirect, render, require_user, trimmed};
use crate::web::state::AppState;
use crate::web::templates::{BlogImagesTemplate, BlogSuggestionsTemplate, HeadingOption, SuggestionRow};

fn heading_options(content: &str) -> Vec<HeadingOption> {
    outline(content)
        .into_iter()
        .map(|h| HeadingOption {
            tag: position_tag(h.ordinal),
            label: format!("After heading {}: {}", h.ordinal, h.text),
        })
        .collect()
}

fn validate_position(tag: &str) -> Result<(), AppError> {
    if parse_position_tag(tag).is_none() {
        return Err(AppError::validation(
            "Position must be an after_heading_<N> tag",
        ));
    }

    Ok(())
}

#[get("/admin/blogs/{id}/images")]
pub async fn images_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let blog = db::get_blog_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Blog"))?;
    let images = db::list_images_for_blog(&state.pool, blog.id).await?;

    render(BlogImagesTemplate {
        headings: heading_options(&blog.content),
        blog,
        images,
        flash: query.flash.clone(),
    })
}

#[post("/admin/blogs/{id}/images")]
pub async fn image_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<ContentImageForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let blog_id = path.into_inner();
    if form.url.trim().is_empty() {
        return Err(AppError::validation("Image URL is required"));
    }
    validate_position(&form.position)?;

    let data = ContentImageCreate {
        blog_id,
        url: form.url.trim().to_string(),
        alt_text: trimmed(&form.alt_text).unwrap_or_default(),
        caption: trimmed(&form.caption),
        position: form.position.clone(),
    };
    db::create_content_image(&state.pool, &data).await?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/blogs/{blog_id}/images"), "Image added"),
    ))
}

#[post("/admin/images/{id}")]
pub async fn image_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<ContentImageForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    validate_position(&form.position)?;

    if form.url.trim().is_empty() {
        return Err(AppError::validation("Image URL is required"));
    }

    let data = ContentImageUpdate {
        url: Some(form.url.trim().to_string()),
        alt_text: Some(trimmed(&form.alt_text).unwrap_or_default()),
        caption: Some(trimmed(&form.caption)),
        position: Some(form.position.clone()),
    };

    let image = db::update_content_image(&state.pool, path.into_inner(), &data)
        .await?
        .ok_or(AppError::NotFound("Image"))?;

    Ok(redirect(
        &req,
        &flash_url(
            &format!("/admin/blogs/{}/images", image.blog_id),
            "Image updated",
        ),
    ))
}

#[post("/admin/images/{id}/delete")]
pub async fn image_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let blog_id = db::delete_content_image(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Image"))?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/blogs/{blog_id}/images"), "Image deleted"),
    ))
}

/// Single synchronous generation: the operator waits for this one.
#[post("/admin/blogs/{id}/images/generate")]
pub async fn image_generate(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<ImageGenerateForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let blog_id = path.into_inner();
    if form.prompt.trim().is_empty() {
        return Err(AppError::validation("Prompt is required"));
    }
    validate_position(&form.position)?;

    let mut spec = ImageSpec::new(form.prompt.trim());
    spec.alt = trimmed(&form.alt_text).unwrap_or_default();
    spec.caption = trimmed(&form.caption);
    spec.position = Some(form.position.clone());
    if let Some(size) = trimmed(&form.size) {
        spec.size = size;
    }
    if let Some(quality) = trimmed(&form.quality) {
        spec.quality = quality;
    }
    spec.reference_url = trimmed(&form.reference_url);

    let image = state.generator.generate_image(&spec).await?;

    let data = ContentImageCreate {
        blog_id,
        url: image.url,
        alt_text: spec.alt.clone(),
        caption: spec.caption.clone(),
        position: form.position.clone(),
    };
    db::create_content_image(&state.pool, &data).await?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/blogs/{blog_id}/images"), "Image generated"),
    ))
}

/// Asks the generation service to analyze the blog content and renders the
/// suggestion picker.
#[post("/admin/blogs/{id}/images/suggest")]
pub async fn image_suggest(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let blog = db::get_blog_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Blog"))?;

    let specs = state
        .generator
        .suggest_blog_images(&blog.title, &blog.content)
        .await?;

    let suggestions = specs
        .into_iter()
        .enumerate()
        .map(|(index, spec)| SuggestionRow {
            index,
            prompt: spec.prompt,
            alt: spec.alt,
            caption: spec.caption.unwrap_or_default(),
            position: spec.position.unwrap_or_else(|| position_tag(1)),
        })
        .collect();

    render(BlogSuggestionsTemplate { blog, suggestions })
}

/// Submits the picked suggestions as one generation batch and sends the
/// operator to the batch page to watch it settle.
#[post("/admin/blogs/{id}/images/bulk")]
pub async fn image_bulk(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&body)
        .map_err(|_| AppError::validation("Malformed suggestion form"))?;
    let form = SuggestionPickForm::from_pairs(pairs);

    let blog_id = path.into_inner();
    db::get_blog_by_id(&state.pool, blog_id)
        .await?
        .ok_or(AppError::NotFound("Blog"))?;

    let mut specs = Vec::new();
    for &index in &form.picked {
        let Some(prompt) = form.prompt.get(index) else {
            continue;
        };

        let mut spec = ImageSpec::new(prompt.trim());
        spec.alt = form.alt.get(index).cloned().unwrap_or_default();
        spec.caption = form
            .caption
            .get(index)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        spec.position = form.position.get(index).cloned();
        specs.push(spec);
    }

    let batch = state.jobs.submit(Some(blog_id), specs).await?;

    Ok(redirect(
        &req,
        &flash_url(
            &format!("/admin/batches/{}", batch.id),
            "Generation started",
        ),
    ))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(images_list)
        .service(image_create)
        .service(image_update)
        .service(image_delete)
        .service(image_generate)
        .service(image_suggest)
        .service(image_bulk);
}
