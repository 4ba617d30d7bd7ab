use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use brandpress::common::AppError;
use brandpress::content::{assemble, render_segments, InlineAd, InlineImage};
use brandpress::db;
use brandpress::models::{AdPlacement, BlogCreate, BlogUpdate};
use brandpress::services::BlogDraftRequest;

use crate::web::forms::{AutosaveForm, BlogForm, BlogGenerateForm, BlogPreviewForm, ListQuery};
use crate::web::helpers::{
    flash_url, iframe_srcdoc, is_unique_violation, parse_tags, redirect, render, require_user,
    trimmed,
};
use crate::web::security::validate_slug;
use crate::web::state::AppState;
use crate::web::templates::{BlogEditTemplate, BlogNewTemplate, BlogsListTemplate};

fn validate_blog_form(form: &BlogForm) -> Result<(), AppError> {
    if form.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    if !validate_slug(form.slug.trim()) {
        return Err(AppError::validation(
            "Slug must be lowercase letters, digits, hyphens or underscores",
        ));
    }
    if form.content.trim().is_empty() {
        return Err(AppError::validation("Content is required"));
    }

    Ok(())
}

/// Rough reading-time label from the word count, used when the form leaves
/// the field blank.
fn estimate_read_time(content: &str) -> String {
    let words = content.split_whitespace().count();
    let minutes = (words / 200).max(1);
    format!("{minutes} min read")
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

#[get("/admin/blogs")]
pub async fn blogs_list(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let q = query.q.clone().unwrap_or_default();
    let blogs = db::list_blogs(&state.pool, trimmed(&query.q).as_deref()).await?;

    render(BlogsListTemplate {
        blogs,
        query: q,
        flash: query.flash.clone(),
    })
}

#[get("/admin/blogs/new")]
pub async fn blog_new(
    req: HttpRequest,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    render(BlogNewTemplate {
        flash: query.flash.clone(),
    })
}

#[post("/admin/blogs")]
pub async fn blog_create(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<BlogForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    validate_blog_form(&form)?;

    let data = BlogCreate {
        title: form.title.trim().to_string(),
        slug: form.slug.trim().to_string(),
        content: form.content.clone(),
        excerpt: trimmed(&form.excerpt).unwrap_or_default(),
        category: trimmed(&form.category).unwrap_or_else(|| "general".to_string()),
        author: trimmed(&form.author).unwrap_or_default(),
        read_time: trimmed(&form.read_time).unwrap_or_else(|| estimate_read_time(&form.content)),
        hero_image_url: trimmed(&form.hero_image_url),
        tags: parse_tags(form.tags.as_deref().unwrap_or_default()),
    };

    let blog = match db::create_blog(&state.pool, &data).await {
        Ok(blog) => blog,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::conflict(format!(
                "A blog with slug \"{}\" already exists",
                data.slug
            )));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/blogs/{}", blog.id), "Blog created"),
    ))
}

#[post("/admin/blogs/generate")]
pub async fn blog_generate(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<BlogGenerateForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if form.topic.trim().is_empty() {
        return Err(AppError::validation("Topic is required"));
    }

    let request = BlogDraftRequest {
        topic: form.topic.trim().to_string(),
        category: trimmed(&form.category),
        product: trimmed(&form.product),
        notes: trimmed(&form.notes),
    };

    let draft = state.generator.generate_blog(&request).await?;

    let data = BlogCreate {
        slug: slugify(&draft.title),
        title: draft.title,
        excerpt: draft.excerpt,
        read_time: draft
            .read_time
            .unwrap_or_else(|| estimate_read_time(&draft.content)),
        category: draft
            .category
            .or_else(|| trimmed(&form.category))
            .unwrap_or_else(|| "general".to_string()),
        author: String::new(),
        hero_image_url: None,
        tags: draft.tags,
        content: draft.content,
    };

    let blog = match db::create_blog(&state.pool, &data).await {
        Ok(blog) => blog,
        Err(e) if is_unique_violation(&e) => {
            // Drafts for the same topic collide on the slugified title;
            // suffix a short random id and retry once.
            let retry = BlogCreate {
                slug: format!("{}-{}", data.slug, &Uuid::new_v4().to_string()[..8]),
                ..data
            };
            db::create_blog(&state.pool, &retry).await?
        }
        Err(e) => return Err(e.into()),
    };

    Ok(redirect(
        &req,
        &flash_url(
            &format!("/admin/blogs/{}", blog.id),
            "Draft generated. Review before publishing.",
        ),
    ))
}

#[get("/admin/blogs/{id}")]
pub async fn blog_edit(
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

    render(BlogEditTemplate {
        tags_text: blog.tag_line(),
        image_count: blog.content_images.0.len(),
        blog,
        flash: query.flash.clone(),
    })
}

#[post("/admin/blogs/{id}")]
pub async fn blog_update(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<BlogForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    validate_blog_form(&form)?;
    let id = path.into_inner();

    let data = BlogUpdate {
        title: Some(form.title.trim().to_string()),
        slug: Some(form.slug.trim().to_string()),
        content: Some(form.content.clone()),
        excerpt: Some(trimmed(&form.excerpt).unwrap_or_default()),
        category: trimmed(&form.category),
        author: Some(trimmed(&form.author).unwrap_or_default()),
        read_time: Some(
            trimmed(&form.read_time).unwrap_or_else(|| estimate_read_time(&form.content)),
        ),
        hero_image_url: Some(trimmed(&form.hero_image_url)),
        tags: Some(parse_tags(form.tags.as_deref().unwrap_or_default())),
    };

    let updated = match db::update_blog(&state.pool, id, &data).await {
        Ok(updated) => updated,
        Err(e) if is_unique_violation(&e) => {
            return Err(AppError::conflict("That slug is already taken"));
        }
        Err(e) => return Err(e.into()),
    };
    updated.ok_or(AppError::NotFound("Blog"))?;

    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/blogs/{id}"), "Saved"),
    ))
}

/// Editor autosave: content only, never touches the published flag. HTMX
/// swaps the returned span into the status slot.
#[post("/admin/blogs/{id}/autosave")]
pub async fn blog_autosave(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<AutosaveForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let blog = db::autosave_blog_content(&state.pool, path.into_inner(), &form.content)
        .await?
        .ok_or(AppError::NotFound("Blog"))?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<span class=\"muted\">Autosaved at {}</span>",
            blog.edited_at.format("%H:%M:%S")
        )))
}

#[post("/admin/blogs/{id}/publish")]
pub async fn blog_publish(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let id = path.into_inner();
    let blog = db::get_blog_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Blog"))?;

    let blog = db::set_blog_published(&state.pool, id, !blog.published)
        .await?
        .ok_or(AppError::NotFound("Blog"))?;

    let message = if blog.published {
        "Published"
    } else {
        "Unpublished"
    };
    Ok(redirect(
        &req,
        &flash_url(&format!("/admin/blogs/{id}"), message),
    ))
}

#[post("/admin/blogs/{id}/feature")]
pub async fn blog_feature(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let id = path.into_inner();
    let blog = db::get_blog_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound("Blog"))?;

    db::set_blog_featured(&state.pool, id, !blog.featured)
        .await?
        .ok_or(AppError::NotFound("Blog"))?;

    Ok(redirect(&req, &format!("/admin/blogs/{id}")))
}

#[post("/admin/blogs/{id}/delete")]
pub async fn blog_delete(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    if !db::delete_blog(&state.pool, path.into_inner()).await? {
        return Err(AppError::NotFound("Blog"));
    }

    Ok(redirect(&req, &flash_url("/admin/blogs", "Blog deleted")))
}

/// Live preview: assembles the posted (possibly unsaved) content with the
/// blog's stored images and the inline ads eligible for it, and returns a
/// sandboxed iframe fragment for HTMX to swap in.
#[post("/admin/blogs/{id}/preview")]
pub async fn blog_preview(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<BlogPreviewForm>,
) -> Result<HttpResponse, AppError> {
    if let Err(resp) = require_user(&req) {
        return Ok(resp);
    }

    let blog = db::get_blog_by_id(&state.pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Blog"))?;

    let content = form.content.clone().unwrap_or_else(|| blog.content.clone());
    let category = trimmed(&form.category).unwrap_or_else(|| blog.category.clone());
    let slug = trimmed(&form.slug).unwrap_or_else(|| blog.slug.clone());

    let images: Vec<InlineImage> = db::list_images_for_blog(&state.pool, blog.id)
        .await?
        .iter()
        .map(InlineImage::from)
        .collect();

    let now = Utc::now();
    let ads: Vec<InlineAd> = db::list_active_by_placement(&state.pool, AdPlacement::Inline)
        .await?
        .iter()
        .filter(|ad| ad.eligible_for_blog(&category, &slug, now))
        .map(InlineAd::from)
        .collect();

    let segments = assemble(&content, &images, &ads, &mut rand::rng());
    let body = format!(
        "<link rel=\"stylesheet\" href=\"/static/app.css\"><article class=\"prose\">{}</article>",
        render_segments(&segments)
    );

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(iframe_srcdoc(&body)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(blogs_list)
        .service(blog_new)
        .service(blog_generate)
        .service(blog_create)
        .service(blog_edit)
        .service(blog_update)
        .service(blog_autosave)
        .service(blog_publish)
        .service(blog_feature)
        .service(blog_delete)
        .service(blog_preview);
}
