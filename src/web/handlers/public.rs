use actix_web::{get, web, HttpResponse};
use chrono::Utc;

use brandpress::common::AppError;
use brandpress::content::{render_annotated, InlineAd, InlineImage};
use brandpress::db;
use brandpress::models::{AdPlacement, Advertisement};

use crate::web::helpers::render;
use crate::web::state::AppState;
use crate::web::templates::{PublicBlogTemplate, PublicIndexTemplate};

async fn placement_ads(
    state: &AppState,
    placement: AdPlacement,
    category: &str,
    slug: &str,
) -> Result<Vec<Advertisement>, AppError> {
    let now = Utc::now();
    Ok(db::list_active_by_placement(&state.pool, placement)
        .await?
        .into_iter()
        .filter(|ad| ad.eligible_for_blog(category, slug, now))
        .collect())
}

#[get("/")]
pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let blogs = db::list_published_blogs(&state.pool).await?;

    let now = Utc::now();
    let pick = |mut ads: Vec<Advertisement>| -> Option<Advertisement> {
        ads.retain(|ad| ad.in_window(now));
        ads.into_iter().next()
    };

    let banner_ad = pick(db::list_active_by_placement(&state.pool, AdPlacement::BlogListBanner).await?);
    let sidebar_ad =
        pick(db::list_active_by_placement(&state.pool, AdPlacement::BlogListSidebar).await?);

    render(PublicIndexTemplate {
        blogs,
        banner_ad,
        sidebar_ad,
    })
}

#[get("/blog/{slug}")]
pub async fn blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let blog = db::get_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::NotFound("Blog"))?;

    // The denormalized cache on the blog row is the read path here; the
    // content_images table itself only backs the admin screens.
    let images: Vec<InlineImage> = blog.content_images.0.iter().map(InlineImage::from).collect();

    let inline: Vec<InlineAd> = placement_ads(&state, AdPlacement::Inline, &blog.category, &blog.slug)
        .await?
        .iter()
        .map(InlineAd::from)
        .collect();

    let body_html = render_annotated(&blog.content, &images, &inline, &mut rand::rng());

    let sidebar_ads =
        placement_ads(&state, AdPlacement::Sidebar, &blog.category, &blog.slug).await?;
    let banner_ad = placement_ads(&state, AdPlacement::Banner, &blog.category, &blog.slug)
        .await?
        .into_iter()
        .next();
    let featured_ad = placement_ads(&state, AdPlacement::Featured, &blog.category, &blog.slug)
        .await?
        .into_iter()
        .next();
    let bottom_ad = placement_ads(&state, AdPlacement::Bottom, &blog.category, &blog.slug)
        .await?
        .into_iter()
        .next();

    render(PublicBlogTemplate {
        blog,
        body_html,
        sidebar_ads,
        banner_ad,
        featured_ad,
        bottom_ad,
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(blog);
}
