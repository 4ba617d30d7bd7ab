use askama::Template;

use brandpress::db::OverviewCounts;
use brandpress::models::{
    AdPlacement, Advertisement, Blog, BuildEvent, Campaign, Company, ContentImage,
    GenerationBatch, GenerationJob, Person, Product, Sop,
};

#[derive(Template)]
#[template(path = "public/index.html")]
pub struct PublicIndexTemplate {
    pub blogs: Vec<Blog>,
    pub banner_ad: Option<Advertisement>,
    pub sidebar_ad: Option<Advertisement>,
}

#[derive(Template)]
#[template(path = "public/blog.html")]
pub struct PublicBlogTemplate {
    pub blog: Blog,
    /// Assembled body: markdown spans plus spliced image/ad blocks.
    pub body_html: String,
    pub sidebar_ads: Vec<Advertisement>,
    pub banner_ad: Option<Advertisement>,
    pub featured_ad: Option<Advertisement>,
    pub bottom_ad: Option<Advertisement>,
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub counts: OverviewCounts,
    pub batches: Vec<GenerationBatch>,
    pub upcoming: Vec<BuildEvent>,
}

#[derive(Template)]
#[template(path = "admin/blogs_list.html")]
pub struct BlogsListTemplate {
    pub blogs: Vec<Blog>,
    pub query: String,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/blog_new.html")]
pub struct BlogNewTemplate {
    pub flash: Option<String>,
}

/// Heading choice offered by the image position selects.
pub struct HeadingOption {
    pub tag: String,
    pub label: String,
}

#[derive(Template)]
#[template(path = "admin/blog_edit.html")]
pub struct BlogEditTemplate {
    pub blog: Blog,
    pub tags_text: String,
    pub image_count: usize,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/blog_images.html")]
pub struct BlogImagesTemplate {
    pub blog: Blog,
    pub images: Vec<ContentImage>,
    pub headings: Vec<HeadingOption>,
    pub flash: Option<String>,
}

pub struct SuggestionRow {
    pub index: usize,
    pub prompt: String,
    pub alt: String,
    pub caption: String,
    pub position: String,
}

#[derive(Template)]
#[template(path = "admin/blog_suggestions.html")]
pub struct BlogSuggestionsTemplate {
    pub blog: Blog,
    pub suggestions: Vec<SuggestionRow>,
}

/// One placement group on the ads screen, with its capacity meter.
pub struct PlacementSlot {
    pub placement: AdPlacement,
    pub ads: Vec<Advertisement>,
    pub capacity: usize,
    pub full: bool,
}

#[derive(Template)]
#[template(path = "admin/ads_list.html")]
pub struct AdsListTemplate {
    pub slots: Vec<PlacementSlot>,
    pub flash: Option<String>,
}

/// Prefill for the new-ad form, either blank or from the AI generator.
#[derive(Default)]
pub struct AdPrefill {
    pub title: String,
    pub image_url: String,
    pub alt_text: String,
    pub link_url: String,
    pub placement: String,
}

#[derive(Template)]
#[template(path = "admin/ad_new.html")]
pub struct AdNewTemplate {
    pub prefill: AdPrefill,
    pub placements: Vec<PlacementSlot>,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/ad_edit.html")]
pub struct AdEditTemplate {
    pub ad: Advertisement,
    pub starts_at_text: String,
    pub ends_at_text: String,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/leads.html")]
pub struct LeadsTemplate {
    pub companies: Vec<Company>,
    pub people: Vec<Person>,
    pub query: String,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/company_edit.html")]
pub struct CompanyEditTemplate {
    pub company: Company,
    pub people: Vec<Person>,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/person_edit.html")]
pub struct PersonEditTemplate {
    pub person: Person,
    pub companies: Vec<Company>,
    pub company_id_text: String,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/products_list.html")]
pub struct ProductsListTemplate {
    pub products: Vec<Product>,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/product_edit.html")]
pub struct ProductEditTemplate {
    pub product: Product,
    pub features_text: String,
    pub testimonials_text: String,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/campaigns_list.html")]
pub struct CampaignsListTemplate {
    pub campaigns: Vec<Campaign>,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/campaign_edit.html")]
pub struct CampaignEditTemplate {
    pub campaign: Campaign,
    pub starts_at_text: String,
    pub ends_at_text: String,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/events_list.html")]
pub struct EventsListTemplate {
    pub events: Vec<BuildEvent>,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/event_edit.html")]
pub struct EventEditTemplate {
    pub event: BuildEvent,
    pub scheduled_at_text: String,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/sops_list.html")]
pub struct SopsListTemplate {
    pub sops: Vec<Sop>,
    pub query: String,
    pub flash: Option<String>,
}

/// Extracted draft shown next to the studio transcript, ready to save.
pub struct SopDraftView {
    pub title: String,
    pub category: String,
    pub summary: String,
    pub steps_text: String,
}

#[derive(Template)]
#[template(path = "admin/sop_studio.html")]
pub struct SopStudioTemplate {
    pub transcript: String,
    pub draft: Option<SopDraftView>,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/sop_edit.html")]
pub struct SopEditTemplate {
    pub sop: Sop,
    pub steps_text: String,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/batches_list.html")]
pub struct BatchesListTemplate {
    pub batches: Vec<GenerationBatch>,
    pub flash: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/batch.html")]
pub struct BatchTemplate {
    pub batch: GenerationBatch,
    pub jobs: Vec<GenerationJob>,
}
