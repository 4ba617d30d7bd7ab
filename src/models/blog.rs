use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One entry of the denormalized `content_images` cache stored on the blog
/// row. Rebuilt by `refresh_blog_content_images` whenever the owning blog's
/// content images change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedContentImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
    pub caption: Option<String>,
    pub position: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub author: String,
    pub read_time: String,
    pub published: bool,
    pub featured: bool,
    pub hero_image_url: Option<String>,
    pub tags: Json<Vec<String>>,
    pub content_images: Json<Vec<CachedContentImage>>,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCreate {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub author: String,
    pub read_time: String,
    pub hero_image_url: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub read_time: Option<String>,
    pub hero_image_url: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl Blog {
    pub fn tag_line(&self) -> String {
        self.tags.0.join(", ")
    }
}
