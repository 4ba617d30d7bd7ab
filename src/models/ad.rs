use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Where an advertisement renders. The first five placements live inside or
/// around a blog article; the `blog-list-*` placements belong to the blog
/// index page.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum AdPlacement {
    #[sqlx(rename = "sidebar")]
    #[serde(rename = "sidebar")]
    Sidebar,
    #[sqlx(rename = "banner")]
    #[serde(rename = "banner")]
    Banner,
    #[sqlx(rename = "featured")]
    #[serde(rename = "featured")]
    Featured,
    #[sqlx(rename = "inline")]
    #[serde(rename = "inline")]
    Inline,
    #[sqlx(rename = "bottom")]
    #[serde(rename = "bottom")]
    Bottom,
    #[sqlx(rename = "blog-list-banner")]
    #[serde(rename = "blog-list-banner")]
    BlogListBanner,
    #[sqlx(rename = "blog-list-sidebar")]
    #[serde(rename = "blog-list-sidebar")]
    BlogListSidebar,
}

impl AdPlacement {
    pub const ALL: [AdPlacement; 7] = [
        Self::Sidebar,
        Self::Banner,
        Self::Featured,
        Self::Inline,
        Self::Bottom,
        Self::BlogListBanner,
        Self::BlogListSidebar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sidebar => "sidebar",
            Self::Banner => "banner",
            Self::Featured => "featured",
            Self::Inline => "inline",
            Self::Bottom => "bottom",
            Self::BlogListBanner => "blog-list-banner",
            Self::BlogListSidebar => "blog-list-sidebar",
        }
    }

    /// Soft per-placement capacity. The admin screen stops offering the
    /// create affordance once a placement is full; the routes themselves do
    /// not reject, so a direct POST can still exceed these numbers.
    pub fn capacity(&self) -> usize {
        match self {
            Self::Sidebar => 2,
            Self::Banner => 1,
            Self::Featured => 1,
            Self::Inline => 5,
            Self::Bottom => 1,
            Self::BlogListBanner => 1,
            Self::BlogListSidebar => 1,
        }
    }
}

impl std::fmt::Display for AdPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for AdPlacement {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for AdPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sidebar" => Ok(Self::Sidebar),
            "banner" => Ok(Self::Banner),
            "featured" => Ok(Self::Featured),
            "inline" => Ok(Self::Inline),
            "bottom" => Ok(Self::Bottom),
            "blog-list-banner" => Ok(Self::BlogListBanner),
            "blog-list-sidebar" => Ok(Self::BlogListSidebar),
            _ => Err(format!("invalid ad placement: {}", s)),
        }
    }
}

/// How an advertisement selects the blogs it may appear on. The association
/// is a loose string key (category name or blog slug), not a foreign key.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdTargetType {
    #[default]
    All,
    Category,
    SpecificPost,
}

impl AdTargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category => "category",
            Self::SpecificPost => "specific_post",
        }
    }
}

impl std::fmt::Display for AdTargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AdTargetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "category" => Ok(Self::Category),
            "specific_post" => Ok(Self::SpecificPost),
            _ => Err(format!("invalid ad target type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Advertisement {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub alt_text: String,
    pub link_url: String,
    pub placement: AdPlacement,
    pub target_type: AdTargetType,
    pub target_value: Option<String>,
    pub active: bool,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertisementCreate {
    pub title: String,
    pub image_url: String,
    pub alt_text: String,
    pub link_url: String,
    pub placement: AdPlacement,
    pub target_type: AdTargetType,
    pub target_value: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvertisementUpdate {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub alt_text: Option<String>,
    pub link_url: Option<String>,
    pub placement: Option<AdPlacement>,
    pub target_type: Option<AdTargetType>,
    pub target_value: Option<Option<String>>,
    pub width: Option<Option<i32>>,
    pub height: Option<Option<i32>>,
    pub starts_at: Option<Option<DateTime<Utc>>>,
    pub ends_at: Option<Option<DateTime<Utc>>>,
}

impl Advertisement {
    /// True when `now` falls inside the optional validity window. An open
    /// end means unbounded on that side.
    pub fn in_window(&self, now: DateTime<Utc>) -> bool {
        if self.starts_at.is_some_and(|start| now < start) {
            return false;
        }
        if self.ends_at.is_some_and(|end| now > end) {
            return false;
        }
        true
    }

    /// True when the targeting rule admits the given blog. Category matches
    /// are case-insensitive; specific-post matches compare slugs exactly.
    pub fn targets_blog(&self, category: &str, slug: &str) -> bool {
        match self.target_type {
            AdTargetType::All => true,
            AdTargetType::Category => self
                .target_value
                .as_deref()
                .is_some_and(|v| v.eq_ignore_ascii_case(category)),
            AdTargetType::SpecificPost => {
                self.target_value.as_deref().is_some_and(|v| v == slug)
            }
        }
    }

    /// Active, inside its window, and targeting this blog.
    pub fn eligible_for_blog(&self, category: &str, slug: &str, now: DateTime<Utc>) -> bool {
        self.active && self.in_window(now) && self.targets_blog(category, slug)
    }
}
