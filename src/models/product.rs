use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Product,
    Service,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Service => "service",
        }
    }
}

impl Default for ProductKind {
    fn default() -> Self {
        Self::Product
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" => Ok(Self::Product),
            "service" => Ok(Self::Service),
            _ => Err(format!("invalid product kind: {}", s)),
        }
    }
}

/// Customer quote attached to an offering. Stored as jsonb; decoding through
/// `Json<Vec<Testimonial>>` rejects malformed rows instead of passing them
/// along untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub kind: ProductKind,
    pub description: String,
    pub price_label: String,
    pub features: Json<Vec<String>>,
    pub testimonials: Json<Vec<Testimonial>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub slug: String,
    pub kind: ProductKind,
    pub description: String,
    pub price_label: String,
    pub features: Vec<String>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub kind: Option<ProductKind>,
    pub description: Option<String>,
    pub price_label: Option<String>,
    pub features: Option<Vec<String>>,
    pub testimonials: Option<Vec<Testimonial>>,
}
