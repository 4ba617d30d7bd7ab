use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A content image owned by a blog. `position` is a tag of the form
/// `after_heading_<N>` (1-based heading ordinal); a tag pointing past the
/// last heading of the blog is dead data, never an error.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContentImage {
    pub id: Uuid,
    pub blog_id: Uuid,
    pub url: String,
    pub alt_text: String,
    pub caption: Option<String>,
    pub position: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentImageCreate {
    pub blog_id: Uuid,
    pub url: String,
    pub alt_text: String,
    pub caption: Option<String>,
    pub position: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentImageUpdate {
    pub url: Option<String>,
    pub alt_text: Option<String>,
    pub caption: Option<Option<String>>,
    pub position: Option<String>,
}

const POSITION_PREFIX: &str = "after_heading_";

/// Parse an `after_heading_<N>` tag into its heading ordinal. Anything
/// malformed (wrong prefix, empty or non-numeric suffix, ordinal zero)
/// yields `None` and the tag simply never fires.
pub fn parse_position_tag(tag: &str) -> Option<u32> {
    let n = tag.strip_prefix(POSITION_PREFIX)?;
    match n.parse::<u32>() {
        Ok(ordinal) if ordinal > 0 => Some(ordinal),
        _ => None,
    }
}

/// Build the canonical tag for a heading ordinal.
pub fn position_tag(ordinal: u32) -> String {
    format!("{POSITION_PREFIX}{ordinal}")
}
