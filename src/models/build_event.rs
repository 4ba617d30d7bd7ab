use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled live-build session (stream or workshop).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BuildEvent {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub stream_url: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildEventCreate {
    pub title: String,
    pub description: String,
    pub stream_url: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildEventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub stream_url: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
}
