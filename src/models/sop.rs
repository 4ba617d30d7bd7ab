use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One step of a standard operating procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SopStep {
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

/// A standard operating procedure extracted from a conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sop {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub steps: Json<Vec<SopStep>>,
    pub source_transcript: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SopCreate {
    pub title: String,
    pub category: String,
    pub summary: String,
    pub steps: Vec<SopStep>,
    pub source_transcript: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SopUpdate {
    pub title: Option<String>,
    pub category: Option<String>,
    pub summary: Option<String>,
    pub steps: Option<Vec<SopStep>>,
}
