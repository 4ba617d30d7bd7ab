use chrono::{DateTime, Utc};
use field_names::FieldNames;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub website: String,
    pub industry: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCreate {
    pub name: String,
    pub website: String,
    pub industry: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub role: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonCreate {
    pub company_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub role: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonUpdate {
    pub company_id: Option<Option<Uuid>>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub notes: Option<String>,
}

/// Filter/sort parameters for the people listing. The first block mirrors
/// sortable columns; `FieldNames` keeps the sort whitelist in sync with the
/// struct.
#[derive(Debug, Default, FieldNames)]
#[field_names(vis = "pub")]
pub struct PersonQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub company_id: Option<Uuid>,
    //------------------------------------
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<Vec<Option<bool>>>,
}

impl PersonQuery {
    pub fn fields() -> &'static [&'static str] {
        &Self::FIELDS
    }

    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self {
                name: None,
                email: None,
                role: None,
                company_id: None,
                ..
            }
        )
    }
}
