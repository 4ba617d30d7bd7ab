use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Campaign, CampaignCreate, CampaignStatus, CampaignUpdate};

pub async fn create_campaign(pool: &PgPool, data: &CampaignCreate) -> Result<Campaign, sqlx::Error> {
    sqlx::query_as::<_, Campaign>(
        r#"
        INSERT INTO campaigns (name, channel, description, budget_label, starts_at, ends_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.channel)
    .bind(&data.description)
    .bind(&data.budget_label)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .fetch_one(pool)
    .await
}

pub async fn list_campaigns(pool: &PgPool) -> Result<Vec<Campaign>, sqlx::Error> {
    sqlx::query_as::<_, Campaign>(
        r#"
        SELECT *
        FROM campaigns
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_campaign_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Campaign>, sqlx::Error> {
    sqlx::query_as::<_, Campaign>(
        r#"
        SELECT *
        FROM campaigns
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_campaign(
    pool: &PgPool,
    id: Uuid,
    data: &CampaignUpdate,
) -> Result<Option<Campaign>, sqlx::Error> {
    sqlx::query_as::<_, Campaign>(
        r#"
        UPDATE campaigns
        SET
            name = COALESCE($1, name),
            status = COALESCE($2, status),
            channel = COALESCE($3, channel),
            description = COALESCE($4, description),
            budget_label = COALESCE($5, budget_label),
            starts_at = CASE WHEN $6 THEN $7 ELSE starts_at END,
            ends_at = CASE WHEN $8 THEN $9 ELSE ends_at END,
            edited_at = now()
        WHERE id = $10
        RETURNING *
        "#,
    )
    .bind(data.name.as_deref())
    .bind(data.status.map(|s| s.as_str()))
    .bind(data.channel.as_deref())
    .bind(data.description.as_deref())
    .bind(data.budget_label.as_deref())
    .bind(data.starts_at.is_some())
    .bind(data.starts_at.flatten())
    .bind(data.ends_at.is_some())
    .bind(data.ends_at.flatten())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn set_campaign_status(
    pool: &PgPool,
    id: Uuid,
    status: CampaignStatus,
) -> Result<Option<Campaign>, sqlx::Error> {
    sqlx::query_as::<_, Campaign>(
        r#"
        UPDATE campaigns
        SET status = $1, edited_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_campaign(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM campaigns
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
