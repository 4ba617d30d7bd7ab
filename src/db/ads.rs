use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{AdPlacement, AdTargetType, Advertisement, AdvertisementCreate, AdvertisementUpdate};

pub async fn create_ad(
    pool: &PgPool,
    data: &AdvertisementCreate,
) -> Result<Advertisement, sqlx::Error> {
    sqlx::query_as::<_, Advertisement>(
        r#"
        INSERT INTO advertisements
            (title, image_url, alt_text, link_url, placement, target_type, target_value,
             width, height, starts_at, ends_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(&data.title)
    .bind(&data.image_url)
    .bind(&data.alt_text)
    .bind(&data.link_url)
    .bind(data.placement.as_str())
    .bind(data.target_type.as_str())
    .bind(data.target_value.as_deref())
    .bind(data.width)
    .bind(data.height)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .fetch_one(pool)
    .await
}

pub async fn list_ads(pool: &PgPool) -> Result<Vec<Advertisement>, sqlx::Error> {
    sqlx::query_as::<_, Advertisement>(
        r#"
        SELECT *
        FROM advertisements
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Active ads for one placement, oldest first so slot order is stable.
/// Window and targeting checks stay in Rust where the blog is known.
pub async fn list_active_by_placement(
    pool: &PgPool,
    placement: AdPlacement,
) -> Result<Vec<Advertisement>, sqlx::Error> {
    sqlx::query_as::<_, Advertisement>(
        r#"
        SELECT *
        FROM advertisements
        WHERE placement = $1 AND active = true
        ORDER BY created_at
        "#,
    )
    .bind(placement.as_str())
    .fetch_all(pool)
    .await
}

pub async fn get_ad_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Advertisement>, sqlx::Error> {
    sqlx::query_as::<_, Advertisement>(
        r#"
        SELECT *
        FROM advertisements
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_ad(
    pool: &PgPool,
    id: Uuid,
    data: &AdvertisementUpdate,
) -> Result<Option<Advertisement>, sqlx::Error> {
    sqlx::query_as::<_, Advertisement>(
        r#"
        UPDATE advertisements
        SET
            title = COALESCE($1, title),
            image_url = COALESCE($2, image_url),
            alt_text = COALESCE($3, alt_text),
            link_url = COALESCE($4, link_url),
            placement = COALESCE($5, placement),
            target_type = COALESCE($6, target_type),
            target_value = CASE WHEN $7 THEN $8 ELSE target_value END,
            width = CASE WHEN $9 THEN $10 ELSE width END,
            height = CASE WHEN $11 THEN $12 ELSE height END,
            starts_at = CASE WHEN $13 THEN $14 ELSE starts_at END,
            ends_at = CASE WHEN $15 THEN $16 ELSE ends_at END,
            edited_at = now()
        WHERE id = $17
        RETURNING *
        "#,
    )
    .bind(data.title.as_deref())
    .bind(data.image_url.as_deref())
    .bind(data.alt_text.as_deref())
    .bind(data.link_url.as_deref())
    .bind(data.placement.map(|p| p.as_str()))
    .bind(data.target_type.map(|t| t.as_str()))
    .bind(data.target_value.is_some())
    .bind(data.target_value.clone().flatten())
    .bind(data.width.is_some())
    .bind(data.width.flatten())
    .bind(data.height.is_some())
    .bind(data.height.flatten())
    .bind(data.starts_at.is_some())
    .bind(data.starts_at.flatten())
    .bind(data.ends_at.is_some())
    .bind(data.ends_at.flatten())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn set_ad_active(
    pool: &PgPool,
    id: Uuid,
    active: bool,
) -> Result<Option<Advertisement>, sqlx::Error> {
    sqlx::query_as::<_, Advertisement>(
        r#"
        UPDATE advertisements
        SET active = $1, edited_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(active)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_ad(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM advertisements
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
