use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Sop, SopCreate, SopUpdate};

pub async fn create_sop(pool: &PgPool, data: &SopCreate) -> Result<Sop, sqlx::Error> {
    sqlx::query_as::<_, Sop>(
        r#"
        INSERT INTO sops (title, category, summary, steps, source_transcript)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&data.title)
    .bind(&data.category)
    .bind(&data.summary)
    .bind(Json(&data.steps))
    .bind(&data.source_transcript)
    .fetch_one(pool)
    .await
}

pub async fn list_sops(pool: &PgPool, query: Option<&str>) -> Result<Vec<Sop>, sqlx::Error> {
    let q = query.map(str::trim).filter(|s| !s.is_empty());

    if let Some(q) = q {
        let pattern = format!("%{}%", q);
        sqlx::query_as::<_, Sop>(
            r#"
            SELECT *
            FROM sops
            WHERE title ILIKE $1 OR category ILIKE $1 OR summary ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, Sop>(
            r#"
            SELECT *
            FROM sops
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }
}

pub async fn get_sop_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Sop>, sqlx::Error> {
    sqlx::query_as::<_, Sop>(
        r#"
        SELECT *
        FROM sops
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_sop(pool: &PgPool, id: Uuid, data: &SopUpdate) -> Result<Option<Sop>, sqlx::Error> {
    sqlx::query_as::<_, Sop>(
        r#"
        UPDATE sops
        SET
            title = COALESCE($1, title),
            category = COALESCE($2, category),
            summary = COALESCE($3, summary),
            steps = COALESCE($4, steps),
            edited_at = now()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(data.title.as_deref())
    .bind(data.category.as_deref())
    .bind(data.summary.as_deref())
    .bind(data.steps.as_ref().map(Json))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_sop(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM sops
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
