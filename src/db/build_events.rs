use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{BuildEvent, BuildEventCreate, BuildEventUpdate};

pub async fn create_build_event(
    pool: &PgPool,
    data: &BuildEventCreate,
) -> Result<BuildEvent, sqlx::Error> {
    sqlx::query_as::<_, BuildEvent>(
        r#"
        INSERT INTO build_events (title, description, stream_url, scheduled_at, duration_minutes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.stream_url)
    .bind(data.scheduled_at)
    .bind(data.duration_minutes)
    .fetch_one(pool)
    .await
}

/// Soonest first, so the admin list reads as an agenda.
pub async fn list_build_events(pool: &PgPool) -> Result<Vec<BuildEvent>, sqlx::Error> {
    sqlx::query_as::<_, BuildEvent>(
        r#"
        SELECT *
        FROM build_events
        ORDER BY scheduled_at
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn list_upcoming_events(pool: &PgPool) -> Result<Vec<BuildEvent>, sqlx::Error> {
    sqlx::query_as::<_, BuildEvent>(
        r#"
        SELECT *
        FROM build_events
        WHERE published = true AND scheduled_at > now()
        ORDER BY scheduled_at
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_build_event_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<BuildEvent>, sqlx::Error> {
    sqlx::query_as::<_, BuildEvent>(
        r#"
        SELECT *
        FROM build_events
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_build_event(
    pool: &PgPool,
    id: Uuid,
    data: &BuildEventUpdate,
) -> Result<Option<BuildEvent>, sqlx::Error> {
    sqlx::query_as::<_, BuildEvent>(
        r#"
        UPDATE build_events
        SET
            title = COALESCE($1, title),
            description = COALESCE($2, description),
            stream_url = COALESCE($3, stream_url),
            scheduled_at = COALESCE($4, scheduled_at),
            duration_minutes = COALESCE($5, duration_minutes),
            edited_at = now()
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(data.title.as_deref())
    .bind(data.description.as_deref())
    .bind(data.stream_url.as_deref())
    .bind(data.scheduled_at)
    .bind(data.duration_minutes)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn set_build_event_published(
    pool: &PgPool,
    id: Uuid,
    published: bool,
) -> Result<Option<BuildEvent>, sqlx::Error> {
    sqlx::query_as::<_, BuildEvent>(
        r#"
        UPDATE build_events
        SET published = $1, edited_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(published)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_build_event(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM build_events
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
