use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{GenerationBatch, GenerationJob, ImageSpec};

pub async fn create_batch(
    pool: &PgPool,
    kind: &str,
    total: i32,
) -> Result<GenerationBatch, sqlx::Error> {
    sqlx::query_as::<_, GenerationBatch>(
        r#"
        INSERT INTO generation_batches (kind, total)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(kind)
    .bind(total)
    .fetch_one(pool)
    .await
}

pub async fn create_job(
    pool: &PgPool,
    batch_id: Uuid,
    blog_id: Option<Uuid>,
    spec: &ImageSpec,
) -> Result<GenerationJob, sqlx::Error> {
    sqlx::query_as::<_, GenerationJob>(
        r#"
        INSERT INTO generation_jobs (batch_id, blog_id, spec)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(batch_id)
    .bind(blog_id)
    .bind(Json(spec))
    .fetch_one(pool)
    .await
}

pub async fn get_batch(pool: &PgPool, id: Uuid) -> Result<Option<GenerationBatch>, sqlx::Error> {
    sqlx::query_as::<_, GenerationBatch>(
        r#"
        SELECT *
        FROM generation_batches
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_recent_batches(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<GenerationBatch>, sqlx::Error> {
    sqlx::query_as::<_, GenerationBatch>(
        r#"
        SELECT *
        FROM generation_batches
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn list_jobs_for_batch(
    pool: &PgPool,
    batch_id: Uuid,
) -> Result<Vec<GenerationJob>, sqlx::Error> {
    sqlx::query_as::<_, GenerationJob>(
        r#"
        SELECT *
        FROM generation_jobs
        WHERE batch_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(batch_id)
    .fetch_all(pool)
    .await
}

pub async fn mark_batch_running(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE generation_batches
        SET status = 'running'
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Flips every queued job of the batch to running in one statement; the
/// worker runs them concurrently, so per-job transitions would be noise.
pub async fn mark_batch_jobs_running(pool: &PgPool, batch_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE generation_jobs
        SET status = 'running'
        WHERE batch_id = $1 AND status = 'queued'
        "#,
    )
    .bind(batch_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn mark_job_succeeded(
    pool: &PgPool,
    id: Uuid,
    result_url: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE generation_jobs
        SET status = 'succeeded', result_url = $1, finished_at = now()
        WHERE id = $2
        "#,
    )
    .bind(result_url)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn mark_job_failed(pool: &PgPool, id: Uuid, error: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE generation_jobs
        SET status = 'failed', error = $1, finished_at = now()
        WHERE id = $2
        "#,
    )
    .bind(error)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Settles the batch: recomputes the success/failure tallies from the job
/// rows and stamps the finish time.
pub async fn complete_batch(pool: &PgPool, id: Uuid) -> Result<Option<GenerationBatch>, sqlx::Error> {
    sqlx::query_as::<_, GenerationBatch>(
        r#"
        UPDATE generation_batches b
        SET
            status = 'completed',
            succeeded = (
                SELECT count(*) FROM generation_jobs j
                WHERE j.batch_id = b.id AND j.status = 'succeeded'
            ),
            failed = (
                SELECT count(*) FROM generation_jobs j
                WHERE j.batch_id = b.id AND j.status = 'failed'
            ),
            finished_at = now()
        WHERE b.id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
