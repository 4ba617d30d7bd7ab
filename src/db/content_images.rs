use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ContentImage, ContentImageCreate, ContentImageUpdate};

/// Rebuilds the jsonb cache on the owning blog row. Every mutation in this
/// module calls it so the cache can never drift from the table.
pub async fn refresh_blog_images(pool: &PgPool, blog_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(r#"SELECT refresh_blog_content_images($1)"#)
        .bind(blog_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn create_content_image(
    pool: &PgPool,
    data: &ContentImageCreate,
) -> Result<ContentImage, sqlx::Error> {
    let image = sqlx::query_as::<_, ContentImage>(
        r#"
        INSERT INTO content_images (blog_id, url, alt_text, caption, position)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(data.blog_id)
    .bind(&data.url)
    .bind(&data.alt_text)
    .bind(data.caption.as_deref())
    .bind(&data.position)
    .fetch_one(pool)
    .await?;

    refresh_blog_images(pool, image.blog_id).await?;

    Ok(image)
}

pub async fn list_images_for_blog(
    pool: &PgPool,
    blog_id: Uuid,
) -> Result<Vec<ContentImage>, sqlx::Error> {
    sqlx::query_as::<_, ContentImage>(
        r#"
        SELECT *
        FROM content_images
        WHERE blog_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(blog_id)
    .fetch_all(pool)
    .await
}

pub async fn update_content_image(
    pool: &PgPool,
    id: Uuid,
    data: &ContentImageUpdate,
) -> Result<Option<ContentImage>, sqlx::Error> {
    let image = sqlx::query_as::<_, ContentImage>(
        r#"
        UPDATE content_images
        SET
            url = COALESCE($1, url),
            alt_text = COALESCE($2, alt_text),
            caption = CASE WHEN $3 THEN $4 ELSE caption END,
            position = COALESCE($5, position)
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(data.url.as_deref())
    .bind(data.alt_text.as_deref())
    .bind(data.caption.is_some())
    .bind(data.caption.clone().flatten())
    .bind(data.position.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if let Some(image) = &image {
        refresh_blog_images(pool, image.blog_id).await?;
    }

    Ok(image)
}

/// Deletes the image and refreshes the owning blog's cache. Returns the
/// blog id when a row was removed.
pub async fn delete_content_image(pool: &PgPool, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    let blog_id: Option<(Uuid,)> = sqlx::query_as(
        r#"
        DELETE FROM content_images
        WHERE id = $1
        RETURNING blog_id
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if let Some((blog_id,)) = blog_id {
        refresh_blog_images(pool, blog_id).await?;
        return Ok(Some(blog_id));
    }

    Ok(None)
}
