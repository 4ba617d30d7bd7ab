use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Blog, BlogCreate, BlogUpdate};

pub async fn create_blog(pool: &PgPool, data: &BlogCreate) -> Result<Blog, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        r#"
        INSERT INTO blogs (title, slug, content, excerpt, category, author, read_time, hero_image_url, tags)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(&data.title)
    .bind(&data.slug)
    .bind(&data.content)
    .bind(&data.excerpt)
    .bind(&data.category)
    .bind(&data.author)
    .bind(&data.read_time)
    .bind(data.hero_image_url.as_deref())
    .bind(Json(&data.tags))
    .fetch_one(pool)
    .await
}

/// Admin listing: every blog, optionally narrowed by a search term over
/// title, slug and category.
pub async fn list_blogs(pool: &PgPool, query: Option<&str>) -> Result<Vec<Blog>, sqlx::Error> {
    let q = query.map(str::trim).filter(|s| !s.is_empty());

    if let Some(q) = q {
        let pattern = format!("%{}%", q);
        sqlx::query_as::<_, Blog>(
            r#"
            SELECT *
            FROM blogs
            WHERE title ILIKE $1 OR slug ILIKE $1 OR category ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, Blog>(
            r#"
            SELECT *
            FROM blogs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }
}

pub async fn list_published_blogs(pool: &PgPool) -> Result<Vec<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        r#"
        SELECT *
        FROM blogs
        WHERE published = true
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_blog_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        r#"
        SELECT *
        FROM blogs
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn get_published_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        r#"
        SELECT *
        FROM blogs
        WHERE slug = $1 AND published = true
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

/// Partial update. `hero_image_url` uses a provided/value pair so the hero
/// can be cleared back to NULL, which plain COALESCE cannot express.
pub async fn update_blog(
    pool: &PgPool,
    id: Uuid,
    data: &BlogUpdate,
) -> Result<Option<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        r#"
        UPDATE blogs
        SET
            title = COALESCE($1, title),
            slug = COALESCE($2, slug),
            content = COALESCE($3, content),
            excerpt = COALESCE($4, excerpt),
            category = COALESCE($5, category),
            author = COALESCE($6, author),
            read_time = COALESCE($7, read_time),
            hero_image_url = CASE WHEN $8 THEN $9 ELSE hero_image_url END,
            tags = COALESCE($10, tags),
            edited_at = now()
        WHERE id = $11
        RETURNING *
        "#,
    )
    .bind(data.title.as_deref())
    .bind(data.slug.as_deref())
    .bind(data.content.as_deref())
    .bind(data.excerpt.as_deref())
    .bind(data.category.as_deref())
    .bind(data.author.as_deref())
    .bind(data.read_time.as_deref())
    .bind(data.hero_image_url.is_some())
    .bind(data.hero_image_url.clone().flatten())
    .bind(data.tags.as_ref().map(Json))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Autosave path: only the body text, nothing else.
pub async fn autosave_blog_content(
    pool: &PgPool,
    id: Uuid,
    content: &str,
) -> Result<Option<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        r#"
        UPDATE blogs
        SET content = $1, edited_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(content)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn set_blog_published(
    pool: &PgPool,
    id: Uuid,
    published: bool,
) -> Result<Option<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        r#"
        UPDATE blogs
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

pub async fn set_blog_featured(
    pool: &PgPool,
    id: Uuid,
    featured: bool,
) -> Result<Option<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        r#"
        UPDATE blogs
        SET featured = $1, edited_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(featured)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_blog(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM blogs
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
