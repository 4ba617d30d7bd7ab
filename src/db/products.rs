use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Product, ProductCreate, ProductUpdate};

pub async fn create_product(pool: &PgPool, data: &ProductCreate) -> Result<Product, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, slug, kind, description, price_label, features, testimonials)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.slug)
    .bind(data.kind.as_str())
    .bind(&data.description)
    .bind(&data.price_label)
    .bind(Json(&data.features))
    .bind(Json(&data.testimonials))
    .fetch_one(pool)
    .await
}

pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        r#"
        SELECT *
        FROM products
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_product_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        r#"
        SELECT *
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_product(
    pool: &PgPool,
    id: Uuid,
    data: &ProductUpdate,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET
            name = COALESCE($1, name),
            slug = COALESCE($2, slug),
            kind = COALESCE($3, kind),
            description = COALESCE($4, description),
            price_label = COALESCE($5, price_label),
            features = COALESCE($6, features),
            testimonials = COALESCE($7, testimonials),
            edited_at = now()
        WHERE id = $8
        RETURNING *
        "#,
    )
    .bind(data.name.as_deref())
    .bind(data.slug.as_deref())
    .bind(data.kind.map(|k| k.as_str()))
    .bind(data.description.as_deref())
    .bind(data.price_label.as_deref())
    .bind(data.features.as_ref().map(Json))
    .bind(data.testimonials.as_ref().map(Json))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn set_product_active(
    pool: &PgPool,
    id: Uuid,
    active: bool,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
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

pub async fn delete_product(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM products
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
