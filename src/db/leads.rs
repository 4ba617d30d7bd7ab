use sqlx::PgPool;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::common::AppError;
use crate::models::{
    Company, CompanyCreate, CompanyUpdate, Person, PersonCreate, PersonQuery, PersonUpdate,
};

pub async fn create_company(pool: &PgPool, data: &CompanyCreate) -> Result<Company, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        r#"
        INSERT INTO companies (name, website, industry, notes)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(&data.name)
    .bind(&data.website)
    .bind(&data.industry)
    .bind(&data.notes)
    .fetch_one(pool)
    .await
}

pub async fn list_companies(
    pool: &PgPool,
    query: Option<&str>,
) -> Result<Vec<Company>, sqlx::Error> {
    let q = query.map(str::trim).filter(|s| !s.is_empty());

    if let Some(q) = q {
        let pattern = format!("%{}%", q);
        sqlx::query_as::<_, Company>(
            r#"
            SELECT *
            FROM companies
            WHERE name ILIKE $1 OR industry ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, Company>(
            r#"
            SELECT *
            FROM companies
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }
}

pub async fn get_company_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        r#"
        SELECT *
        FROM companies
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_company(
    pool: &PgPool,
    id: Uuid,
    data: &CompanyUpdate,
) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        r#"
        UPDATE companies
        SET
            name = COALESCE($1, name),
            website = COALESCE($2, website),
            industry = COALESCE($3, industry),
            notes = COALESCE($4, notes),
            edited_at = now()
        WHERE id = $5
        RETURNING *
        "#,
    )
    .bind(data.name.as_deref())
    .bind(data.website.as_deref())
    .bind(data.industry.as_deref())
    .bind(data.notes.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_company(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM companies
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn create_person(pool: &PgPool, data: &PersonCreate) -> Result<Person, sqlx::Error> {
    sqlx::query_as::<_, Person>(
        r#"
        INSERT INTO people (company_id, name, email, role, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(data.company_id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.role)
    .bind(&data.notes)
    .fetch_one(pool)
    .await
}

/// Filtered, paginated, multi-sort people listing. The sort whitelist is
/// derived from `PersonQuery::fields()` so a column can never be injected.
pub async fn get_people(pool: &PgPool, data: &PersonQuery) -> Result<Vec<Person>, AppError> {
    if data.limit.is_some_and(|limit| limit < 0) {
        return Err(AppError::validation("Pagination 'limit' is a negative integer"));
    }

    if data.offset.is_some_and(|offset| offset < 0) {
        return Err(AppError::validation("Pagination 'offset' is a negative integer"));
    }

    let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM people");

    if !data.is_empty() {
        query_builder.push(" WHERE ");
        let mut separated = query_builder.separated(" AND ");

        if let Some(name) = &data.name {
            separated
                .push("name ILIKE ")
                .push_bind_unseparated(format!("%{}%", name));
        }

        if let Some(email) = &data.email {
            separated.push("email = ").push_bind_unseparated(email.clone());
        }

        if let Some(role) = &data.role {
            separated.push("role = ").push_bind_unseparated(role.clone());
        }

        if let Some(company_id) = data.company_id {
            separated
                .push("company_id = ")
                .push_bind_unseparated(company_id);
        }
    }

    if let Some(sort_params) = &data.sort_by {
        // Can not have order for offset, limit and sort_by
        if sort_params.len() > PersonQuery::fields().len().saturating_sub(3) {
            return Err(AppError::validation(format!(
                "Sort parameters exceed maximum limit of {}",
                PersonQuery::fields().len().saturating_sub(3)
            )));
        }

        let active_sorts: Vec<_> = PersonQuery::fields()
            .iter()
            .zip(sort_params.iter())
            .filter_map(|(&col, &dir)| dir.map(|is_asc| (col, is_asc)))
            .collect();

        if active_sorts.is_empty() {
            query_builder.push(" ORDER BY created_at DESC ");
        } else {
            query_builder.push(" ORDER BY ");
            let mut separator = query_builder.separated(", ");

            for (col_name, is_asc) in active_sorts {
                let direction = if is_asc { " ASC" } else { " DESC" };
                separator.push(format!("{} {}", col_name, direction));
            }
        }
    } else {
        query_builder.push(" ORDER BY created_at DESC ");
    }

    if let Some(offset) = &data.offset {
        query_builder.push(" OFFSET ").push_bind(offset);
    }

    if let Some(limit) = &data.limit {
        query_builder.push(" LIMIT ").push_bind(limit);
    }

    let people = query_builder
        .build_query_as::<Person>()
        .fetch_all(pool)
        .await?;

    Ok(people)
}

pub async fn list_people_for_company(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<Person>, sqlx::Error> {
    sqlx::query_as::<_, Person>(
        r#"
        SELECT *
        FROM people
        WHERE company_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

pub async fn get_person_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Person>, sqlx::Error> {
    sqlx::query_as::<_, Person>(
        r#"
        SELECT *
        FROM people
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_person(
    pool: &PgPool,
    id: Uuid,
    data: &PersonUpdate,
) -> Result<Option<Person>, sqlx::Error> {
    sqlx::query_as::<_, Person>(
        r#"
        UPDATE people
        SET
            company_id = CASE WHEN $1 THEN $2 ELSE company_id END,
            name = COALESCE($3, name),
            email = COALESCE($4, email),
            role = COALESCE($5, role),
            notes = COALESCE($6, notes),
            edited_at = now()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(data.company_id.is_some())
    .bind(data.company_id.flatten())
    .bind(data.name.as_deref())
    .bind(data.email.as_deref())
    .bind(data.role.as_deref())
    .bind(data.notes.as_deref())
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_person(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM people
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
