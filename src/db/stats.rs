use sqlx::PgPool;

/// Row counts surfaced on the dashboard landing screen.
#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct OverviewCounts {
    pub blogs: i64,
    pub published_blogs: i64,
    pub advertisements: i64,
    pub companies: i64,
    pub people: i64,
    pub products: i64,
    pub campaigns: i64,
    pub build_events: i64,
    pub sops: i64,
}

pub async fn overview_counts(pool: &PgPool) -> Result<OverviewCounts, sqlx::Error> {
    sqlx::query_as::<_, OverviewCounts>(
        r#"
        SELECT
            (SELECT count(*) FROM blogs) AS blogs,
            (SELECT count(*) FROM blogs WHERE published = true) AS published_blogs,
            (SELECT count(*) FROM advertisements) AS advertisements,
            (SELECT count(*) FROM companies) AS companies,
            (SELECT count(*) FROM people) AS people,
            (SELECT count(*) FROM products) AS products,
            (SELECT count(*) FROM campaigns) AS campaigns,
            (SELECT count(*) FROM build_events) AS build_events,
            (SELECT count(*) FROM sops) AS sops
        "#,
    )
    .fetch_one(pool)
    .await
}
