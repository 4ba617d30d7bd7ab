use sqlx::PgPool;
use std::sync::Arc;

use brandpress::services::{ContentGenerator, JobRunner, ObjectStorage};

use crate::web::security::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub generator: Arc<dyn ContentGenerator>,
    pub storage: Arc<dyn ObjectStorage>,
    pub jobs: JobRunner,
    pub rate_limiter: Arc<RateLimiter>,
}
