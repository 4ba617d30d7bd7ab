use std::sync::Arc;

use futures_util::future::join_all;
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{AppError, GenerationError};
use crate::db;
use crate::models::{position_tag, ContentImageCreate, GenerationBatch, GenerationJob, ImageSpec};
use crate::services::generate::{ContentGenerator, GeneratedImage};

/// Runs every spec against the generator concurrently and waits for all of
/// them; one failure never cancels its siblings.
pub async fn execute_specs(
    generator: &dyn ContentGenerator,
    specs: &[ImageSpec],
) -> Vec<Result<GeneratedImage, GenerationError>> {
    join_all(specs.iter().map(|spec| generator.generate_image(spec))).await
}

/// Batch image generation. `submit` persists the batch and its jobs before
/// spawning the worker, so progress survives refreshes and the status
/// endpoint always has rows to read.
#[derive(Clone)]
pub struct JobRunner {
    pool: PgPool,
    generator: Arc<dyn ContentGenerator>,
}

impl JobRunner {
    pub fn new(pool: PgPool, generator: Arc<dyn ContentGenerator>) -> Self {
        Self { pool, generator }
    }

    /// Creates the batch and job rows, spawns the worker, and returns the
    /// batch handle immediately for the caller to poll.
    pub async fn submit(
        &self,
        blog_id: Option<Uuid>,
        specs: Vec<ImageSpec>,
    ) -> Result<GenerationBatch, AppError> {
        if specs.is_empty() {
            return Err(AppError::validation("No image specs to generate"));
        }

        let batch = db::create_batch(&self.pool, "images", specs.len() as i32).await?;

        let mut jobs = Vec::with_capacity(specs.len());
        for spec in &specs {
            jobs.push(db::create_job(&self.pool, batch.id, blog_id, spec).await?);
        }

        let runner = self.clone();
        let batch_id = batch.id;
        tokio::spawn(async move {
            runner.run_batch(batch_id, jobs).await;
        });

        Ok(batch)
    }

    async fn run_batch(&self, batch_id: Uuid, jobs: Vec<GenerationJob>) {
        if let Err(e) = db::mark_batch_running(&self.pool, batch_id).await {
            log::error!("batch {batch_id}: failed to mark running: {e}");
        }
        if let Err(e) = db::mark_batch_jobs_running(&self.pool, batch_id).await {
            log::error!("batch {batch_id}: failed to mark jobs running: {e}");
        }

        let specs: Vec<ImageSpec> = jobs.iter().map(|job| job.spec.0.clone()).collect();
        let results = execute_specs(self.generator.as_ref(), &specs).await;

        for (job, result) in jobs.iter().zip(results) {
            match result {
                Ok(image) => self.settle_success(job, &image).await,
                Err(e) => {
                    if let Err(db_err) =
                        db::mark_job_failed(&self.pool, job.id, &e.to_string()).await
                    {
                        log::error!("job {}: failed to record failure: {db_err}", job.id);
                    }
                }
            }
        }

        if let Err(e) = db::complete_batch(&self.pool, batch_id).await {
            log::error!("batch {batch_id}: failed to complete: {e}");
        }
    }

    /// Files the finished image under its blog (when the job has one) and
    /// marks the job succeeded. A failed attach downgrades the job to
    /// failed; a result we cannot file is not a success.
    async fn settle_success(&self, job: &GenerationJob, image: &GeneratedImage) {
        if let Some(blog_id) = job.blog_id {
            let spec = &job.spec.0;
            let create = ContentImageCreate {
                blog_id,
                url: image.url.clone(),
                alt_text: spec.alt.clone(),
                caption: spec.caption.clone(),
                position: spec.position.clone().unwrap_or_else(|| position_tag(1)),
            };

            if let Err(e) = db::create_content_image(&self.pool, &create).await {
                log::error!("job {}: generated image could not be attached: {e}", job.id);
                if let Err(db_err) = db::mark_job_failed(
                    &self.pool,
                    job.id,
                    &format!("image generated but could not be attached: {e}"),
                )
                .await
                {
                    log::error!("job {}: failed to record failure: {db_err}", job.id);
                }
                return;
            }
        }

        if let Err(e) = db::mark_job_succeeded(&self.pool, job.id, &image.url).await {
            log::error!("job {}: failed to record success: {e}", job.id);
        }
    }
}
