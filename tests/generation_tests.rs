use async_trait::async_trait;

use brandpress::common::GenerationError;
use brandpress::models::ImageSpec;
use brandpress::services::{
    execute_specs, AdCreative, AdCreativeRequest, BlogDraft, BlogDraftRequest, ChatTurn,
    ContentGenerator, GeneratedImage, SopDraft,
};

/// Stub generator: image jobs whose prompt contains "fail" error out,
/// everything else succeeds with a URL derived from the prompt.
struct ScriptedGenerator;

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate_blog(&self, _: &BlogDraftRequest) -> Result<BlogDraft, GenerationError> {
        Err(GenerationError::Unconfigured)
    }

    async fn generate_image(&self, spec: &ImageSpec) -> Result<GeneratedImage, GenerationError> {
        if spec.prompt.contains("fail") {
            return Err(GenerationError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }
        Ok(GeneratedImage {
            url: format!("/static/uploads/{}.png", spec.prompt),
        })
    }

    async fn generate_ad(&self, _: &AdCreativeRequest) -> Result<AdCreative, GenerationError> {
        Err(GenerationError::Unconfigured)
    }

    async fn suggest_blog_images(
        &self,
        _: &str,
        _: &str,
    ) -> Result<Vec<ImageSpec>, GenerationError> {
        Err(GenerationError::Unconfigured)
    }

    async fn sop_chat(&self, _: &[ChatTurn]) -> Result<String, GenerationError> {
        Err(GenerationError::Unconfigured)
    }

    async fn extract_sop(&self, _: &[ChatTurn]) -> Result<SopDraft, GenerationError> {
        Err(GenerationError::Unconfigured)
    }
}

#[tokio::test]
async fn results_line_up_with_specs() {
    let specs = vec![
        ImageSpec::new("hero"),
        ImageSpec::new("fail-me"),
        ImageSpec::new("diagram"),
    ];

    let results = execute_specs(&ScriptedGenerator, &specs).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().url, "/static/uploads/hero.png");
    assert!(results[1].is_err());
    assert_eq!(
        results[2].as_ref().unwrap().url,
        "/static/uploads/diagram.png"
    );
}

#[tokio::test]
async fn one_failure_never_cancels_its_siblings() {
    let specs: Vec<ImageSpec> = (0..8)
        .map(|i| {
            if i % 2 == 0 {
                ImageSpec::new(format!("image-{i}"))
            } else {
                ImageSpec::new(format!("fail-{i}"))
            }
        })
        .collect();

    let results = execute_specs(&ScriptedGenerator, &specs).await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let failed = results.iter().filter(|r| r.is_err()).count();
    assert_eq!(succeeded, 4);
    assert_eq!(failed, 4);
}

#[tokio::test]
async fn empty_spec_list_settles_immediately() {
    let results = execute_specs(&ScriptedGenerator, &[]).await;
    assert!(results.is_empty());
}
