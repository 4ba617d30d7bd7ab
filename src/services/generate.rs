use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::common::GenerationError;
use crate::models::{ImageSpec, SopStep};

/// Everything the dashboard asks the generation service for. One trait so
/// handlers and the batch worker stay independent of the wire protocol,
/// and tests can substitute a stub.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_blog(&self, request: &BlogDraftRequest) -> Result<BlogDraft, GenerationError>;

    async fn generate_image(&self, spec: &ImageSpec) -> Result<GeneratedImage, GenerationError>;

    async fn generate_ad(&self, request: &AdCreativeRequest) -> Result<AdCreative, GenerationError>;

    async fn suggest_blog_images(
        &self,
        title: &str,
        content: &str,
    ) -> Result<Vec<ImageSpec>, GenerationError>;

    async fn sop_chat(&self, turns: &[ChatTurn]) -> Result<String, GenerationError>;

    async fn extract_sop(&self, turns: &[ChatTurn]) -> Result<SopDraft, GenerationError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogDraftRequest {
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogDraft {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub suggested_images: Vec<ImageSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdCreativeRequest {
    pub placement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdCreative {
    pub title: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SopDraft {
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub steps: Vec<SopStep>,
}

#[derive(Serialize)]
struct SuggestRequest<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatTurn],
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

#[derive(Deserialize)]
struct SuggestedImages {
    #[serde(default)]
    images: Vec<ImageSpec>,
}

/// Stand-in when `GENERATE_API_URL` is unset: the dashboard boots and the
/// CRUD screens work, every generation action reports the missing config.
pub struct UnconfiguredGenerator;

#[async_trait]
impl ContentGenerator for UnconfiguredGenerator {
    async fn generate_blog(&self, _: &BlogDraftRequest) -> Result<BlogDraft, GenerationError> {
        Err(GenerationError::Unconfigured)
    }

    async fn generate_image(&self, _: &ImageSpec) -> Result<GeneratedImage, GenerationError> {
        Err(GenerationError::Unconfigured)
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

/// HTTP client for the generation endpoints. Configured with a base URL
/// and an optional bearer key; every call is a JSON POST to one path under
/// the base.
pub struct FunctionEndpoints {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl FunctionEndpoints {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    pub fn from_env() -> Result<Self, GenerationError> {
        let base_url =
            std::env::var("GENERATE_API_URL").map_err(|_| GenerationError::Unconfigured)?;
        let api_key = std::env::var("GENERATE_API_KEY").ok();

        Self::new(base_url, api_key)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GenerationError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);

        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| GenerationError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContentGenerator for FunctionEndpoints {
    async fn generate_blog(&self, request: &BlogDraftRequest) -> Result<BlogDraft, GenerationError> {
        self.post_json("generate-blog", request).await
    }

    async fn generate_image(&self, spec: &ImageSpec) -> Result<GeneratedImage, GenerationError> {
        self.post_json("generate-image", spec).await
    }

    async fn generate_ad(&self, request: &AdCreativeRequest) -> Result<AdCreative, GenerationError> {
        self.post_json("generate-ad", request).await
    }

    async fn suggest_blog_images(
        &self,
        title: &str,
        content: &str,
    ) -> Result<Vec<ImageSpec>, GenerationError> {
        let response: SuggestedImages = self
            .post_json("suggest-blog-images", &SuggestRequest { title, content })
            .await?;

        Ok(response.images)
    }

    async fn sop_chat(&self, turns: &[ChatTurn]) -> Result<String, GenerationError> {
        let response: ChatReply = self
            .post_json("sop-chat", &ChatRequest { messages: turns })
            .await?;

        Ok(response.reply)
    }

    async fn extract_sop(&self, turns: &[ChatTurn]) -> Result<SopDraft, GenerationError> {
        self.post_json("extract-sop", &ChatRequest { messages: turns })
            .await
    }
}
