use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::StorageError;

pub const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Destination for uploaded media. Behind a trait so the disk-backed
/// implementation can be swapped for a bucket without touching handlers.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Persists the bytes and returns the public URL they are served from.
    async fn store(&self, content_type: &str, bytes: &[u8]) -> Result<String, StorageError>;
}

/// Writes uploads under a local directory that the static file service
/// exposes. Filenames are random; the extension comes from the media type.
pub struct LocalStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn store(&self, content_type: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let ext = extension_for(content_type)
            .ok_or_else(|| StorageError::UnsupportedMediaType(content_type.to_string()))?;

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(StorageError::TooLarge(bytes.len()));
        }

        let filename = format!("{}.{}", Uuid::new_v4(), ext);

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&filename), bytes).await?;

        Ok(format!(
            "{}/{}",
            self.public_prefix.trim_end_matches('/'),
            filename
        ))
    }
}
