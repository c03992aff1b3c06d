//! Outbound ports for the API Gateway.

use async_trait::async_trait;
use bytes::Bytes;

/// Failure writing an uploaded file.
#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("invalid file name: {0}")]
    InvalidName(String),

    #[error("blob store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Content store for uploaded media.
///
/// `put` returns the opaque token a client later sends as POST_IMAGE
/// content. Tokens are unique per upload and never contain a path separator.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, original_name: &str, data: Bytes) -> Result<String, BlobStoreError>;
}
