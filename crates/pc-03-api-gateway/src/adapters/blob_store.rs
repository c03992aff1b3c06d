//! Filesystem blob store.
//!
//! Uploads land in a single flat directory, named `<uuid>-<sanitized name>`.
//! The same directory is read by the histogram scorer and served under
//! `/files/`.

use crate::ports::{BlobStore, BlobStoreError};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Longest sanitized name kept from the client's file name.
const MAX_NAME_LEN: usize = 64;

/// Writes uploads into a directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    dir: PathBuf,
}

impl FsBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Keep `[A-Za-z0-9._-]`, replace everything else with `_`.
///
/// Leading dots are stripped so a token can never be `..` or a hidden file.
pub fn sanitize_file_name(name: &str) -> String {
    // Browsers may send a full client path
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    let mut out: String = trimmed.chars().take(MAX_NAME_LEN).collect();
    if out.is_empty() {
        out.push_str("upload");
    }
    out
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, original_name: &str, data: Bytes) -> Result<String, BlobStoreError> {
        if data.is_empty() {
            return Err(BlobStoreError::InvalidName(format!(
                "{original_name}: empty upload"
            )));
        }

        let token = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&token), &data).await?;

        info!(
            "[pc-03] 📁 Stored upload {} ({} bytes)",
            token,
            data.len()
        );
        Ok(token)
    }
}
