use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::StorageError;

/// A file picked by the user for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Stable URL returned by the media host for an uploaded file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaUrl(String);

impl MediaUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<MediaUrl> for String {
    fn from(url: MediaUrl) -> Self {
        url.0
    }
}

/// Hosted media upload capability.
///
/// Uploads block until the host acknowledges and return a stable URL for the
/// stored content. A failed upload never leaves a partial record anywhere;
/// orphaned uploads after a failed follow-up write are accepted and never
/// compensated.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload file bytes; returns the stable content URL.
    async fn upload(&self, filename: &str, data: &[u8]) -> Result<MediaUrl, StorageError>;

    /// Retrieve the stored bytes for a previously returned URL.
    async fn get(&self, url: &MediaUrl) -> Result<Vec<u8>, StorageError>;

    /// Whether the URL resolves to stored media.
    async fn exists(&self, url: &MediaUrl) -> Result<bool, StorageError>;
}
