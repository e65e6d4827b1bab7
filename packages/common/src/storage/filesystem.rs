use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::config::MediaConfig;

use super::error::StorageError;
use super::hash::MediaHash;
use super::traits::{MediaStore, MediaUrl};

/// Filesystem-backed content-addressed media store.
///
/// Files are stored in a Git-style sharded layout
/// (`{root}/{first 2 hex chars}/{remaining 62 hex chars}`) and served under
/// `{base_url}/{shard}/{rest}`, so the returned URL is stable for identical
/// content.
pub struct FilesystemMediaStore {
    root: PathBuf,
    base_url: String,
    max_size: u64,
}

impl FilesystemMediaStore {
    pub async fn new(
        root: PathBuf,
        base_url: impl Into<String>,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self {
            root,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_size,
        })
    }

    pub async fn from_config(config: &MediaConfig) -> Result<Self, StorageError> {
        Self::new(
            config.root_dir.clone(),
            config.base_url.clone(),
            config.max_upload_size,
        )
        .await
    }

    fn media_path(&self, hash: &MediaHash) -> PathBuf {
        self.root
            .join(hash.shard_prefix())
            .join(hash.shard_suffix())
    }

    fn media_url(&self, hash: &MediaHash) -> MediaUrl {
        MediaUrl::new(format!(
            "{}/{}/{}",
            self.base_url,
            hash.shard_prefix(),
            hash.shard_suffix()
        ))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.root.join(".tmp").join(uuid::Uuid::new_v4().to_string())
    }

    /// Recover the content hash from a URL this store issued.
    fn parse_url(&self, url: &MediaUrl) -> Result<MediaHash, StorageError> {
        let rest = url
            .as_str()
            .strip_prefix(&self.base_url)
            .and_then(|r| r.strip_prefix('/'))
            .ok_or_else(|| StorageError::InvalidUrl(url.to_string()))?;
        let (prefix, suffix) = rest
            .split_once('/')
            .ok_or_else(|| StorageError::InvalidUrl(url.to_string()))?;
        MediaHash::from_hex(&format!("{prefix}{suffix}"))
    }
}

#[async_trait]
impl MediaStore for FilesystemMediaStore {
    async fn upload(&self, filename: &str, data: &[u8]) -> Result<MediaUrl, StorageError> {
        if data.len() as u64 > self.max_size {
            tracing::warn!(filename, size = data.len(), "Upload over size limit");
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let hash = MediaHash::compute(data);
        let path = self.media_path(&hash);

        // Identical content already stored; the URL is already stable.
        if path.exists() {
            return Ok(self.media_url(&hash));
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(filename, hash = %hash, "Stored media");
        Ok(self.media_url(&hash))
    }

    async fn get(&self, url: &MediaUrl) -> Result<Vec<u8>, StorageError> {
        let hash = self.parse_url(url)?;
        match fs::read(self.media_path(&hash)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(url.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, url: &MediaUrl) -> Result<bool, StorageError> {
        let hash = self.parse_url(url)?;
        Ok(fs::try_exists(self.media_path(&hash)).await?)
    }
}
