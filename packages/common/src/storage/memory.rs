use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use super::error::StorageError;
use super::hash::MediaHash;
use super::traits::{MediaStore, MediaUrl};

/// In-memory media store used by tests and local development.
///
/// Counts upload attempts and can be switched into a failing mode to
/// simulate the media host rejecting uploads.
#[derive(Default)]
pub struct MemoryMediaStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    uploads: AtomicUsize,
    fail_uploads: AtomicBool,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of upload attempts made, including rejected ones.
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// When set, every upload fails with a provider message.
    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    fn url_for(hash: &MediaHash) -> MediaUrl {
        MediaUrl::new(format!("memory://media/{}", hash.to_hex()))
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn upload(&self, _filename: &str, data: &[u8]) -> Result<MediaUrl, StorageError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::Rejected("simulated network error".into()));
        }

        let hash = MediaHash::compute(data);
        let url = Self::url_for(&hash);
        self.blobs
            .lock()
            .expect("media store lock poisoned")
            .insert(url.to_string(), data.to_vec());
        Ok(url)
    }

    async fn get(&self, url: &MediaUrl) -> Result<Vec<u8>, StorageError> {
        self.blobs
            .lock()
            .expect("media store lock poisoned")
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(url.to_string()))
    }

    async fn exists(&self, url: &MediaUrl) -> Result<bool, StorageError> {
        Ok(self
            .blobs
            .lock()
            .expect("media store lock poisoned")
            .contains_key(url.as_str()))
    }
}
