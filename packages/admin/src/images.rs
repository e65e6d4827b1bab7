use common::storage::{MediaFile, MediaStore};

use crate::error::AdminError;

/// An image slot on an editor form: either the URL already stored on the
/// record, or a freshly chosen file that still needs uploading.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Url(String),
    File(MediaFile),
}

impl ImageSource {
    /// Resolve to a stored URL, uploading if this is a new file.
    pub async fn resolve(&self, media: &dyn MediaStore) -> Result<String, AdminError> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::File(file) => {
                let url = media.upload(&file.filename, &file.bytes).await?;
                Ok(url.into())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Url(url) if url.trim().is_empty())
    }
}
