use common::storage::StorageError;
use remote::RemoteError;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("image upload failed: {0}")]
    Upload(#[from] StorageError),
    #[error("backend operation failed: {0}")]
    Remote(#[from] RemoteError),
}

impl AdminError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::Validation(format!("missing required field: {field}"))
    }
}
