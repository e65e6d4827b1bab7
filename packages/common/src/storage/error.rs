use std::fmt;

/// Errors from the media upload capability.
#[derive(Debug)]
pub enum StorageError {
    /// No media is stored under the given URL.
    NotFound(String),
    /// An I/O error occurred.
    Io(std::io::Error),
    /// The URL does not point into this store.
    InvalidUrl(String),
    /// The upload exceeds the configured size limit.
    SizeLimitExceeded { actual: u64, limit: u64 },
    /// The media host rejected the upload; carries the provider message.
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(url) => write!(f, "media not found: {url}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
            Self::InvalidUrl(msg) => write!(f, "invalid media URL: {msg}"),
            Self::SizeLimitExceeded { actual, limit } => {
                write!(f, "upload exceeds size limit ({actual} > {limit} bytes)")
            }
            Self::Rejected(msg) => write!(f, "upload rejected: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
