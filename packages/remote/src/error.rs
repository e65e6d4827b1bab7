use thiserror::Error;

/// Errors from the remote collection capability.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },
    #[error("subscription closed by the backend")]
    SubscriptionClosed,
    #[error("remote backend error: {0}")]
    Backend(String),
}
