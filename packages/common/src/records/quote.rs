use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Record;
use crate::records::status::ReviewStatus;

/// A quote request captured from the free-quote form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub id: String,

    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    pub contact_number: String,
    pub email: String,
    pub street_address: String,
    #[serde(default)]
    pub message: String,
    /// Uploaded project-plan URL; empty string when no file was attached.
    #[serde(default)]
    pub attachment_url: String,
    #[serde(default)]
    pub status: ReviewStatus,

    pub created_at: DateTime<Utc>,
}

impl Record for QuoteRequest {
    const COLLECTION: &'static str = "quotes";

    fn id(&self) -> &str {
        &self.id
    }
}
