use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Record;

/// A general customer message from the contact page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInquiry {
    #[serde(default)]
    pub id: String,

    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    /// Which page produced the inquiry, e.g. "Contact Page".
    #[serde(default)]
    pub source: String,

    pub submitted_at: DateTime<Utc>,
}

impl Record for CustomerInquiry {
    const COLLECTION: &'static str = "inquiries";

    fn id(&self) -> &str {
        &self.id
    }
}
