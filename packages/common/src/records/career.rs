use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Record;
use crate::records::status::JobStatus;

/// An open or closed job posting shown on the careers page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(default)]
    pub id: String,

    pub title: String,
    #[serde(default)]
    pub category: String,
    /// "Full Time", "Part Time", ...
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub location: String,
    /// Ordered list of qualification bullet points; never empty after save.
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub status: JobStatus,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for JobPosting {
    const COLLECTION: &'static str = "careers";

    fn id(&self) -> &str {
        &self.id
    }
}
