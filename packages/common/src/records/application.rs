use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Record;
use crate::records::status::ReviewStatus;

/// A job application submitted from the careers apply form.
///
/// `job_id` is advisory only: deleting the referenced job posting does not
/// cascade here, so readers must tolerate a dangling reference. The job
/// title is denormalized at submit time for exactly that reason.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub job_title: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub resume_url: String,
    #[serde(default)]
    pub status: ReviewStatus,

    pub applied_at: DateTime<Utc>,
}

impl Record for Application {
    const COLLECTION: &'static str = "applications";

    fn id(&self) -> &str {
        &self.id
    }
}
