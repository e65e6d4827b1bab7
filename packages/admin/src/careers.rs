use std::sync::Arc;

use serde_json::json;
use tracing::info;

use common::records::{JobPosting, JobStatus};
use common::server_timestamp;
use remote::{Collections, Direction, Query};
use site::view::LiveView;

use crate::error::AdminError;

#[derive(Debug, Default, Clone)]
pub struct JobDraft {
    pub id: Option<String>,
    pub title: String,
    pub category: String,
    pub job_type: String,
    pub location: String,
    pub qualifications: Vec<String>,
    pub status: JobStatus,
}

/// Admin CRUD over job postings.
pub struct CareersManager {
    remote: Arc<dyn Collections>,
}

impl CareersManager {
    pub fn new(remote: Arc<dyn Collections>) -> Self {
        Self { remote }
    }

    pub fn live(&self) -> LiveView<JobPosting> {
        let query = Query::collection("careers").order_by("createdAt", Direction::Descending);
        LiveView::open(self.remote.clone(), query)
    }

    /// Create or update a posting. Blank qualification rows are dropped
    /// before validation; at least one real qualification must remain.
    pub async fn save(&self, draft: JobDraft) -> Result<String, AdminError> {
        if draft.title.trim().is_empty() {
            return Err(AdminError::missing("title"));
        }
        if draft.location.trim().is_empty() {
            return Err(AdminError::missing("location"));
        }
        let qualifications: Vec<&str> = draft
            .qualifications
            .iter()
            .map(|q| q.trim())
            .filter(|q| !q.is_empty())
            .collect();
        if qualifications.is_empty() {
            return Err(AdminError::missing("qualifications"));
        }

        let mut fields = json!({
            "title": draft.title,
            "category": draft.category,
            "jobType": draft.job_type,
            "location": draft.location,
            "qualifications": qualifications,
            "status": draft.status.as_str(),
        })
        .as_object()
        .cloned()
        .unwrap_or_default();

        match draft.id {
            Some(id) => {
                fields.insert("updatedAt".into(), server_timestamp());
                self.remote.update_record("careers", &id, fields).await?;
                info!(id, "Job posting updated");
                Ok(id)
            }
            None => {
                fields.insert("createdAt".into(), server_timestamp());
                let id = self.remote.add_record("careers", fields).await?;
                info!(id, "Job posting created");
                Ok(id)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), AdminError> {
        self.remote.delete_record("careers", id).await?;
        info!(id, "Job posting deleted");
        Ok(())
    }
}
