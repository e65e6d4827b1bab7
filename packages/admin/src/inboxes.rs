use std::sync::Arc;

use serde_json::json;
use tracing::info;

use common::records::{Application, CustomerInquiry, QuoteRequest, ReviewStatus};
use remote::{Collections, Direction, Query};
use site::view::LiveView;

use crate::error::AdminError;

/// Flip a submission between pending and reviewed with one single-field
/// merge, leaving every other field untouched.
async fn toggle_status(
    remote: &dyn Collections,
    collection: &str,
    id: &str,
    current: ReviewStatus,
) -> Result<ReviewStatus, AdminError> {
    let next = current.toggled();
    let fields = json!({ "status": next.as_str() })
        .as_object()
        .cloned()
        .unwrap_or_default();
    remote.update_record(collection, id, fields).await?;
    info!(collection, id, status = next.as_str(), "Submission status toggled");
    Ok(next)
}

/// Contact-page inquiries, newest first. Read and delete only; inquiries
/// carry no review status.
pub struct InquiryInbox {
    remote: Arc<dyn Collections>,
}

impl InquiryInbox {
    pub fn new(remote: Arc<dyn Collections>) -> Self {
        Self { remote }
    }

    pub fn live(&self) -> LiveView<CustomerInquiry> {
        let query =
            Query::collection("inquiries").order_by("submittedAt", Direction::Descending);
        LiveView::open(self.remote.clone(), query)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AdminError> {
        self.remote.delete_record("inquiries", id).await?;
        info!(id, "Inquiry deleted");
        Ok(())
    }
}

/// Quote requests, newest first.
pub struct QuotationInbox {
    remote: Arc<dyn Collections>,
}

impl QuotationInbox {
    pub fn new(remote: Arc<dyn Collections>) -> Self {
        Self { remote }
    }

    pub fn live(&self) -> LiveView<QuoteRequest> {
        let query = Query::collection("quotes").order_by("createdAt", Direction::Descending);
        LiveView::open(self.remote.clone(), query)
    }

    pub async fn toggle_status(&self, quote: &QuoteRequest) -> Result<ReviewStatus, AdminError> {
        toggle_status(self.remote.as_ref(), "quotes", &quote.id, quote.status).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AdminError> {
        self.remote.delete_record("quotes", id).await?;
        info!(id, "Quote request deleted");
        Ok(())
    }
}

/// Job applications, newest first. Applications survive the deletion of
/// their posting; the denormalized job title keeps the row readable.
pub struct ApplicationInbox {
    remote: Arc<dyn Collections>,
}

impl ApplicationInbox {
    pub fn new(remote: Arc<dyn Collections>) -> Self {
        Self { remote }
    }

    pub fn live(&self) -> LiveView<Application> {
        let query =
            Query::collection("applications").order_by("appliedAt", Direction::Descending);
        LiveView::open(self.remote.clone(), query)
    }

    pub async fn toggle_status(
        &self,
        application: &Application,
    ) -> Result<ReviewStatus, AdminError> {
        toggle_status(
            self.remote.as_ref(),
            "applications",
            &application.id,
            application.status,
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AdminError> {
        self.remote.delete_record("applications", id).await?;
        info!(id, "Application deleted");
        Ok(())
    }
}
