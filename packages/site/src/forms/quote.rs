use std::sync::Arc;

use serde_json::json;
use tracing::info;

use common::server_timestamp;
use common::storage::{MediaFile, MediaStore};
use remote::Collections;

use super::pipeline::{require, FormError, SubmitState, Submitter};

/// User-entered quote request, as typed into the form.
#[derive(Debug, Default, Clone)]
pub struct QuoteForm {
    pub first_name: String,
    pub last_name: String,
    pub street_address: String,
    pub company: String,
    pub contact_number: String,
    pub email: String,
    pub message: String,
    pub attachment: Option<MediaFile>,
}

impl QuoteForm {
    /// Presence check over the required fields, first missing wins.
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.first_name, "firstName")?;
        require(&self.last_name, "lastName")?;
        require(&self.street_address, "streetAddress")?;
        require(&self.contact_number, "contactNumber")?;
        require(&self.email, "email")?;
        Ok(())
    }
}

/// Quote request submission: validate, upload the optional attachment,
/// then write exactly one pending document.
pub struct QuotePipeline {
    remote: Arc<dyn Collections>,
    media: Arc<dyn MediaStore>,
    submitter: Submitter,
}

impl QuotePipeline {
    pub fn new(remote: Arc<dyn Collections>, media: Arc<dyn MediaStore>) -> Self {
        Self {
            remote,
            media,
            submitter: Submitter::new(),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.submitter.state()
    }

    /// Submit a quote request; returns the new document id.
    ///
    /// Validation failures leave no trace: no upload, no document, no state
    /// change. Once past validation the pipeline claims the in-flight slot,
    /// so a duplicate submit during the round trip is rejected rather than
    /// producing a second document.
    pub async fn submit(&self, form: QuoteForm) -> Result<String, FormError> {
        form.validate()?;
        self.submitter.begin()?;
        match self.perform(form).await {
            Ok(id) => {
                self.submitter.succeed();
                Ok(id)
            }
            Err(e) => {
                self.submitter.fail(&e);
                Err(e)
            }
        }
    }

    async fn perform(&self, form: QuoteForm) -> Result<String, FormError> {
        let attachment_url = match &form.attachment {
            Some(file) => {
                let url = self.media.upload(&file.filename, &file.bytes).await?;
                url.into()
            }
            None => String::new(),
        };

        let fields = json!({
            "firstName": form.first_name,
            "lastName": form.last_name,
            "streetAddress": form.street_address,
            "company": form.company,
            "contactNumber": form.contact_number,
            "email": form.email,
            "message": form.message,
            "attachmentUrl": attachment_url,
            "status": "pending",
            "createdAt": server_timestamp(),
        });
        let fields = fields.as_object().cloned().unwrap_or_default();
        let id = self.remote.add_record("quotes", fields).await?;
        info!(id, "Quote request submitted");
        Ok(id)
    }
}
