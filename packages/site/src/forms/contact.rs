use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::info;

use common::server_timestamp;
use remote::Collections;

use super::pipeline::{require, FormError, SubmitState, Submitter};

/// How long the confirmation banner stays up before the form resets.
const CONFIRMATION_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Default, Clone)]
pub struct ContactForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.full_name, "fullName")?;
        require(&self.email, "email")?;
        require(&self.message, "message")?;
        Ok(())
    }
}

/// Contact-page inquiry submission. The submit state reverts to idle a few
/// seconds after either outcome, so the same form can be used again.
pub struct ContactPipeline {
    remote: Arc<dyn Collections>,
    submitter: Submitter,
}

impl ContactPipeline {
    pub fn new(remote: Arc<dyn Collections>) -> Self {
        Self {
            remote,
            submitter: Submitter::with_reset(CONFIRMATION_DELAY),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.submitter.state()
    }

    pub async fn submit(&self, form: ContactForm) -> Result<String, FormError> {
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

    async fn perform(&self, form: ContactForm) -> Result<String, FormError> {
        let fields = json!({
            "fullName": form.full_name,
            "email": form.email,
            "phone": form.phone,
            "message": form.message,
            "source": "Contact Page",
            "submittedAt": server_timestamp(),
        });
        let fields = fields.as_object().cloned().unwrap_or_default();
        let id = self.remote.add_record("inquiries", fields).await?;
        info!(id, "Customer inquiry submitted");
        Ok(id)
    }
}
