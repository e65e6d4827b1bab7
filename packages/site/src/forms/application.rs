use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};

use common::records::JobPosting;
use common::server_timestamp;
use common::storage::{MediaFile, MediaStore};
use remote::Collections;

use super::pipeline::{require, FormError, SubmitState, Submitter};

/// Job application as entered on a posting's apply form.
///
/// `job_id` and `job_title` come from the posting the applicant was
/// looking at. The title is denormalized into the application so the
/// inbox still shows it if the posting is later deleted.
#[derive(Debug, Default, Clone)]
pub struct ApplicationForm {
    pub job_id: Option<String>,
    pub job_title: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub resume: Option<MediaFile>,
}

impl ApplicationForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.full_name, "fullName")?;
        require(&self.email, "email")?;
        require(&self.phone, "phone")?;
        if self.resume.is_none() {
            return Err(FormError::MissingField("resume"));
        }
        Ok(())
    }
}

/// Job application submission: resume upload is mandatory, then one
/// pending document is written.
pub struct ApplicationPipeline {
    remote: Arc<dyn Collections>,
    media: Arc<dyn MediaStore>,
    submitter: Submitter,
}

impl ApplicationPipeline {
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

    pub async fn submit(&self, form: ApplicationForm) -> Result<String, FormError> {
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

    async fn perform(&self, form: ApplicationForm) -> Result<String, FormError> {
        // validate() established the resume is present.
        let resume = form.resume.as_ref().ok_or(FormError::MissingField("resume"))?;
        let resume_url = self.media.upload(&resume.filename, &resume.bytes).await?;

        let posting_title = self.lookup_job_title(form.job_id.as_deref()).await;
        let job_title = posting_title
            .as_deref()
            .or(form.job_title.as_deref())
            .unwrap_or("Unknown");
        let fields = json!({
            "jobId": form.job_id,
            "jobTitle": job_title,
            "fullName": form.full_name,
            "email": form.email,
            "phone": form.phone,
            "resumeUrl": resume_url.as_str(),
            "status": "pending",
            "appliedAt": server_timestamp(),
        });
        let fields = fields.as_object().cloned().unwrap_or_default();
        let id = self.remote.add_record("applications", fields).await?;
        info!(id, job_title, "Job application submitted");
        Ok(id)
    }

    /// Fetch the posting's current title. The reference is advisory: a
    /// missing or unreadable posting falls back to the caller's title.
    async fn lookup_job_title(&self, job_id: Option<&str>) -> Option<String> {
        let job_id = job_id?;
        match self.remote.get_one("careers", job_id).await {
            Ok(Some(doc)) => match doc.decode::<JobPosting>() {
                Ok(posting) => Some(posting.title),
                Err(e) => {
                    warn!(job_id, error = %e, "Unreadable job posting; keeping form title");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(job_id, error = %e, "Job lookup failed; keeping form title");
                None
            }
        }
    }
}
