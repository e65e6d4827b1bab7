use common::storage::{MediaFile, MediaStore};
use remote::{Collections, Query};
use site::forms::{
    ApplicationForm, ApplicationPipeline, ContactForm, ContactPipeline, QuoteForm, QuotePipeline,
};

use crate::common::TestSite;

mod quote_flow {
    use super::*;

    fn filled_form() -> QuoteForm {
        QuoteForm {
            first_name: "Jane".into(),
            last_name: "Cruz".into(),
            street_address: "12 Rizal Ave".into(),
            company: "Cruz Builders".into(),
            contact_number: "0917 555 0101".into(),
            email: "jane@example.com".into(),
            message: "Quoting 40 track lights".into(),
            attachment: Some(MediaFile::new("floorplan.pdf", b"%PDF-1.7 plan".to_vec())),
        }
    }

    #[tokio::test]
    async fn quote_with_attachment_lands_pending_and_downloadable() {
        let site = TestSite::new();
        let pipeline = QuotePipeline::new(site.collections(), site.media.clone());

        let id = pipeline.submit(filled_form()).await.unwrap();

        let doc = site.remote.get_one("quotes", &id).await.unwrap().unwrap();
        assert_eq!(doc.fields.get("status").unwrap(), "pending");
        assert_eq!(doc.fields.get("firstName").unwrap(), "Jane");

        let url = doc
            .fields
            .get("attachmentUrl")
            .unwrap()
            .as_str()
            .unwrap()
            .to_string();
        let stored = site
            .media
            .get(&common::storage::MediaUrl::new(url))
            .await
            .unwrap();
        assert_eq!(stored, b"%PDF-1.7 plan");
    }

    #[tokio::test]
    async fn half_filled_quote_is_rejected_before_any_write() {
        let site = TestSite::new();
        let pipeline = QuotePipeline::new(site.collections(), site.media.clone());

        let mut form = filled_form();
        form.street_address = String::new();
        pipeline.submit(form).await.unwrap_err();

        assert_eq!(site.media.upload_count(), 0);
        assert!(site
            .remote
            .fetch(Query::collection("quotes"))
            .await
            .unwrap()
            .is_empty());
    }
}

mod contact_flow {
    use super::*;

    #[tokio::test]
    async fn inquiry_is_tagged_with_its_source_page() {
        let site = TestSite::new();
        let pipeline = ContactPipeline::new(site.collections());

        let id = pipeline
            .submit(ContactForm {
                full_name: "Miguel Santos".into(),
                email: "miguel@example.com".into(),
                phone: "0917 555 0102".into(),
                message: "Do you ship to Cebu?".into(),
            })
            .await
            .unwrap();

        let doc = site.remote.get_one("inquiries", &id).await.unwrap().unwrap();
        assert_eq!(doc.fields.get("source").unwrap(), "Contact Page");
        assert!(doc.fields.get("submittedAt").unwrap().is_string());
    }
}

mod application_flow {
    use super::*;

    #[tokio::test]
    async fn application_keeps_its_job_title_after_the_posting_is_deleted() {
        let site = TestSite::new();
        let job_id = site
            .seed_job("Lighting Designer", "Design", "Open", "2026-01-01T00:00:00Z")
            .await;

        let pipeline = ApplicationPipeline::new(site.collections(), site.media.clone());
        let id = pipeline
            .submit(ApplicationForm {
                job_id: Some(job_id.clone()),
                job_title: Some("Lighting Designer".into()),
                full_name: "Ana Reyes".into(),
                email: "ana@example.com".into(),
                phone: "0917 555 0103".into(),
                resume: Some(MediaFile::new("resume.pdf", b"%PDF-1.7 cv".to_vec())),
            })
            .await
            .unwrap();

        site.remote.delete_record("careers", &job_id).await.unwrap();

        let doc = site
            .remote
            .get_one("applications", &id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.fields.get("jobTitle").unwrap(), "Lighting Designer");
        assert_eq!(doc.fields.get("jobId").unwrap(), job_id.as_str());
    }

    #[tokio::test]
    async fn application_without_resume_never_reaches_the_backend() {
        let site = TestSite::new();
        let pipeline = ApplicationPipeline::new(site.collections(), site.media.clone());

        pipeline
            .submit(ApplicationForm {
                job_id: None,
                job_title: None,
                full_name: "Ana Reyes".into(),
                email: "ana@example.com".into(),
                phone: "0917 555 0103".into(),
                resume: None,
            })
            .await
            .unwrap_err();

        assert!(site
            .remote
            .fetch(Query::collection("applications"))
            .await
            .unwrap()
            .is_empty());
    }
}
