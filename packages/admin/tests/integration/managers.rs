use admin::{
    AdminError, BlogDraft, BlogManager, CareersManager, ImageSource, JobDraft, ProductDraft,
    ProductManager, SectionDraft,
};
use common::records::{JobStatus, PublishStatus};
use common::storage::MediaFile;
use remote::Collections;

use crate::common::TestPanel;

mod product_manager {
    use super::*;

    fn draft(name: &str, sku: &str) -> ProductDraft {
        ProductDraft {
            id: None,
            name: name.into(),
            sku: sku.into(),
            brands: vec!["LIT".into()],
            website: "Disruptive".into(),
            main_image: None,
        }
    }

    #[tokio::test]
    async fn create_then_edit_keeps_the_creation_time() {
        let panel = TestPanel::new();
        let manager = ProductManager::new(panel.collections(), panel.media.clone());

        let id = manager.save(draft("Track Light", "TL-100")).await.unwrap();
        let created = panel.remote.get_one("products", &id).await.unwrap().unwrap();
        let created_at = created.fields.get("createdAt").cloned().unwrap();
        assert!(created_at.is_string());

        let mut edit = draft("Track Light v2", "TL-100");
        edit.id = Some(id.clone());
        manager.save(edit).await.unwrap();

        let updated = panel.remote.get_one("products", &id).await.unwrap().unwrap();
        assert_eq!(updated.fields.get("name").unwrap(), "Track Light v2");
        assert_eq!(updated.fields.get("createdAt").unwrap(), &created_at);
    }

    #[tokio::test]
    async fn new_image_file_is_uploaded_and_kept_url_is_not() {
        let panel = TestPanel::new();
        let manager = ProductManager::new(panel.collections(), panel.media.clone());

        let mut with_file = draft("Track Light", "TL-100");
        with_file.main_image = Some(ImageSource::File(MediaFile::new(
            "light.png",
            b"PNG".to_vec(),
        )));
        let id = manager.save(with_file).await.unwrap();
        assert_eq!(panel.media.upload_count(), 1);

        let doc = panel.remote.get_one("products", &id).await.unwrap().unwrap();
        let url = doc.fields.get("mainImage").unwrap().as_str().unwrap().to_string();
        assert!(!url.is_empty());

        let mut keep = draft("Track Light", "TL-100");
        keep.id = Some(id);
        keep.main_image = Some(ImageSource::Url(url.clone()));
        manager.save(keep).await.unwrap();
        assert_eq!(panel.media.upload_count(), 1, "kept URL must not re-upload");
    }

    #[tokio::test]
    async fn missing_sku_is_rejected_without_writing() {
        let panel = TestPanel::new();
        let manager = ProductManager::new(panel.collections(), panel.media.clone());

        let err = manager.save(draft("Track Light", "  ")).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert!(panel
            .remote
            .fetch(remote::Query::collection("products"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn live_table_tracks_deletes() {
        let panel = TestPanel::new();
        let manager = ProductManager::new(panel.collections(), panel.media.clone());
        let id = manager.save(draft("Track Light", "TL-100")).await.unwrap();

        let table = manager.live();
        assert_eq!(table.ready().await.unwrap().len(), 1);

        manager.delete(&id).await.unwrap();
        let state = table.next_change().await;
        assert!(state.rows().is_empty());
    }
}

mod blog_manager {
    use super::*;

    fn draft(title: &str) -> BlogDraft {
        BlogDraft {
            id: None,
            title: title.into(),
            category: "News".into(),
            status: PublishStatus::Published,
            website: "Disruptive".into(),
            cover: Some(ImageSource::File(MediaFile::new("cover.jpg", b"JPG".to_vec()))),
            sections: vec![
                SectionDraft::Paragraph {
                    id: None,
                    description: "Intro".into(),
                },
                SectionDraft::ImageDetail {
                    id: None,
                    title: "Showroom".into(),
                    description: "Our showroom".into(),
                    image: ImageSource::File(MediaFile::new("room.jpg", b"ROOM".to_vec())),
                },
            ],
        }
    }

    #[tokio::test]
    async fn save_uploads_cover_and_section_images_and_derives_the_slug() {
        let panel = TestPanel::new();
        let manager = BlogManager::new(panel.collections(), panel.media.clone());

        let id = manager.save(draft("Lighting 101: The Basics!")).await.unwrap();
        assert_eq!(panel.media.upload_count(), 2);

        let doc = panel.remote.get_one("blogs", &id).await.unwrap().unwrap();
        assert_eq!(doc.fields.get("slug").unwrap(), "lighting-101-the-basics");
        let sections = doc.fields.get("sections").unwrap().as_array().unwrap();
        assert_eq!(sections[0].get("type").unwrap(), "paragraph");
        assert_eq!(sections[1].get("type").unwrap(), "image-detail");
        assert!(sections[1].get("imageUrl").unwrap().as_str().unwrap().len() > 0);
        assert!(doc.fields.get("createdAt").unwrap().is_string());
        assert!(doc.fields.get("updatedAt").unwrap().is_string());
    }

    #[tokio::test]
    async fn update_touches_updated_at_but_not_created_at() {
        let panel = TestPanel::new();
        let manager = BlogManager::new(panel.collections(), panel.media.clone());

        let id = manager.save(draft("First Post")).await.unwrap();
        let before = panel.remote.get_one("blogs", &id).await.unwrap().unwrap();
        let created_at = before.fields.get("createdAt").cloned().unwrap();

        let mut edit = draft("First Post, Revised");
        edit.id = Some(id.clone());
        manager.save(edit).await.unwrap();

        let after = panel.remote.get_one("blogs", &id).await.unwrap().unwrap();
        assert_eq!(after.fields.get("createdAt").unwrap(), &created_at);
        assert_eq!(after.fields.get("slug").unwrap(), "first-post-revised");
    }

    #[tokio::test]
    async fn missing_cover_is_rejected() {
        let panel = TestPanel::new();
        let manager = BlogManager::new(panel.collections(), panel.media.clone());

        let mut no_cover = draft("No Cover");
        no_cover.cover = None;
        assert!(matches!(
            manager.save(no_cover).await.unwrap_err(),
            AdminError::Validation(_)
        ));

        let mut blank_cover = draft("Blank Cover");
        blank_cover.cover = Some(ImageSource::Url("  ".into()));
        assert!(matches!(
            manager.save(blank_cover).await.unwrap_err(),
            AdminError::Validation(_)
        ));
    }
}

mod careers_manager {
    use super::*;

    fn draft(title: &str, qualifications: &[&str]) -> JobDraft {
        JobDraft {
            id: None,
            title: title.into(),
            category: "Design".into(),
            job_type: "Full-time".into(),
            location: "Manila".into(),
            qualifications: qualifications.iter().map(|q| q.to_string()).collect(),
            status: JobStatus::Open,
        }
    }

    #[tokio::test]
    async fn blank_qualification_rows_are_dropped_on_save() {
        let panel = TestPanel::new();
        let manager = CareersManager::new(panel.collections());

        let id = manager
            .save(draft("Designer", &["Licensed", "   ", "", "3 years experience"]))
            .await
            .unwrap();

        let doc = panel.remote.get_one("careers", &id).await.unwrap().unwrap();
        let quals = doc.fields.get("qualifications").unwrap().as_array().unwrap();
        assert_eq!(quals.len(), 2);
        assert_eq!(quals[0], "Licensed");
    }

    #[tokio::test]
    async fn all_blank_qualifications_fail_validation() {
        let panel = TestPanel::new();
        let manager = CareersManager::new(panel.collections());

        let err = manager
            .save(draft("Designer", &["  ", ""]))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }
}
