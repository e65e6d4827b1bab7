use std::sync::Arc;

use serde_json::{json, Value};
use tracing::info;

use common::records::{BlogPost, PublishStatus};
use common::server_timestamp;
use common::storage::MediaStore;
use remote::{Collections, Direction, Query};
use site::view::LiveView;

use crate::error::AdminError;
use crate::images::ImageSource;

/// URL slug derived from a post title: lowercased, word characters and
/// spaces kept, spaces collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == ' ')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// One body section in the editor.
#[derive(Debug, Clone)]
pub enum SectionDraft {
    Paragraph {
        id: Option<String>,
        description: String,
    },
    ImageDetail {
        id: Option<String>,
        title: String,
        description: String,
        image: ImageSource,
    },
}

#[derive(Debug, Clone)]
pub struct BlogDraft {
    pub id: Option<String>,
    pub title: String,
    pub category: String,
    pub status: PublishStatus,
    pub website: String,
    pub cover: Option<ImageSource>,
    pub sections: Vec<SectionDraft>,
}

/// Admin CRUD over blog posts, including per-section image uploads.
pub struct BlogManager {
    remote: Arc<dyn Collections>,
    media: Arc<dyn MediaStore>,
}

impl BlogManager {
    pub fn new(remote: Arc<dyn Collections>, media: Arc<dyn MediaStore>) -> Self {
        Self { remote, media }
    }

    pub fn live(&self) -> LiveView<BlogPost> {
        let query = Query::collection("blogs").order_by("createdAt", Direction::Descending);
        LiveView::open(self.remote.clone(), query)
    }

    /// Create or update a post. Title and cover are required. The slug is
    /// recomputed from the title on every save; `updatedAt` is always set,
    /// `createdAt` only when creating.
    pub async fn save(&self, draft: BlogDraft) -> Result<String, AdminError> {
        if draft.title.trim().is_empty() {
            return Err(AdminError::missing("title"));
        }
        let cover = match &draft.cover {
            Some(source) if !source.is_empty() => source.resolve(self.media.as_ref()).await?,
            _ => return Err(AdminError::missing("coverImage")),
        };

        let mut sections = Vec::with_capacity(draft.sections.len());
        for section in &draft.sections {
            sections.push(self.encode_section(section).await?);
        }

        let slug = slugify(&draft.title);
        let mut fields = json!({
            "title": draft.title,
            "slug": slug,
            "category": draft.category,
            "status": draft.status.as_str(),
            "website": draft.website,
            "coverImage": cover,
            "sections": sections,
            "updatedAt": server_timestamp(),
        })
        .as_object()
        .cloned()
        .unwrap_or_default();

        match draft.id {
            Some(id) => {
                self.remote.update_record("blogs", &id, fields).await?;
                info!(id, "Blog post updated");
                Ok(id)
            }
            None => {
                fields.insert("createdAt".into(), server_timestamp());
                let id = self.remote.add_record("blogs", fields).await?;
                info!(id, "Blog post created");
                Ok(id)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), AdminError> {
        self.remote.delete_record("blogs", id).await?;
        info!(id, "Blog post deleted");
        Ok(())
    }

    async fn encode_section(&self, section: &SectionDraft) -> Result<Value, AdminError> {
        match section {
            SectionDraft::Paragraph { id, description } => Ok(json!({
                "type": "paragraph",
                "id": section_id(id),
                "description": description,
            })),
            SectionDraft::ImageDetail {
                id,
                title,
                description,
                image,
            } => {
                let image_url = image.resolve(self.media.as_ref()).await?;
                Ok(json!({
                    "type": "image-detail",
                    "id": section_id(id),
                    "title": title,
                    "description": description,
                    "imageUrl": image_url,
                }))
            }
        }
    }
}

fn section_id(existing: &Option<String>) -> String {
    match existing {
        Some(id) => id.clone(),
        None => uuid::Uuid::new_v4().to_string(),
    }
}
