use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Record;
use crate::records::status::PublishStatus;

/// One body section of a blog post. Sections are stored in display order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Section {
    #[serde(rename = "paragraph", rename_all = "camelCase")]
    Paragraph {
        #[serde(default)]
        id: String,
        #[serde(default)]
        description: String,
    },
    #[serde(rename = "image-detail", rename_all = "camelCase")]
    ImageDetail {
        #[serde(default)]
        id: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        image_url: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default)]
    pub id: String,

    pub title: String,
    /// URL slug derived from the title at save time.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: PublishStatus,
    #[serde(default)]
    pub website: String,
    /// Header image URL.
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub sections: Vec<Section>,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for BlogPost {
    const COLLECTION: &'static str = "blogs";

    fn id(&self) -> &str {
        &self.id
    }
}
