use std::sync::Arc;

use serde_json::json;
use tracing::info;

use common::records::Product;
use common::server_timestamp;
use common::storage::MediaStore;
use remote::{Collections, Direction, Query};
use site::view::LiveView;

use crate::error::AdminError;
use crate::images::ImageSource;

/// Editor contents for one product, new or existing.
#[derive(Debug, Default, Clone)]
pub struct ProductDraft {
    /// `None` creates a new product; `Some` updates in place.
    pub id: Option<String>,
    pub name: String,
    pub sku: String,
    pub brands: Vec<String>,
    pub website: String,
    pub main_image: Option<ImageSource>,
}

/// Admin CRUD over the product collection.
pub struct ProductManager {
    remote: Arc<dyn Collections>,
    media: Arc<dyn MediaStore>,
}

impl ProductManager {
    pub fn new(remote: Arc<dyn Collections>, media: Arc<dyn MediaStore>) -> Self {
        Self { remote, media }
    }

    /// Live table of every product, newest first.
    pub fn live(&self) -> LiveView<Product> {
        let query = Query::collection("products").order_by("createdAt", Direction::Descending);
        LiveView::open(self.remote.clone(), query)
    }

    /// Create or update from the editor. New image files are uploaded
    /// first; a kept URL passes through untouched. Returns the product id.
    pub async fn save(&self, draft: ProductDraft) -> Result<String, AdminError> {
        if draft.name.trim().is_empty() {
            return Err(AdminError::missing("name"));
        }
        if draft.sku.trim().is_empty() {
            return Err(AdminError::missing("sku"));
        }

        let main_image = match &draft.main_image {
            Some(source) => source.resolve(self.media.as_ref()).await?,
            None => String::new(),
        };

        let mut fields = json!({
            "name": draft.name,
            "sku": draft.sku,
            "brands": draft.brands,
            "website": draft.website,
            "mainImage": main_image,
        })
        .as_object()
        .cloned()
        .unwrap_or_default();

        match draft.id {
            Some(id) => {
                self.remote.update_record("products", &id, fields).await?;
                info!(id, "Product updated");
                Ok(id)
            }
            None => {
                fields.insert("createdAt".into(), server_timestamp());
                let id = self.remote.add_record("products", fields).await?;
                info!(id, "Product created");
                Ok(id)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), AdminError> {
        self.remote.delete_record("products", id).await?;
        info!(id, "Product deleted");
        Ok(())
    }
}
