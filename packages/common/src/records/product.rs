use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Record;

/// A catalog product.
///
/// Referenced by id from the quote cart; the cart keeps its own denormalized
/// copy of the display fields so it survives product edits and deletions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: String,

    pub name: String,
    #[serde(default)]
    pub sku: String,
    /// Main display image URL; empty when none was uploaded.
    #[serde(default)]
    pub main_image: String,
    /// Brand tags, e.g. "LIT", "ZUMTOBEL".
    #[serde(default)]
    pub brands: Vec<String>,
    /// Website tag scoping which site shows this product.
    #[serde(default)]
    pub website: String,

    pub created_at: DateTime<Utc>,
}

impl Record for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }
}
