use std::sync::Arc;

use serde_json::json;

use common::config::SiteConfig;
use common::storage::memory::MemoryMediaStore;
use remote::{Collections, MemoryCollections};
use site::cart::CartStore;

/// A fully in-memory site: backend collections, media store, and cart.
pub struct TestSite {
    pub remote: Arc<MemoryCollections>,
    pub media: Arc<MemoryMediaStore>,
    pub cart: Arc<CartStore>,
    pub config: SiteConfig,
}

impl TestSite {
    pub fn new() -> Self {
        common::telemetry::try_init();
        Self {
            remote: Arc::new(MemoryCollections::new()),
            media: Arc::new(MemoryMediaStore::new()),
            cart: Arc::new(CartStore::in_memory()),
            config: SiteConfig::default(),
        }
    }

    pub fn collections(&self) -> Arc<dyn Collections> {
        self.remote.clone()
    }

    /// Seed one product for this website with an explicit creation time so
    /// ordering assertions are deterministic.
    pub async fn seed_product(&self, name: &str, brands: &[&str], created_at: &str) -> String {
        let fields = json!({
            "name": name,
            "sku": format!("SKU-{name}"),
            "mainImage": "",
            "brands": brands,
            "website": &self.config.website,
            "createdAt": created_at,
        });
        self.remote
            .add_record("products", fields.as_object().unwrap().clone())
            .await
            .expect("seed_product failed")
    }

    pub async fn seed_job(&self, title: &str, category: &str, status: &str, created_at: &str) -> String {
        let fields = json!({
            "title": title,
            "category": category,
            "jobType": "Full-time",
            "location": "Manila",
            "qualifications": ["Licensed electrician"],
            "status": status,
            "createdAt": created_at,
        });
        self.remote
            .add_record("careers", fields.as_object().unwrap().clone())
            .await
            .expect("seed_job failed")
    }
}
