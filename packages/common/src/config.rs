use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Site-level settings shared by the public pages.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Website tag stamped on documents and used to scope catalog/blog
    /// queries. Default: "Disruptive".
    #[serde(default = "default_website")]
    pub website: String,
    /// Brand tabs offered on the product catalog. Default: ["LIT", "ZUMTOBEL"].
    #[serde(default = "default_brand_tabs")]
    pub brand_tabs: Vec<String>,
}

fn default_website() -> String {
    "Disruptive".into()
}
fn default_brand_tabs() -> Vec<String> {
    vec!["LIT".into(), "ZUMTOBEL".into()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            website: default_website(),
            brand_tabs: default_brand_tabs(),
        }
    }
}

/// Media upload host settings.
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// Root directory for the filesystem-backed media store.
    /// Default: "./data/media".
    #[serde(default = "default_media_root")]
    pub root_dir: PathBuf,
    /// Public URL prefix under which stored media is reachable.
    #[serde(default = "default_media_base_url")]
    pub base_url: String,
    /// Maximum accepted upload size in bytes. Default: 10 MB.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_media_root() -> PathBuf {
    PathBuf::from("./data/media")
}
fn default_media_base_url() -> String {
    "https://media.disruptivesolutionsinc.com".into()
}
fn default_max_upload_size() -> u64 {
    10 * 1024 * 1024
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root_dir: default_media_root(),
            base_url: default_media_base_url(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// Local quote-cart persistence settings.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CartConfig {
    /// Cart file path. Defaults to `disruptive_quote_cart.json` under the
    /// user data directory when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub cart: CartConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., DISRUPTIVE__SITE__WEBSITE)
            .add_source(Environment::with_prefix("DISRUPTIVE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
