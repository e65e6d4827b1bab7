use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use common::records::Product;

/// Storage key for the persisted quote cart.
pub const CART_KEY: &str = "disruptive_quote_cart";

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart storage error: {0}")]
    Storage(#[from] io::Error),
    #[error("cart watcher error: {0}")]
    Watch(#[from] notify::Error),
    #[error("cart has no persistent path to watch")]
    NotWatchable,
}

/// The product fields carried into a quote request. A denormalized copy:
/// later edits to the product do not retroactively change cart lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub main_image: String,
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            main_image: product.main_image.clone(),
        }
    }
}

/// Where the serialized cart lives between sessions.
pub trait CartStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>, io::Error>;
    fn store(&self, serialized: &str) -> Result<(), io::Error>;
    /// Backing file, when there is one worth watching for outside writes.
    fn path(&self) -> Option<&Path> {
        None
    }
}

/// Volatile storage for tests and one-shot sessions.
#[derive(Default)]
pub struct MemoryCartStorage {
    contents: Mutex<Option<String>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Option<String>, io::Error> {
        Ok(lock(&self.contents).clone())
    }

    fn store(&self, serialized: &str) -> Result<(), io::Error> {
        *lock(&self.contents) = Some(serialized.to_string());
        Ok(())
    }
}

/// Cart persisted to a single JSON file, written atomically via a temp
/// file and rename so a concurrent reader never sees a half-written cart.
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    pub fn new(path: PathBuf) -> Result<Self, io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Per-user default location under the platform data directory.
    pub fn default_path() -> Result<PathBuf, io::Error> {
        let base = dirs::data_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no data directory"))?;
        Ok(base.join("disruptive").join(format!("{CART_KEY}.json")))
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Result<Option<String>, io::Error> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store(&self, serialized: &str) -> Result<(), io::Error> {
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, &self.path)
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// The shared quote cart.
///
/// One instance per process; every catalog view and the navigation badge
/// hold the same `Arc<CartStore>` and learn about changes through
/// [`CartStore::subscribe`]. Mutations persist first, then signal, so a
/// subscriber that reloads on the signal always sees the new contents.
pub struct CartStore {
    storage: Box<dyn CartStorage>,
    items: Mutex<Vec<CartItem>>,
    signal: broadcast::Sender<()>,
    watcher: Mutex<Option<RecommendedWatcher>>,
}

impl CartStore {
    /// Open the cart, hydrating from whatever storage holds. Unreadable
    /// contents degrade to an empty cart rather than failing the caller.
    pub fn open(storage: Box<dyn CartStorage>) -> Result<Self, CartError> {
        let items = match storage.load()? {
            Some(serialized) => parse_items(&serialized),
            None => Vec::new(),
        };
        let (signal, _) = broadcast::channel(16);
        Ok(Self {
            storage,
            items: Mutex::new(items),
            signal,
            watcher: Mutex::new(None),
        })
    }

    /// Open the cart at its configured file, or the per-user default
    /// location when no path is configured.
    pub fn from_config(config: &common::config::CartConfig) -> Result<Self, CartError> {
        let path = match &config.path {
            Some(path) => path.clone(),
            None => FileCartStorage::default_path()?,
        };
        Self::open(Box::new(FileCartStorage::new(path)?))
    }

    pub fn in_memory() -> Self {
        Self {
            storage: Box::new(MemoryCartStorage::new()),
            items: Mutex::new(Vec::new()),
            signal: broadcast::channel(16).0,
            watcher: Mutex::new(None),
        }
    }

    pub fn items(&self) -> Vec<CartItem> {
        lock(&self.items).clone()
    }

    pub fn count(&self) -> usize {
        lock(&self.items).len()
    }

    pub fn contains(&self, id: &str) -> bool {
        lock(&self.items).iter().any(|item| item.id == id)
    }

    /// Add a product to the cart. Returns `false` without persisting or
    /// signalling when the product is already present.
    pub fn add(&self, product: &Product) -> Result<bool, CartError> {
        let serialized = {
            let mut items = lock(&self.items);
            if items.iter().any(|item| item.id == product.id) {
                return Ok(false);
            }
            items.push(CartItem::from(product));
            serialize_items(&items)
        };
        self.storage.store(&serialized)?;
        let _ = self.signal.send(());
        Ok(true)
    }

    /// Remove by product id. Absent ids are a no-op, so remove is the
    /// inverse of a successful add.
    pub fn remove(&self, id: &str) -> Result<bool, CartError> {
        let serialized = {
            let mut items = lock(&self.items);
            let before = items.len();
            items.retain(|item| item.id != id);
            if items.len() == before {
                return Ok(false);
            }
            serialize_items(&items)
        };
        self.storage.store(&serialized)?;
        let _ = self.signal.send(());
        Ok(true)
    }

    pub fn clear(&self) -> Result<(), CartError> {
        let serialized = {
            let mut items = lock(&self.items);
            if items.is_empty() {
                return Ok(());
            }
            items.clear();
            serialize_items(&items)
        };
        self.storage.store(&serialized)?;
        let _ = self.signal.send(());
        Ok(())
    }

    /// Change notifications. Fired after every mutation and after every
    /// external reload; receivers re-read [`CartStore::items`].
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.signal.subscribe()
    }

    /// Re-read storage, replacing the in-memory contents. Used when the
    /// backing file was changed by another process.
    pub fn reload(&self) -> Result<(), CartError> {
        let items = match self.storage.load()? {
            Some(serialized) => parse_items(&serialized),
            None => Vec::new(),
        };
        *lock(&self.items) = items;
        let _ = self.signal.send(());
        Ok(())
    }

    /// Start forwarding outside writes to the backing file into the change
    /// signal, so carts in separate processes stay in step.
    ///
    /// Watches the parent directory: atomic writers replace the file by
    /// rename, which a watch on the file itself would lose track of.
    pub fn watch_external(self: &Arc<Self>) -> Result<(), CartError> {
        let path = self
            .storage
            .path()
            .ok_or(CartError::NotWatchable)?
            .to_path_buf();
        let dir = path
            .parent()
            .ok_or(CartError::NotWatchable)?
            .to_path_buf();
        // A weak handle: the watcher lives inside the store, so a strong one
        // would keep the store alive forever.
        let store = Arc::downgrade(self);
        let cart_file = path.clone();
        let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
            match event {
                Ok(event) => {
                    if !event.paths.iter().any(|p| p == &cart_file) {
                        return;
                    }
                    let Some(store) = store.upgrade() else {
                        return;
                    };
                    if let Err(e) = store.reload() {
                        warn!(error = %e, "Failed to reload cart after external change");
                    }
                }
                Err(e) => warn!(error = %e, "Cart watcher error"),
            }
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching cart file for external changes");
        *lock(&self.watcher) = Some(watcher);
        Ok(())
    }
}

fn serialize_items(items: &[CartItem]) -> String {
    // Serializing a Vec of plain structs to a String cannot fail.
    serde_json::to_string(items).unwrap_or_default()
}

/// Corrupted persisted carts degrade to empty instead of wedging the UI.
fn parse_items(serialized: &str) -> Vec<CartItem> {
    match serde_json::from_str(serialized) {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "Discarding unreadable cart contents");
            Vec::new()
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
