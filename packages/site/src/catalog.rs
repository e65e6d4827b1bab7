use std::sync::Arc;

use common::config::SiteConfig;
use common::records::Product;
use remote::{Collections, Direction, Query};

use crate::cart::{CartError, CartStore};
use crate::search::{filter_products, BrandTab};
use crate::view::LiveView;

/// The public product catalog page.
///
/// The product list is a live view scoped to this website's products,
/// newest first. Search and brand tabs are purely local: they narrow the
/// latest snapshot without touching the subscription, so typing in the
/// search box never re-queries the backend.
pub struct ProductCatalog {
    view: LiveView<Product>,
    cart: Arc<CartStore>,
    search: String,
    brand: BrandTab,
}

impl ProductCatalog {
    pub fn open(remote: Arc<dyn Collections>, cart: Arc<CartStore>, config: &SiteConfig) -> Self {
        let query = Query::collection("products")
            .where_eq("website", config.website.as_str())
            .order_by("createdAt", Direction::Descending);
        Self {
            view: LiveView::open(remote, query),
            cart,
            search: String::new(),
            brand: BrandTab::All,
        }
    }

    /// The filter bar: `All` first, then the configured brand tabs.
    pub fn tabs(config: &SiteConfig) -> Vec<BrandTab> {
        let mut tabs = vec![BrandTab::All];
        tabs.extend(config.brand_tabs.iter().cloned().map(BrandTab::Brand));
        tabs
    }

    pub fn set_search(&mut self, needle: &str) {
        self.search = needle.to_string();
    }

    pub fn set_brand(&mut self, tab: BrandTab) {
        self.brand = tab;
    }

    /// Products currently shown, in server order.
    pub fn visible(&self) -> Vec<Product> {
        let state = self.view.state();
        filter_products(state.rows(), &self.search, &self.brand)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn ready(&self) -> Result<Vec<Product>, String> {
        self.view.ready().await
    }

    pub fn view(&self) -> &LiveView<Product> {
        &self.view
    }

    pub fn add_to_quote(&self, product: &Product) -> Result<bool, CartError> {
        self.cart.add(product)
    }

    pub fn remove_from_quote(&self, id: &str) -> Result<bool, CartError> {
        self.cart.remove(id)
    }

    pub fn in_quote(&self, id: &str) -> bool {
        self.cart.contains(id)
    }

    pub fn quote_count(&self) -> usize {
        self.cart.count()
    }
}
