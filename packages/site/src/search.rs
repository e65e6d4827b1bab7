use common::records::Product;

/// One brand tab in the catalog filter bar.
///
/// `All` shows everything; a named tab keeps products whose brand list
/// contains that brand. Tab matching is exact, search matching is a
/// case-insensitive substring test on the product name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandTab {
    All,
    Brand(String),
}

impl BrandTab {
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Brand(name) => name,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Brand(name) => product.brands.iter().any(|b| b == name),
        }
    }
}

pub fn matches_search(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product
        .name
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

/// Apply the search box and the active brand tab to an already-ordered
/// snapshot. Order is preserved; filtering never re-sorts.
pub fn filter_products<'a>(
    products: &'a [Product],
    search: &str,
    tab: &BrandTab,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| matches_search(p, search) && tab.matches(p))
        .collect()
}
