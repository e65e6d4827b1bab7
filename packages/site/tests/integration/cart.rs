use std::sync::Arc;
use std::time::Duration;

use remote::Collections;
use site::cart::{CartStore, FileCartStorage, CART_KEY};
use site::catalog::ProductCatalog;

use crate::common::TestSite;

#[tokio::test]
async fn cart_changes_propagate_to_every_view() {
    let site = TestSite::new();
    site.seed_product("Track Light", &["LIT"], "2026-01-01T00:00:00Z")
        .await;

    // Catalog page and, say, the navigation badge share one cart.
    let catalog = ProductCatalog::open(site.collections(), site.cart.clone(), &site.config);
    let products = catalog.ready().await.unwrap();

    let mut badge = site.cart.subscribe();
    catalog.add_to_quote(&products[0]).unwrap();

    badge.recv().await.unwrap();
    assert_eq!(site.cart.count(), 1);
    assert!(catalog.in_quote(&products[0].id));
}

#[tokio::test]
async fn adding_twice_from_different_views_keeps_one_line() {
    let site = TestSite::new();
    site.seed_product("Track Light", &["LIT"], "2026-01-01T00:00:00Z")
        .await;

    let page_one = ProductCatalog::open(site.collections(), site.cart.clone(), &site.config);
    let page_two = ProductCatalog::open(site.collections(), site.cart.clone(), &site.config);
    let products = page_one.ready().await.unwrap();
    page_two.ready().await.unwrap();

    assert!(page_one.add_to_quote(&products[0]).unwrap());
    assert!(!page_two.add_to_quote(&products[0]).unwrap());
    assert_eq!(site.cart.count(), 1);

    assert!(page_two.remove_from_quote(&products[0].id).unwrap());
    assert_eq!(page_one.quote_count(), 0);
}

#[tokio::test]
async fn external_file_change_reaches_a_watching_cart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{CART_KEY}.json"));

    let watching = Arc::new(
        CartStore::open(Box::new(FileCartStorage::new(path.clone()).unwrap())).unwrap(),
    );
    watching.watch_external().unwrap();
    let mut signal = watching.subscribe();

    // A second process writes the same cart file.
    let writer = CartStore::open(Box::new(FileCartStorage::new(path).unwrap())).unwrap();
    let site = TestSite::new();
    let id = site
        .seed_product("Track Light", &["LIT"], "2026-01-01T00:00:00Z")
        .await;
    let doc = site.remote.get_one("products", &id).await.unwrap().unwrap();
    let product: common::records::Product = doc.decode().unwrap();
    writer.add(&product).unwrap();

    tokio::time::timeout(Duration::from_secs(5), signal.recv())
        .await
        .expect("no change signal within 5s")
        .unwrap();
    assert_eq!(watching.count(), 1);
    assert!(watching.contains(&product.id));
}
