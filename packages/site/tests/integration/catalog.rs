use remote::Collections;
use site::careers::CareersBoard;
use site::catalog::ProductCatalog;
use site::search::BrandTab;

use crate::common::TestSite;

mod live_catalog {
    use super::*;

    #[tokio::test]
    async fn new_products_appear_without_reopening_the_page() {
        let site = TestSite::new();
        site.seed_product("Track Light", &["LIT"], "2026-01-01T00:00:00Z")
            .await;

        let catalog = ProductCatalog::open(site.collections(), site.cart.clone(), &site.config);
        catalog.ready().await.unwrap();
        assert_eq!(catalog.visible().len(), 1);

        site.seed_product("Ceiling Panel", &["ZUMTOBEL"], "2026-01-02T00:00:00Z")
            .await;
        catalog.view().next_change().await;

        let names: Vec<String> = catalog.visible().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Ceiling Panel", "Track Light"]);
    }

    #[tokio::test]
    async fn late_arrival_with_the_newest_timestamp_sorts_first() {
        let site = TestSite::new();
        site.seed_product("P1", &["LIT"], "2026-01-02T00:00:00Z").await;
        site.seed_product("P2", &["LIT"], "2026-01-01T00:00:00Z").await;

        let catalog = ProductCatalog::open(site.collections(), site.cart.clone(), &site.config);
        let initial: Vec<String> = catalog
            .ready()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(initial, vec!["P1", "P2"]);

        site.seed_product("P3", &["LIT"], "2026-01-03T00:00:00Z").await;
        catalog.view().next_change().await;

        let names: Vec<String> = catalog.visible().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["P3", "P1", "P2"]);
    }

    #[tokio::test]
    async fn filters_survive_a_live_update() {
        let site = TestSite::new();
        site.seed_product("Track Light", &["LIT"], "2026-01-01T00:00:00Z")
            .await;

        let mut catalog = ProductCatalog::open(site.collections(), site.cart.clone(), &site.config);
        catalog.ready().await.unwrap();
        catalog.set_search("track");
        catalog.set_brand(BrandTab::Brand("LIT".into()));
        assert_eq!(catalog.visible().len(), 1);

        // A new product that matches neither filter arrives mid-browse.
        site.seed_product("Ceiling Panel", &["ZUMTOBEL"], "2026-01-02T00:00:00Z")
            .await;
        catalog.view().next_change().await;

        let names: Vec<String> = catalog.visible().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Track Light"]);
    }

    #[tokio::test]
    async fn other_websites_products_are_never_shown() {
        let site = TestSite::new();
        site.seed_product("Ours", &["LIT"], "2026-01-01T00:00:00Z").await;
        site.remote
            .add_record(
                "products",
                serde_json::json!({
                    "name": "Theirs",
                    "website": "OtherBrand",
                    "createdAt": "2026-01-02T00:00:00Z",
                })
                .as_object()
                .unwrap()
                .clone(),
            )
            .await
            .unwrap();

        let catalog = ProductCatalog::open(site.collections(), site.cart.clone(), &site.config);
        let products = catalog.ready().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Ours");
    }

    #[tokio::test]
    async fn closing_the_page_closes_its_subscription() {
        let site = TestSite::new();
        let catalog = ProductCatalog::open(site.collections(), site.cart.clone(), &site.config);
        catalog.ready().await.unwrap();
        assert_eq!(site.remote.subscriber_count(), 1);

        drop(catalog);
        tokio::task::yield_now().await;
        assert_eq!(site.remote.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn brand_tabs_come_from_configuration() {
        let site = TestSite::new();
        let tabs = ProductCatalog::tabs(&site.config);
        let labels: Vec<&str> = tabs.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["All", "LIT", "ZUMTOBEL"]);
    }
}

mod live_careers {
    use super::*;

    #[tokio::test]
    async fn closing_a_posting_removes_it_and_its_lone_category_tab() {
        let site = TestSite::new();
        let designer = site
            .seed_job("Designer", "Design", "Open", "2026-01-02T00:00:00Z")
            .await;
        site.seed_job("Electrician", "Field", "Open", "2026-01-01T00:00:00Z")
            .await;

        let board = CareersBoard::open(site.collections());
        board.ready().await.unwrap();
        assert_eq!(board.categories(), vec!["All", "Design", "Field"]);

        site.remote
            .update_record(
                "careers",
                &designer,
                serde_json::json!({ "status": "Closed" })
                    .as_object()
                    .unwrap()
                    .clone(),
            )
            .await
            .unwrap();
        board.view().next_change().await;

        assert_eq!(board.categories(), vec!["All", "Field"]);
        let titles: Vec<String> = board.visible().iter().map(|j| j.title.clone()).collect();
        assert_eq!(titles, vec!["Electrician"]);
    }
}
