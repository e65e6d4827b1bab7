use std::sync::Arc;

use tracing::warn;

use common::config::SiteConfig;
use common::records::BlogPost;
use remote::{Collections, Direction, Query, RemoteError};

use crate::view::{LiveView, ViewState};

/// How many posts the landing section shows.
const LANDING_LIMIT: usize = 6;

/// A live list of this website's posts, newest first.
pub struct BlogList {
    view: LiveView<BlogPost>,
}

impl BlogList {
    /// The landing section: capped at the newest few posts.
    pub fn open(remote: Arc<dyn Collections>, config: &SiteConfig) -> Self {
        Self::with_limit(remote, config, Some(LANDING_LIMIT))
    }

    /// The full blog index page.
    pub fn open_all(remote: Arc<dyn Collections>, config: &SiteConfig) -> Self {
        Self::with_limit(remote, config, None)
    }

    fn with_limit(remote: Arc<dyn Collections>, config: &SiteConfig, limit: Option<usize>) -> Self {
        let mut query = Query::collection("blogs")
            .where_eq("website", config.website.as_str())
            .order_by("createdAt", Direction::Descending);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Self {
            view: LiveView::open(remote, query),
        }
    }

    pub fn state(&self) -> ViewState<BlogPost> {
        self.view.state()
    }

    pub async fn ready(&self) -> Result<Vec<BlogPost>, String> {
        self.view.ready().await
    }

    pub fn view(&self) -> &LiveView<BlogPost> {
        &self.view
    }
}

/// One-shot lookup for a post detail page. Slugs are expected to be
/// unique; if several posts share one, the first match wins.
pub async fn post_by_slug(
    remote: &dyn Collections,
    slug: &str,
) -> Result<Option<BlogPost>, RemoteError> {
    let query = Query::collection("blogs").where_eq("slug", slug).limit(1);
    let snapshot = remote.fetch(query).await?;
    match snapshot.first() {
        Some(doc) => match doc.decode::<BlogPost>() {
            Ok(post) => Ok(Some(post)),
            Err(e) => {
                warn!(slug, error = %e, "Skipping malformed blog post");
                Ok(None)
            }
        },
        None => Ok(None),
    }
}
