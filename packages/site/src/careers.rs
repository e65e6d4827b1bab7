use std::sync::Arc;

use common::records::{JobPosting, JobStatus};
use remote::{Collections, Direction, Query};

use crate::view::LiveView;

/// The label for the synthetic tab that shows every category.
pub const ALL_CATEGORIES: &str = "All";

/// The public careers page.
///
/// Subscribes to the whole collection and narrows locally: closed postings
/// are hidden, and the category tabs are derived from whatever open
/// postings exist right now. A tab can disappear between pushes if its
/// last posting closes; the selection then falls back to showing nothing
/// until the visitor picks another tab.
pub struct CareersBoard {
    view: LiveView<JobPosting>,
    category: String,
}

impl CareersBoard {
    pub fn open(remote: Arc<dyn Collections>) -> Self {
        let query =
            Query::collection("careers").order_by("createdAt", Direction::Descending);
        Self {
            view: LiveView::open(remote, query),
            category: ALL_CATEGORIES.to_string(),
        }
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
    }

    /// Open postings, newest first.
    pub fn open_postings(&self) -> Vec<JobPosting> {
        self.view
            .state()
            .rows()
            .iter()
            .filter(|job| job.status == JobStatus::Open)
            .cloned()
            .collect()
    }

    /// Category tabs: `All` first, then each open posting's category in
    /// first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut tabs = vec![ALL_CATEGORIES.to_string()];
        for job in self.open_postings() {
            if !tabs.contains(&job.category) {
                tabs.push(job.category);
            }
        }
        tabs
    }

    /// Open postings under the selected category tab.
    pub fn visible(&self) -> Vec<JobPosting> {
        self.open_postings()
            .into_iter()
            .filter(|job| self.category == ALL_CATEGORIES || job.category == self.category)
            .collect()
    }

    pub async fn ready(&self) -> Result<Vec<JobPosting>, String> {
        self.view.ready().await
    }

    pub fn view(&self) -> &LiveView<JobPosting> {
        &self.view
    }
}
