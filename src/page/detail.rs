//! Detail page: one article plus related reading.

use std::sync::Arc;

use super::route::DetailRoute;
use crate::store::{Article, ArticleStore};

/// Related articles shown under the body when nothing else is configured.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

const SITE_NAME: &str = "StartupMind";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    /// Missing, non-numeric or unknown id.
    NotFound,
    Found {
        article: Arc<Article>,
        related: Vec<Arc<Article>>,
    },
}

impl DetailView {
    /// Resolve the detail page for `route`. Never fails; every bad id is
    /// [`DetailView::NotFound`].
    pub fn resolve<S: ArticleStore + ?Sized>(
        store: &S,
        route: &DetailRoute,
        related_limit: usize,
    ) -> Self {
        let Some(id) = route.id else {
            tracing::debug!("Detail page without a usable id");
            return Self::NotFound;
        };

        match store.get_by_id(id) {
            Some(article) => {
                let related = store.get_related(id, related_limit);
                tracing::debug!(id, related = related.len(), "Detail page resolved");
                Self::Found { article, related }
            }
            None => {
                tracing::debug!(id, "Detail page for unknown article");
                Self::NotFound
            }
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Document title for the page.
    pub fn page_title(&self) -> String {
        match self {
            Self::Found { article, .. } => format!("{} - {}", article.title, SITE_NAME),
            Self::NotFound => format!("Article Not Found - {}", SITE_NAME),
        }
    }
}
