use std::collections::BTreeSet;
use std::sync::Arc;

use super::types::{is_all_categories, Article, ArticleId};

/// Read-only query interface over a fixed article collection.
///
/// Only [`all`](ArticleStore::all) is required; every query has a linear
/// default built on it. Implementations may override individual queries with
/// an index as long as results (including order) stay the same.
///
/// No query fails. Absence is `None` or an empty `Vec`.
pub trait ArticleStore {
    /// The full collection in collection order (ascending id for the shipped data).
    fn all(&self) -> &[Arc<Article>];

    /// Exact id lookup.
    fn get_by_id(&self, id: ArticleId) -> Option<Arc<Article>> {
        self.all().iter().find(|a| a.id == id).cloned()
    }

    /// Every article for `"all"` or an empty category, otherwise articles whose
    /// category equals `category` case-insensitively.
    fn get_by_category(&self, category: &str) -> Vec<Arc<Article>> {
        in_category(self.all(), Some(category)).cloned().collect()
    }

    /// Case-insensitive substring search over title, subtitle, description,
    /// author, category and tags. Results keep collection order.
    ///
    /// An empty query matches everything; callers treat blank input as "no
    /// search" before getting here.
    fn search(&self, query: &str) -> Vec<Arc<Article>> {
        let needle = query.to_lowercase();
        self.all()
            .iter()
            .filter(|a| a.matches_needle(&needle))
            .cloned()
            .collect()
    }

    /// Most-viewed articles, optionally within one category.
    ///
    /// Ties keep collection order.
    fn get_trending(&self, limit: usize, category: Option<&str>) -> Vec<Arc<Article>> {
        let mut ranked: Vec<Arc<Article>> = in_category(self.all(), category).cloned().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.views.cmp(&a.views));
        ranked.truncate(limit);
        ranked
    }

    /// The hero article for a category (or for everything).
    ///
    /// The most-viewed featured article, first one winning ties. With no
    /// featured article in the set, falls back to the set's first article
    /// regardless of the flag. `None` only when the set is empty.
    fn get_featured(&self, category: Option<&str>) -> Option<Arc<Article>> {
        let mut candidates = in_category(self.all(), category).peekable();
        let first = candidates.peek().map(|a| Arc::clone(a));

        candidates
            .filter(|a| a.featured)
            .fold(None::<&Arc<Article>>, |best, a| match best {
                Some(best) if a.views <= best.views => Some(best),
                _ => Some(a),
            })
            .cloned()
            .or(first)
    }

    /// Featured articles in collection order, up to `limit`.
    fn get_featured_list(&self, limit: usize) -> Vec<Arc<Article>> {
        self.all()
            .iter()
            .filter(|a| a.featured)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Other articles in the same category as `id`, in collection order.
    /// Empty when `id` is unknown.
    fn get_related(&self, id: ArticleId, limit: usize) -> Vec<Arc<Article>> {
        let Some(current) = self.get_by_id(id) else {
            return Vec::new();
        };
        self.all()
            .iter()
            .filter(|a| a.id != id && a.in_category(&current.category))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Newest articles by calendar date. Same-day articles keep collection order.
    fn get_latest(&self, limit: usize) -> Vec<Arc<Article>> {
        let mut latest: Vec<Arc<Article>> = self.all().to_vec();
        latest.sort_by(|a, b| b.date.cmp(&a.date));
        latest.truncate(limit);
        latest
    }

    /// Case-insensitive exact author match.
    fn get_by_author(&self, name: &str) -> Vec<Arc<Article>> {
        let name = name.to_lowercase();
        self.all()
            .iter()
            .filter(|a| a.author.to_lowercase() == name)
            .cloned()
            .collect()
    }

    /// Case-insensitive exact tag match.
    fn get_by_tag(&self, tag: &str) -> Vec<Arc<Article>> {
        self.all()
            .iter()
            .filter(|a| a.has_tag(tag))
            .cloned()
            .collect()
    }

    /// Distinct category values, sorted.
    fn get_all_categories(&self) -> Vec<String> {
        self.all()
            .iter()
            .map(|a| a.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Articles passing an optional category filter. `None`, `"all"` and blank
/// mean no filter.
fn in_category<'a>(
    articles: &'a [Arc<Article>],
    category: Option<&'a str>,
) -> impl Iterator<Item = &'a Arc<Article>> + 'a {
    let filter = category.filter(|c| !is_all_categories(c));
    articles
        .iter()
        .filter(move |a| filter.map_or(true, |c| a.in_category(c)))
}
