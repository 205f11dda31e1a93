use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::images::resolve_image_url;
use crate::util::strip_control_chars;

/// Stable article identifier, also used as the `id` URL parameter.
pub type ArticleId = i64;

/// Category sentinel meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// `true` for the "all" sentinel and for an empty/blank category.
pub fn is_all_categories(category: &str) -> bool {
    let category = category.trim();
    category.is_empty() || category.eq_ignore_ascii_case(ALL_CATEGORIES)
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while loading an article collection.
///
/// Queries never fail; these only come out of [`Catalog`](super::Catalog)
/// construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read article data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid article data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Article data file too large: {0}")]
    TooLarge(String),

    #[error("Duplicate article id {0}")]
    DuplicateId(ArticleId),

    #[error("Article id must be a positive integer, got {0}")]
    InvalidId(ArticleId),
}

// ============================================================================
// Data Structures
// ============================================================================

/// A news article. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub category: String,
    /// Image URL after lookup-table substitution and validation.
    pub image: String,
    pub date: NaiveDate,
    pub author: String,
    pub read_time: String,
    pub source: String,
    /// Pre-rendered HTML fragment.
    pub content: String,
    pub tags: Vec<String>,
    pub views: u64,
    pub featured: bool,
}

impl Article {
    /// Case-insensitive exact category match. The "all" sentinel is not
    /// special here; callers decide whether a filter applies at all.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.trim().to_lowercase()
    }

    /// Whether `needle` (already lower-cased) occurs in any searchable field:
    /// title, subtitle, description, author, category, or a tag.
    pub(crate) fn matches_needle(&self, needle: &str) -> bool {
        [
            &self.title,
            &self.subtitle,
            &self.description,
            &self.author,
            &self.category,
        ]
        .into_iter()
        .chain(self.tags.iter())
        .any(|field| field.to_lowercase().contains(needle))
    }

    /// Case-insensitive exact tag match.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

/// On-disk shape of an article (`data/articles.json`).
///
/// Converted to [`Article`] through [`ArticleRecord::into_article`], which
/// resolves the image through the lookup table and strips control characters
/// from the display strings.
#[derive(Debug, Deserialize)]
pub(crate) struct ArticleRecord {
    pub id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub featured: bool,
}

fn clean(s: String) -> String {
    if let Cow::Owned(stripped) = strip_control_chars(&s) {
        return stripped;
    }
    s
}

impl ArticleRecord {
    pub(crate) fn into_article(self) -> Article {
        Article {
            id: self.id,
            title: clean(self.title),
            subtitle: clean(self.subtitle),
            description: clean(self.description),
            category: clean(self.category).trim().to_string(),
            image: resolve_image_url(self.image.as_deref()),
            date: self.date,
            author: clean(self.author),
            read_time: clean(self.read_time),
            source: clean(self.source),
            content: clean(self.content),
            tags: self.tags.into_iter().map(clean).collect(),
            views: self.views,
            featured: self.featured,
        }
    }
}
