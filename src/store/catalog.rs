use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::queries::ArticleStore;
use super::types::{Article, ArticleId, ArticleRecord, CatalogError};

/// The article data shipped with the binary.
const EMBEDDED_ARTICLES: &str = include_str!("../../data/articles.json");

/// Largest article data file accepted by [`Catalog::open`] (8 MB).
const MAX_DATA_FILE_SIZE: u64 = 8 * 1_048_576;

/// In-memory article collection.
///
/// Cloning is cheap: the articles and the id index are shared behind `Arc`s,
/// so controllers and background tasks can each hold their own handle.
#[derive(Debug, Clone)]
pub struct Catalog {
    articles: Arc<[Arc<Article>]>,
    by_id: Arc<HashMap<ArticleId, usize>>,
}

impl Catalog {
    /// Load the collection embedded in the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_ARTICLES)
    }

    /// Load an alternative collection from a JSON file with the same schema
    /// as the embedded one.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_DATA_FILE_SIZE {
            return Err(CatalogError::TooLarge(format!(
                "{} is {} bytes (max {} bytes)",
                path.display(),
                meta.len(),
                MAX_DATA_FILE_SIZE
            )));
        }
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), articles = catalog.len(), "Loaded article data file");
        Ok(catalog)
    }

    /// Parse a JSON array of article records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ArticleRecord> = serde_json::from_str(json)?;
        Self::from_articles(records.into_iter().map(ArticleRecord::into_article))
    }

    /// Build a catalog from already-constructed articles, keeping their order.
    ///
    /// Fails if an id is not positive or appears twice.
    pub fn from_articles(
        articles: impl IntoIterator<Item = Article>,
    ) -> Result<Self, CatalogError> {
        let articles: Vec<Arc<Article>> = articles.into_iter().map(Arc::new).collect();
        let mut by_id = HashMap::with_capacity(articles.len());

        for (index, article) in articles.iter().enumerate() {
            if article.id <= 0 {
                return Err(CatalogError::InvalidId(article.id));
            }
            if by_id.insert(article.id, index).is_some() {
                return Err(CatalogError::DuplicateId(article.id));
            }
        }

        tracing::debug!(articles = articles.len(), "Article catalog built");

        Ok(Self {
            articles: articles.into(),
            by_id: Arc::new(by_id),
        })
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

impl ArticleStore for Catalog {
    fn all(&self) -> &[Arc<Article>] {
        &self.articles
    }

    fn get_by_id(&self, id: ArticleId) -> Option<Arc<Article>> {
        self.by_id
            .get(&id)
            .and_then(|&index| self.articles.get(index))
            .cloned()
    }
}
