//! Article store: the fixed article collection and its query layer.

mod catalog;
mod images;
mod queries;
mod types;

pub use catalog::Catalog;
pub use images::{resolve_image_url, PLACEHOLDER_IMAGE};
pub use queries::ArticleStore;
pub use types::{is_all_categories, Article, ArticleId, CatalogError, ALL_CATEGORIES};
