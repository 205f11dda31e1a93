//! Query layer and page state for a static news catalog.
//!
//! - [`store`]: the article collection and its read-only queries
//! - [`page`]: listing/detail page controllers and href routing
//! - [`render`]: plain-text rendering of page views
//! - [`config`]: optional TOML configuration

pub mod config;
pub mod page;
pub mod render;
pub mod store;
pub mod util;
