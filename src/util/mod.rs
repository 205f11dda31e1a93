//! Utility functions shared by the store, the page controllers and the CLI.
//!
//! - **URL validation**: image URLs from article data must be public http(s)
//! - **Text processing**: width-aware truncation, control-char stripping,
//!   date/view formatting and HTML-to-text for terminal output
//!
//! # Examples
//!
//! ```
//! use newsdesk::util::{format_views, truncate_to_width, validate_image_url};
//!
//! assert!(validate_image_url("https://images.unsplash.com/photo-1").is_ok());
//! assert_eq!(format_views(5400), "5.4K");
//! assert_eq!(truncate_to_width("Long article title", 10), "Long ar...");
//! ```

mod text;
mod url_validator;

pub use text::{
    display_width, format_date, format_views, html_to_text, strip_control_chars,
    truncate_to_width,
};
pub use url_validator::{validate_image_url, UrlValidationError};

/// Maximum accepted search query length, in bytes. Longer input is cut on a
/// character boundary before it reaches page state or the URL.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
