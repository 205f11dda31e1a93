//! Two-way binding between page state and navigable hrefs.
//!
//! Every filter, search or category-link action produces an href; parsing that
//! href on load or on back/forward reconstructs the same route. All state
//! lives in the query string, so history entries need no side storage.
//!
//! | Route                         | Href                          |
//! |-------------------------------|-------------------------------|
//! | `ListingRoute::All`           | `index.html`                  |
//! | `ListingRoute::Category("x")` | `index.html?category=x`       |
//! | `ListingRoute::Search("a b")` | `index.html?search=a+b`       |
//! | `DetailRoute { id: Some(5) }` | `article.html?id=5`           |

use url::form_urlencoded;
use url::Url;

use crate::store::{is_all_categories, ArticleId};
use crate::util::{strip_control_chars, MAX_SEARCH_QUERY_LENGTH};

/// Hrefs are resolved against this base; only path and query matter.
const BASE_URL: &str = "https://newsdesk.local/";

pub const LISTING_PAGE: &str = "index.html";
pub const DETAIL_PAGE: &str = "article.html";

/// Listing page filter as carried in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingRoute {
    /// No category filter, no search.
    All,
    /// Normalized (trimmed, lower-case) category name, never "all".
    Category(String),
    /// Normalized search text, never blank.
    Search(String),
}

impl ListingRoute {
    /// Route for a category selection. "all" and blank map to [`ListingRoute::All`].
    pub fn category(category: &str) -> Self {
        let category = strip_control_chars(category).trim().to_lowercase();
        if is_all_categories(&category) {
            Self::All
        } else {
            Self::Category(category)
        }
    }

    /// Route for a search. Blank queries map to [`ListingRoute::All`].
    pub fn search(query: &str) -> Self {
        let query = normalize_search_query(query);
        if query.is_empty() {
            Self::All
        } else {
            Self::Search(query)
        }
    }

    /// Parse a listing href (`index.html?...`, `?category=x`, `/`).
    ///
    /// A present, non-blank `category` parameter wins over `search`.
    pub fn parse(href: &str) -> Self {
        match resolve(href) {
            Some(url) => Self::from_url(&url),
            None => Self::All,
        }
    }

    fn from_url(url: &Url) -> Self {
        let category = first_param(url, "category");
        let search = first_param(url, "search");

        match (category, search) {
            (Some(category), _) if !category.trim().is_empty() => Self::category(&category),
            (_, Some(query)) => Self::search(&query),
            _ => Self::All,
        }
    }

    /// The href that [`ListingRoute::parse`] maps back to `self`.
    pub fn to_href(&self) -> String {
        match self {
            Self::All => LISTING_PAGE.to_string(),
            Self::Category(category) => format!("{}?{}", LISTING_PAGE, encode("category", category)),
            Self::Search(query) => format!("{}?{}", LISTING_PAGE, encode("search", query)),
        }
    }
}

/// Detail page route. `id` is `None` when the parameter is missing or is not
/// an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRoute {
    pub id: Option<ArticleId>,
}

impl DetailRoute {
    pub fn new(id: ArticleId) -> Self {
        Self { id: Some(id) }
    }

    pub fn parse(href: &str) -> Self {
        let id = resolve(href)
            .and_then(|url| first_param(&url, "id"))
            .and_then(|raw| parse_article_id(&raw));
        Self { id }
    }

    pub fn to_href(&self) -> String {
        match self.id {
            Some(id) => format!("{}?id={}", DETAIL_PAGE, id),
            None => DETAIL_PAGE.to_string(),
        }
    }
}

/// Any page of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Listing(ListingRoute),
    Detail(DetailRoute),
}

impl Route {
    /// Dispatch on the page name: `article.html` is the detail page, anything
    /// else is the listing page.
    pub fn parse(href: &str) -> Self {
        let Some(url) = resolve(href) else {
            return Self::Listing(ListingRoute::All);
        };
        let is_detail = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .is_some_and(|page| page.eq_ignore_ascii_case(DETAIL_PAGE));

        if is_detail {
            Self::Detail(DetailRoute::parse(href))
        } else {
            Self::Listing(ListingRoute::from_url(&url))
        }
    }

    pub fn to_href(&self) -> String {
        match self {
            Self::Listing(route) => route.to_href(),
            Self::Detail(route) => route.to_href(),
        }
    }
}

/// Where the detail page's search box sends the reader: the listing page in
/// search mode. `None` for a blank query (the form does nothing).
pub fn search_redirect(query: &str) -> Option<String> {
    match ListingRoute::search(query) {
        route @ ListingRoute::Search(_) => Some(route.to_href()),
        _ => None,
    }
}

/// Canonical form of user search input: control characters stripped, trimmed,
/// capped at [`MAX_SEARCH_QUERY_LENGTH`] bytes on a char boundary.
pub fn normalize_search_query(query: &str) -> String {
    let stripped = strip_control_chars(query);
    let mut query = stripped.trim();
    if query.len() > MAX_SEARCH_QUERY_LENGTH {
        let mut cut = MAX_SEARCH_QUERY_LENGTH;
        while !query.is_char_boundary(cut) {
            cut -= 1;
        }
        query = query[..cut].trim_end();
    }
    query.to_string()
}

fn parse_article_id(raw: &str) -> Option<ArticleId> {
    match raw.trim().parse::<ArticleId>() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(raw = %raw, error = %e, "Ignoring non-numeric article id");
            None
        }
    }
}

fn resolve(href: &str) -> Option<Url> {
    let base = Url::parse(BASE_URL).ok()?;
    match base.join(href.trim()) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(href = %href, error = %e, "Unparsable href, falling back to home page");
            None
        }
    }
}

fn first_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn encode(key: &str, value: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_listing_hrefs() {
        assert_eq!(ListingRoute::All.to_href(), "index.html");
        assert_eq!(
            ListingRoute::category("Sports").to_href(),
            "index.html?category=sports"
        );
        assert_eq!(
            ListingRoute::search("  quantum computing ").to_href(),
            "index.html?search=quantum+computing"
        );
    }

    #[test]
    fn test_parse_listing() {
        assert_eq!(ListingRoute::parse("index.html"), ListingRoute::All);
        assert_eq!(ListingRoute::parse("/"), ListingRoute::All);
        assert_eq!(
            ListingRoute::parse("index.html?category=Business"),
            ListingRoute::Category("business".to_string())
        );
        assert_eq!(
            ListingRoute::parse("index.html?category=all"),
            ListingRoute::All
        );
        assert_eq!(
            ListingRoute::parse("index.html?search=AI%20%26%20jobs"),
            ListingRoute::Search("AI & jobs".to_string())
        );
        assert_eq!(ListingRoute::parse("index.html?search=%20%20"), ListingRoute::All);
    }

    #[test]
    fn test_category_param_wins_over_search() {
        assert_eq!(
            ListingRoute::parse("index.html?search=ai&category=sports"),
            ListingRoute::Category("sports".to_string())
        );
        assert_eq!(
            ListingRoute::parse("index.html?category=&search=ai"),
            ListingRoute::Search("ai".to_string())
        );
    }

    #[test]
    fn test_listing_round_trip() {
        let routes = [
            ListingRoute::All,
            ListingRoute::category("technology"),
            ListingRoute::category("a&b=c"),
            ListingRoute::search("quantum"),
            ListingRoute::search("100% + more & less"),
            ListingRoute::search("日本語 ニュース"),
        ];
        for route in routes {
            assert_eq!(ListingRoute::parse(&route.to_href()), route);
        }
    }

    #[test]
    fn test_detail_routes() {
        assert_eq!(DetailRoute::parse("article.html?id=13").id, Some(13));
        assert_eq!(DetailRoute::parse("article.html?id=%2013%20").id, Some(13));
        assert_eq!(DetailRoute::parse("article.html?id=abc").id, None);
        assert_eq!(DetailRoute::parse("article.html?id=12abc").id, None);
        assert_eq!(DetailRoute::parse("article.html").id, None);
        assert_eq!(DetailRoute::new(7).to_href(), "article.html?id=7");
    }

    #[test]
    fn test_route_dispatch() {
        assert_eq!(
            Route::parse("article.html?id=4"),
            Route::Detail(DetailRoute::new(4))
        );
        assert_eq!(
            Route::parse("/news/article.html?id=4"),
            Route::Detail(DetailRoute::new(4))
        );
        assert_eq!(
            Route::parse("index.html?category=sports"),
            Route::Listing(ListingRoute::Category("sports".to_string()))
        );
        assert_eq!(
            Route::parse("?search=ai"),
            Route::Listing(ListingRoute::Search("ai".to_string()))
        );
        assert_eq!(Route::parse(""), Route::Listing(ListingRoute::All));
    }

    #[test]
    fn test_search_redirect() {
        assert_eq!(
            search_redirect("climate change").as_deref(),
            Some("index.html?search=climate+change")
        );
        assert_eq!(search_redirect("   "), None);
    }

    #[test]
    fn test_normalize_search_query_caps_length() {
        let long = "é".repeat(MAX_SEARCH_QUERY_LENGTH);
        let normalized = normalize_search_query(&long);
        assert!(normalized.len() <= MAX_SEARCH_QUERY_LENGTH);
        assert_eq!(normalize_search_query(&normalized), normalized);
        assert_eq!(normalize_search_query("\x1b[1m bold \x1b[0m"), "bold");
    }
}
