//! Page controllers for the listing and detail pages, and the href routing
//! that binds their state to the URL.

mod controller;
mod detail;
mod listing;
mod loader;
mod route;

pub use controller::{ListingController, ListingSettings, ListingView, DEFAULT_TRENDING_LIMIT};
pub use detail::{DetailView, DEFAULT_RELATED_LIMIT};
pub use listing::{reduce, ListingAction, ListingState, Phase, DEFAULT_ITEMS_PER_PAGE};
pub use loader::{Reveal, RevealScheduler, DEFAULT_REVEAL_DELAY};
pub use route::{
    normalize_search_query, search_redirect, DetailRoute, ListingRoute, Route, DETAIL_PAGE,
    LISTING_PAGE,
};
