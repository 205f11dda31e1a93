//! Listing page state and its reducer.
//!
//! [`ListingState`] is an immutable value; [`reduce`] maps `(state, action)`
//! to the next state using an [`ArticleStore`] for recomputation. Nothing here
//! touches a clock or a channel. The cosmetic loading delay is represented by
//! [`Phase::Loading`] and ended by [`ListingAction::Reveal`], which the
//! controller sends once the delay has elapsed.

use std::sync::Arc;

use super::route::{normalize_search_query, ListingRoute};
use crate::store::{Article, ArticleStore, ALL_CATEGORIES};

/// Articles per page when nothing else is configured.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 9;

/// Whether the current result set has been revealed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Results are computed but held back until the reveal for `generation`.
    Loading { generation: u64 },
    Ready,
}

/// Every input the listing page reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    /// Initial load, and back/forward navigation.
    Navigate(ListingRoute),
    /// Filter button or nav link.
    SelectCategory(String),
    /// Search form submission. Blank input clears the search and re-applies
    /// the current category.
    SubmitSearch(String),
    /// Append the next page.
    LoadMore,
    /// The loading delay for `generation` has elapsed.
    Reveal { generation: u64 },
}

#[derive(Debug, Clone)]
pub struct ListingState {
    current_page: usize,
    items_per_page: usize,
    category: String,
    search_query: String,
    filtered: Arc<[Arc<Article>]>,
    generation: u64,
    phase: Phase,
}

impl ListingState {
    /// State for a freshly loaded listing page at `route`.
    ///
    /// `items_per_page` of zero is treated as one.
    pub fn new<S: ArticleStore + ?Sized>(
        route: ListingRoute,
        items_per_page: usize,
        store: &S,
    ) -> Self {
        let empty = Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
            category: ALL_CATEGORIES.to_string(),
            search_query: String::new(),
            filtered: Arc::from(Vec::new()),
            generation: 0,
            phase: Phase::Ready,
        };
        reduce(&empty, ListingAction::Navigate(route), store)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Active category filter; `"all"` whenever a search is active.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Active search text; empty when no search is active.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The full result set for the current filter or search.
    pub fn filtered(&self) -> &[Arc<Article>] {
        &self.filtered
    }

    /// Bumped every time the result set is recomputed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    fn loaded_len(&self) -> usize {
        (self.current_page * self.items_per_page).min(self.filtered.len())
    }

    /// Everything shown so far: pages `1..=current_page`, concatenated.
    /// Empty while loading.
    pub fn visible(&self) -> &[Arc<Article>] {
        if self.is_loading() {
            return &[];
        }
        &self.filtered[..self.loaded_len()]
    }

    /// Only the most recently appended page.
    pub fn current_page_slice(&self) -> &[Arc<Article>] {
        if self.is_loading() {
            return &[];
        }
        let start = ((self.current_page - 1) * self.items_per_page).min(self.filtered.len());
        &self.filtered[start..self.loaded_len()]
    }

    /// More pages exist beyond the current one.
    pub fn has_more(&self) -> bool {
        !self.is_loading() && self.current_page * self.items_per_page < self.filtered.len()
    }

    /// The filter or search produced nothing. Never true while loading.
    pub fn is_empty(&self) -> bool {
        !self.is_loading() && self.filtered.is_empty()
    }

    /// The route that reproduces this state when parsed.
    pub fn route(&self) -> ListingRoute {
        if !self.search_query.is_empty() {
            ListingRoute::Search(self.search_query.clone())
        } else {
            ListingRoute::category(&self.category)
        }
    }

    /// Category to highlight in the filter bar and nav menu.
    pub fn active_category(&self) -> &str {
        &self.category
    }
}

/// Compute the state that follows `state` after `action`.
///
/// - `Navigate`, `SelectCategory`, `SubmitSearch`: recompute the result set
///   with exactly one of [`ArticleStore::search`] (non-blank search) or
///   [`ArticleStore::get_by_category`], go back to page 1 and start loading.
/// - `LoadMore`: next page of the existing result set; ignored while loading
///   or when nothing is left.
/// - `Reveal`: ends loading, but only for the current generation.
pub fn reduce<S: ArticleStore + ?Sized>(
    state: &ListingState,
    action: ListingAction,
    store: &S,
) -> ListingState {
    match action {
        ListingAction::Navigate(route) => apply_route(state, route, store),
        ListingAction::SelectCategory(category) => {
            apply_route(state, ListingRoute::category(&category), store)
        }
        ListingAction::SubmitSearch(query) => {
            let query = normalize_search_query(&query);
            let route = if query.is_empty() {
                ListingRoute::category(&state.category)
            } else {
                ListingRoute::Search(query)
            };
            apply_route(state, route, store)
        }
        ListingAction::LoadMore => {
            if !state.has_more() {
                tracing::debug!(
                    page = state.current_page,
                    loading = state.is_loading(),
                    "Ignoring load-more: nothing to append"
                );
                return state.clone();
            }
            let mut next = state.clone();
            next.current_page += 1;
            tracing::debug!(page = next.current_page, "Loaded next listing page");
            next
        }
        ListingAction::Reveal { generation } => {
            if state.phase != (Phase::Loading { generation }) {
                tracing::debug!(
                    expected = state.generation,
                    got = generation,
                    "Ignoring stale reveal (generation mismatch)"
                );
                return state.clone();
            }
            let mut next = state.clone();
            next.phase = Phase::Ready;
            next
        }
    }
}

fn apply_route<S: ArticleStore + ?Sized>(
    state: &ListingState,
    route: ListingRoute,
    store: &S,
) -> ListingState {
    let (category, search_query, filtered) = match route {
        ListingRoute::All => (
            ALL_CATEGORIES.to_string(),
            String::new(),
            store.get_by_category(ALL_CATEGORIES),
        ),
        ListingRoute::Category(category) => {
            let filtered = store.get_by_category(&category);
            (category, String::new(), filtered)
        }
        ListingRoute::Search(query) => {
            let filtered = store.search(&query);
            (ALL_CATEGORIES.to_string(), query, filtered)
        }
    };

    let generation = state.generation.wrapping_add(1);
    tracing::debug!(
        category = %category,
        search = %search_query,
        results = filtered.len(),
        generation,
        "Listing results recomputed"
    );

    ListingState {
        current_page: 1,
        items_per_page: state.items_per_page,
        category,
        search_query,
        filtered: filtered.into(),
        generation,
        phase: Phase::Loading { generation },
    }
}
