//! Listing page controller.
//!
//! Owns the current [`ListingState`], the reveal scheduler and the history of
//! hrefs the page has pushed. Actions go through [`reduce`]; whenever the
//! result set is recomputed a new reveal is scheduled for the new generation.

use std::sync::Arc;
use std::time::Duration;

use super::listing::{reduce, ListingAction, ListingState, DEFAULT_ITEMS_PER_PAGE};
use super::loader::{RevealScheduler, DEFAULT_REVEAL_DELAY};
use super::route::ListingRoute;
use crate::config::Config;
use crate::store::{Article, ArticleStore};

/// Length of the trending strip when nothing else is configured.
pub const DEFAULT_TRENDING_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSettings {
    pub items_per_page: usize,
    pub trending_limit: usize,
    pub reveal_delay: Duration,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }
}

impl ListingSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            items_per_page: config.items_per_page,
            trending_limit: config.trending_limit,
            reveal_delay: config.reveal_delay(),
        }
    }
}

/// Everything the listing page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    /// Pages `1..=current_page` in order. Empty while loading.
    pub articles: Vec<Arc<Article>>,
    pub has_more: bool,
    pub is_empty: bool,
    pub is_loading: bool,
    /// Highlighted filter button / nav link; "all" in search mode.
    pub active_category: String,
    pub search_query: String,
    /// Hero article for the active category.
    pub featured: Option<Arc<Article>>,
    pub trending: Vec<Arc<Article>>,
}

pub struct ListingController<S: ArticleStore> {
    store: S,
    settings: ListingSettings,
    state: ListingState,
    history: Vec<String>,
    scheduler: RevealScheduler,
}

impl<S: ArticleStore> ListingController<S> {
    /// Load the listing page at `route` and schedule its first reveal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(store: S, route: ListingRoute, settings: ListingSettings) -> Self {
        let state = ListingState::new(route, settings.items_per_page, &store);
        let mut scheduler = RevealScheduler::new(settings.reveal_delay);
        scheduler.schedule(state.generation());

        let href = state.route().to_href();
        tracing::debug!(href = %href, results = state.filtered().len(), "Listing page loaded");

        Self {
            store,
            settings,
            state,
            history: vec![href],
            scheduler,
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> ListingSettings {
        self.settings
    }

    /// Hrefs pushed so far, oldest first. Starts with the initial route.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The href that reproduces the current state.
    pub fn current_href(&self) -> String {
        self.state.route().to_href()
    }

    /// Apply one action.
    ///
    /// Category and search changes push their href onto the history unless it
    /// equals the latest entry. `Navigate` is the back/forward path and never
    /// pushes.
    pub fn dispatch(&mut self, action: ListingAction) {
        let pushes_history = matches!(
            action,
            ListingAction::SelectCategory(_) | ListingAction::SubmitSearch(_)
        );

        let next = reduce(&self.state, action, &self.store);
        if next.generation() != self.state.generation() {
            self.scheduler.schedule(next.generation());
        }
        self.state = next;

        if pushes_history {
            let href = self.state.route().to_href();
            if self.history.last() != Some(&href) {
                tracing::debug!(href = %href, "Pushing history entry");
                self.history.push(href);
            }
        }
    }

    /// Apply every reveal that has already fired, without waiting.
    pub fn poll_reveals(&mut self) {
        while let Some(reveal) = self.scheduler.try_next() {
            self.dispatch(ListingAction::Reveal {
                generation: reveal.generation,
            });
        }
    }

    /// Wait until the current result set has been revealed.
    pub async fn settle(&mut self) {
        while self.state.is_loading() {
            match self.scheduler.next().await {
                Some(reveal) => self.dispatch(ListingAction::Reveal {
                    generation: reveal.generation,
                }),
                None => break,
            }
        }
    }

    pub fn view(&self) -> ListingView {
        let category = self.state.active_category();
        ListingView {
            articles: self.state.visible().to_vec(),
            has_more: self.state.has_more(),
            is_empty: self.state.is_empty(),
            is_loading: self.state.is_loading(),
            active_category: category.to_string(),
            search_query: self.state.search_query().to_string(),
            featured: self.store.get_featured(Some(category)),
            trending: self
                .store
                .get_trending(self.settings.trending_limit, Some(category)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Catalog;
    use pretty_assertions::assert_eq;

    fn controller(route: ListingRoute) -> ListingController<Catalog> {
        ListingController::new(
            Catalog::embedded().unwrap(),
            route,
            ListingSettings::default(),
        )
    }

    fn ids(articles: &[Arc<Article>]) -> Vec<i64> {
        articles.iter().map(|a| a.id).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_load_reveals_after_delay() {
        let start = tokio::time::Instant::now();
        let mut page = controller(ListingRoute::All);
        assert!(page.view().is_loading);
        assert!(page.view().articles.is_empty());

        page.settle().await;
        assert!(start.elapsed() >= DEFAULT_REVEAL_DELAY);

        let view = page.view();
        assert!(!view.is_loading);
        assert_eq!(ids(&view.articles), (1..=9).collect::<Vec<_>>());
        assert!(view.has_more);
        assert_eq!(page.history(), ["index.html"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_request_wins() {
        let mut page = controller(ListingRoute::All);
        tokio::time::sleep(Duration::from_millis(100)).await;
        page.dispatch(ListingAction::SelectCategory("sports".to_string()));
        tokio::time::sleep(Duration::from_millis(100)).await;
        page.dispatch(ListingAction::SubmitSearch("quantum".to_string()));

        page.settle().await;
        let view = page.view();
        assert_eq!(view.active_category, "all");
        assert_eq!(view.search_query, "quantum");
        assert_eq!(ids(&view.articles), vec![13, 24]);

        tokio::time::sleep(Duration::from_secs(1)).await;
        page.poll_reveals();
        assert_eq!(ids(&page.view().articles), vec![13, 24]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_pushes_on_filter_and_search() {
        let mut page = controller(ListingRoute::All);
        page.dispatch(ListingAction::SelectCategory("Business".to_string()));
        page.dispatch(ListingAction::SelectCategory("business".to_string()));
        page.dispatch(ListingAction::SubmitSearch("AI jobs".to_string()));
        page.dispatch(ListingAction::Navigate(ListingRoute::category("business")));

        assert_eq!(
            page.history(),
            [
                "index.html",
                "index.html?category=business",
                "index.html?search=AI+jobs",
            ]
        );
        assert_eq!(page.current_href(), "index.html?category=business");
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_more_appends_until_exhausted() {
        let mut page = controller(ListingRoute::category("technology"));
        page.settle().await;
        assert_eq!(page.view().articles.len(), 9);

        page.dispatch(ListingAction::LoadMore);
        let view = page.view();
        assert!(!view.is_loading);
        assert_eq!(view.articles.len(), 17);
        assert!(!view.has_more);

        page.dispatch(ListingAction::LoadMore);
        assert_eq!(page.view().articles.len(), 17);
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_carries_hero_and_trending_for_category() {
        let mut page = controller(ListingRoute::category("sports"));
        page.settle().await;
        let view = page.view();

        assert_eq!(view.active_category, "sports");
        assert_eq!(view.featured.as_ref().map(|a| a.id), Some(4));
        assert!(view.trending.len() <= DEFAULT_TRENDING_LIMIT);
        assert!(view.trending.iter().all(|a| a.category == "sports"));
        assert!(view
            .trending
            .windows(2)
            .all(|w| w[0].views >= w[1].views));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_search_signalled_once_ready() {
        let mut page = controller(ListingRoute::search("no-such-story"));
        assert!(!page.view().is_empty);
        page.settle().await;
        let view = page.view();
        assert!(view.is_empty);
        assert!(!view.has_more);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_from_config() {
        let config = Config {
            items_per_page: 4,
            reveal_delay_ms: 0,
            ..Config::default()
        };
        let settings = ListingSettings::from_config(&config);
        assert_eq!(settings.reveal_delay, Duration::ZERO);

        let mut page = ListingController::new(
            Catalog::embedded().unwrap(),
            ListingRoute::category("sports"),
            settings,
        );
        page.settle().await;
        assert_eq!(page.view().articles.len(), 4);
        assert!(page.view().has_more);
    }
}
