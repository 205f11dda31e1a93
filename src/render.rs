//! Plain-text rendering of page views for the terminal.
//!
//! Output is line-oriented and never wider than the requested width, except
//! for article body text, which is left unwrapped.

use crate::page::{DetailView, ListingView};
use crate::store::Article;
use crate::util::{display_width, format_date, format_views, html_to_text, truncate_to_width};

/// Narrowest width the renderer lays out for.
const MIN_WIDTH: usize = 20;

/// One card line: `#13  Title...  technology · Jan 6, 2026 · 5.4K views`.
///
/// The title is truncated so the whole line fits in `width` columns.
pub fn article_line(article: &Article, width: usize) -> String {
    let width = width.max(MIN_WIDTH);
    let id = format!("#{:<3}", article.id);
    let meta = format!(
        "{} · {} · {} views",
        article.category,
        format_date(article.date),
        format_views(article.views)
    );

    let fixed = display_width(&id) + 2 + 2 + display_width(&meta);
    if fixed + MIN_WIDTH / 2 > width {
        // Too narrow for the metadata; show id and title only.
        let title_width = width.saturating_sub(display_width(&id) + 1);
        return format!("{} {}", id, truncate_to_width(&article.title, title_width));
    }

    let title = truncate_to_width(&article.title, width - fixed);
    let pad = width - fixed - display_width(&title);
    format!("{}  {}{}  {}", id, title, " ".repeat(pad), meta)
}

/// The listing page: hero, trending strip, then the loaded cards.
pub fn render_listing(view: &ListingView, width: usize) -> String {
    let mut lines = Vec::new();

    let heading = if view.search_query.is_empty() {
        format!("Category: {}", view.active_category)
    } else {
        format!("Search: \"{}\"", view.search_query)
    };
    lines.push(truncate_to_width(&heading, width.max(MIN_WIDTH)).into_owned());
    lines.push(String::new());

    if view.is_loading {
        lines.push("Loading...".to_string());
        return lines.join("\n");
    }

    if view.search_query.is_empty() {
        if let Some(featured) = &view.featured {
            lines.push("Featured".to_string());
            lines.push(article_line(featured, width));
            lines.push(String::new());
        }
        if !view.trending.is_empty() {
            lines.push("Trending".to_string());
            lines.extend(view.trending.iter().map(|a| article_line(a, width)));
            lines.push(String::new());
        }
    }

    if view.is_empty {
        lines.push("No articles found.".to_string());
        return lines.join("\n");
    }

    lines.extend(view.articles.iter().map(|a| article_line(a, width)));
    if view.has_more {
        lines.push(String::new());
        lines.push("More articles available (use --pages to load more).".to_string());
    }
    lines.join("\n")
}

/// The detail page: header, body text and related articles.
pub fn render_detail(view: &DetailView, width: usize) -> String {
    let width = width.max(MIN_WIDTH);
    let DetailView::Found { article, related } = view else {
        return [
            "Article Not Found",
            "",
            "The article you are looking for does not exist.",
        ]
        .join("\n");
    };

    let mut lines = vec![
        truncate_to_width(&article.title, width).into_owned(),
        truncate_to_width(&article.subtitle, width).into_owned(),
        String::new(),
        truncate_to_width(
            &format!(
                "By {} · {} · {} · {} · {} views",
                article.author,
                format_date(article.date),
                article.read_time,
                article.category,
                format_views(article.views)
            ),
            width,
        )
        .into_owned(),
    ];
    if !article.source.is_empty() {
        lines.push(truncate_to_width(&format!("Source: {}", article.source), width).into_owned());
    }
    lines.push(String::new());
    lines.push(html_to_text(&article.content));

    if !article.tags.is_empty() {
        lines.push(String::new());
        lines.push(truncate_to_width(&format!("Tags: {}", article.tags.join(", ")), width).into_owned());
    }

    if !related.is_empty() {
        lines.push(String::new());
        lines.push("Related".to_string());
        lines.extend(related.iter().map(|a| article_line(a, width)));
    }
    lines.join("\n")
}

/// A plain list of cards with a count, for the query commands.
pub fn render_articles(articles: &[std::sync::Arc<Article>], width: usize) -> String {
    if articles.is_empty() {
        return "No articles found.".to_string();
    }
    let mut lines: Vec<String> = articles.iter().map(|a| article_line(a, width)).collect();
    lines.push(format!("{} article(s)", articles.len()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{DetailRoute, ListingController, ListingRoute, ListingSettings};
    use crate::store::{ArticleStore, Catalog};
    use std::time::Duration;

    fn settings() -> ListingSettings {
        ListingSettings {
            reveal_delay: Duration::ZERO,
            ..ListingSettings::default()
        }
    }

    #[test]
    fn test_article_line_fits_width() {
        let store = Catalog::embedded().unwrap();
        for width in [20, 40, 60, 100, 140] {
            for article in store.all() {
                let line = article_line(article, width);
                assert!(
                    display_width(&line) <= width,
                    "width {width}: {line:?} is {} columns",
                    display_width(&line)
                );
            }
        }
    }

    #[test]
    fn test_article_line_shows_meta() {
        let store = Catalog::embedded().unwrap();
        let article = store.get_by_id(13).unwrap();
        let line = article_line(&article, 140);
        assert!(line.starts_with("#13"));
        assert!(line.contains("technology"));
        assert!(line.contains("views"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_listing_states() {
        let mut page = ListingController::new(
            Catalog::embedded().unwrap(),
            ListingRoute::search("no-such-story"),
            settings(),
        );
        assert!(render_listing(&page.view(), 80).contains("Loading..."));

        page.settle().await;
        let text = render_listing(&page.view(), 80);
        assert!(text.starts_with("Search: \"no-such-story\""));
        assert!(text.contains("No articles found."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_listing_with_more_pages() {
        let mut page =
            ListingController::new(Catalog::embedded().unwrap(), ListingRoute::All, settings());
        page.settle().await;
        let text = render_listing(&page.view(), 100);
        assert!(text.contains("Featured"));
        assert!(text.contains("Trending"));
        assert!(text.contains("More articles available"));
    }

    #[test]
    fn test_render_detail() {
        let store = Catalog::embedded().unwrap();
        let view = DetailView::resolve(&store, &DetailRoute::new(13), 3);
        let text = render_detail(&view, 100);
        assert!(text.contains("Related"));
        assert!(!text.contains("<p>"));

        let missing = DetailView::resolve(&store, &DetailRoute::new(999), 3);
        assert!(render_detail(&missing, 100).starts_with("Article Not Found"));
    }
}
