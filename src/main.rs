use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use newsdesk::config::Config;
use newsdesk::page::{
    DetailRoute, DetailView, ListingAction, ListingController, ListingRoute, ListingSettings,
    Route,
};
use newsdesk::render::{render_articles, render_detail, render_listing};
use newsdesk::store::{ArticleStore, Catalog};

/// Output width when `COLUMNS` is unset or unusable.
const DEFAULT_WIDTH: usize = 100;

/// Get the config directory path (~/.config/newsdesk/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("newsdesk"))
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse::<usize>().ok())
        .filter(|&w| w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

#[derive(Parser, Debug)]
#[command(name = "newsdesk", about = "Browse a static news catalog from the terminal")]
struct Args {
    /// Config file (default: ~/.config/newsdesk/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Article data file (default: the embedded collection)
    #[arg(long, value_name = "FILE", global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the listing page
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Open a page by href, e.g. "index.html?category=sports" or "article.html?id=4"
    Open { href: String },
    /// Show one article with related reading
    Article { id: String },
    /// Most-viewed articles
    Trending {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Newest articles
    Latest {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// The hero article for a category
    Featured {
        #[arg(long)]
        category: Option<String>,
    },
    /// List categories
    Categories,
    /// Articles by one author
    Author { name: String },
    /// Articles with one tag
    Tag { tag: String },
}

fn load_config(args: &Args) -> Result<Config> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_dir()?.join("config.toml"),
    };
    Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))
}

fn load_catalog(args: &Args, config: &Config) -> Result<Catalog> {
    match args.data.as_ref().or(config.data_file.as_ref()) {
        Some(path) => Catalog::open(path)
            .with_context(|| format!("Failed to load article data from {}", path.display())),
        None => Catalog::embedded().context("Embedded article data is invalid"),
    }
}

async fn show_listing(
    catalog: Catalog,
    route: ListingRoute,
    pages: usize,
    config: &Config,
    width: usize,
) -> String {
    let mut page = ListingController::new(catalog, route, ListingSettings::from_config(config));
    page.settle().await;
    for _ in 1..pages {
        if !page.view().has_more {
            break;
        }
        page.dispatch(ListingAction::LoadMore);
    }
    tracing::debug!(href = %page.current_href(), page = page.state().current_page(), "Listing shown");
    render_listing(&page.view(), width)
}

fn show_detail(catalog: &Catalog, route: &DetailRoute, config: &Config, width: usize) -> String {
    let view = DetailView::resolve(catalog, route, config.related_limit);
    format!("{}\n\n{}", view.page_title(), render_detail(&view, width))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let catalog = load_catalog(&args, &config)?;
    let width = terminal_width();

    let output = match args.command {
        Command::List {
            category,
            search,
            pages,
        } => {
            // Same precedence as the URL: a non-blank category wins.
            let route = match (category, search) {
                (Some(c), _) if !c.trim().is_empty() => ListingRoute::category(&c),
                (_, Some(q)) => ListingRoute::search(&q),
                _ => ListingRoute::All,
            };
            show_listing(catalog, route, pages, &config, width).await
        }
        Command::Open { href } => match Route::parse(&href) {
            Route::Listing(route) => show_listing(catalog, route, 1, &config, width).await,
            Route::Detail(route) => show_detail(&catalog, &route, &config, width),
        },
        Command::Article { id } => {
            let route = DetailRoute {
                id: id.trim().parse().ok(),
            };
            show_detail(&catalog, &route, &config, width)
        }
        Command::Trending { limit, category } => render_articles(
            &catalog.get_trending(limit.unwrap_or(config.trending_limit), category.as_deref()),
            width,
        ),
        Command::Latest { limit } => {
            render_articles(&catalog.get_latest(limit.unwrap_or(config.latest_limit)), width)
        }
        Command::Featured { category } => {
            let featured: Vec<_> = catalog.get_featured(category.as_deref()).into_iter().collect();
            render_articles(&featured, width)
        }
        Command::Categories => catalog.get_all_categories().join("\n"),
        Command::Author { name } => render_articles(&catalog.get_by_author(&name), width),
        Command::Tag { tag } => render_articles(&catalog.get_by_tag(&tag), width),
    };

    println!("{}", output);
    Ok(())
}
