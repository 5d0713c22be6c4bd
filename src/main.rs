//! Sitescrape main entry point
//!
//! This is the command-line interface for the catalogue scraper, the sitemap
//! crawler and the games API client.

use anyhow::Context;
use clap::{Parser, Subcommand};
use sitescrape::books::BookScraper;
use sitescrape::config::{load_config_with_hash, validate, Config, API_TOKEN_ENV};
use sitescrape::fetch::build_http_client;
use sitescrape::games::GamesClient;
use sitescrape::output::{print_summary, RunSummary};
use sitescrape::sitemap::{CrawlLimits, SitemapCrawler};
use sitescrape::url::{robots_url, site_root};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Sitescrape: harvest catalogues, sitemaps and season stats into CSV
#[derive(Parser, Debug)]
#[command(name = "sitescrape")]
#[command(version)]
#[command(about = "Harvest catalogues, sitemaps and season stats into CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Show what would be fetched without making any requests
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape catalogue listing pages and every product they link to
    Books {
        /// First listing page
        #[arg(long)]
        start: Option<u32>,

        /// Last listing page (inclusive)
        #[arg(long)]
        end: Option<u32>,

        /// Catalogue directory URL
        #[arg(long)]
        base_url: Option<String>,

        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Crawl every sitemap announced in a site's robots.txt
    Sitemap {
        /// Domain (example.com) or site root URL
        domain: Option<String>,

        /// Deepest nesting level to follow
        #[arg(long)]
        max_depth: Option<u32>,

        /// Maximum number of sitemap documents to fetch
        #[arg(long)]
        max_sitemaps: Option<u32>,

        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch games for a range of seasons
    Games {
        /// First season year
        #[arg(long)]
        start_year: Option<i32>,

        /// Last season year (inclusive)
        #[arg(long)]
        end_year: Option<i32>,

        /// Season type (regular, postseason, ...)
        #[arg(long)]
        season_type: Option<String>,

        /// API token (defaults to $COLLEGE_FOOTBALL_DATA_API_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Books {
            start,
            end,
            base_url,
            output,
        } => {
            let books = &mut config.books;
            books.start_page = start.unwrap_or(books.start_page);
            books.end_page = end.unwrap_or(books.end_page);
            if let Some(base_url) = base_url {
                books.base_url = base_url;
            }
            if let Some(output) = output {
                books.output = output.display().to_string();
            }
            validate(&config).context("invalid command-line override")?;
            handle_books(&config, cli.dry_run).await
        }
        Command::Sitemap {
            domain,
            max_depth,
            max_sitemaps,
            output,
        } => {
            let sitemap = &mut config.sitemap;
            if domain.is_some() {
                sitemap.domain = domain;
            }
            sitemap.max_depth = max_depth.unwrap_or(sitemap.max_depth);
            sitemap.max_sitemaps = max_sitemaps.unwrap_or(sitemap.max_sitemaps);
            if let Some(output) = output {
                sitemap.output = output.display().to_string();
            }
            validate(&config).context("invalid command-line override")?;
            handle_sitemap(&config, cli.dry_run).await
        }
        Command::Games {
            start_year,
            end_year,
            season_type,
            token,
            output,
        } => {
            let games = &mut config.games;
            games.start_year = start_year.unwrap_or(games.start_year);
            games.end_year = end_year.unwrap_or(games.end_year);
            if let Some(season_type) = season_type {
                games.season_type = season_type;
            }
            if let Some(output) = output {
                games.output = output.display().to_string();
            }
            validate(&config).context("invalid command-line override")?;

            // The only environment read in the program
            let token = token
                .or_else(|| std::env::var(API_TOKEN_ENV).ok())
                .filter(|t| !t.trim().is_empty());
            handle_games(&config, token, cli.dry_run).await
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitescrape=info,warn"),
            1 => EnvFilter::new("sitescrape=debug,info"),
            2 => EnvFilter::new("sitescrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the `books` command
async fn handle_books(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let books = &config.books;
    let output = Path::new(&books.output);
    let client = build_http_client(&config.http)?;
    let scraper = BookScraper::new(client, &books.base_url)?;

    if dry_run {
        let pages = scraper.generate_urls(books.start_page, books.end_page);
        println!("=== Books Dry Run ===\n");
        println!("Listing pages ({}):", pages.len());
        for page in &pages {
            println!("  - {}", page.url);
        }
        println!("\nOutput: {}", output.display());
        return Ok(());
    }

    let report = scraper
        .scrape_catalogue(books.start_page, books.end_page)
        .await;
    scraper
        .save_to_csv(&report.records, output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    print_summary("Catalogue Scrape", "pages", &report.summary(), &report.failures);
    Ok(())
}

/// Handles the `sitemap` command
async fn handle_sitemap(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let sitemap = &config.sitemap;
    let output = Path::new(&sitemap.output);
    let domain = sitemap
        .domain
        .as_deref()
        .context("no domain given on the command line or in [sitemap] domain")?;
    let limits = CrawlLimits {
        max_depth: sitemap.max_depth,
        max_sitemaps: sitemap.max_sitemaps,
    };

    if dry_run {
        let root = site_root(domain)?;
        println!("=== Sitemap Dry Run ===\n");
        println!("robots.txt: {}", robots_url(&root));
        println!("Max depth: {}", limits.max_depth);
        println!("Max sitemaps: {}", limits.max_sitemaps);
        println!("\nOutput: {}", output.display());
        return Ok(());
    }

    let client = build_http_client(&config.http)?;
    let crawler = SitemapCrawler::for_domain(client, domain, limits)?;
    let crawl = crawler.crawl().await;

    crawl
        .table
        .save_as_csv(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    print_summary("Sitemap Crawl", "sitemaps", &crawl.summary(), &crawl.failures);
    println!("\nRows written: {}", crawl.table.combined().len());

    if !crawl.skipped.is_empty() {
        println!("\nSkipped sitemaps ({}):", crawl.skipped.len());
        for skipped in &crawl.skipped {
            println!("  - {} ({})", skipped.url, skipped.reason);
        }
    }

    if !crawl.collisions.is_empty() {
        println!("\nShared basenames ({}):", crawl.collisions.len());
        for collision in &crawl.collisions {
            println!(
                "  - {}: {} and {}",
                collision.basename, collision.first, collision.second
            );
        }
    }

    Ok(())
}

/// Handles the `games` command
async fn handle_games(config: &Config, token: Option<String>, dry_run: bool) -> anyhow::Result<()> {
    let games = &config.games;
    let output = Path::new(&games.output);
    let authenticated = token.is_some();
    let client = build_http_client(&config.http)?;
    let api = GamesClient::new(client, &games.base_url, token)?;

    if dry_run {
        println!("=== Games Dry Run ===\n");
        println!("Requests:");
        for year in games.start_year..=games.end_year {
            println!("  - {}", api.year_url(year, &games.season_type));
        }
        println!("\nAuthenticated: {}", authenticated);
        println!("Output: {}", output.display());
        return Ok(());
    }

    let mut report = api
        .get_games_for_year_range(games.start_year, games.end_year, &games.season_type)
        .await;

    let games_written = report.records.len();
    let attempted = (games.start_year..=games.end_year).count() as u64;
    let failed = report.failures.len() as u64;
    let years = RunSummary {
        records: attempted.saturating_sub(failed),
        failures: failed,
    };
    api.save_to_csv(std::mem::take(&mut report.records), output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Games written: {}\n", games_written);
    print_summary("Games Fetch", "years", &years, &report.failures);
    Ok(())
}
