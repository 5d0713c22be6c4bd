use serde::Deserialize;

/// Main configuration structure for sitescrape
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub books: BooksConfig,
    pub sitemap: SitemapConfig,
    pub games: GamesConfig,
}

/// Shared HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("sitescrape/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Catalogue scraper configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BooksConfig {
    /// Directory URL that listing pages (`page-N.html`) live under
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// First listing page (inclusive)
    #[serde(rename = "start-page")]
    pub start_page: u32,

    /// Last listing page (inclusive)
    #[serde(rename = "end-page")]
    pub end_page: u32,

    /// CSV file the records are written to
    pub output: String,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            base_url: "https://books.toscrape.com/catalogue/".to_string(),
            start_page: 1,
            end_page: 50,
            output: "books_data.csv".to_string(),
        }
    }
}

/// Sitemap crawler configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Domain (`example.com`) or full site root (`http://127.0.0.1:8080`)
    pub domain: Option<String>,

    /// Deepest nesting level followed below a robots.txt root (roots are depth 0)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of sitemap documents fetched in one crawl
    #[serde(rename = "max-sitemaps")]
    pub max_sitemaps: u32,

    /// CSV file the flattened table is written to
    pub output: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            domain: None,
            max_depth: 10,
            max_sitemaps: 1000,
            output: "combined_sitemap.csv".to_string(),
        }
    }
}

/// Stats API client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GamesConfig {
    /// Endpoint queried once per year
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// First season year (inclusive)
    #[serde(rename = "start-year")]
    pub start_year: i32,

    /// Last season year (inclusive)
    #[serde(rename = "end-year")]
    pub end_year: i32,

    /// Value of the `seasonType` query parameter (e.g. "regular", "postseason")
    #[serde(rename = "season-type")]
    pub season_type: String,

    /// CSV file the records are written to
    pub output: String,
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.collegefootballdata.com/games".to_string(),
            start_year: 2019,
            end_year: 2020,
            season_type: "regular".to_string(),
            output: "games.csv".to_string(),
        }
    }
}
