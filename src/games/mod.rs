//! Season-statistics API client
//!
//! Queries a games endpoint once per year with `year` and `seasonType`
//! parameters and concatenates the JSON arrays it returns. A failed year is
//! recorded and skipped; the remaining years still come back.

use crate::fetch::{fetch_request, FetchFailure};
use crate::output::{save_csv, IntoRecord, Record, ResultTable, ScrapeReport};
use crate::ScrapeError;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::{Map, Value};
use std::path::Path;
use url::Url;

/// One game as returned by the API, keys in response order
pub type GameRecord = Map<String, Value>;

impl IntoRecord for GameRecord {
    fn into_record(self) -> Record {
        self.iter()
            .map(|(key, value)| (key.clone(), render_value(value)))
            .collect()
    }
}

/// Renders a JSON value as cell text
///
/// Strings are written verbatim and null as an empty cell; everything else
/// uses its compact JSON text.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Client for the games endpoint
pub struct GamesClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl GamesClient {
    /// Creates a client for `base_url`
    ///
    /// `token` is sent as a bearer token when present. Without one, requests
    /// go out unauthenticated and the API will typically answer 401.
    pub fn new(client: Client, base_url: &str, token: Option<String>) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(base_url)?;

        if token.is_none() {
            tracing::warn!("No API token configured; requests to {} will be unauthenticated", base_url);
        }

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// URL requested for one year
    pub fn year_url(&self, year: i32, season_type: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("year", &year.to_string())
            .append_pair("seasonType", season_type);
        url
    }

    /// Fetches the games of one year
    pub async fn get_games_for_year(
        &self,
        year: i32,
        season_type: &str,
    ) -> Result<Vec<GameRecord>, FetchFailure> {
        let url = self.year_url(year, season_type);

        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let document = fetch_request(request, url.as_str()).await?;

        let payload: Value = serde_json::from_str(&document.body).map_err(|e| {
            tracing::error!("Invalid JSON for year {}: {}", year, e);
            FetchFailure::Payload {
                url: url.to_string(),
                reason: format!("invalid JSON: {}", e),
            }
        })?;

        let Value::Array(items) = payload else {
            tracing::error!("Expected a JSON array for year {}", year);
            return Err(FetchFailure::Payload {
                url: url.to_string(),
                reason: "expected a JSON array".to_string(),
            });
        };

        let mut games = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Object(game) => games.push(game),
                other => tracing::warn!("Skipping non-object entry for year {}: {}", year, other),
            }
        }

        Ok(games)
    }

    /// Fetches every year in `start_year..=end_year`, oldest first
    ///
    /// Records keep API order within a year. A reversed range issues no
    /// requests.
    pub async fn get_games_for_year_range(
        &self,
        start_year: i32,
        end_year: i32,
        season_type: &str,
    ) -> ScrapeReport<GameRecord> {
        let mut report = ScrapeReport::new();

        for year in start_year..=end_year {
            match self.get_games_for_year(year, season_type).await {
                Ok(games) => {
                    tracing::info!("Year {}: {} games", year, games.len());
                    report.records.extend(games);
                }
                Err(failure) => report.failures.push(failure),
            }
        }

        tracing::info!(
            "Games fetch finished: {} games, {} failed years",
            report.records.len(),
            report.failures.len()
        );

        report
    }

    /// Writes records to a CSV file with a header unioned across all records
    pub fn save_to_csv(&self, records: Vec<GameRecord>, path: &Path) -> Result<(), ScrapeError> {
        let table = ResultTable::from_records(records);
        save_csv(&table, path)
    }
}
