//! CSV export of heterogeneous records

use crate::test_client;
use serde_json::json;
use sitescrape::games::GamesClient;
use sitescrape::output::{save_csv, Record, ResultTable};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn read_rows(path: &std::path::Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open CSV");
    reader
        .records()
        .map(|r| r.expect("bad row").iter().map(str::to_string).collect())
        .collect()
}

#[tokio::test]
async fn test_games_export_unions_keys_in_first_seen_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "home_team": "Alabama", "attendance": null},
            {"id": 2, "home_team": "Auburn", "venue": "Jordan-Hare Stadium, Auburn"}
        ])))
        .mount(&server)
        .await;

    let api = GamesClient::new(
        test_client(),
        &format!("{}/games", server.uri()),
        Some("test-token".to_string()),
    )
    .expect("Failed to create games client");
    let report = api.get_games_for_year_range(2019, 2019, "regular").await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("games.csv");
    api.save_to_csv(report.records, &output)
        .expect("Failed to save CSV");

    let rows = read_rows(&output);
    assert_eq!(rows[0], vec!["id", "home_team", "attendance", "venue"]);
    assert_eq!(rows[1], vec!["1", "Alabama", "", ""]);
    assert_eq!(rows[2], vec!["2", "Auburn", "", "Jordan-Hare Stadium, Auburn"]);
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_empty_table_writes_empty_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("empty.csv");

    save_csv(&ResultTable::new(), &output).expect("Failed to save CSV");

    let content = std::fs::read_to_string(&output).expect("Failed to read CSV");
    assert!(content.is_empty());
}

#[test]
fn test_existing_file_is_replaced() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out.csv");
    std::fs::write(&output, "stale,content\n1,2\n3,4\n").expect("Failed to seed file");

    let mut record = Record::new();
    record.insert("title".to_string(), "Sapiens".to_string());
    let table = ResultTable::from_records(vec![record]);

    save_csv(&table, &output).expect("Failed to save CSV");

    assert_eq!(read_rows(&output), vec![vec!["title"], vec!["Sapiens"]]);
}
