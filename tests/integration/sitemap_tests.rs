//! Sitemap crawler against a mock site

use crate::test_client;
use sitescrape::sitemap::{CrawlLimits, SitemapCrawler, SkipReason};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn urlset(locs: &[String]) -> String {
    let urls: String = locs
        .iter()
        .map(|loc| format!("<url><loc>{}</loc></url>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        urls
    )
}

fn sitemap_index(locs: &[String]) -> String {
    let sitemaps: String = locs
        .iter()
        .map(|loc| format!("<sitemap><loc>{}</loc></sitemap>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        sitemaps
    )
}

async fn mount_body(server: &MockServer, at: &str, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(hits)
        .mount(server)
        .await;
}

fn crawler(server: &MockServer, limits: CrawlLimits) -> SitemapCrawler {
    SitemapCrawler::for_domain(test_client(), &server.uri(), limits)
        .expect("Failed to create crawler")
}

#[tokio::test]
async fn test_index_flattens_to_leaf_rows() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_body(
        &server,
        "/robots.txt",
        format!("User-agent: *\nDisallow: /wp-admin/\nSitemap: {}/sitemap_index.xml\n", base),
        1,
    )
    .await;
    mount_body(
        &server,
        "/sitemap_index.xml",
        sitemap_index(&[
            format!("{}/post-sitemap.xml", base),
            format!("{}/page-sitemap.xml", base),
        ]),
        1,
    )
    .await;
    mount_body(
        &server,
        "/post-sitemap.xml",
        urlset(&[
            format!("{}/hello-world/", base),
            format!("{}/second-post/", base),
            format!("{}/third-post/", base),
        ]),
        1,
    )
    .await;
    mount_body(
        &server,
        "/page-sitemap.xml",
        urlset(&[format!("{}/", base), format!("{}/about/", base)]),
        1,
    )
    .await;

    let crawl = crawler(&server, CrawlLimits::default()).crawl().await;

    assert!(crawl.failures.is_empty(), "unexpected failures: {:?}", crawl.failures);
    assert_eq!(crawl.roots, vec![format!("{}/sitemap_index.xml", base)]);
    assert_eq!(crawl.table.len(), 3);

    let rows = crawl.table.combined();
    assert_eq!(rows.len(), 5);
    assert_eq!(
        rows.iter().filter(|r| r.basename == "post-sitemap.xml").count(),
        3
    );
    assert_eq!(
        rows.iter().filter(|r| r.basename == "page-sitemap.xml").count(),
        2
    );
    assert!(rows.iter().all(|r| !r.url.ends_with(".xml")));

    // Children are stored before the index that lists them
    let order: Vec<&str> = crawl.table.sections().map(|s| s.basename.as_str()).collect();
    assert_eq!(
        order,
        vec!["post-sitemap.xml", "page-sitemap.xml", "sitemap_index.xml"]
    );
}

#[tokio::test]
async fn test_robots_without_sitemaps_gives_empty_crawl() {
    let server = MockServer::start().await;

    mount_body(&server, "/robots.txt", "User-agent: *\nDisallow:\n".to_string(), 1).await;

    let crawl = crawler(&server, CrawlLimits::default()).crawl().await;

    assert!(crawl.roots.is_empty());
    assert!(crawl.table.is_empty());
    assert!(crawl.failures.is_empty());
    assert_eq!(crawl.summary().attempted(), 0);
}

#[tokio::test]
async fn test_blank_robots_gives_empty_crawl() {
    let server = MockServer::start().await;

    mount_body(&server, "/robots.txt", "  \n".to_string(), 1).await;

    let crawl = crawler(&server, CrawlLimits::default()).crawl().await;

    assert!(crawl.roots.is_empty());
    assert!(crawl.failures.is_empty());
}

#[tokio::test]
async fn test_missing_robots_is_recorded() {
    let server = MockServer::start().await;

    let crawl = crawler(&server, CrawlLimits::default()).crawl().await;

    assert!(crawl.table.is_empty());
    assert_eq!(crawl.failures.len(), 1);
    assert_eq!(crawl.failures[0].status_code(), Some(404));
    assert!(crawl.failures[0].url().ends_with("/robots.txt"));
}

#[tokio::test]
async fn test_self_reference_terminates() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_body(
        &server,
        "/robots.txt",
        format!("Sitemap: {}/loop.xml\n", base),
        1,
    )
    .await;
    mount_body(
        &server,
        "/loop.xml",
        sitemap_index(&[format!("{}/loop.xml", base), format!("{}/page", base)]),
        1,
    )
    .await;

    let crawl = crawler(&server, CrawlLimits::default()).crawl().await;

    assert_eq!(crawl.table.len(), 1);
    assert_eq!(crawl.table.combined().len(), 1);
    assert_eq!(crawl.skipped.len(), 1);
    assert_eq!(crawl.skipped[0].reason, SkipReason::AlreadyVisited);
}

#[tokio::test]
async fn test_mutual_cycle_fetches_each_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_body(&server, "/a.xml", sitemap_index(&[format!("{}/b.xml", base)]), 1).await;
    mount_body(&server, "/b.xml", sitemap_index(&[format!("{}/a.xml", base)]), 1).await;

    let crawl = crawler(&server, CrawlLimits::default())
        .crawl_from(&[format!("{}/a.xml", base)])
        .await;

    assert_eq!(crawl.table.len(), 2);
    assert!(crawl.table.combined().is_empty());
    assert_eq!(crawl.skipped.len(), 1);
}

#[tokio::test]
async fn test_depth_limit_stops_descent() {
    let server = MockServer::start().await;
    let base = server.uri();

    // level-0 -> level-1 -> level-2 -> level-3, each also listing one page
    for level in 0..3 {
        mount_body(
            &server,
            &format!("/level-{}.xml", level),
            sitemap_index(&[
                format!("{}/level-{}.xml", base, level + 1),
                format!("{}/page-{}", base, level),
            ]),
            1,
        )
        .await;
    }
    mount_body(
        &server,
        "/level-3.xml",
        urlset(&[format!("{}/page-3", base)]),
        0,
    )
    .await;

    let limits = CrawlLimits {
        max_depth: 2,
        max_sitemaps: 100,
    };
    let crawl = crawler(&server, limits)
        .crawl_from(&[format!("{}/level-0.xml", base)])
        .await;

    assert_eq!(crawl.table.len(), 3);
    assert_eq!(crawl.table.combined().len(), 3);
    assert_eq!(crawl.skipped.len(), 1);
    assert_eq!(crawl.skipped[0].reason, SkipReason::DepthExceeded { depth: 3 });
    assert!(crawl.skipped[0].url.ends_with("/level-3.xml"));
}

#[tokio::test]
async fn test_sitemap_budget_caps_fetches() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_body(
        &server,
        "/sitemap_index.xml",
        sitemap_index(&[
            format!("{}/one.xml", base),
            format!("{}/two.xml", base),
            format!("{}/three.xml", base),
        ]),
        1,
    )
    .await;
    mount_body(&server, "/one.xml", urlset(&[format!("{}/1", base)]), 1).await;
    mount_body(&server, "/two.xml", urlset(&[format!("{}/2", base)]), 0).await;
    mount_body(&server, "/three.xml", urlset(&[format!("{}/3", base)]), 0).await;

    let limits = CrawlLimits {
        max_depth: 10,
        max_sitemaps: 2,
    };
    let crawl = crawler(&server, limits)
        .crawl_from(&[format!("{}/sitemap_index.xml", base)])
        .await;

    assert_eq!(crawl.table.len(), 2);
    assert_eq!(crawl.table.combined().len(), 1);
    assert_eq!(crawl.skipped.len(), 2);
    assert!(crawl
        .skipped
        .iter()
        .all(|s| s.reason == SkipReason::BudgetExhausted));
}

#[tokio::test]
async fn test_shared_basename_keeps_both_sections() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_body(
        &server,
        "/robots.txt",
        format!("Sitemap: {0}/en/sitemap.xml\nSitemap: {0}/fr/sitemap.xml\n", base),
        1,
    )
    .await;
    mount_body(&server, "/en/sitemap.xml", urlset(&[format!("{}/en/", base)]), 1).await;
    mount_body(
        &server,
        "/fr/sitemap.xml",
        urlset(&[format!("{}/fr/", base), format!("{}/fr/contact", base)]),
        1,
    )
    .await;

    let crawl = crawler(&server, CrawlLimits::default()).crawl().await;

    assert_eq!(crawl.table.len(), 2);
    assert_eq!(crawl.table.by_basename("sitemap.xml").count(), 2);
    assert_eq!(crawl.table.combined().len(), 3);

    assert_eq!(crawl.collisions.len(), 1);
    assert_eq!(crawl.collisions[0].basename, "sitemap.xml");
    assert!(crawl.collisions[0].first.ends_with("/en/sitemap.xml"));
    assert!(crawl.collisions[0].second.ends_with("/fr/sitemap.xml"));
}

#[tokio::test]
async fn test_failed_child_keeps_siblings() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_body(
        &server,
        "/sitemap_index.xml",
        sitemap_index(&[format!("{}/gone.xml", base), format!("{}/kept.xml", base)]),
        1,
    )
    .await;
    mount_body(&server, "/kept.xml", urlset(&[format!("{}/kept", base)]), 1).await;

    let crawl = crawler(&server, CrawlLimits::default())
        .crawl_from(&[format!("{}/sitemap_index.xml", base)])
        .await;

    assert_eq!(crawl.failures.len(), 1);
    assert!(crawl.failures[0].url().ends_with("/gone.xml"));
    assert_eq!(crawl.table.combined().len(), 1);

    // Summary counts sitemap documents, not exported rows
    let summary = crawl.summary();
    assert_eq!(summary.records, 2);
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.attempted(), 3);
    assert!(crawl.table.get(&format!("{}/kept.xml", base)).is_some());
}

#[tokio::test]
async fn test_relative_locs_resolve_against_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_body(
        &server,
        "/sitemaps/index.xml",
        sitemap_index(&["/sitemaps/child.xml".to_string(), "other.xml".to_string()]),
        1,
    )
    .await;
    mount_body(&server, "/sitemaps/child.xml", urlset(&["/about/".to_string()]), 1).await;
    mount_body(&server, "/sitemaps/other.xml", urlset(&["contact".to_string()]), 1).await;

    let crawl = crawler(&server, CrawlLimits::default())
        .crawl_from(&[format!("{}/sitemaps/index.xml", base)])
        .await;

    assert!(crawl.failures.is_empty(), "unexpected failures: {:?}", crawl.failures);
    let urls: Vec<String> = crawl.table.combined().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![format!("{}/about/", base), format!("{}/sitemaps/contact", base)]
    );
}

#[tokio::test]
async fn test_combined_csv_export() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_body(
        &server,
        "/post-sitemap.xml",
        urlset(&[format!("{}/a", base), format!("{}/b", base)]),
        1,
    )
    .await;

    let crawl = crawler(&server, CrawlLimits::default())
        .crawl_from(&[format!("{}/post-sitemap.xml", base)])
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("combined_sitemap.csv");
    crawl.table.save_as_csv(&output).expect("Failed to save CSV");

    let content = std::fs::read_to_string(&output).expect("Failed to read CSV");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "sitemap,basename,url");
    assert_eq!(
        lines[1],
        format!("{0}/post-sitemap.xml,post-sitemap.xml,{0}/a", base)
    );
    assert_eq!(lines.len(), 3);
}
