//! Integration tests for the seo_audit library.
//!
//! These tests drive the public API against a `wiremock` server. They make no
//! real network requests.

use seo_audit::performance::{PerformanceClient, Rating, Strategy};
use seo_audit::sitemap::SitemapKind;
use seo_audit::{AuditStatus, Config, SeoAuditor};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PRODUCT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Blue Widget | Acme Hardware Store Online</title>
  <meta name="description" content="The Blue Widget is our best-selling widget: durable, affordable and available in three sizes with free shipping on all orders over fifty dollars.">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="canonical" href="https://acme.test/product/blue-widget">
  <meta property="og:title" content="Blue Widget">
  <script type="application/ld+json">{not json</script>
  <script type="application/ld+json">
    {"@context": "https://schema.org", "@type": "Product", "name": "Blue Widget"}
  </script>
</head>
<body>
  <h1>Blue Widget</h1>
  <img src="/w.png" alt="Blue widget" width="200" height="200">
  <a href="/cart">Cart</a>
  <a href="https://partner.example/">Partner</a>
</body>
</html>"#;

fn auditor() -> SeoAuditor {
    SeoAuditor::new(Config::default()).expect("client builds")
}

async fn serve(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_schema_audit_of_product_page() {
    let server = MockServer::start().await;
    serve(&server, "/product/blue-widget", PRODUCT_PAGE).await;

    let url = format!("{}/product/blue-widget", server.uri());
    let result = auditor().parse(&url).await;

    assert_eq!(result.status, AuditStatus::Completed);
    // The malformed block is reported and the valid one still extracted
    assert_eq!(result.schemas.len(), 1);
    assert!(result
        .validation
        .errors
        .iter()
        .any(|e| e.starts_with("Invalid JSON-LD")));
    assert!(result
        .validation
        .errors
        .contains(&"Product missing required property: image".to_string()));
    assert_eq!(result.issues.critical, result.validation.errors.len());
    assert_eq!(result.issues.warnings, result.validation.warnings.len());
    assert!(result.score <= 100);

    let json = serde_json::to_value(&result).expect("serializes");
    assert_eq!(json["pageType"], "product");
    assert_eq!(json["schemas"][0]["type"], "Product");
}

#[tokio::test]
async fn test_meta_audit_of_product_page() {
    let server = MockServer::start().await;
    serve(&server, "/product/blue-widget", PRODUCT_PAGE).await;

    let url = format!("{}/product/blue-widget", server.uri());
    let result = auditor().extract(&url).await;

    assert_eq!(result.status, AuditStatus::Completed);
    assert_eq!(result.headings.h1, vec!["Blue Widget".to_string()]);
    assert_eq!(result.images.total, 1);
    assert_eq!(result.images.without_alt, 0);
    assert_eq!(result.links.internal, 1);
    assert_eq!(result.links.external, 1);
    assert_eq!(result.links.external_without_rel, 1);
    assert!(result.warnings.contains(&"No Twitter Card tags found".to_string()));
}

#[tokio::test]
async fn test_fetch_failure_becomes_error_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let auditor = auditor();

    let schema = auditor.parse(&url).await;
    assert!(schema.is_error());
    assert_eq!(schema.score, 0);
    assert!(schema.schemas.is_empty());

    let meta = auditor.extract(&url).await;
    assert!(meta.is_error());
    assert_eq!(meta.score, 0);
    assert!(meta.error.as_deref().is_some_and(|e| e.contains("404")));

    let json = serde_json::to_value(&meta).expect("serializes");
    assert_eq!(json["status"], "error");
}

#[tokio::test]
async fn test_full_audit_with_performance() {
    let server = MockServer::start().await;
    serve(&server, "/", PRODUCT_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/pagespeed"))
        .and(query_param("strategy", "mobile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "lighthouseResult": {
                "categories": {"performance": {"score": 0.42}},
                "audits": {
                    "largest-contentful-paint": {"numericValue": 5200.0, "score": 0.1}
                }
            }
        })))
        .mount(&server)
        .await;

    let pagespeed = PerformanceClient::new(reqwest::Client::new(), None)
        .with_endpoint(format!("{}/pagespeed", server.uri()));
    let auditor = auditor().with_performance_client(pagespeed);

    let audit = auditor.audit(&format!("{}/", server.uri()), true).await;
    assert_eq!(audit.status, AuditStatus::Completed);
    let performance = audit.performance.expect("performance requested");
    assert_eq!(performance.score, 42);
    assert_eq!(performance.strategy, Strategy::Mobile);
    assert_eq!(performance.metrics.lcp.status, Rating::Poor);
}

#[tokio::test]
async fn test_sitemap_analysis_with_url_checks() {
    let server = MockServer::start().await;
    let base = server.uri();
    let sitemap = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/</loc><lastmod>2024-04-01</lastmod></url>
  <url><loc>{base}/old</loc><lastmod>2024-04-01</lastmod></url>
  <url><loc>{base}/</loc></url>
</urlset>"#
    );
    serve(&server, "/sitemap.xml", &sitemap).await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let report = auditor()
        .analyze_sitemap(&format!("{base}/sitemap.xml"), true)
        .await;

    assert_eq!(report.status, AuditStatus::Completed);
    assert_eq!(report.kind, SitemapKind::UrlSitemap);
    assert_eq!(report.urls_count, 3);
    assert_eq!(report.stats.duplicate_urls, 1);
    assert_eq!(report.stats.status_codes.get(&200), Some(&2));
    assert_eq!(report.stats.status_codes.get(&410), Some(&1));
    assert!(report
        .issues
        .warnings
        .contains(&format!("URL returns 410: {base}/old")));
    assert!(report
        .recommendations
        .contains(&"Fix 1 URLs returning 410 status codes".to_string()));
}

#[tokio::test]
async fn test_sitemap_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let report = auditor()
        .analyze_sitemap(&format!("{}/sitemap.xml", server.uri()), false)
        .await;
    assert!(report.is_error());
    assert!(report.issues.errors[0].starts_with("Failed to fetch sitemap: HTTP 503"));
    assert_eq!(
        report.recommendations,
        vec!["Fix sitemap errors before proceeding with optimization".to_string()]
    );
}
