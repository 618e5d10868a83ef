//! The outer audit boundary.
//!
//! [`SeoAuditor`] is the only place where fetching meets analysis. Every
//! public method returns a result record; fetch failures are folded into an
//! error-shaped record instead of being propagated.

use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{Config, COMMON_SITEMAP_PATHS, MOBILE_USER_AGENT};
use crate::dom::parse_html;
use crate::error_handling::{AuditStatus, FetchError, InitializationError, SitemapParseError};
use crate::fetch::{validate_and_normalize_url, FetchedPage, PageFetcher};
use crate::meta::{self, MetaAuditResult};
use crate::mobile::{self, MobileReport};
use crate::performance::{PerformanceClient, PerformanceReport, Strategy};
use crate::sitemap::{
    analyze_parsed, parse_sitemap, recommendations, record_url_status, sitemaps_from_robots,
    url_check_candidates, SitemapReport,
};
use crate::structured::{self, AuditResult};

/// Combined page audit: schema, meta and optionally performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullAudit {
    pub url: String,
    pub timestamp: String,
    pub status: AuditStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub schema: AuditResult,
    pub meta: MetaAuditResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceReport>,
}

impl FullAudit {
    pub fn is_error(&self) -> bool {
        self.status == AuditStatus::Error
    }
}

/// Fetches pages and runs the analyzers over them.
#[derive(Debug, Clone)]
pub struct SeoAuditor {
    fetcher: PageFetcher,
    performance: PerformanceClient,
    config: Config,
}

impl SeoAuditor {
    /// Builds the HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: Config) -> Result<Self, InitializationError> {
        let fetcher = PageFetcher::from_config(&config)?;
        let performance = PerformanceClient::new(fetcher.client().clone(), config.api_key.clone());
        Ok(Self {
            fetcher,
            performance,
            config,
        })
    }

    /// Replaces the PageSpeed client, e.g. to target a mock endpoint.
    pub fn with_performance_client(mut self, performance: PerformanceClient) -> Self {
        self.performance = performance;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches `url` without analysing it.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` from the underlying request.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.fetcher.fetch_page(url).await
    }

    /// Structured data audit of the page at `url`.
    pub async fn parse(&self, url: &str) -> AuditResult {
        match self.fetcher.fetch_page(url).await {
            Ok(page) => {
                let document = parse_html(&page.body);
                structured::analyze_document(&page.final_url, &document.root())
            }
            Err(e) => {
                warn!("Schema audit of {} failed: {}", url, e);
                AuditResult::failed(url, e.to_string())
            }
        }
    }

    /// Meta tag and content audit of the page at `url`.
    pub async fn extract(&self, url: &str) -> MetaAuditResult {
        match self.fetcher.fetch_page(url).await {
            Ok(page) => {
                let document = parse_html(&page.body);
                meta::analyze_document(&page.final_url, &document.root())
            }
            Err(e) => {
                warn!("Meta audit of {} failed: {}", url, e);
                MetaAuditResult::failed(url, e.to_string())
            }
        }
    }

    /// Fetches `url` the way a phone browser would.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` from the underlying request.
    pub async fn fetch_mobile(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.fetcher.fetch_page_as(url, MOBILE_USER_AGENT).await
    }

    /// Mobile-friendliness check of the page at `url`.
    pub async fn mobile(&self, url: &str) -> MobileReport {
        match self.fetch_mobile(url).await {
            Ok(page) => {
                let document = parse_html(&page.body);
                mobile::analyze_document(&page.final_url, &document.root())
            }
            Err(e) => {
                warn!("Mobile check of {} failed: {}", url, e);
                MobileReport::failed(url, e.to_string())
            }
        }
    }

    /// PageSpeed Insights report for `url`.
    pub async fn performance(&self, url: &str, strategy: Strategy) -> PerformanceReport {
        self.performance.analyze(url, strategy).await
    }

    /// Schema and meta audit from a single fetch, plus an optional mobile
    /// PageSpeed run.
    pub async fn audit(&self, url: &str, with_performance: bool) -> FullAudit {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let (schema, meta, error) = match self.fetcher.fetch_page(url).await {
            Ok(page) => {
                let document = parse_html(&page.body);
                let root = document.root();
                (
                    structured::analyze_document(&page.final_url, &root),
                    meta::analyze_document(&page.final_url, &root),
                    None,
                )
            }
            Err(e) => {
                warn!("Audit of {} failed: {}", url, e);
                let message = e.to_string();
                (
                    AuditResult::failed(url, message.clone()),
                    MetaAuditResult::failed(url, message.clone()),
                    Some(message),
                )
            }
        };

        let performance = if with_performance && error.is_none() {
            Some(self.performance.analyze(url, Strategy::Mobile).await)
        } else {
            None
        };

        FullAudit {
            url: url.to_string(),
            timestamp,
            status: if error.is_some() {
                AuditStatus::Error
            } else {
                AuditStatus::Completed
            },
            error,
            schema,
            meta,
            performance,
        }
    }

    /// Fetches and analyses a sitemap. With `check_urls`, the first few
    /// locations are probed with HEAD requests.
    pub async fn analyze_sitemap(&self, sitemap_url: &str, check_urls: bool) -> SitemapReport {
        let page = match self.fetcher.fetch_page(sitemap_url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Sitemap fetch of {} failed: {}", sitemap_url, e);
                return SitemapReport::failed(sitemap_url, format!("Failed to fetch sitemap: {e}"));
            }
        };

        if page.gzip_payload {
            return SitemapReport::failed(sitemap_url, SitemapParseError::Compressed.to_string());
        }

        let parsed = match parse_sitemap(&page.body) {
            Ok(parsed) => parsed,
            Err(e) => return SitemapReport::failed(sitemap_url, e.to_string()),
        };

        let mut report = analyze_parsed(&page.final_url, page.size_bytes, &parsed);
        if check_urls {
            for url in url_check_candidates(&parsed) {
                let outcome = self.fetcher.head_status(&url).await;
                record_url_status(&mut report, &url, outcome);
            }
            report.recommendations = recommendations(&report);
        }

        info!(
            "Sitemap {} analysed: {} {} entries",
            sitemap_url,
            report.urls_count,
            report.kind.as_str()
        );
        report
    }

    /// Discovers sitemap URLs for `domain` from robots.txt and well-known paths.
    pub async fn find_sitemaps(&self, domain: &str) -> Vec<String> {
        let base = match validate_and_normalize_url(domain)
            .ok()
            .and_then(|u| url::Url::parse(&u).ok())
        {
            Some(base) => base,
            None => {
                warn!("Cannot discover sitemaps for invalid domain {}", domain);
                return Vec::new();
            }
        };

        let mut found = Vec::new();

        if let Ok(robots_url) = base.join("/robots.txt") {
            match self.fetcher.fetch_page(robots_url.as_str()).await {
                Ok(page) => found.extend(sitemaps_from_robots(&page.body)),
                Err(e) => debug!("No robots.txt at {}: {}", robots_url, e),
            }
        }

        for path in COMMON_SITEMAP_PATHS {
            let Ok(candidate) = base.join(path) else {
                continue;
            };
            let candidate = candidate.to_string();
            match self.fetcher.head_status(&candidate).await {
                Ok(200) if !found.contains(&candidate) => found.push(candidate),
                Ok(status) => debug!("{} answered {}", candidate, status),
                Err(e) => debug!("Probe of {} failed: {}", candidate, e),
            }
        }

        info!("Found {} sitemap(s) for {}", found.len(), domain);
        found
    }
}
