//! Page fetching.
//!
//! The only module that performs network I/O for page audits. A fetch either
//! yields the raw document or a [`FetchError`]; there are no retries.

mod request;
mod url;

pub use self::url::{host_of, is_absolute_http_url, validate_and_normalize_url};

use std::time::Duration;

use log::{debug, info};

use self::request::RequestHeaders;
use crate::config::{Config, PROBE_TIMEOUT_SECS};
use crate::error_handling::{FetchError, InitializationError};
use crate::initialization::init_client;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A successfully fetched document.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Normalized URL that was requested
    pub url: String,
    /// URL after redirects
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    /// Body decoded as UTF-8 (lossy)
    pub body: String,
    /// Raw body size in bytes
    pub size_bytes: usize,
    /// Body starts with the gzip magic number (e.g. a `.xml.gz` file)
    pub gzip_payload: bool,
}

/// Thin wrapper over the shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds the client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        Ok(Self::new(init_client(config)?))
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// GETs `url` after validating and normalizing it.
    ///
    /// # Errors
    ///
    /// - `FetchError::InvalidUrl` if the URL is rejected before any request
    /// - `FetchError::Http` for a non-2xx final status
    /// - `FetchError::Network` for transport failures (timeouts, DNS, TLS, ...)
    /// - `FetchError::Body` if the body cannot be read
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.get(url, None).await
    }

    /// Like [`fetch_page`](Self::fetch_page), presenting `user_agent` instead
    /// of the configured one.
    ///
    /// # Errors
    ///
    /// Same as `fetch_page`.
    pub async fn fetch_page_as(
        &self,
        url: &str,
        user_agent: &str,
    ) -> Result<FetchedPage, FetchError> {
        self.get(url, Some(user_agent)).await
    }

    async fn get(&self, url: &str, user_agent: Option<&str>) -> Result<FetchedPage, FetchError> {
        let url = validate_and_normalize_url(url)?;
        info!("Fetching {}", url);

        let mut request = RequestHeaders::apply_to_request_builder(self.client.get(&url));
        if let Some(user_agent) = user_agent {
            request = request.header(reqwest::header::USER_AGENT, user_agent);
        }
        let response = request.send().await?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            debug!("{} answered with HTTP {}", final_url, status.as_u16());
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: final_url,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        debug!(
            "Fetched {} ({} bytes, status {})",
            final_url,
            bytes.len(),
            status.as_u16()
        );

        Ok(FetchedPage {
            url,
            final_url,
            status: status.as_u16(),
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            size_bytes: bytes.len(),
            gzip_payload: bytes.starts_with(&GZIP_MAGIC),
        })
    }

    /// HEAD request returning the final status code, whatever it is.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` only when no response was received at all.
    pub async fn head_status(&self, url: &str) -> Result<u16, FetchError> {
        let url = validate_and_normalize_url(url)?;
        let response = self
            .client
            .head(&url)
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ErrorType;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> PageFetcher {
        PageFetcher::from_config(&Config::default()).expect("client builds")
    }

    #[tokio::test]
    async fn test_fetch_page_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(
                    "<html><title>Hi</title></html>",
                    "text/html; charset=utf-8",
                ),
            )
            .mount(&server)
            .await;

        let page = fetcher()
            .fetch_page(&format!("{}/page", server.uri()))
            .await
            .expect("fetch succeeds");
        assert_eq!(page.status, 200);
        assert!(page.body.contains("<title>Hi</title>"));
        assert_eq!(page.content_type.as_deref(), Some("text/html; charset=utf-8"));
        assert!(!page.gzip_payload);
    }

    #[tokio::test]
    async fn test_fetch_page_as_overrides_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "TestPhone/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("mobile"))
            .mount(&server)
            .await;

        let page = fetcher()
            .fetch_page_as(&server.uri(), "TestPhone/1.0")
            .await
            .expect("user agent matched");
        assert_eq!(page.body, "mobile");

        let err = fetcher()
            .fetch_page(&server.uri())
            .await
            .expect_err("default user agent is not matched");
        assert!(matches!(err, FetchError::Http { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_page_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch_page(&format!("{}/missing", server.uri()))
            .await
            .expect_err("404 is an error");
        assert!(matches!(err, FetchError::Http { status: 404, .. }));
        assert_eq!(err.error_type(), ErrorType::HttpRequestNotFound);
    }

    #[tokio::test]
    async fn test_fetch_page_detects_gzip_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x1f, 0x8b, 0x08, 0x00]))
            .mount(&server)
            .await;

        let page = fetcher()
            .fetch_page(&format!("{}/sitemap.xml.gz", server.uri()))
            .await
            .expect("fetch succeeds");
        assert!(page.gzip_payload);
        assert_eq!(page.size_bytes, 4);
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_invalid_url() {
        let err = fetcher()
            .fetch_page("ftp://example.com/file")
            .await
            .expect_err("ftp is rejected");
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_head_status_returns_non_success_codes() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let status = fetcher()
            .head_status(&format!("{}/gone", server.uri()))
            .await
            .expect("response received");
        assert_eq!(status, 410);
    }
}
