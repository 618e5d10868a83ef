//! PageSpeed Insights HTTP client.

use std::time::Duration;

use log::{info, warn};

use super::analysis::report_from_response;
use super::types::{PerformanceReport, PsiResponse, Strategy};
use crate::config::{PAGESPEED_API_URL, PERFORMANCE_TIMEOUT_SECS};
use crate::error_handling::FetchError;
use crate::fetch::validate_and_normalize_url;

#[derive(Debug, Clone)]
pub struct PerformanceClient {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl PerformanceClient {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: PAGESPEED_API_URL.to_string(),
        }
    }

    /// Points the client at another PageSpeed-compatible endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Runs a Lighthouse performance pass for `url`. Never fails; errors are
    /// reported through the result's `status` and `error` fields.
    pub async fn analyze(&self, url: &str, strategy: Strategy) -> PerformanceReport {
        info!("Requesting PageSpeed {} analysis for {}", strategy.as_str(), url);
        match self.request(url, strategy).await {
            Ok(response) => report_from_response(url, strategy, response),
            Err(e) => {
                warn!("PageSpeed analysis failed for {}: {}", url, e);
                PerformanceReport::failed(url, strategy, e.to_string())
            }
        }
    }

    async fn request(&self, url: &str, strategy: Strategy) -> Result<PsiResponse, FetchError> {
        let target = validate_and_normalize_url(url)?;

        let mut query = vec![
            ("url", target.as_str()),
            ("strategy", strategy.as_str()),
            ("category", "performance"),
        ];
        if let Some(key) = self.api_key.as_deref() {
            query.push(("key", key));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .timeout(Duration::from_secs(PERFORMANCE_TIMEOUT_SECS))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<PsiResponse>().await?)
    }
}
