//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, MAX_REDIRECT_HOPS, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client used for every audit request.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Global timeout from the config and a shorter TCP connect timeout
/// - Redirects followed up to `MAX_REDIRECT_HOPS`, or disabled entirely
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    let redirect = if config.follow_redirects {
        reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS)
    } else {
        reqwest::redirect::Policy::none()
    };

    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(
            TCP_CONNECT_TIMEOUT_SECS.min(config.timeout_seconds),
        ))
        .user_agent(config.user_agent.clone())
        .redirect(redirect)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_default_config() {
        assert!(init_client(&Config::default()).is_ok());
    }

    #[test]
    fn test_init_client_without_redirects() {
        let config = Config {
            follow_redirects: false,
            timeout_seconds: 1,
            ..Default::default()
        };
        assert!(init_client(&config).is_ok());
    }
}
