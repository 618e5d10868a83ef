//! URL validation and normalization utilities.

use log::warn;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::FetchError;

/// Validates and normalizes a URL.
///
/// Trims whitespace and adds an `https://` prefix if no scheme is present,
/// then validates that the URL is syntactically valid, has a host and uses
/// the http/https scheme. Rejects URLs longer than `MAX_URL_LENGTH`.
///
/// # Errors
///
/// Returns `FetchError::InvalidUrl` describing why the URL was rejected.
pub fn validate_and_normalize_url(url: &str) -> Result<String, FetchError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FetchError::InvalidUrl("empty URL".to_string()));
    }

    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return Err(FetchError::InvalidUrl(format!(
            "URL exceeds {} characters",
            MAX_URL_LENGTH
        )));
    }

    let normalized = if has_explicit_scheme(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        return Err(FetchError::InvalidUrl(format!(
            "URL exceeds {} characters",
            MAX_URL_LENGTH
        )));
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => {
                Ok(normalized)
            }
            "http" | "https" => Err(FetchError::InvalidUrl(format!("no host in {url}"))),
            scheme => Err(FetchError::InvalidUrl(format!(
                "unsupported scheme '{scheme}' in {url}"
            ))),
        },
        Err(e) => Err(FetchError::InvalidUrl(format!("{url}: {e}"))),
    }
}

/// Whether `url` already names a scheme (`ftp://...`, `mailto:...`).
///
/// `host:port` inputs such as `localhost:8080/x` are not schemes.
fn has_explicit_scheme(url: &str) -> bool {
    if url.contains("://") {
        return true;
    }
    let Some((prefix, rest)) = url.split_once(':') else {
        return false;
    };
    let mut chars = prefix.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid_scheme && !rest.starts_with(|c: char| c.is_ascii_digit())
}

/// Returns the lowercase host of an absolute URL, if it has one.
pub fn host_of(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
}

/// Whether `url` is an absolute http(s) URL with a host.
pub fn is_absolute_http_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_and_normalize_url_adds_https() {
        let result = validate_and_normalize_url("example.com").ok();
        assert_eq!(result, Some("https://example.com".to_string()));
    }

    #[test]
    fn test_validate_and_normalize_url_preserves_scheme() {
        assert_eq!(
            validate_and_normalize_url("http://example.com").ok(),
            Some("http://example.com".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("https://example.com/blog/").ok(),
            Some("https://example.com/blog/".to_string())
        );
    }

    #[test]
    fn test_validate_and_normalize_url_trims_whitespace() {
        assert_eq!(
            validate_and_normalize_url("  example.com/path \n").ok(),
            Some("https://example.com/path".to_string())
        );
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_invalid() {
        assert!(validate_and_normalize_url("").is_err());
        assert!(validate_and_normalize_url("   ").is_err());
        assert!(validate_and_normalize_url("not a valid url!!!").is_err());
        assert!(validate_and_normalize_url("://example.com").is_err());
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_other_schemes() {
        for input in [
            "ftp://example.com/file",
            "mailto:a@b.com",
            "javascript:alert(1)",
            "file:///etc/passwd",
        ] {
            let err = validate_and_normalize_url(input).expect_err(input);
            assert!(
                err.to_string().contains("unsupported scheme"),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn test_validate_and_normalize_url_host_with_port() {
        assert_eq!(
            validate_and_normalize_url("localhost:8080/health").ok(),
            Some("https://localhost:8080/health".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("example.com:443").ok(),
            Some("https://example.com:443".to_string())
        );
    }

    #[test]
    fn test_validate_and_normalize_url_rejects_too_long_url() {
        let long_url = format!("https://example.com/{}", "a".repeat(2100));
        let err = validate_and_normalize_url(&long_url).unwrap_err();
        assert!(err.to_string().contains("2048"));
    }

    #[test]
    fn test_validate_and_normalize_url_accepts_url_at_limit() {
        let url_at_limit = format!("https://example.com/{}", "a".repeat(2028));
        assert_eq!(url_at_limit.len(), 2048);
        assert!(validate_and_normalize_url(&url_at_limit).is_ok());
    }

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://Example.COM/page"),
            Some("example.com".to_string())
        );
        assert_eq!(host_of("/relative"), None);
        assert_eq!(host_of("mailto:someone@example.com"), None);
    }

    #[test]
    fn test_is_absolute_http_url() {
        assert!(is_absolute_http_url("https://example.com/page"));
        assert!(is_absolute_http_url("http://example.com"));
        assert!(!is_absolute_http_url("/page"));
        assert!(!is_absolute_http_url("ftp://example.com/file"));
        assert!(!is_absolute_http_url("https//example.com"));
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_url_normalization_idempotent(url in "[a-z]{3,20}\\.[a-z]{2,5}") {
            if let Ok(n1) = validate_and_normalize_url(&url) {
                let n2 = validate_and_normalize_url(&n1).ok();
                prop_assert_eq!(Some(n1.clone()), n2,
                    "Normalizing twice should produce same result");
            }
        }

        #[test]
        fn test_url_scheme_handling(domain in "[a-z]{3,20}\\.[a-z]{2,5}") {
            let no_scheme = validate_and_normalize_url(&domain);
            prop_assert!(no_scheme.is_ok());
            prop_assert!(no_scheme.unwrap().starts_with("https://"));
        }
    }
}
