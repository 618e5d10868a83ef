//! Error type definitions.
//!
//! This module defines the failure types that can end an audit, plus the
//! status carried by every result record.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure to obtain a document from the network.
///
/// Fetch failures are terminal for the URL being audited: the outer boundary
/// converts them into an error-shaped result instead of propagating them.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be normalised into an http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-success status code.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// The request failed before a response was received.
    #[error("{kind}: {message}")]
    Network { kind: ErrorType, message: String },

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl FetchError {
    /// Returns the error category for statistics.
    pub fn error_type(&self) -> ErrorType {
        match self {
            FetchError::InvalidUrl(_) => ErrorType::InvalidUrl,
            FetchError::Http { status, .. } => ErrorType::from_status(*status),
            FetchError::Network { kind, .. } => *kind,
            FetchError::Body(_) => ErrorType::HttpRequestBodyError,
        }
    }
}

impl From<ReqwestError> for FetchError {
    fn from(error: ReqwestError) -> Self {
        if let Some(status) = error.status() {
            return FetchError::Http {
                status: status.as_u16(),
                url: error
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
            };
        }
        FetchError::Network {
            kind: super::categorize_reqwest_error(&error),
            message: error.to_string(),
        }
    }
}

/// Failure to read a sitemap document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SitemapParseError {
    /// The document is not well-formed XML.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// The root element is neither `<urlset>` nor `<sitemapindex>`.
    #[error("Invalid sitemap format")]
    UnknownFormat,

    /// The payload is gzip-compressed.
    #[error("Compressed sitemap (gzip) is not supported; provide the uncompressed XML")]
    Compressed,
}

/// Outcome of a single audit, serialised as `"completed"` or `"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    #[default]
    Completed,
    Error,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Completed => "completed",
            AuditStatus::Error => "error",
        }
    }
}

/// Categories of fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    HttpRequestBuilderError,
    HttpRequestRedirectError,
    HttpRequestTimeoutError,
    HttpRequestRequestError,
    HttpRequestConnectError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestOtherError,
    HttpRequestTooManyRequests,
    HttpRequestBotDetectionError, // 403 Forbidden - typically bot detection
    HttpRequestNotFound,
    HttpRequestClientError, // Remaining 4xx
    HttpRequestServerError, // 5xx
    InvalidUrl,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestTooManyRequests => "Too many requests",
            ErrorType::HttpRequestBotDetectionError => "Bot detection (403 Forbidden)",
            ErrorType::HttpRequestNotFound => "Not Found (404)",
            ErrorType::HttpRequestClientError => "Client error (4xx)",
            ErrorType::HttpRequestServerError => "Server error (5xx)",
            ErrorType::InvalidUrl => "Invalid URL",
        }
    }

    /// Maps an HTTP status code to its error category.
    pub fn from_status(status: u16) -> Self {
        match status {
            403 => ErrorType::HttpRequestBotDetectionError,
            404 => ErrorType::HttpRequestNotFound,
            429 => ErrorType::HttpRequestTooManyRequests,
            400..=499 => ErrorType::HttpRequestClientError,
            500..=599 => ErrorType::HttpRequestServerError,
            _ => ErrorType::HttpRequestOtherError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_error_type_as_str_not_empty() {
        for error_type in ErrorType::iter() {
            assert!(!error_type.as_str().is_empty(), "{:?}", error_type);
            assert_eq!(error_type.to_string(), error_type.as_str());
        }
    }

    #[test]
    fn test_error_type_from_status() {
        assert_eq!(
            ErrorType::from_status(403),
            ErrorType::HttpRequestBotDetectionError
        );
        assert_eq!(ErrorType::from_status(404), ErrorType::HttpRequestNotFound);
        assert_eq!(
            ErrorType::from_status(429),
            ErrorType::HttpRequestTooManyRequests
        );
        assert_eq!(
            ErrorType::from_status(410),
            ErrorType::HttpRequestClientError
        );
        assert_eq!(
            ErrorType::from_status(503),
            ErrorType::HttpRequestServerError
        );
        assert_eq!(ErrorType::from_status(302), ErrorType::HttpRequestOtherError);
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Http {
            status: 404,
            url: "https://example.com/missing".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 for https://example.com/missing");
        assert_eq!(err.error_type(), ErrorType::HttpRequestNotFound);

        let err = FetchError::Network {
            kind: ErrorType::HttpRequestTimeoutError,
            message: "operation timed out".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP request timeout error: operation timed out"
        );
    }

    #[test]
    fn test_audit_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AuditStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&AuditStatus::Error).unwrap(),
            "\"error\""
        );
        assert_eq!(AuditStatus::Error.as_str(), "error");
    }
}
