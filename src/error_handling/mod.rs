//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, fetch, sitemap parsing)
//! - Error categorization for `reqwest` failures
//! - Failure statistics for bulk runs
//!
//! Validation findings are not errors: they are the data an audit produces and
//! live with the structured-data and meta result types.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ProcessingStats;
pub use types::{AuditStatus, ErrorType, FetchError, InitializationError, SitemapParseError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        assert!(stats.summary().is_empty());
    }

    #[test]
    fn test_processing_stats_increment() {
        let mut stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestNotFound);
        stats.increment_error(ErrorType::HttpRequestNotFound);
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        assert_eq!(stats.get_error_count(ErrorType::HttpRequestNotFound), 2);
        assert_eq!(stats.total_errors(), 3);
        assert_eq!(
            stats.summary(),
            vec![
                (ErrorType::HttpRequestNotFound, 2),
                (ErrorType::HttpRequestTimeoutError, 1)
            ]
        );
    }
}
