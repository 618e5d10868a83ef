//! Processing statistics tracking.
//!
//! Counts fetch failures by category over a bulk run so the summary can report
//! what went wrong, not just how often.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Per-run failure statistics.
///
/// All error types are initialized to zero on creation. Bulk runs are strictly
/// sequential, so plain counters are enough.
#[derive(Debug, Clone)]
pub struct ProcessingStats {
    errors: HashMap<ErrorType, usize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        let errors = ErrorType::iter().map(|e| (e, 0)).collect();
        ProcessingStats { errors }
    }

    /// Increment an error counter.
    pub fn increment_error(&mut self, error: ErrorType) {
        *self.errors.entry(error).or_insert(0) += 1;
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors.get(&error).copied().unwrap_or(0)
    }

    pub fn total_errors(&self) -> usize {
        self.errors.values().sum()
    }

    /// Non-zero counters, most frequent first.
    pub fn summary(&self) -> Vec<(ErrorType, usize)> {
        let mut entries: Vec<(ErrorType, usize)> = self
            .errors
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(e, c)| (*e, *c))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        entries
    }
}
