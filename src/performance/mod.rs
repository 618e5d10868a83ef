//! Core Web Vitals via the PageSpeed Insights API.
//!
//! Optional collaborator: works without an API key at a lower quota. Any
//! failure, including a malformed API response, becomes an error-status
//! [`PerformanceReport`].

mod analysis;
mod client;
mod types;

pub use analysis::recommendations;
pub use client::PerformanceClient;
pub use types::{
    CoreWebVitals, FieldData, FieldMetric, MetricResult, PerformanceReport, Rating, Strategy,
};
