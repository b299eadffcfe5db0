//! Metrics error types.

use thiserror::Error;

/// Metrics error type.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Could not resolve statsd address: {0}")]
    Resolve(String),

    #[error("statsd client error: {0}")]
    Statsd(#[from] cadence::MetricError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for metrics operations.
pub type MetricsResult<T> = Result<T, MetricsError>;
