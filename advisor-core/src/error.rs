use thiserror::Error;

/// Caller-side input problems. Anything here is a bad request, not a crash.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionError {
    #[error("invalid date {0}")]
    InvalidDate(String),

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid confidence level: {0} (expected 0.0-1.0 or low/medium/high)")]
    InvalidConfidence(String),

    #[error("invalid module coefficient: {0} (expected a non-negative number)")]
    InvalidCoefficient(f64),
}
