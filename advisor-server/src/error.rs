use advisor_core::DecisionError;
use advisor_ingest::ExtractError;
use thiserror::Error;

/// Failure of one advice request.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The caller sent something we cannot work with.
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl AdvisorError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        AdvisorError::InvalidInput(msg.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AdvisorError::InvalidInput(_))
    }
}

impl From<DecisionError> for AdvisorError {
    fn from(err: DecisionError) -> Self {
        AdvisorError::InvalidInput(err.to_string())
    }
}

impl From<ExtractError> for AdvisorError {
    fn from(err: ExtractError) -> Self {
        AdvisorError::InvalidInput(err.to_string())
    }
}
