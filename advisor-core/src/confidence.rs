//! Caller-supplied confidence. The engine relays it; it never derives it from data.

use serde::{Deserialize, Serialize};

use crate::error::DecisionError;

/// Raw confidence as it arrives on the wire: a label or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfidenceInput {
    Score(f64),
    Label(String),
}

impl ConfidenceInput {
    /// Validate and map to a score.
    ///
    /// Labels: low = 0.3, medium = 0.6, high = 0.9. Numeric strings like "0.8"
    /// are accepted as numbers.
    pub fn resolve(&self) -> Result<Confidence, DecisionError> {
        match self {
            ConfidenceInput::Score(v) => Confidence::try_new(*v),
            ConfidenceInput::Label(label) => match label.trim().to_lowercase().as_str() {
                "low" => Ok(Confidence(0.3)),
                "medium" => Ok(Confidence(0.6)),
                "high" => Ok(Confidence(0.9)),
                other => match other.parse::<f64>() {
                    Ok(v) => Confidence::try_new(v),
                    Err(_) => Err(DecisionError::InvalidConfidence(label.clone())),
                },
            },
        }
    }
}

/// Confidence level in the recommendation (0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    pub fn try_new(value: f64) -> Result<Self, DecisionError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DecisionError::InvalidConfidence(value.to_string()))
        }
    }

    /// Get the raw value
    pub fn value(&self) -> f64 {
        self.0
    }
}
