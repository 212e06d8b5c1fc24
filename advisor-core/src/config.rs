//! Engine configuration, injected at construction.

use serde::{Deserialize, Serialize};

use crate::planning::Importance;
use crate::steps::StepTable;

/// Weights of the three scoring terms. They should sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub deadline: f64,
    pub weight: f64,
    pub importance: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            deadline: 0.5,
            weight: 0.3,
            importance: 0.2,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.deadline + self.weight + self.importance
    }
}

/// Score thresholds for the priority bands (both exclusive lower bounds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            high: 0.7,
            medium: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportanceFactors {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    pub unknown: f64,
}

impl Default for ImportanceFactors {
    fn default() -> Self {
        Self {
            high: 1.0,
            medium: 0.6,
            low: 0.3,
            unknown: 0.5,
        }
    }
}

impl ImportanceFactors {
    pub fn factor(&self, importance: Option<Importance>) -> f64 {
        match importance {
            Some(Importance::High) => self.high,
            Some(Importance::Medium) => self.medium,
            Some(Importance::Low) => self.low,
            None => self.unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    pub bands: BandThresholds,
    pub importance: ImportanceFactors,
    /// Weight factor used when an item lists no weight.
    pub default_weight_factor: f64,
    /// Confidence relayed when the caller sends none.
    pub default_confidence: f64,
    pub steps: StepTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            bands: BandThresholds::default(),
            importance: ImportanceFactors::default(),
            default_weight_factor: 0.5,
            default_confidence: 0.6,
            steps: StepTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoringWeights::default();
        assert!((w.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_importance_factor_lookup() {
        let f = ImportanceFactors::default();
        assert_eq!(f.factor(Some(Importance::High)), 1.0);
        assert_eq!(f.factor(Some(Importance::Medium)), 0.6);
        assert_eq!(f.factor(Some(Importance::Low)), 0.3);
        assert_eq!(f.factor(None), 0.5);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: EngineConfig =
            serde_json::from_str(r#"{"bands": {"high": 0.8}, "default_confidence": 0.9}"#).unwrap();
        assert_eq!(cfg.bands.high, 0.8);
        assert_eq!(cfg.bands.medium, 0.4);
        assert_eq!(cfg.default_confidence, 0.9);
        assert_eq!(cfg.weights, ScoringWeights::default());
    }
}
