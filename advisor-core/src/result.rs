//! Output of a priority decision.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::BandThresholds;
use crate::planning::Importance;
use crate::steps::CandidateKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBand {
    Low,
    Medium,
    High,
}

impl PriorityBand {
    /// `score > high` is high, `medium < score <= high` is medium, else low.
    pub fn from_score(score: f64, thresholds: &BandThresholds) -> Self {
        if score > thresholds.high {
            PriorityBand::High
        } else if score > thresholds.medium {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityBand::Low => "low",
            PriorityBand::Medium => "medium",
            PriorityBand::High => "high",
        }
    }
}

impl fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the assignment or exam a decision is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRef {
    pub kind: CandidateKind,
    pub name: String,
    pub module: String,
    pub date: NaiveDate,
    pub weight: Option<f64>,
    /// Negative for overdue items.
    pub days_until: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reasoning {
    pub deadline_proximity: String,
    pub module_weight: String,
    pub workload_balance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityResult {
    pub urgency_score: f64,
    pub confidence: f64,
    pub band: PriorityBand,
    pub top_priority: Option<CandidateRef>,
    pub module_importance: Option<Importance>,
    pub reasoning: Reasoning,
    pub actionable_steps: Vec<String>,
    pub estimated_duration: String,
    /// Past-due items, earliest first.
    pub overdue: Vec<CandidateRef>,
}

impl PriorityResult {
    pub fn top_priority_name(&self) -> Option<&str> {
        self.top_priority.as_ref().map(|c| c.name.as_str())
    }

    pub fn has_overdue(&self) -> bool {
        !self.overdue.is_empty()
    }
}
