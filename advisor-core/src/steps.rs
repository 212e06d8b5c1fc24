//! Actionable-step templates keyed by candidate kind.
//!
//! The table is plain data so it can be swapped from config and tested on its own.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    // Declaration order is the tie-break order: assignments first.
    Assignment,
    Exam,
}

impl CandidateKind {
    pub fn label(&self) -> &'static str {
        match self {
            CandidateKind::Assignment => "Assignment",
            CandidateKind::Exam => "Exam",
        }
    }
}

/// One row of the step table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTemplate {
    /// Step lines; `{name}` and `{module}` are substituted.
    pub steps: Vec<String>,
    pub base_minutes: f64,
    /// Extra minutes per percentage point of grade weight.
    pub minutes_per_weight_point: f64,
}

impl StepTemplate {
    fn new(steps: &[&str], base_minutes: f64, minutes_per_weight_point: f64) -> Self {
        Self {
            steps: steps.iter().map(|s| s.to_string()).collect(),
            base_minutes,
            minutes_per_weight_point,
        }
    }

    pub fn render_steps(&self, name: &str, module: &str) -> Vec<String> {
        let module = if module.trim().is_empty() { "course" } else { module.trim() };
        self.steps
            .iter()
            .map(|s| s.replace("{name}", name).replace("{module}", module))
            .collect()
    }

    /// Estimated minutes for an item carrying `weight_percent` of its grade.
    pub fn estimate_minutes(&self, weight_percent: f64) -> u32 {
        let m = self.base_minutes + self.minutes_per_weight_point * weight_percent.max(0.0);
        m.round().max(0.0) as u32
    }
}

/// Templates for each candidate kind, plus the idle row used when nothing is pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepTable {
    pub assignment: StepTemplate,
    pub exam: StepTemplate,
    pub idle: StepTemplate,
}

impl Default for StepTable {
    fn default() -> Self {
        Self {
            assignment: StepTemplate::new(
                &[
                    "Start with {name}",
                    "Test and review your work on {name} thoroughly",
                    "Submit {name} before the deadline",
                ],
                60.0,
                6.0,
            ),
            exam: StepTemplate::new(
                &[
                    "Review your {module} notes for {name}",
                    "Work through practice questions under timed conditions",
                    "Rest well the night before {name}",
                ],
                90.0,
                3.0,
            ),
            idle: StepTemplate::new(
                &[
                    "Review your planning document for upcoming deadlines",
                    "Block out study time for the week ahead",
                    "Take a proper break and recharge",
                ],
                30.0,
                0.0,
            ),
        }
    }
}

impl StepTable {
    pub fn template(&self, kind: Option<CandidateKind>) -> &StepTemplate {
        match kind {
            Some(CandidateKind::Assignment) => &self.assignment,
            Some(CandidateKind::Exam) => &self.exam,
            None => &self.idle,
        }
    }
}

/// Human-friendly duration: "45 minutes" below an hour, "3-4 hours" above.
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes} minutes");
    }
    let hours = minutes / 60;
    format!("{}-{} hours", hours, hours + 1)
}
