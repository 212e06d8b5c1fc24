//! Priority Decision Engine: picks today's single most urgent assignment or exam.
//!
//! Scoring per candidate (date >= today):
//! - deadline urgency `1 / (1 + days_until)`
//! - weight factor `weight / 100 * coefficient` (default when unlisted)
//! - module importance factor (high/medium/low/unknown)
//!
//! combined with the configured weights. Highest score wins; ties go to the
//! earlier date, then assignments over exams, then the smaller name.

use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::confidence::ConfidenceInput;
use crate::config::EngineConfig;
use crate::error::DecisionError;
use crate::planning::{Importance, PlanningSnapshot};
use crate::result::{CandidateRef, PriorityBand, PriorityResult, Reasoning};
use crate::steps::{format_duration, CandidateKind};
use crate::time::{days_between, parse_calendar_date};

/// Optional caller signals that tune a single decision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionInputs {
    pub confidence: Option<ConfidenceInput>,
    /// Multiplier on the weight factor (default 1.0).
    pub module_coefficient: Option<f64>,
}

/// Deadline urgency: 1.0 on the day, strictly decreasing, never reaching 0.
pub fn deadline_urgency(days_until: i64) -> f64 {
    1.0 / (1.0 + days_until.max(0) as f64)
}

#[derive(Debug, Clone)]
struct Scored<'a> {
    kind: CandidateKind,
    name: &'a str,
    module: &'a str,
    date: NaiveDate,
    weight: Option<f64>,
    days_until: i64,
    importance: Option<Importance>,
    score: f64,
}

impl Scored<'_> {
    /// `Less` means "ranks ahead".
    fn rank(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.date.cmp(&other.date))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.name.cmp(other.name))
    }

    fn to_ref(&self) -> CandidateRef {
        CandidateRef {
            kind: self.kind,
            name: self.name.to_string(),
            module: self.module.to_string(),
            date: self.date,
            weight: self.weight,
            days_until: self.days_until,
        }
    }
}

/// Stateless; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct PriorityEngine {
    config: EngineConfig,
}

impl PriorityEngine {
    pub fn new(config: EngineConfig) -> Self {
        let total = config.weights.total();
        if (total - 1.0).abs() > 1e-6 {
            warn!(total, "scoring weights do not sum to 1.0; scores may leave [0, 1]");
        }
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decide with default confidence and a coefficient of 1.0. Never fails.
    pub fn decide(&self, snapshot: &PlanningSnapshot, today: NaiveDate) -> PriorityResult {
        let confidence = self.config.default_confidence.clamp(0.0, 1.0);
        self.evaluate(snapshot, today, confidence, 1.0)
    }

    /// Decide with caller-supplied confidence and module coefficient.
    pub fn decide_with(
        &self,
        snapshot: &PlanningSnapshot,
        today: NaiveDate,
        inputs: &DecisionInputs,
    ) -> Result<PriorityResult, DecisionError> {
        let confidence = match &inputs.confidence {
            Some(c) => c.resolve()?.value(),
            None => self.config.default_confidence.clamp(0.0, 1.0),
        };

        let coefficient = match inputs.module_coefficient {
            None => 1.0,
            Some(c) if c.is_finite() && c >= 0.0 => c,
            Some(c) => return Err(DecisionError::InvalidCoefficient(c)),
        };

        Ok(self.evaluate(snapshot, today, confidence, coefficient))
    }

    fn evaluate(
        &self,
        snapshot: &PlanningSnapshot,
        today: NaiveDate,
        confidence: f64,
        coefficient: f64,
    ) -> PriorityResult {
        let mut pool: Vec<Scored<'_>> = Vec::new();
        let mut overdue: Vec<Scored<'_>> = Vec::new();

        let assignments = snapshot.assignments.iter().map(|a| {
            (CandidateKind::Assignment, a.name.as_str(), a.module.as_str(), a.deadline.as_str(), a.weight)
        });
        let exams = snapshot
            .exams
            .iter()
            .map(|e| (CandidateKind::Exam, e.name.as_str(), e.module.as_str(), e.date.as_str(), e.weight));

        for (kind, name, module, raw_date, weight) in assignments.chain(exams) {
            let Some(date) = parse_calendar_date(raw_date) else {
                warn!(kind = kind.label(), item = name, raw_date, "dropping candidate with unreadable date");
                continue;
            };

            let importance = snapshot.module(module).and_then(|m| m.importance);
            let days = days_between(today, date);
            let scored = Scored {
                kind,
                name,
                module,
                date,
                weight,
                days_until: days,
                importance,
                score: self.score(days, weight, importance, coefficient),
            };

            if days < 0 {
                overdue.push(scored);
            } else {
                pool.push(scored);
            }
        }

        overdue.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.kind.cmp(&b.kind))
                .then_with(|| a.name.cmp(b.name))
        });

        let Some(winner) = pool.iter().min_by(|a, b| a.rank(b)) else {
            return self.idle_result(confidence, &overdue);
        };

        let contention = pool.iter().filter(|c| c.days_until == winner.days_until).count();
        let urgency = winner.score.clamp(0.0, 1.0);
        let band = PriorityBand::from_score(urgency, &self.config.bands);

        debug!(
            winner = winner.name,
            score = urgency,
            band = band.as_str(),
            pool = pool.len(),
            overdue = overdue.len(),
            "priority decided"
        );

        let template = self.config.steps.template(Some(winner.kind));
        let mut steps = overdue_steps(&overdue);
        steps.extend(template.render_steps(winner.name, winner.module));

        let weight_percent = winner
            .weight
            .map(|w| w.clamp(0.0, 100.0))
            .unwrap_or(self.config.default_weight_factor * 100.0);

        PriorityResult {
            urgency_score: urgency,
            confidence,
            band,
            top_priority: Some(winner.to_ref()),
            module_importance: winner.importance,
            reasoning: Reasoning {
                deadline_proximity: deadline_text(winner.kind, winner.days_until),
                module_weight: weight_text(winner, snapshot.module(winner.module).is_some()),
                workload_balance: workload_text(contention, pool.len()),
            },
            actionable_steps: steps,
            estimated_duration: format_duration(template.estimate_minutes(weight_percent)),
            overdue: overdue.iter().map(Scored::to_ref).collect(),
        }
    }

    fn score(
        &self,
        days_until: i64,
        weight: Option<f64>,
        importance: Option<Importance>,
        coefficient: f64,
    ) -> f64 {
        let w = &self.config.weights;
        let base = weight
            .map(|p| p.clamp(0.0, 100.0) / 100.0)
            .unwrap_or(self.config.default_weight_factor);
        let weight_factor = (base * coefficient).clamp(0.0, 1.0);
        let importance_factor = self.config.importance.factor(importance);

        deadline_urgency(days_until) * w.deadline
            + weight_factor * w.weight
            + importance_factor * w.importance
    }

    fn idle_result(&self, confidence: f64, overdue: &[Scored<'_>]) -> PriorityResult {
        let template = self.config.steps.template(None);
        let mut steps = overdue_steps(overdue);
        steps.extend(template.render_steps("", ""));

        let deadline_proximity = if overdue.is_empty() {
            "No urgent items".to_string()
        } else {
            format!(
                "No urgent items ahead; {} already overdue",
                count_noun(overdue.len(), "item", "items")
            )
        };

        PriorityResult {
            urgency_score: 0.0,
            confidence,
            band: PriorityBand::Low,
            top_priority: None,
            module_importance: None,
            reasoning: Reasoning {
                deadline_proximity,
                module_weight: "No weighted items pending".to_string(),
                workload_balance: "Nothing competes for your time today".to_string(),
            },
            actionable_steps: steps,
            estimated_duration: format_duration(template.estimate_minutes(0.0)),
            overdue: overdue.iter().map(Scored::to_ref).collect(),
        }
    }
}

fn overdue_steps(overdue: &[Scored<'_>]) -> Vec<String> {
    if overdue.is_empty() {
        return Vec::new();
    }
    let names: Vec<&str> = overdue.iter().map(|c| c.name).collect();
    vec![format!("First catch up on overdue work: {}", names.join(", "))]
}

fn count_noun(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("1 {singular}")
    } else {
        format!("{n} {plural}")
    }
}

fn deadline_text(kind: CandidateKind, days: i64) -> String {
    match (kind, days) {
        (CandidateKind::Assignment, 0) => "Assignment is due today".to_string(),
        (CandidateKind::Assignment, 1) => "Assignment is due tomorrow".to_string(),
        (CandidateKind::Assignment, n) => format!("Assignment is due in {n} days"),
        (CandidateKind::Exam, 0) => "Exam is today".to_string(),
        (CandidateKind::Exam, 1) => "Exam is tomorrow".to_string(),
        (CandidateKind::Exam, n) => format!("Exam is in {n} days"),
    }
}

fn format_percent(w: f64) -> String {
    if w.fract() == 0.0 {
        format!("{w:.0}%")
    } else {
        format!("{w:.1}%")
    }
}

fn weight_text(c: &Scored<'_>, module_known: bool) -> String {
    let mut s = match c.weight {
        Some(w) => format!("{} carries {} of final grade", c.kind.label(), format_percent(w.clamp(0.0, 100.0))),
        None => format!("{} lists no grade weight; assuming default weighting", c.kind.label()),
    };

    if !c.module.trim().is_empty() {
        let detail = match (module_known, c.importance) {
            (_, Some(i)) => format!("{i} importance module"),
            (true, None) => "module importance not stated".to_string(),
            (false, None) => "unknown module".to_string(),
        };
        s.push_str(&format!(" in {} ({})", c.module.trim(), detail));
    }
    s
}

fn workload_text(contention: usize, pool: usize) -> String {
    if contention > 1 {
        format!("{contention} tasks compete for the same day")
    } else if pool > 1 {
        format!(
            "Balanced workload: {} due later",
            count_noun(pool - 1, "other item", "other items")
        )
    } else {
        "Balanced workload with one major task".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::{Assignment, Exam, Module};
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 20).unwrap()
    }

    fn ymd(offset: i64) -> String {
        (today() + Duration::days(offset)).format("%Y-%m-%d").to_string()
    }

    fn assignment(name: &str, offset: i64, module: &str, weight: Option<f64>) -> Assignment {
        Assignment {
            name: name.to_string(),
            deadline: ymd(offset),
            module: module.to_string(),
            weight,
            description: String::new(),
        }
    }

    fn exam(name: &str, offset: i64, module: &str, weight: Option<f64>) -> Exam {
        Exam {
            name: name.to_string(),
            date: ymd(offset),
            time: "9:00 AM".to_string(),
            module: module.to_string(),
            location: "Hall A".to_string(),
            weight,
        }
    }

    fn module(code: &str, importance: Importance) -> Module {
        Module {
            code: code.to_string(),
            name: code.to_string(),
            importance: Some(importance),
            credits: 4,
        }
    }

    #[test]
    fn test_empty_pool_is_low_and_never_fails() {
        let engine = PriorityEngine::default();
        let r = engine.decide(&PlanningSnapshot::default(), today());
        assert_eq!(r.urgency_score, 0.0);
        assert_eq!(r.band, PriorityBand::Low);
        assert!(r.top_priority.is_none());
        assert_eq!(r.reasoning.deadline_proximity, "No urgent items");
        assert_eq!(r.actionable_steps.len(), 3);
        assert_eq!(r.estimated_duration, "30 minutes");
    }

    #[test]
    fn test_deadline_urgency_is_strictly_decreasing() {
        assert_eq!(deadline_urgency(0), 1.0);
        for d in 0..365 {
            assert!(deadline_urgency(d) > deadline_urgency(d + 1));
            assert!(deadline_urgency(d + 1) > 0.0);
        }
        assert!(deadline_urgency(1) < 1.0);
    }

    #[test]
    fn test_worked_example_assignment_beats_exam() {
        let snap = PlanningSnapshot {
            assignments: vec![assignment("Binary Tree Implementation", 2, "CS-301", Some(20.0))],
            exams: vec![exam("Data Structures Midterm", 3, "CS-301", Some(30.0))],
            modules: vec![module("CS-301", Importance::High)],
            ..Default::default()
        };

        let r = PriorityEngine::default().decide(&snap, today());
        assert_eq!(r.top_priority_name(), Some("Binary Tree Implementation"));
        assert!((r.urgency_score - 0.4267).abs() < 5e-5, "got {}", r.urgency_score);
        assert_eq!(r.band, PriorityBand::Medium);
        assert_eq!(r.module_importance, Some(Importance::High));
        assert_eq!(r.reasoning.deadline_proximity, "Assignment is due in 2 days");
        assert_eq!(
            r.reasoning.module_weight,
            "Assignment carries 20% of final grade in CS-301 (high importance module)"
        );
        assert_eq!(r.reasoning.workload_balance, "Balanced workload: 1 other item due later");
        assert_eq!(r.estimated_duration, "3-4 hours");
        assert_eq!(r.actionable_steps[0], "Start with Binary Tree Implementation");
    }

    #[test]
    fn test_tie_break_prefers_smaller_name() {
        let snap = PlanningSnapshot {
            assignments: vec![
                assignment("Beta Essay", 4, "EN-101", Some(10.0)),
                assignment("Alpha Essay", 4, "EN-101", Some(10.0)),
            ],
            ..Default::default()
        };
        let r = PriorityEngine::default().decide(&snap, today());
        assert_eq!(r.top_priority_name(), Some("Alpha Essay"));
        assert_eq!(r.reasoning.workload_balance, "2 tasks compete for the same day");
    }

    #[test]
    fn test_tie_break_prefers_assignment_over_exam() {
        let snap = PlanningSnapshot {
            assignments: vec![assignment("Zeta Lab", 1, "PH-200", Some(25.0))],
            exams: vec![exam("Alpha Quiz", 1, "PH-200", Some(25.0))],
            ..Default::default()
        };
        let r = PriorityEngine::default().decide(&snap, today());
        assert_eq!(r.top_priority.as_ref().unwrap().kind, CandidateKind::Assignment);
    }

    #[test]
    fn test_decision_ignores_input_order() {
        let mut snap = PlanningSnapshot {
            assignments: vec![
                assignment("Essay", 5, "EN-101", Some(40.0)),
                assignment("Lab Report", 1, "PH-200", Some(5.0)),
                assignment("Problem Set", 1, "MA-101", Some(5.0)),
            ],
            exams: vec![exam("Final", 10, "MA-101", Some(50.0))],
            ..Default::default()
        };
        let engine = PriorityEngine::default();
        let first = engine.decide(&snap, today());
        snap.assignments.reverse();
        let second = engine.decide(&snap, today());
        assert_eq!(first, second);
        assert_eq!(first.top_priority_name(), Some("Lab Report"));
    }

    #[test]
    fn test_only_overdue_item_yields_no_urgent_items() {
        let snap = PlanningSnapshot {
            assignments: vec![assignment("Old Homework", -5, "CS-301", Some(10.0))],
            ..Default::default()
        };
        let r = PriorityEngine::default().decide(&snap, today());
        assert_eq!(r.urgency_score, 0.0);
        assert_eq!(r.band, PriorityBand::Low);
        assert!(r.top_priority.is_none());
        assert_eq!(r.overdue.len(), 1);
        assert_eq!(r.overdue[0].days_until, -5);
        assert!(r.actionable_steps[0].contains("Old Homework"));
    }

    #[test]
    fn test_overdue_steps_come_first() {
        let snap = PlanningSnapshot {
            assignments: vec![
                assignment("Late Lab", -1, "PH-200", None),
                assignment("Essay", 3, "EN-101", Some(30.0)),
            ],
            ..Default::default()
        };
        let r = PriorityEngine::default().decide(&snap, today());
        assert_eq!(r.top_priority_name(), Some("Essay"));
        assert_eq!(r.actionable_steps[0], "First catch up on overdue work: Late Lab");
        assert_eq!(r.actionable_steps.len(), 4);
    }

    #[test]
    fn test_unreadable_deadline_is_dropped() {
        let mut bad = assignment("Mystery Task", 0, "CS-301", Some(90.0));
        bad.deadline = "sometime soon".to_string();
        let snap = PlanningSnapshot {
            assignments: vec![bad, assignment("Essay", 6, "EN-101", Some(10.0))],
            ..Default::default()
        };
        let r = PriorityEngine::default().decide(&snap, today());
        assert_eq!(r.top_priority_name(), Some("Essay"));
    }

    #[test]
    fn test_all_unreadable_reports_no_urgent_items() {
        let mut bad = assignment("Mystery Task", 0, "CS-301", None);
        bad.deadline = "TBD".to_string();
        let snap = PlanningSnapshot {
            assignments: vec![bad],
            ..Default::default()
        };
        let r = PriorityEngine::default().decide(&snap, today());
        assert!(r.top_priority.is_none());
        assert_eq!(r.reasoning.deadline_proximity, "No urgent items");
    }

    #[test]
    fn test_unknown_module_scores_half_importance() {
        let snap = PlanningSnapshot {
            assignments: vec![assignment("Essay", 0, "HIST-9", Some(0.0))],
            ..Default::default()
        };
        let r = PriorityEngine::default().decide(&snap, today());
        // 0.5 * 1.0 + 0.3 * 0.0 + 0.2 * 0.5
        assert!((r.urgency_score - 0.6).abs() < 1e-12);
        assert!(r.reasoning.module_weight.ends_with("(unknown module)"));
        assert_eq!(r.module_importance, None);
    }

    #[test]
    fn test_missing_weight_uses_default_factor() {
        let snap = PlanningSnapshot {
            exams: vec![exam("Quiz", 0, "MA-101", None)],
            modules: vec![module("MA-101", Importance::Low)],
            ..Default::default()
        };
        let r = PriorityEngine::default().decide(&snap, today());
        // 0.5 * 1.0 + 0.3 * 0.5 + 0.2 * 0.3
        assert!((r.urgency_score - 0.71).abs() < 1e-12);
        assert_eq!(r.band, PriorityBand::High);
        assert_eq!(r.reasoning.deadline_proximity, "Exam is today");
    }

    #[test]
    fn test_module_coefficient_scales_weight_factor() {
        let snap = PlanningSnapshot {
            assignments: vec![assignment("Essay", 1, "EN-101", Some(40.0))],
            modules: vec![module("EN-101", Importance::Medium)],
            ..Default::default()
        };
        let engine = PriorityEngine::default();
        let inputs = DecisionInputs {
            confidence: None,
            module_coefficient: Some(2.0),
        };
        let r = engine.decide_with(&snap, today(), &inputs).unwrap();
        // 0.5 * 0.5 + 0.3 * 0.8 + 0.2 * 0.6
        assert!((r.urgency_score - 0.61).abs() < 1e-12);

        let capped = DecisionInputs {
            confidence: None,
            module_coefficient: Some(10.0),
        };
        let r = engine.decide_with(&snap, today(), &capped).unwrap();
        // weight factor capped at 1.0
        assert!((r.urgency_score - 0.67).abs() < 1e-12);
    }

    #[test]
    fn test_negative_coefficient_is_rejected() {
        let inputs = DecisionInputs {
            confidence: None,
            module_coefficient: Some(-1.0),
        };
        let err = PriorityEngine::default()
            .decide_with(&PlanningSnapshot::default(), today(), &inputs)
            .unwrap_err();
        assert_eq!(err, DecisionError::InvalidCoefficient(-1.0));
    }

    #[test]
    fn test_confidence_is_relayed_not_derived() {
        let engine = PriorityEngine::default();
        let snap = PlanningSnapshot::default();

        let r = engine.decide(&snap, today());
        assert_eq!(r.confidence, 0.6);

        let inputs = DecisionInputs {
            confidence: Some(ConfidenceInput::Label("high".into())),
            module_coefficient: None,
        };
        assert_eq!(engine.decide_with(&snap, today(), &inputs).unwrap().confidence, 0.9);

        let bad = DecisionInputs {
            confidence: Some(ConfidenceInput::Score(3.0)),
            module_coefficient: None,
        };
        assert!(engine.decide_with(&snap, today(), &bad).is_err());
    }

    #[test]
    fn test_custom_bands_from_config() {
        let config = EngineConfig {
            bands: crate::config::BandThresholds { high: 0.9, medium: 0.2 },
            ..Default::default()
        };
        let snap = PlanningSnapshot {
            exams: vec![exam("Quiz", 0, "MA-101", None)],
            modules: vec![module("MA-101", Importance::Low)],
            ..Default::default()
        };
        let r = PriorityEngine::new(config).decide(&snap, today());
        assert_eq!(r.band, PriorityBand::Medium);
    }

    #[test]
    fn test_unbalanced_weights_still_decide() {
        let config = EngineConfig {
            weights: crate::config::ScoringWeights { deadline: 1.0, weight: 1.0, importance: 1.0 },
            ..Default::default()
        };
        assert!((config.weights.total() - 3.0).abs() < 1e-12);
        let snap = PlanningSnapshot {
            exams: vec![exam("Quiz", 0, "MA-101", Some(100.0))],
            modules: vec![module("MA-101", Importance::High)],
            ..Default::default()
        };
        let r = PriorityEngine::new(config).decide(&snap, today());
        assert_eq!(r.urgency_score, 1.0);
        assert_eq!(r.band, PriorityBand::High);
    }
}
