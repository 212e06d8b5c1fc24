//! advisor-core: planning data model and the deterministic priority decision engine

pub mod confidence;
pub mod config;
pub mod engine;
pub mod error;
pub mod planning;
pub mod render;
pub mod result;
pub mod steps;
pub mod time;

pub use confidence::{Confidence, ConfidenceInput};
pub use config::{BandThresholds, EngineConfig, ImportanceFactors, ScoringWeights};
pub use engine::{deadline_urgency, DecisionInputs, PriorityEngine};
pub use error::DecisionError;
pub use planning::{
    parse_weekdays, parse_weight, Assignment, Class, Commitment, Exam, Importance, Module,
    PlanningSnapshot, Recurrence,
};
pub use render::render_recommendation;
pub use result::{CandidateRef, PriorityBand, PriorityResult, Reasoning};
pub use steps::{format_duration, CandidateKind, StepTable, StepTemplate};
pub use time::{parse_calendar_date, parse_current_date, today_in};
