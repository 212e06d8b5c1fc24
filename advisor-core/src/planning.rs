//! Planning data extracted from a student's planning document.
//!
//! These are plain value records. Dates stay as strings here: the engine parses
//! them per item so one unreadable deadline never poisons the whole snapshot.

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
    pub deadline: String,
    #[serde(default)]
    pub module: String,
    /// Percentage of the module grade (0-100).
    #[serde(default, deserialize_with = "de_weight")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub location: String,
    /// Percentage of the module grade (0-100).
    #[serde(default, deserialize_with = "de_weight")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, deserialize_with = "de_weekdays")]
    pub days: Vec<Weekday>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub instructor: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Recurrence {
    #[default]
    #[serde(rename = "one-off")]
    OneOff,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "daily")]
    Daily,
}

impl From<String> for Recurrence {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "weekly" | "every week" => Recurrence::Weekly,
            "daily" | "every day" => Recurrence::Daily,
            _ => Recurrence::OneOff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub category: String,
}

/// How much a module matters to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Low => "low",
            Importance::Medium => "medium",
            Importance::High => "high",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Importance::Low),
            "medium" | "med" | "normal" => Ok(Importance::Medium),
            "high" => Ok(Importance::High),
            other => Err(format!("unknown module importance: {other}")),
        }
    }
}

impl TryFrom<String> for Importance {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Unrecognised labels read as unknown importance.
    #[serde(default, deserialize_with = "de_importance")]
    pub importance: Option<Importance>,
    #[serde(default)]
    pub credits: u32,
}

/// Everything extracted from one student's planning document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningSnapshot {
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl PlanningSnapshot {
    /// Look up a module by code. Codes compare case-insensitively.
    pub fn module(&self, code: &str) -> Option<&Module> {
        let code = code.trim();
        self.modules
            .iter()
            .find(|m| m.code.trim().eq_ignore_ascii_case(code))
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.exams.is_empty()
            && self.assignments.is_empty()
            && self.commitments.is_empty()
            && self.modules.is_empty()
    }

    /// Number of assignments and exams, dated or not.
    pub fn gradable_count(&self) -> usize {
        self.assignments.len() + self.exams.len()
    }

    /// Append `other` to this snapshot. Modules already known by code keep
    /// their first definition.
    pub fn merge(mut self, other: PlanningSnapshot) -> Self {
        self.classes.extend(other.classes);
        self.exams.extend(other.exams);
        self.assignments.extend(other.assignments);
        self.commitments.extend(other.commitments);
        for m in other.modules {
            if self.module(&m.code).is_none() {
                self.modules.push(m);
            }
        }
        self
    }
}

/// Parse a weight like `20`, `20.5` or `20%`.
pub fn parse_weight(raw: &str) -> Option<f64> {
    let t = raw.trim().trim_end_matches('%').trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|w| w.is_finite())
}

/// Parse weekday codes out of free text like "Mon, Wed, Fri" or "Tue/Thu".
/// Unknown tokens are ignored; duplicates are dropped.
pub fn parse_weekdays(raw: &str) -> Vec<Weekday> {
    collect_weekdays(raw.split(|c: char| c == ',' || c == '/' || c == '&' || c.is_whitespace()))
}

fn collect_weekdays<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<Weekday> {
    let mut out: Vec<Weekday> = Vec::new();
    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Ok(day) = token.parse::<Weekday>() {
            if !out.contains(&day) {
                out.push(day);
            }
        }
    }
    out
}

fn de_weekdays<'de, D>(deserializer: D) -> Result<Vec<Weekday>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Days {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Days::deserialize(deserializer)? {
        Days::List(items) => collect_weekdays(items.iter().map(String::as_str)),
        Days::Text(text) => parse_weekdays(&text),
    })
}

fn de_importance<'de, D>(deserializer: D) -> Result<Option<Importance>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    match raw.parse::<Importance>() {
        Ok(i) => Ok(Some(i)),
        Err(e) => {
            warn!(importance = %raw, "{e}; treating as unknown");
            Ok(None)
        }
    }
}

fn de_weight<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Weight {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Weight>::deserialize(deserializer)? {
        Some(Weight::Number(w)) => Some(w),
        Some(Weight::Text(t)) => parse_weight(&t),
        None => None,
    })
}
