//! Sectioned syllabus text parser.
//!
//! Expected extracted-text layout (headings case-insensitive, optional colon,
//! rows pipe-delimited, optional leading bullet):
//!
//! ```text
//! MODULES
//!   CS-301 | Data Structures | high | 4
//! ASSIGNMENTS
//!   Binary Tree Implementation | 2024-12-22 | CS-301 | 20% | Implement binary tree operations
//! EXAMS
//!   Data Structures Midterm | 2024-12-23 | 9:00 AM | CS-301 | Hall A | 30%
//! CLASSES
//!   Data Structures | 10:00 AM | Mon, Wed, Fri | Room 301 | Dr. Smith
//! COMMITMENTS
//!   Study Group | Every Tuesday 6 PM | weekly | Academic
//! ```
//!
//! Lines without a pipe are ignored, so prose between tables is harmless.

use advisor_core::{
    parse_weekdays, parse_weight, Assignment, Class, Commitment, Exam, Importance, Module,
    PlanningSnapshot, Recurrence,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::document::Document;
use crate::extractor::{ExtractError, Extractor};

static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*#*\s*(?P<section>modules|assignments|exams|classes|commitments)\s*:?\s*$")
        .expect("section regex")
});

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").expect("bullet regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Modules,
    Assignments,
    Exams,
    Classes,
    Commitments,
}

impl Section {
    fn from_heading(heading: &str) -> Option<Self> {
        match heading.to_lowercase().as_str() {
            "modules" => Some(Section::Modules),
            "assignments" => Some(Section::Assignments),
            "exams" => Some(Section::Exams),
            "classes" => Some(Section::Classes),
            "commitments" => Some(Section::Commitments),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SyllabusTextExtractor;

impl Extractor for SyllabusTextExtractor {
    fn extract(&self, document: &Document) -> Result<PlanningSnapshot, ExtractError> {
        if document.is_empty() {
            return Err(ExtractError::Empty);
        }
        let text = std::str::from_utf8(&document.bytes).map_err(|_| ExtractError::Encoding)?;
        Ok(parse_syllabus_text(text))
    }
}

/// Parse sectioned syllabus text. Malformed rows are skipped.
pub fn parse_syllabus_text(text: &str) -> PlanningSnapshot {
    let mut snap = PlanningSnapshot::default();
    let mut section: Option<Section> = None;

    for (lineno, line) in text.lines().enumerate() {
        if let Some(caps) = SECTION_RE.captures(line) {
            section = Section::from_heading(&caps["section"]);
            continue;
        }

        let Some(current) = section else { continue };
        if !line.contains('|') {
            continue;
        }

        let row = BULLET_RE.replace(line, "");
        let fields: Vec<&str> = row.split('|').map(str::trim).collect();

        let parsed = match current {
            Section::Modules => parse_module(&fields).map(|m| snap.modules.push(m)),
            Section::Assignments => parse_assignment(&fields).map(|a| snap.assignments.push(a)),
            Section::Exams => parse_exam(&fields).map(|e| snap.exams.push(e)),
            Section::Classes => parse_class(&fields).map(|c| snap.classes.push(c)),
            Section::Commitments => parse_commitment(&fields).map(|c| snap.commitments.push(c)),
        };

        if parsed.is_none() {
            debug!(line = lineno + 1, section = ?current, "skipping malformed syllabus row");
        }
    }

    snap
}

fn field<'a>(fields: &[&'a str], i: usize) -> &'a str {
    fields.get(i).copied().unwrap_or("")
}

fn required<'a>(fields: &[&'a str], i: usize) -> Option<&'a str> {
    Some(field(fields, i)).filter(|s| !s.is_empty())
}

fn parse_module(fields: &[&str]) -> Option<Module> {
    let code = required(fields, 0)?;
    let importance = match field(fields, 2) {
        "" => None,
        raw => raw.parse::<Importance>().ok(),
    };
    Some(Module {
        code: code.to_string(),
        name: field(fields, 1).to_string(),
        importance,
        credits: field(fields, 3).parse().unwrap_or(0),
    })
}

fn parse_assignment(fields: &[&str]) -> Option<Assignment> {
    Some(Assignment {
        name: required(fields, 0)?.to_string(),
        deadline: required(fields, 1)?.to_string(),
        module: field(fields, 2).to_string(),
        weight: parse_weight(field(fields, 3)),
        description: field(fields, 4).to_string(),
    })
}

fn parse_exam(fields: &[&str]) -> Option<Exam> {
    Some(Exam {
        name: required(fields, 0)?.to_string(),
        date: required(fields, 1)?.to_string(),
        time: field(fields, 2).to_string(),
        module: field(fields, 3).to_string(),
        location: field(fields, 4).to_string(),
        weight: parse_weight(field(fields, 5)),
    })
}

fn parse_class(fields: &[&str]) -> Option<Class> {
    Some(Class {
        name: required(fields, 0)?.to_string(),
        time: field(fields, 1).to_string(),
        days: parse_weekdays(field(fields, 2)),
        location: field(fields, 3).to_string(),
        instructor: field(fields, 4).to_string(),
    })
}

fn parse_commitment(fields: &[&str]) -> Option<Commitment> {
    Some(Commitment {
        name: required(fields, 0)?.to_string(),
        time: field(fields, 1).to_string(),
        recurrence: Recurrence::from(field(fields, 2).to_string()),
        category: field(fields, 3).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_parse_syllabus_basic() {
        let text = r#"
Fall semester plan for CS students.

MODULES
  CS-301 | Data Structures | High | 4
ASSIGNMENTS:
  - Binary Tree Implementation | 2024-12-22 | CS-301 | 20% | Implement binary tree operations
EXAMS
  Data Structures Midterm | 2024-12-23 | 9:00 AM | CS-301 | Hall A | 30
## Classes
  Data Structures | 10:00 AM | Mon, Wed, Fri | Room 301 | Dr. Smith
COMMITMENTS
  1. Study Group | Every Tuesday 6 PM | weekly | Academic
"#;

        let snap = parse_syllabus_text(text);
        assert_eq!(snap.modules.len(), 1);
        assert_eq!(snap.modules[0].importance, Some(Importance::High));
        assert_eq!(snap.modules[0].credits, 4);

        assert_eq!(snap.assignments.len(), 1);
        assert_eq!(snap.assignments[0].name, "Binary Tree Implementation");
        assert_eq!(snap.assignments[0].weight, Some(20.0));

        assert_eq!(snap.exams[0].weight, Some(30.0));
        assert_eq!(snap.exams[0].location, "Hall A");

        assert_eq!(snap.classes[0].days, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);
        assert_eq!(snap.commitments[0].name, "Study Group");
        assert_eq!(snap.commitments[0].recurrence, Recurrence::Weekly);
    }

    #[test]
    fn test_rows_before_any_section_are_ignored() {
        let snap = parse_syllabus_text("Essay | 2024-12-22 | EN-101\n");
        assert!(snap.is_empty());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let text = "ASSIGNMENTS\n | 2024-12-22 | CS-301\nEssay |  | EN-101\nLab | 2024-12-24\n";
        let snap = parse_syllabus_text(text);
        assert_eq!(snap.assignments.len(), 1);
        assert_eq!(snap.assignments[0].name, "Lab");
        assert_eq!(snap.assignments[0].weight, None);
    }

    #[test]
    fn test_unknown_importance_becomes_unknown() {
        let snap = parse_syllabus_text("MODULES\nHIST-9 | History | critical | three\n");
        assert_eq!(snap.modules[0].importance, None);
        assert_eq!(snap.modules[0].credits, 0);
    }
}
