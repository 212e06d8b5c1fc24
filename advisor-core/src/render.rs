//! Canned recommendation text, used whenever no LLM writer is configured.

use crate::result::PriorityResult;
use crate::steps::CandidateKind;

/// One encouraging paragraph telling the student what to focus on today.
///
/// Overdue work is mentioned before anything else.
pub fn render_recommendation(result: &PriorityResult, student_name: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let greeting = student_name.trim();

    if result.has_overdue() {
        let names: Vec<&str> = result.overdue.iter().map(|c| c.name.as_str()).collect();
        parts.push(format!(
            "You have overdue work ({}), so clear that first.",
            names.join(", ")
        ));
    }

    match &result.top_priority {
        Some(top) => {
            let when = match (top.kind, top.days_until) {
                (CandidateKind::Assignment, 0) => "it is due today".to_string(),
                (CandidateKind::Assignment, 1) => "it is due tomorrow".to_string(),
                (CandidateKind::Assignment, n) => format!("it is due in {n} days"),
                (CandidateKind::Exam, 0) => "the exam is today".to_string(),
                (CandidateKind::Exam, 1) => "the exam is tomorrow".to_string(),
                (CandidateKind::Exam, n) => format!("the exam is in {n} days"),
            };
            let subject = if top.module.trim().is_empty() {
                top.name.clone()
            } else {
                format!("{} ({})", top.name, top.module.trim())
            };
            let mut sentence = format!("Focus on {subject} today: {when}");
            if let Some(w) = top.weight {
                sentence.push_str(&format!(
                    " and it counts {}% toward your final grade",
                    trim_float(w)
                ));
            }
            sentence.push('.');
            parts.push(sentence);
        }
        None if result.has_overdue() => {
            parts.push("Nothing else is due soon, so use today to get back on track.".to_string());
        }
        None => {
            parts.push(
                "Nothing urgent is due, so use today to plan ahead and rest.".to_string(),
            );
        }
    }

    let body = parts.join(" ");
    if greeting.is_empty() {
        body
    } else {
        format!("{greeting}, {}", lowercase_first(&body))
    }
}

fn trim_float(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
