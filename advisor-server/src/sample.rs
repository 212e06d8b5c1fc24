//! Fixed planning data served by `POST /test`.

use advisor_core::{
    Assignment, Class, Commitment, ConfidenceInput, Exam, Importance, Module, PlanningSnapshot,
    Recurrence,
};
use chrono::Weekday;

use crate::pipeline::AdviceRequest;

pub const SAMPLE_STUDENT: &str = "Ahmed";
pub const SAMPLE_DATE: &str = "2024-12-20";

/// One Data Structures module with an assignment due in two days and a
/// midterm in three.
pub fn sample_snapshot() -> PlanningSnapshot {
    PlanningSnapshot {
        classes: vec![Class {
            name: "Data Structures".to_string(),
            time: "10:00 AM".to_string(),
            days: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
            location: "Room 301".to_string(),
            instructor: "Dr. Smith".to_string(),
        }],
        exams: vec![Exam {
            name: "Data Structures Midterm".to_string(),
            date: "2024-12-23".to_string(),
            time: "9:00 AM".to_string(),
            module: "CS-301".to_string(),
            location: "Hall A".to_string(),
            weight: Some(30.0),
        }],
        assignments: vec![Assignment {
            name: "Binary Tree Implementation".to_string(),
            deadline: "2024-12-22".to_string(),
            module: "CS-301".to_string(),
            weight: Some(20.0),
            description: "Implement binary tree operations".to_string(),
        }],
        commitments: vec![Commitment {
            name: "Study Group".to_string(),
            time: "Every Tuesday 6 PM".to_string(),
            recurrence: Recurrence::Weekly,
            category: "Academic".to_string(),
        }],
        modules: vec![Module {
            code: "CS-301".to_string(),
            name: "Data Structures".to_string(),
            importance: Some(Importance::High),
            credits: 4,
        }],
    }
}

pub fn sample_request() -> AdviceRequest {
    AdviceRequest {
        student_name: Some(SAMPLE_STUDENT.to_string()),
        current_date: Some(SAMPLE_DATE.to_string()),
        confidence: Some(ConfidenceInput::Label("high".to_string())),
        module_coefficient: Some(1.0),
        document: None,
        planning: sample_snapshot(),
    }
}
