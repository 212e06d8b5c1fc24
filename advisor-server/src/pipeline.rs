//! Extract, decide, write: one advice request end to end.

use advisor_core::{
    parse_current_date, render_recommendation, today_in, CandidateRef, ConfidenceInput,
    DecisionInputs, Importance, PlanningSnapshot, PriorityBand, PriorityEngine, PriorityResult,
    Reasoning,
};
use advisor_ingest::{AutoExtractor, Document, Extractor};
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AdvisorError;
use crate::llm::{write_recommendation, LlmConfig};
use crate::sample::sample_request;

pub const DEFAULT_STUDENT_NAME: &str = "Student";
pub const SUCCESS_MESSAGE: &str = "Task analyzed successfully";

/// Turns a priority result into the text the student reads.
#[derive(Debug, Clone)]
pub enum RecommendationWriter {
    Template,
    Llm {
        client: reqwest::Client,
        config: LlmConfig,
    },
}

impl RecommendationWriter {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Ok(match LlmConfig::from_section(&cfg.llm)? {
            Some(config) => RecommendationWriter::Llm {
                client: reqwest::Client::new(),
                config,
            },
            None => RecommendationWriter::Template,
        })
    }

    /// Never fails: model errors fall back to the canned text.
    pub async fn render(&self, result: &PriorityResult, student_name: &str) -> String {
        match self {
            RecommendationWriter::Template => render_recommendation(result, student_name),
            RecommendationWriter::Llm { client, config } => {
                match write_recommendation(client, config, result, student_name).await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(error = %e, "llm writer failed; using template recommendation");
                        render_recommendation(result, student_name)
                    }
                }
            }
        }
    }
}

/// One advice request, already pulled off the wire.
#[derive(Debug, Clone, Default)]
pub struct AdviceRequest {
    pub student_name: Option<String>,
    /// ISO-8601 date; today in the configured timezone when absent.
    pub current_date: Option<String>,
    pub confidence: Option<ConfidenceInput>,
    pub module_coefficient: Option<f64>,
    pub document: Option<Document>,
    /// Planning data sent inline, merged after anything extracted.
    pub planning: PlanningSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResponse {
    pub success: bool,
    pub recommendation: String,
    pub priority: PriorityBand,
    pub confidence: f64,
    pub top_priority_task: Option<String>,
    pub urgency_score: f64,
    pub module_importance: Option<Importance>,
    pub reasoning: Reasoning,
    pub actionable_steps: Vec<String>,
    pub estimated_duration: String,
    pub overdue_tasks: Vec<CandidateRef>,
    pub extracted_data: PlanningSnapshot,
    pub message: String,
}

impl AdviceResponse {
    fn new(result: PriorityResult, recommendation: String, snapshot: PlanningSnapshot) -> Self {
        Self {
            success: true,
            recommendation,
            priority: result.band,
            confidence: result.confidence,
            top_priority_task: result.top_priority.map(|c| c.name),
            urgency_score: result.urgency_score,
            module_importance: result.module_importance,
            reasoning: result.reasoning,
            actionable_steps: result.actionable_steps,
            estimated_duration: result.estimated_duration,
            overdue_tasks: result.overdue,
            extracted_data: snapshot,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }
}

pub struct Advisor {
    extractor: Arc<dyn Extractor>,
    engine: PriorityEngine,
    writer: RecommendationWriter,
    timezone: String,
}

impl Advisor {
    pub fn new(
        extractor: Arc<dyn Extractor>,
        engine: PriorityEngine,
        writer: RecommendationWriter,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            engine,
            writer,
            timezone: timezone.into(),
        }
    }

    /// Build from `advisor.toml` settings; rejects an unknown timezone up front.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        today_in(&cfg.calendar.timezone, Utc::now())
            .with_context(|| format!("[calendar] timezone {}", cfg.calendar.timezone))?;
        let writer = RecommendationWriter::from_config(cfg)?;
        Ok(Self::new(
            Arc::new(AutoExtractor::new()),
            PriorityEngine::new(cfg.engine.clone()),
            writer,
            cfg.calendar.timezone.clone(),
        ))
    }

    pub async fn advise(&self, request: AdviceRequest) -> Result<AdviceResponse, AdvisorError> {
        let AdviceRequest {
            student_name,
            current_date,
            confidence,
            module_coefficient,
            document,
            planning,
        } = request;

        if document.is_none() && planning.is_empty() {
            return Err(AdvisorError::invalid(
                "No planning document or planning data provided",
            ));
        }

        let snapshot = match document {
            Some(doc) => self.extractor.extract(&doc)?.merge(planning),
            None => planning,
        };
        if snapshot.is_empty() {
            return Err(AdvisorError::invalid("No planning data found in the document"));
        }

        let today = self.resolve_today(current_date.as_deref())?;
        let inputs = DecisionInputs {
            confidence,
            module_coefficient,
        };
        let result = self.engine.decide_with(&snapshot, today, &inputs)?;

        let student = student_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STUDENT_NAME)
            .to_string();
        let recommendation = self.writer.render(&result, &student).await;

        info!(
            %today,
            items = snapshot.gradable_count(),
            band = %result.band,
            score = result.urgency_score,
            top = result.top_priority_name().unwrap_or("-"),
            overdue = result.overdue.len(),
            "advice ready"
        );

        Ok(AdviceResponse::new(result, recommendation, snapshot))
    }

    /// The fixed sample request behind `POST /test`.
    pub async fn sample(&self) -> Result<AdviceResponse, AdvisorError> {
        self.advise(sample_request()).await
    }

    fn resolve_today(&self, current_date: Option<&str>) -> Result<NaiveDate, AdvisorError> {
        match current_date.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Ok(parse_current_date(raw)?),
            None => today_in(&self.timezone, Utc::now())
                .map_err(|e| AdvisorError::Unexpected(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_snapshot;

    fn advisor() -> Advisor {
        Advisor::from_config(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_sample_decides_binary_tree() {
        let r = advisor().sample().await.unwrap();
        assert!(r.success);
        assert_eq!(r.top_priority_task.as_deref(), Some("Binary Tree Implementation"));
        assert_eq!(r.priority, PriorityBand::Medium);
        assert!((r.urgency_score - 0.4267).abs() < 1e-3);
        assert_eq!(r.confidence, 0.9);
        assert_eq!(r.module_importance, Some(Importance::High));
        assert_eq!(r.message, SUCCESS_MESSAGE);
        assert!(r.recommendation.starts_with("Ahmed, focus on Binary Tree Implementation"));
    }

    #[tokio::test]
    async fn test_nothing_to_decide_on_is_invalid() {
        let err = advisor().advise(AdviceRequest::default()).await.unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_bad_date_and_confidence_are_invalid() {
        let a = advisor();
        let bad_date = AdviceRequest {
            current_date: Some("20/12/2024".to_string()),
            planning: sample_snapshot(),
            ..Default::default()
        };
        assert!(a.advise(bad_date).await.unwrap_err().is_invalid_input());

        let bad_conf = AdviceRequest {
            current_date: Some("2024-12-20".to_string()),
            confidence: Some(ConfidenceInput::Label("certain".to_string())),
            planning: sample_snapshot(),
            ..Default::default()
        };
        assert!(a.advise(bad_conf).await.unwrap_err().is_invalid_input());
    }

    #[tokio::test]
    async fn test_document_is_extracted_and_merged() {
        let doc = Document::from_text("ASSIGNMENTS\nLab Report | 2024-12-20 | PHY-101 | 10%\n");
        let req = AdviceRequest {
            student_name: Some("  ".to_string()),
            current_date: Some("2024-12-20".to_string()),
            document: Some(doc),
            planning: sample_snapshot(),
            ..Default::default()
        };
        let r = advisor().advise(req).await.unwrap();
        assert_eq!(r.extracted_data.assignments.len(), 2);
        assert_eq!(r.extracted_data.assignments[0].name, "Lab Report");
        // Due today beats anything two days out.
        assert_eq!(r.top_priority_task.as_deref(), Some("Lab Report"));
        assert!(r.recommendation.starts_with("Student, "));
    }

    #[tokio::test]
    async fn test_document_without_planning_data_is_invalid() {
        let req = AdviceRequest {
            current_date: Some("2024-12-20".to_string()),
            document: Some(
                Document::from_text("Just some lecture notes with no sections")
                    .with_filename("notes.txt"),
            ),
            ..Default::default()
        };
        let err = advisor().advise(req).await.unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.to_string(), "No planning data found in the document");
    }

    #[tokio::test]
    async fn test_pdf_is_rejected() {
        let req = AdviceRequest {
            document: Some(Document::new(b"%PDF-1.7".to_vec()).with_filename("plan.pdf")),
            ..Default::default()
        };
        assert!(advisor().advise(req).await.unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_unknown_timezone_is_rejected() {
        let mut cfg = Config::default();
        cfg.calendar.timezone = "Mars/Olympus_Mons".to_string();
        assert!(Advisor::from_config(&cfg).is_err());
    }
}
