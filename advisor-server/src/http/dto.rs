//! Wire shapes that are not the advice response itself.

use advisor_core::{ConfidenceInput, PlanningSnapshot};
use advisor_ingest::Document;
use serde::{Deserialize, Serialize};

use crate::pipeline::AdviceRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// `{ "success": false, "error": "..." }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

/// JSON body of `POST /run`, and the `other_data` part of the multipart form.
///
/// Unknown keys are ignored so older clients sending extra fields keep working.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub current_date: Option<String>,
    #[serde(default)]
    pub confidence: Option<ConfidenceInput>,
    /// Older clients' name for `confidence`; wins when both are sent.
    #[serde(default)]
    pub confidence_level: Option<ConfidenceInput>,
    #[serde(default)]
    pub module_coefficient: Option<f64>,
    /// Inline planning document text (syllabus text or planning JSON).
    #[serde(default)]
    pub document: Option<String>,
    #[serde(flatten)]
    pub planning: PlanningSnapshot,
}

impl RunRequest {
    pub fn into_advice_request(self) -> AdviceRequest {
        AdviceRequest {
            student_name: self.student_name,
            current_date: self.current_date,
            confidence: self.confidence_level.or(self.confidence),
            module_coefficient: self.module_coefficient,
            document: self
                .document
                .map(Document::from_text)
                .filter(|d| !d.is_empty()),
            planning: self.planning,
        }
    }
}
