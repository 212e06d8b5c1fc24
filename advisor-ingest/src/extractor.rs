//! Extraction: turn a planning document into a `PlanningSnapshot`.

use advisor_core::PlanningSnapshot;
use thiserror::Error;

use crate::document::{Document, DocumentKind};
use crate::parsers::syllabus_text::SyllabusTextExtractor;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document type: {0}")]
    Unsupported(String),

    #[error("invalid planning JSON: {0}")]
    InvalidJson(String),

    #[error("document is not valid UTF-8 text")]
    Encoding,

    #[error("document is empty")]
    Empty,
}

/// The extraction collaborator.
pub trait Extractor: Send + Sync {
    fn extract(&self, document: &Document) -> Result<PlanningSnapshot, ExtractError>;
}

/// The document already is a snapshot, optionally wrapped in `extractedData`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExtractor;

impl Extractor for JsonExtractor {
    fn extract(&self, document: &Document) -> Result<PlanningSnapshot, ExtractError> {
        if document.is_empty() {
            return Err(ExtractError::Empty);
        }

        let mut value: serde_json::Value = serde_json::from_slice(&document.bytes)
            .map_err(|e| ExtractError::InvalidJson(e.to_string()))?;

        if let Some(inner) = value.get_mut("extractedData") {
            value = inner.take();
        }

        serde_json::from_value(value).map_err(|e| ExtractError::InvalidJson(e.to_string()))
    }
}

/// Picks an extractor by document kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoExtractor {
    json: JsonExtractor,
    text: SyllabusTextExtractor,
}

impl AutoExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Extractor for AutoExtractor {
    fn extract(&self, document: &Document) -> Result<PlanningSnapshot, ExtractError> {
        match document.kind() {
            DocumentKind::Json => self.json.extract(document),
            DocumentKind::Text => self.text.extract(document),
            DocumentKind::Pdf => Err(ExtractError::Unsupported(
                "PDF; upload the extracted text or planning JSON instead".to_string(),
            )),
            DocumentKind::Unknown => Err(ExtractError::Unsupported("binary content".to_string())),
        }
    }
}
