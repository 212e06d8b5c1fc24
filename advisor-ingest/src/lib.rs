//! advisor-ingest: planning-document ingestion (JSON or extracted text) into a `PlanningSnapshot`.

pub mod document;
pub mod extractor;
pub mod parsers;

pub use document::{Document, DocumentKind};
pub use extractor::{AutoExtractor, ExtractError, Extractor, JsonExtractor};
pub use parsers::syllabus_text::{parse_syllabus_text, SyllabusTextExtractor};
