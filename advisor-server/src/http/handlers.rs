//! HTTP handlers. Each one parses the wire format and hands off to `Advisor`.

use advisor_ingest::Document;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};
use tracing::debug;

use super::dto::{HealthResponse, RunRequest};
use super::error::AppError;
use super::state::AppState;
use crate::pipeline::{AdviceRequest, AdviceResponse};

pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Daily Student Priority Advisor API is running".to_string(),
    })
}

/// POST /run
///
/// Accepts `multipart/form-data` (a `file` part and an `other_data` JSON part)
/// or a plain JSON body.
pub async fn run_advisor(State(state): State<AppState>, request: Request) -> HandlerResult<AdviceResponse> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"));

    let advice = if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        read_multipart(multipart).await?
    } else {
        let Json(body) = Json::<RunRequest>::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        body.into_advice_request()
    };

    let response = state.advisor.advise(advice).await?;
    Ok(Json(response))
}

/// POST /test
pub async fn run_sample(State(state): State<AppState>) -> HandlerResult<AdviceResponse> {
    let response = state.advisor.sample().await?;
    Ok(Json(response))
}

async fn read_multipart(mut multipart: Multipart) -> Result<AdviceRequest, AppError> {
    let mut document: Option<Document> = None;
    let mut other_data: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;

                let mut doc = Document::new(bytes.to_vec());
                if let Some(f) = filename.filter(|f| !f.is_empty()) {
                    doc = doc.with_filename(f);
                }
                if let Some(ct) = content_type {
                    doc = doc.with_content_type(ct);
                }
                debug!(filename = ?doc.filename, size = doc.bytes.len(), "received planning document");
                document = Some(doc);
            }
            "other_data" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                other_data = Some(text);
            }
            other => debug!(field = other, "ignoring unknown form field"),
        }
    }

    let fields = match other_data.filter(|s| !s.trim().is_empty()) {
        Some(text) => serde_json::from_str::<RunRequest>(&text)
            .map_err(|_| AppError::BadRequest("Invalid JSON in other_data field".to_string()))?,
        None => RunRequest::default(),
    };

    let mut advice = fields.into_advice_request();
    if let Some(doc) = document.filter(|d| !d.is_empty()) {
        advice.document = Some(doc);
    }
    Ok(advice)
}
