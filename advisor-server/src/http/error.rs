use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::dto::ErrorBody;
use crate::error::AdvisorError;

/// Shown to clients for any unexpected failure; details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Server error: internal failure";

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        };

        let body = ErrorBody {
            success: false,
            error: message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<AdvisorError> for AppError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::InvalidInput(msg) => AppError::BadRequest(msg),
            AdvisorError::Unexpected(e) => {
                error!(error = ?e, "advice request failed");
                AppError::Internal
            }
        }
    }
}
