use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::chairs::parser::ParseError;
use crate::llm_client::LlmError;
use crate::matching::error::MatchingError;
use crate::matching::report::ReportError;
use crate::scraping::agent::AgentError;
use crate::scraping::collector::CollectError;
use crate::student::intake::IntakeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(e.into())
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e.to_string())
    }
}

impl From<ParseError> for AppError {
    fn from(e: ParseError) -> Self {
        AppError::UnprocessableEntity(e.to_string())
    }
}

impl From<ReportError> for AppError {
    fn from(e: ReportError) -> Self {
        AppError::UnprocessableEntity(e.to_string())
    }
}

impl From<MatchingError> for AppError {
    fn from(e: MatchingError) -> Self {
        match e {
            MatchingError::MissingInputData(msg) => AppError::NotFound(msg),
            MatchingError::InvalidInputData(msg) => AppError::UnprocessableEntity(msg),
            MatchingError::CollaboratorFailure(e) => e.into(),
            MatchingError::Io(e) => e.into(),
        }
    }
}

impl From<AgentError> for AppError {
    fn from(e: AgentError) -> Self {
        match e {
            AgentError::Llm(e) => e.into(),
            AgentError::IterationLimit(_) => AppError::Llm(e.to_string()),
        }
    }
}

impl From<CollectError> for AppError {
    fn from(e: CollectError) -> Self {
        match e {
            CollectError::Agent(e) => e.into(),
            CollectError::Io(e) => e.into(),
        }
    }
}

impl From<IntakeError> for AppError {
    fn from(e: IntakeError) -> Self {
        match e {
            IntakeError::DocumentsRequired | IntakeError::AlreadyConfirmed => {
                AppError::Conflict(e.to_string())
            }
            IntakeError::Io(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_status() {
        let cases: Vec<(AppError, StatusCode)> = vec![
            (
                ParseError::MalformedDocument { found: 0 }.into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                MatchingError::MissingInputData("student_data.json".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                MatchingError::InvalidInputData("bad json".into()).into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                MatchingError::CollaboratorFailure(LlmError::EmptyContent).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (IntakeError::DocumentsRequired.into(), StatusCode::CONFLICT),
            (
                AgentError::IterationLimit(10).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_error_envelope_shape() {
        let response = AppError::NotFound("Report x.txt not found".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "Report x.txt not found");
    }
}
