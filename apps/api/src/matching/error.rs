use thiserror::Error;

use crate::llm_client::LlmError;

/// Failures of a matching run.
///
/// Input errors abort the whole run. Collaborator failures are isolated per
/// opportunity by the pipeline and only surface from single-opportunity calls.
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("Missing input data: {0}")]
    MissingInputData(String),

    #[error("Invalid input data: {0}")]
    InvalidInputData(String),

    #[error("Text generation failed: {0}")]
    CollaboratorFailure(#[from] LlmError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
