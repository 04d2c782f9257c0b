use std::io::ErrorKind;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::pipeline::{MatchingOutcome, MatchingPipeline};
use crate::matching::report::{read_report, ReportView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RunMatchingRequest {
    pub student_id: Uuid,
}

/// POST /api/v1/matching/run
pub async fn handle_run_matching(
    State(state): State<AppState>,
    Json(req): Json<RunMatchingRequest>,
) -> Result<Json<MatchingOutcome>, AppError> {
    let student_id = req.student_id.to_string();
    let pipeline = MatchingPipeline::new(state.llm.clone(), state.config.match_concurrency);
    let outcome = pipeline
        .run_matching(
            &state.config.student_data_dir.join(&student_id),
            &state.config.thesis_data_dir.join(&student_id),
            &state.config.matching_results_dir.join(&student_id),
        )
        .await?;
    Ok(Json(outcome))
}

/// GET /api/v1/reports/:student_id/:file_name
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path((student_id, file_name)): Path<(Uuid, String)>,
) -> Result<Json<ReportView>, AppError> {
    if file_name.contains(['/', '\\']) || file_name.contains("..") {
        return Err(AppError::Validation(format!(
            "Invalid report file name '{file_name}'"
        )));
    }

    let path = state
        .config
        .matching_results_dir
        .join(student_id.to_string())
        .join(&file_name);
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("Report {file_name} not found")))
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(read_report(&text)?))
}
