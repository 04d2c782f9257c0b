use axum::{extract::State, Json};
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::errors::AppError;
use crate::scraping::build_scraping_agent;
use crate::scraping::collector::{collect_chair_document, CollectedChair};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ScrapeChairRequest {
    pub student_id: Uuid,
    pub chair_name: String,
    pub url: String,
}

/// POST /api/v1/chairs/scrape
pub async fn handle_scrape_chair(
    State(state): State<AppState>,
    Json(req): Json<ScrapeChairRequest>,
) -> Result<Json<CollectedChair>, AppError> {
    if req.chair_name.trim().is_empty() {
        return Err(AppError::Validation("chair_name must not be empty".into()));
    }
    let url = Url::parse(req.url.trim())
        .map_err(|e| AppError::Validation(format!("Invalid chair URL '{}': {e}", req.url)))?;

    let agent = build_scraping_agent(state.llm.clone(), state.config.agent_max_iterations);
    let student_thesis_dir = state
        .config
        .thesis_data_dir
        .join(req.student_id.to_string());

    let collected =
        collect_chair_document(&agent, &student_thesis_dir, &req.chair_name, url.as_str()).await?;
    Ok(Json(collected))
}
