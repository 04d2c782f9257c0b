use axum::Json;
use serde::{Deserialize, Serialize};

use crate::chairs::models::{ChairInfo, ThesisOpportunity};
use crate::chairs::parser::parse_chair_document;
use crate::errors::AppError;

#[derive(Deserialize)]
pub struct ParseChairRequest {
    pub document: String,
}

#[derive(Serialize)]
pub struct ParseChairResponse {
    pub chair: ChairInfo,
    pub opportunities: Vec<ThesisOpportunity>,
}

/// POST /api/v1/chairs/parse
pub async fn handle_parse_chair(
    Json(req): Json<ParseChairRequest>,
) -> Result<Json<ParseChairResponse>, AppError> {
    let (chair, opportunities) = parse_chair_document(&req.document)?;
    Ok(Json(ParseChairResponse {
        chair,
        opportunities,
    }))
}
