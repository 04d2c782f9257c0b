pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chairs::handlers as chairs;
use crate::matching::handlers as matching;
use crate::scraping::handlers as scraping;
use crate::state::AppState;
use crate::student::handlers as student;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chair documents
        .route("/api/v1/chairs/parse", post(chairs::handle_parse_chair))
        .route("/api/v1/chairs/scrape", post(scraping::handle_scrape_chair))
        // Student intake
        .route("/api/v1/intake", post(student::handle_start_intake))
        .route("/api/v1/intake/:id/uploads", post(student::handle_upload))
        .route("/api/v1/intake/:id/answers", post(student::handle_answer))
        // Matching
        .route("/api/v1/matching/run", post(matching::handle_run_matching))
        .route(
            "/api/v1/reports/:student_id/:file_name",
            get(matching::handle_get_report),
        )
        .with_state(state)
}
