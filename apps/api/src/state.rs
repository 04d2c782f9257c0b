use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::student::intake::IntakeSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text-generation backend. `LlmClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
    /// Open intake conversations by student id.
    pub intake_sessions: Arc<Mutex<HashMap<Uuid, IntakeSession>>>,
}

impl AppState {
    pub fn new(llm: Arc<dyn TextGenerator>, config: Config) -> Self {
        Self {
            llm,
            config,
            intake_sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::path::Path;

    use super::*;

    /// State rooted in a scratch directory.
    pub fn state_in(root: &Path, llm: Arc<dyn TextGenerator>) -> AppState {
        AppState::new(
            llm,
            Config {
                anthropic_api_key: "test-key".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
                student_data_dir: root.join("student_data"),
                thesis_data_dir: root.join("thesis_data"),
                matching_results_dir: root.join("matching_results"),
                match_concurrency: 2,
                agent_max_iterations: 3,
            },
        )
    }
}
