use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::matching::pipeline::DEFAULT_MATCH_CONCURRENCY;
use crate::scraping::agent::DEFAULT_MAX_ITERATIONS;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// One subdirectory per student, named by student id.
    pub student_data_dir: PathBuf,
    /// One subdirectory of chair documents per student.
    pub thesis_data_dir: PathBuf,
    pub matching_results_dir: PathBuf,
    pub match_concurrency: usize,
    pub agent_max_iterations: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            student_data_dir: env_path("STUDENT_DATA_DIR", "student_data"),
            thesis_data_dir: env_path("THESIS_DATA_DIR", "thesis_data"),
            matching_results_dir: env_path("MATCHING_RESULTS_DIR", "matching_results"),
            match_concurrency: env_usize("MATCH_CONCURRENCY", DEFAULT_MATCH_CONCURRENCY)?.max(1),
            agent_max_iterations: env_usize("AGENT_MAX_ITERATIONS", DEFAULT_MAX_ITERATIONS)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn env_usize(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .with_context(|| format!("{key} must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}
