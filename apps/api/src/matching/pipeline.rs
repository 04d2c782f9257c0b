use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::chairs::loader::{load_thesis_catalog, SkippedDocument};
use crate::chairs::models::ThesisOpportunity;
use crate::llm_client::TextGenerator;
use crate::matching::error::MatchingError;
use crate::matching::ranker::rank_matches;
use crate::matching::report::generate_report;
use crate::matching::scorer::{Match, MatchScorer};
use crate::student::loader::load_student_profile;

pub const DEFAULT_MATCH_CONCURRENCY: usize = 4;
const REPORT_FILE_FORMAT: &str = "matching_report_%Y%m%d_%H%M%S.txt";

/// Ranked match as returned to API callers. The analysis text lives in the report.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub rank: usize,
    pub title: String,
    pub chair_name: String,
    pub url: Option<String>,
    pub score: u64,
}

/// An opportunity the collaborator could not score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringFailure {
    pub title: String,
    pub chair_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchingOutcome {
    pub report_path: PathBuf,
    pub matches: Vec<MatchSummary>,
    pub skipped_documents: Vec<SkippedDocument>,
    pub scoring_failures: Vec<ScoringFailure>,
}

/// Load, score, rank, report, persist.
pub struct MatchingPipeline {
    scorer: MatchScorer,
    concurrency: usize,
}

impl MatchingPipeline {
    pub fn new(llm: Arc<dyn TextGenerator>, concurrency: usize) -> Self {
        Self {
            scorer: MatchScorer::new(llm),
            concurrency: concurrency.max(1),
        }
    }

    /// Runs one matching pass for the student in `student_dir` against every
    /// chair document in `thesis_dir`, writing the report into `output_dir`.
    /// Callers give each student its own `output_dir`; report names only
    /// carry the generation time.
    ///
    /// Missing or invalid student input aborts the run. Malformed chair
    /// documents and failed scoring calls are skipped and listed in the outcome.
    pub async fn run_matching(
        &self,
        student_dir: &Path,
        thesis_dir: &Path,
        output_dir: &Path,
    ) -> Result<MatchingOutcome, MatchingError> {
        let student = load_student_profile(student_dir).await?;

        if !tokio::fs::try_exists(thesis_dir).await? {
            return Err(MatchingError::MissingInputData(format!(
                "thesis directory {}",
                thesis_dir.display()
            )));
        }
        let catalog = load_thesis_catalog(thesis_dir).await?;
        info!(
            "Analyzing {} thesis opportunities from {} chairs ({} documents skipped)",
            catalog.opportunities.len(),
            catalog.chairs.len(),
            catalog.skipped.len()
        );

        let student = Arc::new(student);
        let scored: Vec<(ThesisOpportunity, _)> =
            stream::iter(catalog.opportunities.iter().cloned())
                .map(|opportunity| {
                    let scorer = self.scorer.clone();
                    let student = Arc::clone(&student);
                    async move {
                        let result = scorer.score(&student, &opportunity).await;
                        (opportunity, result)
                    }
                })
                .buffered(self.concurrency)
                .collect()
                .await;

        let mut matches: Vec<Match> = Vec::with_capacity(scored.len());
        let mut scoring_failures = Vec::new();
        for (opportunity, result) in scored {
            match result {
                Ok(matched) => matches.push(matched),
                Err(e) => {
                    warn!(
                        "Failed to score '{}' ({}): {e}",
                        opportunity.display_title(),
                        opportunity.chair_name
                    );
                    scoring_failures.push(ScoringFailure {
                        title: opportunity.display_title().to_string(),
                        chair_name: opportunity.chair_name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let ranked = rank_matches(matches);
        let generated_at = chrono::Local::now().naive_local();
        let report = generate_report(&student, &ranked, generated_at);

        tokio::fs::create_dir_all(output_dir).await?;
        let report_path = output_dir.join(generated_at.format(REPORT_FILE_FORMAT).to_string());
        tokio::fs::write(&report_path, report).await?;
        info!(
            "Matching completed: {} matches, report saved to {}",
            ranked.len(),
            report_path.display()
        );

        let matches = ranked
            .into_iter()
            .map(|m| MatchSummary {
                rank: m.rank.unwrap_or_default(),
                title: m.opportunity.display_title().to_string(),
                chair_name: m.opportunity.chair_name,
                url: m.opportunity.url,
                score: m.score,
            })
            .collect();

        Ok(MatchingOutcome {
            report_path,
            matches,
            skipped_documents: catalog.skipped,
            scoring_failures,
        })
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use crate::llm_client::{LlmError, TextGenerator};

    /// Replies according to the opportunity title found in the prompt, so
    /// results do not depend on call order.
    pub struct TitleKeyedGenerator {
        pub scores: HashMap<&'static str, Option<u64>>,
    }

    impl TitleKeyedGenerator {
        pub fn new(scores: &[(&'static str, Option<u64>)]) -> Self {
            Self {
                scores: scores.iter().copied().collect(),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for TitleKeyedGenerator {
        async fn generate(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            let title = prompt
                .lines()
                .find_map(|line| line.trim().strip_prefix("Title: "))
                .unwrap_or_default();
            match self.scores.get(title) {
                Some(Some(score)) => Ok(format!(
                    "Match Score: {score}\n2. Key Strengths:\n- fits {title}"
                )),
                _ => Err(LlmError::Api {
                    status: 500,
                    message: format!("no reply for {title}"),
                }),
            }
        }
    }
}
