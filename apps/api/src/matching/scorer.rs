//! Match scoring: one text-generation call per (student, opportunity) pair.
//!
//! The score is read back out of the free-form analysis with `extract_score`.
//! `MatchScorer` never retries on its own; the production `LlmClient` already
//! retries rate limits and server errors at the transport level.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::chairs::models::{ThesisOpportunity, NOT_SPECIFIED};
use crate::llm_client::{LlmError, TextGenerator};
use crate::matching::prompts::{MATCH_ANALYSIS_PROMPT_TEMPLATE, MATCH_ANALYSIS_SYSTEM};
use crate::student::models::StudentProfile;

// ────────────────────────────────────────────────────────────────────────────
// Data model
// ────────────────────────────────────────────────────────────────────────────

/// One student/opportunity pairing with its analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub opportunity: ThesisOpportunity,
    pub analysis: String,
    pub score: u64,
    /// `None` until the ranker places the match.
    pub rank: Option<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Score extraction
// ────────────────────────────────────────────────────────────────────────────

/// Reads the score from an analysis: every ASCII digit on the first line that
/// contains "Score", concatenated in order.
///
/// `"1. Match Score (0-100): 85"` yields `1010085`. No such line, no digits,
/// or an overflowing number all yield 0.
pub fn extract_score(analysis: &str) -> u64 {
    let Some(line) = analysis.lines().find(|line| line.contains("Score")) else {
        return 0;
    };
    let digits: String = line.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MatchScorer {
    llm: Arc<dyn TextGenerator>,
}

impl MatchScorer {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    pub async fn score(
        &self,
        student: &StudentProfile,
        opportunity: &ThesisOpportunity,
    ) -> Result<Match, LlmError> {
        let prompt = build_analysis_prompt(student, opportunity);
        let analysis = self.llm.generate(&prompt, MATCH_ANALYSIS_SYSTEM).await?;
        let score = extract_score(&analysis);
        debug!(
            "Scored '{}' at {} ({})",
            opportunity.display_title(),
            score,
            opportunity.chair_name
        );

        Ok(Match {
            opportunity: opportunity.clone(),
            analysis,
            score,
            rank: None,
        })
    }
}

pub fn build_analysis_prompt(student: &StudentProfile, opportunity: &ThesisOpportunity) -> String {
    let or_missing = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let research_fields = opportunity
        .research_fields
        .as_ref()
        .map(|fields| fields.join(", "))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let thesis_type = opportunity
        .type_label
        .clone()
        .unwrap_or_else(|| opportunity.thesis_type.label().to_string());

    MATCH_ANALYSIS_PROMPT_TEMPLATE
        .replace("{cv_summary}", &student.cv_summary)
        .replace("{transcript_summary}", &student.transcript_summary)
        .replace("{interests}", &student.interests.join(", "))
        .replace("{preferred_topics}", &student.preferred_topics.join(", "))
        .replace("{skills}", &student.skills.join(", "))
        .replace("{gpa}", &student.gpa.to_string())
        .replace("{key_areas}", &student.key_areas.join(", "))
        .replace("{title}", opportunity.display_title())
        .replace("{thesis_type}", &thesis_type)
        .replace("{chair_name}", &opportunity.chair_name)
        .replace("{description}", &or_missing(&opportunity.description))
        .replace("{research_fields}", &research_fields)
        .replace(
            "{technical_requirements}",
            &or_missing(&opportunity.technical_requirements),
        )
        .replace(
            "{academic_requirements}",
            &or_missing(&opportunity.academic_requirements),
        )
        .replace("{timeline}", &or_missing(&opportunity.timeline))
        .replace("{contact}", opportunity.display_contact())
}
