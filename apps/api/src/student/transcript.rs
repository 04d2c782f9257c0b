use serde::Deserialize;
use tracing::warn;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{generate_json, LlmError, TextGenerator};
use crate::student::models::{Course, Gpa};
use crate::student::prompts::{
    CV_SUMMARY_PROMPT_TEMPLATE, CV_SUMMARY_SYSTEM, TRANSCRIPT_ANALYSIS_PROMPT_TEMPLATE,
};

/// Structured view of a transcript as extracted by the LLM.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TranscriptAnalysis {
    pub courses: Vec<Course>,
    pub gpa: Gpa,
    pub key_areas: Vec<String>,
    pub honors: Vec<String>,
}

/// Extracts courses, GPA, key areas and honors from raw transcript text.
/// A reply that is not valid JSON yields an empty analysis.
pub async fn analyze_transcript(
    llm: &dyn TextGenerator,
    transcript_text: &str,
) -> Result<TranscriptAnalysis, LlmError> {
    let prompt = TRANSCRIPT_ANALYSIS_PROMPT_TEMPLATE.replace("{transcript_text}", transcript_text);
    match generate_json::<TranscriptAnalysis>(llm, &prompt, JSON_ONLY_SYSTEM).await {
        Ok(analysis) => Ok(analysis),
        Err(LlmError::Parse(e)) => {
            warn!("Transcript analysis was not valid JSON, continuing without it: {e}");
            Ok(TranscriptAnalysis::default())
        }
        Err(e) => Err(e),
    }
}

/// Renders an analysis as the transcript summary the student loader reads back.
/// Empty sections are omitted.
pub fn format_transcript_summary(analysis: &TranscriptAnalysis) -> String {
    let mut summary = String::from("Transcript Analysis:\n\n");

    if !analysis.courses.is_empty() {
        summary.push_str("Courses and Grades:\n");
        for course in &analysis.courses {
            summary.push_str(&format!("- {}: {}\n", course.name, course.grade));
        }
        summary.push('\n');
    }

    if let Gpa::Value(_) = analysis.gpa {
        summary.push_str(&format!("Overall GPA: {}\n\n", analysis.gpa));
    }

    push_bullets(&mut summary, "Key Areas of Study:", &analysis.key_areas);
    push_bullets(&mut summary, "Honors and Distinctions:", &analysis.honors);

    summary
}

fn push_bullets(summary: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    summary.push_str(heading);
    summary.push('\n');
    for item in items {
        summary.push_str(&format!("- {item}\n"));
    }
    summary.push('\n');
}

/// Summarizes raw CV text into education, skills and experience.
pub async fn summarize_cv(llm: &dyn TextGenerator, cv_text: &str) -> Result<String, LlmError> {
    let prompt = CV_SUMMARY_PROMPT_TEMPLATE.replace("{cv_text}", cv_text);
    let summary = llm.generate(&prompt, CV_SUMMARY_SYSTEM).await?;
    Ok(summary.trim().to_string())
}

/// Normalizes text extracted from a document: one paragraph per sentence.
pub fn clean_letter_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(". ", ".\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::student::loader::extract_key_areas;

    const ANALYSIS_JSON: &str = r#"```json
{"courses": [{"name": "Robotics", "grade": "1.3"}, {"name": "Databases", "grade": 2.0}],
 "gpa": "1.6", "key_areas": ["Robotics", "Data Systems"], "honors": ["Dean's list"]}
```"#;

    #[tokio::test]
    async fn test_analyze_transcript_parses_fenced_json() {
        let llm = ScriptedGenerator::replying(&[ANALYSIS_JSON]);
        let analysis = analyze_transcript(&llm, "raw transcript").await.unwrap();

        assert_eq!(analysis.courses.len(), 2);
        assert_eq!(analysis.courses[1].grade, "2.0");
        assert_eq!(analysis.gpa, Gpa::Value(1.6));
        assert_eq!(analysis.honors, vec!["Dean's list"]);
        assert!(llm.prompts.lock().unwrap()[0].contains("raw transcript"));
    }

    #[tokio::test]
    async fn test_analyze_transcript_falls_back_on_bad_json() {
        let llm = ScriptedGenerator::replying(&["I could not read that transcript."]);
        let analysis = analyze_transcript(&llm, "???").await.unwrap();
        assert_eq!(analysis, TranscriptAnalysis::default());
    }

    #[tokio::test]
    async fn test_analyze_transcript_propagates_transport_errors() {
        let llm = ScriptedGenerator::new(vec![Err(LlmError::RateLimited { retries: 3 })]);
        let result = analyze_transcript(&llm, "text").await;
        assert!(matches!(result, Err(LlmError::RateLimited { .. })));
    }

    #[test]
    fn test_summary_round_trips_key_areas() {
        let analysis = TranscriptAnalysis {
            courses: vec![Course {
                name: "Robotics".into(),
                grade: "1.3".into(),
            }],
            gpa: Gpa::Value(1.5),
            key_areas: vec!["Robotics".into(), "Control".into()],
            honors: vec!["Best thesis award".into()],
        };
        let summary = format_transcript_summary(&analysis);

        assert!(summary.contains("- Robotics: 1.3\n"));
        assert!(summary.contains("Overall GPA: 1.5\n"));
        assert_eq!(extract_key_areas(&summary), vec!["Robotics", "Control"]);
    }

    #[test]
    fn test_summary_omits_empty_sections() {
        let summary = format_transcript_summary(&TranscriptAnalysis::default());
        assert_eq!(summary, "Transcript Analysis:\n\n");
    }

    #[tokio::test]
    async fn test_summarize_cv_trims_reply() {
        let llm = ScriptedGenerator::replying(&["\n  Robotics MSc, ROS, Python.  \n"]);
        assert_eq!(
            summarize_cv(&llm, "cv").await.unwrap(),
            "Robotics MSc, ROS, Python."
        );
    }

    #[test]
    fn test_clean_letter_text_breaks_sentences() {
        assert_eq!(
            clean_letter_text("Dear chair,\n  I am\nmotivated. I like robots."),
            "Dear chair, I am motivated.\n\nI like robots."
        );
    }
}
