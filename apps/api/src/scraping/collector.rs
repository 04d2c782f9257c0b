use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::chairs::parser::parse_chair_document;
use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::scraping::agent::{AgentError, ScrapingAgent};
use crate::scraping::prompts::CHAIR_GOAL_TEMPLATE;

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("Failed to write chair document: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct CollectedChair {
    pub file: PathBuf,
    /// `None` when the agent's answer does not satisfy the chair document format.
    pub opportunities_found: Option<usize>,
}

/// Builds the agent goal for one chair page.
pub fn chair_goal(url: &str) -> String {
    CHAIR_GOAL_TEMPLATE
        .replace("{url}", url)
        .replace("{plain_text_instruction}", PLAIN_TEXT_INSTRUCTION)
}

/// File name used for a chair's scraped document, e.g. `opp_chair_of_robotics.txt`.
pub fn chair_file_name(chair_name: &str) -> String {
    let slug: String = chair_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("opp_{slug}.txt")
}

/// Runs the agent against one chair page and stores its answer as the chair's
/// document. A later scrape of the same chair replaces the earlier document.
pub async fn collect_chair_document(
    agent: &ScrapingAgent,
    student_thesis_dir: &Path,
    chair_name: &str,
    url: &str,
) -> Result<CollectedChair, CollectError> {
    info!("Scraping chair '{chair_name}' at {url}");
    let answer = agent.run(&chair_goal(url)).await?;

    tokio::fs::create_dir_all(student_thesis_dir).await?;
    let file = student_thesis_dir.join(chair_file_name(chair_name));
    tokio::fs::write(&file, &answer).await?;

    let opportunities_found = match parse_chair_document(&answer) {
        Ok((_, opportunities)) => Some(opportunities.len()),
        Err(e) => {
            warn!("Scraped document for '{chair_name}' will be skipped at matching time: {e}");
            None
        }
    };

    Ok(CollectedChair {
        file,
        opportunities_found,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::chairs::loader::load_thesis_catalog;
    use crate::llm_client::testing::ScriptedGenerator;

    #[test]
    fn test_chair_file_name_slug() {
        assert_eq!(
            chair_file_name("Chair of Robotics"),
            "opp_chair_of_robotics.txt"
        );
        assert_eq!(chair_file_name("AI/ML Lab"), "opp_ai_ml_lab.txt");
    }

    #[test]
    fn test_chair_goal_embeds_url_and_format() {
        let goal = chair_goal("https://robotics.example.edu");
        assert!(goal.contains("https://robotics.example.edu"));
        assert!(goal.contains("THESIS OPPORTUNITIES:"));
        assert!(goal.contains("**Opportunity**"));
        assert!(!goal.contains("{plain_text_instruction}"));
    }

    #[tokio::test]
    async fn test_collect_writes_answer_and_counts_opportunities() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::replying(&[
            "Final Answer: - Chair/Department Name: Robotics\nTHESIS OPPORTUNITIES:\n**Opportunity**\n- Title: Grasping\n**Opportunity**\n- Title: SLAM",
        ]));
        let agent = ScrapingAgent::new(llm, vec![], 3);

        let collected = collect_chair_document(&agent, dir.path(), "Chair of Robotics", "https://r.example")
            .await
            .unwrap();

        assert_eq!(collected.opportunities_found, Some(2));
        assert_eq!(collected.file, dir.path().join("opp_chair_of_robotics.txt"));
        let written = std::fs::read_to_string(&collected.file).unwrap();
        assert!(written.starts_with("- Chair/Department Name: Robotics"));
    }

    #[tokio::test]
    async fn test_rescraping_a_chair_replaces_its_document() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::replying(&[
            "Final Answer: - Chair/Department Name: Robotics\nTHESIS OPPORTUNITIES:\n**Opportunity**\n- Title: Grasping",
            "Final Answer: - Chair/Department Name: Robotics\nTHESIS OPPORTUNITIES:\n**Opportunity**\n- Title: SLAM\n**Opportunity**\n- Title: Mapping",
        ]));
        let agent = ScrapingAgent::new(llm, vec![], 3);

        let first = collect_chair_document(&agent, dir.path(), "Chair of Robotics", "https://r.example")
            .await
            .unwrap();
        assert_eq!(first.opportunities_found, Some(1));

        let second = collect_chair_document(&agent, dir.path(), "Chair of Robotics", "https://r.example")
            .await
            .unwrap();
        assert_eq!(second.file, first.file);
        assert_eq!(second.opportunities_found, Some(2));

        let catalog = load_thesis_catalog(dir.path()).await.unwrap();
        assert!(catalog.skipped.is_empty());
        let titles: Vec<_> = catalog
            .opportunities
            .iter()
            .map(|o| o.title.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(titles, vec!["SLAM", "Mapping"]);
    }

    #[tokio::test]
    async fn test_collect_keeps_unparseable_answer() {
        let dir = tempfile::tempdir().unwrap();
        let llm = Arc::new(ScriptedGenerator::replying(&["Final Answer: no theses listed"]));
        let agent = ScrapingAgent::new(llm, vec![], 3);

        let collected = collect_chair_document(&agent, dir.path(), "Vision", "https://v.example")
            .await
            .unwrap();
        assert_eq!(collected.opportunities_found, None);
        assert!(collected.file.exists());
    }
}
