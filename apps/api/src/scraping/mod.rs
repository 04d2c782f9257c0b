// Chair scraping: ReAct agent over two page tools.
// The agent's final answer is a chair document in the format chairs::parser reads.

pub mod agent;
pub mod collector;
pub mod handlers;
pub mod prompts;
pub mod tools;

use std::sync::Arc;

use crate::llm_client::TextGenerator;
use agent::ScrapingAgent;
use tools::{AgentTool, LinkExtractorTool, WebPageScraperTool};

/// Agent wired with the production page tools.
pub fn build_scraping_agent(llm: Arc<dyn TextGenerator>, max_iterations: usize) -> ScrapingAgent {
    let tools: Vec<Arc<dyn AgentTool>> = vec![
        Arc::new(WebPageScraperTool::new()),
        Arc::new(LinkExtractorTool::new()),
    ];
    ScrapingAgent::new(llm, tools, max_iterations)
}
