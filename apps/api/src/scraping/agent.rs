//! ReAct controller: lets the LLM pick tool calls in a loop until it produces
//! a final answer or the iteration budget runs out.
//!
//! Inherently best-effort and non-deterministic; tests drive it with a
//! scripted `TextGenerator` and stub tools.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::{LlmError, TextGenerator};
use crate::scraping::prompts::{REACT_PROMPT_TEMPLATE, REACT_SYSTEM};
use crate::scraping::tools::AgentTool;

pub const DEFAULT_MAX_ITERATIONS: usize = 10;
/// Observations longer than this are truncated before they enter the scratchpad.
const MAX_OBSERVATION_CHARS: usize = 12_000;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Agent stopped after {0} iterations without a final answer")]
    IterationLimit(usize),
}

/// One parsed controller reply.
#[derive(Debug, PartialEq)]
enum AgentStep {
    Action { tool: String, input: String },
    Final(String),
    Invalid,
}

pub struct ScrapingAgent {
    llm: Arc<dyn TextGenerator>,
    tools: Vec<Arc<dyn AgentTool>>,
    max_iterations: usize,
}

impl ScrapingAgent {
    pub fn new(
        llm: Arc<dyn TextGenerator>,
        tools: Vec<Arc<dyn AgentTool>>,
        max_iterations: usize,
    ) -> Self {
        Self {
            llm,
            tools,
            max_iterations: max_iterations.max(1),
        }
    }

    /// Runs the loop for one goal and returns the final answer text.
    pub async fn run(&self, goal: &str) -> Result<String, AgentError> {
        let tool_catalog = self
            .tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n");
        let tool_names = self
            .tools
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ");

        let mut scratchpad = String::new();

        for iteration in 1..=self.max_iterations {
            let prompt = REACT_PROMPT_TEMPLATE
                .replace("{tools}", &tool_catalog)
                .replace("{tool_names}", &tool_names)
                .replace("{goal}", goal)
                .replace("{scratchpad}", &scratchpad);

            let reply = self.llm.generate(&prompt, REACT_SYSTEM).await?;

            let observation = match parse_step(&reply) {
                AgentStep::Final(answer) => {
                    info!("Scraping agent finished after {iteration} iterations");
                    return Ok(answer);
                }
                AgentStep::Action { tool, input } => {
                    debug!("Agent iteration {iteration}: {tool}({input})");
                    match self.tools.iter().find(|t| t.name() == tool) {
                        Some(t) => truncate(t.run(&input).await),
                        None => format!(
                            "{tool} is not a valid tool, try one of [{tool_names}]."
                        ),
                    }
                }
                AgentStep::Invalid => {
                    warn!("Agent iteration {iteration}: reply had neither an action nor a final answer");
                    "Invalid format: reply with an Action and Action Input, or a Final Answer."
                        .to_string()
                }
            };

            scratchpad.push_str(reply_before_observation(&reply).trim());
            scratchpad.push_str("\nObservation: ");
            scratchpad.push_str(&observation);
            scratchpad.push('\n');
        }

        Err(AgentError::IterationLimit(self.max_iterations))
    }
}

/// Parses a ReAct reply. An `Action:` that appears before any `Final Answer:` wins.
fn parse_step(reply: &str) -> AgentStep {
    let final_pos = reply.find("Final Answer:");
    let action_pos = reply.find("Action:");

    let action_first = match (action_pos, final_pos) {
        (Some(a), Some(f)) => a < f,
        (Some(_), None) => true,
        _ => false,
    };

    if action_first {
        let tool = label_value(reply, "Action:");
        let input = label_value(reply, "Action Input:");
        return match (tool, input) {
            (Some(tool), Some(input)) if !tool.is_empty() => AgentStep::Action {
                tool: tool.to_string(),
                input: input.to_string(),
            },
            _ => AgentStep::Invalid,
        };
    }

    match final_pos {
        Some(pos) => AgentStep::Final(reply[pos + "Final Answer:".len()..].trim().to_string()),
        None => AgentStep::Invalid,
    }
}

/// The rest of the first line that starts with `label`.
fn label_value<'a>(reply: &'a str, label: &str) -> Option<&'a str> {
    reply
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(label))
        .map(str::trim)
}

/// Drops anything the model wrote after its action, including invented observations.
fn reply_before_observation(reply: &str) -> &str {
    reply.split("\nObservation:").next().unwrap_or(reply)
}

fn truncate(observation: String) -> String {
    if observation.chars().count() <= MAX_OBSERVATION_CHARS {
        return observation;
    }
    let mut cut: String = observation.chars().take(MAX_OBSERVATION_CHARS).collect();
    cut.push_str(" ...[truncated]");
    cut
}
