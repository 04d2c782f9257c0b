// Scraping agent prompt templates.

/// System prompt for every controller step.
pub const REACT_SYSTEM: &str = "You are an expert at analyzing university webpages for thesis opportunities. \
    You work step by step and call exactly one tool per step.";

/// ReAct step prompt. Replace: {tools}, {tool_names}, {goal}, {scratchpad}
pub const REACT_PROMPT_TEMPLATE: &str = r#"Answer the following task as best you can. You have access to the following tools:

{tools}

Use the following format:

Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original task

Reply with ONE Thought and either ONE Action with its Action Input, or the Final Answer.
Never write the Observation yourself.

Task: {goal}
{scratchpad}Thought:"#;

/// Chair scraping goal. Replace: {url}, {plain_text_instruction}
pub const CHAIR_GOAL_TEMPLATE: &str = r#"Collect all thesis opportunities advertised by the university chair at {url}.

First use link_extractor on the URL, then web_page_scraper on the pages that look relevant
(theses, open positions, teaching, research). Keep URLs absolute.

{plain_text_instruction}

Final Answer format:

CHAIR INFORMATION:
- Chair/Department Name:
- Website:
- General Contact:
- Application Process:
- General Requirements:
- Research Areas: comma-separated list

THESIS OPPORTUNITIES:
For each thesis found:
**Opportunity**
- Type: [Master thesis, Bachelor thesis, Project]
- Title:
- Description:
- URL:
- Contact Person:
- Research Fields: comma-separated list
- Technical Requirements:
- Academic Requirements:
- Timeline:
- Additional Information:

Write "Not provided" for any field you could not find. Include ALL thesis opportunities found."#;
