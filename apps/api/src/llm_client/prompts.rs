// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to prompts that feed text back into the line-oriented parsers.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Write plain text. Keep every `Label: value` pair on a single line. \
    Do NOT wrap labels in markdown emphasis. \
    Be explicit about missing information instead of omitting a label.";
