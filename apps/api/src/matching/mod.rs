// Matching: score every opportunity against a student, rank, write the report.

pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod ranker;
pub mod report;
pub mod scorer;
