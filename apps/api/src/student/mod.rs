// Student side: profile files on disk, transcript/CV processing and the intake conversation.

pub mod handlers;
pub mod intake;
pub mod loader;
pub mod models;
pub mod prompts;
pub mod transcript;
