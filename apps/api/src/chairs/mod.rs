// Chair documents: the text format scraped chair pages are saved in,
// and the loader that turns a directory of them into opportunities.

pub mod handlers;
pub mod loader;
pub mod models;
pub mod parser;
