use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::chairs::models::{ChairInfo, ThesisOpportunity};
use crate::chairs::parser::parse_chair_document;

/// A chair document that could not be parsed and was left out of the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDocument {
    pub file: String,
    pub reason: String,
}

/// Every opportunity found in a directory of chair documents.
#[derive(Debug, Default)]
pub struct ThesisCatalog {
    pub chairs: Vec<ChairInfo>,
    pub opportunities: Vec<ThesisOpportunity>,
    pub skipped: Vec<SkippedDocument>,
}

/// Loads all `*.txt` chair documents in `dir`, in file-name order.
///
/// A malformed document is logged and skipped; it never aborts the batch.
/// Fails only when the directory itself cannot be read.
pub async fn load_thesis_catalog(dir: &Path) -> std::io::Result<ThesisCatalog> {
    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut catalog = ThesisCatalog::default();
    for path in paths {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping unreadable chair document {file}: {e}");
                catalog.skipped.push(SkippedDocument {
                    file,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        match parse_chair_document(&content) {
            Ok((chair, opportunities)) => {
                info!(
                    "Loaded {} opportunities from {file} ({})",
                    opportunities.len(),
                    chair.name.as_deref().unwrap_or("unnamed chair")
                );
                catalog.opportunities.extend(opportunities);
                catalog.chairs.push(chair);
            }
            Err(e) => {
                warn!("Skipping chair document {file}: {e}");
                catalog.skipped.push(SkippedDocument {
                    file,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(catalog)
}
