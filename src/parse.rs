use crate::error::{OewnLogicError, Result};
use crate::models::WordnetDatabase;
use log::debug;
use tokio::task;

/// Parses the raw JSON dataset into a WordnetDatabase struct using spawn_blocking.
pub async fn parse_database(json_content: String) -> Result<WordnetDatabase> {
    debug!("Starting dataset JSON parsing (using spawn_blocking)...");
    // Wrap the synchronous parsing in spawn_blocking
    let database = task::spawn_blocking(move || -> Result<WordnetDatabase> {
        serde_json::from_str(&json_content).map_err(OewnLogicError::from)
    })
    .await??;
    debug!(
        "Successfully parsed dataset: {} synsets, {} links.",
        database.synsets.len(),
        database.links.len()
    );
    Ok(database)
}
