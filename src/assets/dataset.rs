/// Dataset loader
///
/// Reads the JSON array of species records once at startup.
/// There is no retry: a failure here is reported to the user as-is.

use std::path::PathBuf;

use crate::error::{CatalogError, Result};
use crate::state::data::Record;

/// Load all records from the dataset file
pub async fn load_records(path: PathBuf) -> Result<Vec<Record>> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| CatalogError::io(&path, e))?;

    let records = parse_records(&bytes)?;

    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Decode a JSON array of records
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>> {
    Ok(serde_json::from_slice(bytes)?)
}
