// Item table loading from a JSON array of item records.
//
// The primary table is normally the preprocessed full dataset. When it
// hasn't been generated yet, a small sample table can stand in so the
// recommender still works for demos.

use std::path::Path;

use tracing::{info, warn};

use super::models::{Item, ItemTable};
use crate::error::{Error, Result};

/// Load the item table, falling back to `fallback` when `primary` is absent.
pub fn load_items(primary: &Path, fallback: Option<&Path>) -> Result<ItemTable> {
    read_table(resolve_items_path(primary, fallback)?)
}

/// The file [`load_items`] reads: `primary` when it exists, otherwise the
/// sample `fallback`.
pub fn resolve_items_path<'a>(primary: &'a Path, fallback: Option<&'a Path>) -> Result<&'a Path> {
    if primary.exists() {
        return Ok(primary);
    }

    match fallback {
        Some(sample) if sample.exists() => {
            warn!(
                primary = %primary.display(),
                sample = %sample.display(),
                "Primary item table missing, using sample dataset"
            );
            Ok(sample)
        }
        Some(sample) => Err(Error::DataUnavailable {
            path: primary.to_path_buf(),
            reason: format!(
                "file not found, and sample dataset {} is missing too",
                sample.display()
            ),
        }),
        None => Err(Error::DataUnavailable {
            path: primary.to_path_buf(),
            reason: "file not found".to_string(),
        }),
    }
}

/// Read and parse one JSON item file.
pub fn read_table(path: &Path) -> Result<ItemTable> {
    let raw = std::fs::read_to_string(path).map_err(|e| Error::DataUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let items: Vec<Item> = serde_json::from_str(&raw).map_err(|e| Error::DataUnavailable {
        path: path.to_path_buf(),
        reason: format!("invalid item records: {e}"),
    })?;

    info!(path = %path.display(), items = items.len(), "Loaded item table");
    Ok(ItemTable::new(items))
}
