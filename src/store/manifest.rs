// Store manifest: a JSON sidecar describing which item table produced
// the artifact next to it.
//
// The artifact itself only carries the matrix. The manifest lets the
// engine notice a reordered or edited table with the same row count,
// which the shape check alone can't catch. A missing manifest is not an
// error; reuse then falls back to the shape check.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreManifest {
    /// `ItemTable::fingerprint()` of the table the matrix was built from
    pub fingerprint: String,
    pub item_count: usize,
    pub vocabulary_size: usize,
    pub built_at: DateTime<Utc>,
}

impl StoreManifest {
    pub fn new(fingerprint: String, item_count: usize, vocabulary_size: usize) -> Self {
        Self {
            fingerprint,
            item_count,
            vocabulary_size,
            built_at: Utc::now(),
        }
    }
}

/// `models/cosine_sim.bin` → `models/cosine_sim.manifest.json`
pub fn manifest_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("manifest.json")
}

/// Read the manifest next to `artifact`. Missing or unreadable → `None`.
pub fn read(artifact: &Path) -> Option<StoreManifest> {
    let path = manifest_path(artifact);
    let raw = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable store manifest");
            None
        }
    }
}

/// Write the manifest next to `artifact`, replacing any previous one.
pub fn write(artifact: &Path, manifest: &StoreManifest) -> Result<()> {
    let path = manifest_path(artifact);
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| Error::io(&path, std::io::Error::other(e)))?;
    std::fs::write(&path, json).map_err(|e| Error::io(&path, e))
}

/// Delete the manifest next to `artifact` if there is one.
pub fn remove(artifact: &Path) -> Result<()> {
    let path = manifest_path(artifact);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(&path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_path() {
        assert_eq!(
            manifest_path(Path::new("models/cosine_sim.bin")),
            PathBuf::from("models/cosine_sim.manifest.json")
        );
    }

    #[test]
    fn test_write_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("sim.bin");
        assert!(read(&artifact).is_none());

        let manifest = StoreManifest::new("abc".to_string(), 3, 12);
        write(&artifact, &manifest).unwrap();
        assert_eq!(read(&artifact), Some(manifest));

        remove(&artifact).unwrap();
        assert!(read(&artifact).is_none());
        // Removing twice is fine
        remove(&artifact).unwrap();
    }

    #[test]
    fn test_garbage_manifest_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = dir.path().join("sim.bin");
        std::fs::write(manifest_path(&artifact), "not json").unwrap();
        assert!(read(&artifact).is_none());
    }
}
