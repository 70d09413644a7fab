// Similarity store: persists the N×N matrix so the expensive build only
// runs when the item table changes.
//
// One binary artifact at a configurable path (default
// models/cosine_sim.bin). Writers are expected to be serialized by the
// caller; there's no file locking.

pub mod format;
pub mod manifest;

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::similarity::SimilarityMatrix;

pub use manifest::StoreManifest;

/// Default artifact location, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "models/cosine_sim.bin";

/// Where the similarity store lives.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

/// Handle to the artifact described by a [`StoreConfig`].
#[derive(Debug, Clone)]
pub struct SimilarityStore {
    config: StoreConfig,
}

impl SimilarityStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn exists(&self) -> bool {
        self.config.path.exists()
    }

    pub fn save(&self, matrix: &SimilarityMatrix) -> Result<()> {
        save_matrix(matrix, &self.config.path)
    }

    pub fn load(&self, expected_items: usize) -> Result<SimilarityMatrix> {
        load_matrix(&self.config.path, Some(expected_items))
    }

    pub fn manifest(&self) -> Option<StoreManifest> {
        manifest::read(&self.config.path)
    }

    pub fn write_manifest(&self, manifest: &StoreManifest) -> Result<()> {
        manifest::write(&self.config.path, manifest)
    }

    pub fn clear_manifest(&self) -> Result<()> {
        manifest::remove(&self.config.path)
    }

    /// Remove the manifest and the artifact. Missing files are fine.
    pub fn clear(&self) -> Result<()> {
        self.clear_manifest()?;
        match std::fs::remove_file(&self.config.path) {
            Ok(()) => {
                debug!(path = %self.config.path.display(), "Removed similarity store");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&self.config.path, e)),
        }
    }
}

/// Write `matrix` to `destination`, creating parent directories and
/// replacing any existing artifact.
///
/// The bytes go to a sibling `.tmp` file first and are renamed into place,
/// so a failed write never leaves a half-written artifact behind.
pub fn save_matrix(matrix: &SimilarityMatrix, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }

    let tmp = temp_path(destination);
    let bytes = format::encode(matrix);
    if let Err(e) = write_file(&tmp, &bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::io(destination, e));
    }
    std::fs::rename(&tmp, destination).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        Error::io(destination, e)
    })?;

    info!(
        path = %destination.display(),
        items = matrix.len(),
        bytes = bytes.len(),
        "Saved similarity matrix"
    );
    Ok(())
}

/// Read the artifact at `source`. With `expected_items`, a matrix of any
/// other size is reported as corrupt.
pub fn load_matrix(source: &Path, expected_items: Option<usize>) -> Result<SimilarityMatrix> {
    let bytes = std::fs::read(source).map_err(|e| Error::corrupt(source, e.to_string()))?;
    let matrix =
        format::decode(&bytes, expected_items).map_err(|reason| Error::corrupt(source, reason))?;
    debug!(path = %source.display(), items = matrix.len(), "Loaded similarity matrix");
    Ok(matrix)
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
