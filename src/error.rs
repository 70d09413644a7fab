// Error taxonomy for the similarity engine.
//
// Three typed failures cross the library boundary. Everything else
// (unknown query title, empty filters) is a soft outcome and comes back
// as an empty list instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the similarity engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The item table could not be obtained (missing file, unparseable records).
    #[error("item table unavailable at {}: {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// The persisted similarity matrix cannot be read or has the wrong shape.
    /// Callers rebuild from scratch and re-save.
    #[error("similarity store at {} is corrupt: {reason}", .path.display())]
    CorruptStore { path: PathBuf, reason: String },

    /// Writing the similarity store (or its manifest) failed.
    #[error("I/O error writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::CorruptStore {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the caller should discard the artifact and rebuild.
    pub fn is_corrupt_store(&self) -> bool {
        matches!(self, Error::CorruptStore { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
