// Build orchestration: load-or-build the similarity matrix for a table.
//
// Order of preference:
// 1. The matrix most recently built or loaded in this process, if it was
//    for the same table fingerprint
// 2. The persisted artifact, if its manifest (when present) names the same
//    fingerprint and its shape matches the table
// 3. A fresh build, which is then saved and cached
//
// A corrupt or stale artifact is never fatal: it's logged, rebuilt and
// overwritten. Write failures on save are.

use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::error::Result;
use crate::items::ItemTable;
use crate::similarity::{MatrixBuilder, SimilarityMatrix, TfIdfVectorizer, Vectorizer};
use crate::store::{SimilarityStore, StoreConfig, StoreManifest};

/// Where a matrix returned by [`SimilarityEngine::load_or_build`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixSource {
    /// Reused from this process's cache
    Cache,
    /// Loaded from the similarity store
    Store,
    /// Computed from scratch (and saved)
    Built,
}

/// Owns the vectorizer, builder, store handle and the in-process cache.
/// The cache holds one matrix, for the last fingerprint served.
pub struct SimilarityEngine {
    store: SimilarityStore,
    vectorizer: Box<dyn Vectorizer + Send + Sync>,
    builder: MatrixBuilder,
    cache: Option<(String, Arc<SimilarityMatrix>)>,
}

impl SimilarityEngine {
    /// Engine with the default English TF-IDF vectorizer.
    pub fn new(store: StoreConfig, threads: usize) -> Self {
        Self::with_vectorizer(store, threads, Box::new(TfIdfVectorizer::default()))
    }

    pub fn with_vectorizer(
        store: StoreConfig,
        threads: usize,
        vectorizer: Box<dyn Vectorizer + Send + Sync>,
    ) -> Self {
        Self {
            store: SimilarityStore::new(store),
            vectorizer,
            builder: MatrixBuilder::new(threads),
            cache: None,
        }
    }

    pub fn store(&self) -> &SimilarityStore {
        &self.store
    }

    /// Return a similarity matrix for `table`, reusing whatever is still
    /// valid. `refresh` skips both the cache and the store.
    pub fn load_or_build(
        &mut self,
        table: &ItemTable,
        refresh: bool,
        progress: Option<&ProgressBar>,
    ) -> Result<(Arc<SimilarityMatrix>, MatrixSource)> {
        let fingerprint = table.fingerprint();

        if !refresh {
            if let Some((cached_for, matrix)) = &self.cache {
                if *cached_for == fingerprint {
                    info!(items = matrix.len(), "Reusing cached similarity matrix");
                    return Ok((Arc::clone(matrix), MatrixSource::Cache));
                }
            }

            if let Some(matrix) = self.try_load(table, &fingerprint) {
                let matrix = Arc::new(matrix);
                self.cache = Some((fingerprint, Arc::clone(&matrix)));
                return Ok((matrix, MatrixSource::Store));
            }
        }

        let matrix = Arc::new(self.build_and_save(table, &fingerprint, progress)?);
        self.cache = Some((fingerprint, Arc::clone(&matrix)));
        Ok((matrix, MatrixSource::Built))
    }

    /// Vectorize and build without touching the store or cache.
    pub fn build(&self, table: &ItemTable, progress: Option<&ProgressBar>) -> (SimilarityMatrix, usize) {
        let vectors = self.vectorizer.vectorize(&table.features());
        let matrix = self.builder.build(&vectors, progress);
        (matrix, vectors.n_terms())
    }

    fn try_load(&self, table: &ItemTable, fingerprint: &str) -> Option<SimilarityMatrix> {
        if !self.store.exists() {
            return None;
        }

        if let Some(manifest) = self.store.manifest() {
            if manifest.fingerprint != fingerprint {
                warn!(
                    path = %self.store.path().display(),
                    built_for = manifest.item_count,
                    items = table.len(),
                    "Similarity store is stale for this item table, rebuilding"
                );
                return None;
            }
        }

        match self.store.load(table.len()) {
            Ok(matrix) => {
                info!(
                    path = %self.store.path().display(),
                    items = matrix.len(),
                    "Loaded similarity matrix from store"
                );
                Some(matrix)
            }
            Err(e) => {
                warn!(error = %e, "Discarding unusable similarity store, rebuilding");
                None
            }
        }
    }

    fn build_and_save(
        &self,
        table: &ItemTable,
        fingerprint: &str,
        progress: Option<&ProgressBar>,
    ) -> Result<SimilarityMatrix> {
        let (matrix, vocabulary_size) = self.build(table, progress);

        // Old artifact and manifest go together, so a failed save leaves
        // nothing for the shape-only check to accept.
        self.store.clear()?;
        self.store.save(&matrix)?;
        self.store.write_manifest(&StoreManifest::new(
            fingerprint.to_string(),
            matrix.len(),
            vocabulary_size,
        ))?;

        Ok(matrix)
    }
}
