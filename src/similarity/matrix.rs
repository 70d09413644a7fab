// Dense pairwise similarity matrix and its builder.
//
// The build is the expensive step of the whole system: N² sparse dot
// products. Only the upper triangle is computed; it's mirrored into the
// lower half so symmetry is exact. Rows are computed in parallel with
// rayon, but every entry goes through the same sequential dot product, so
// the result is bit-identical however many threads run it.

use std::time::Instant;

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{info, warn};

use super::cosine::cosine_with_norms;
use super::vectors::{SparseVector, TermVectorMatrix};

/// N×N cosine similarities, row-major. Entry (i, j) is the similarity
/// between item-table rows i and j.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Wrap `values` as an `n`×`n` matrix. Returns `None` when the length
    /// doesn't match the shape.
    pub fn from_row_major(n: usize, values: Vec<f64>) -> Option<Self> {
        (n.checked_mul(n) == Some(values.len())).then_some(Self { n, values })
    }

    /// Number of items (rows and columns).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity of items `i` and `j`, or `None` when either is out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if j >= self.n {
            return None;
        }
        self.row(i).map(|row| row[j])
    }

    /// Row `i`: similarity of item `i` to every item, itself included.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.n).then(|| &self.values[i * self.n..(i + 1) * self.n])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Builds a [`SimilarityMatrix`] from a term-vector matrix.
#[derive(Debug, Clone, Default)]
pub struct MatrixBuilder {
    /// Worker threads for the build; 0 uses rayon's global pool
    pub threads: usize,
}

impl MatrixBuilder {
    pub fn new(threads: usize) -> Self {
        Self { threads }
    }

    /// Compute every pairwise cosine similarity. `progress`, when given, is
    /// advanced once per finished row.
    pub fn build(&self, vectors: &TermVectorMatrix, progress: Option<&ProgressBar>) -> SimilarityMatrix {
        let start = Instant::now();
        let rows = vectors.rows();
        let n = rows.len();
        let norms: Vec<f64> = rows.iter().map(SparseVector::norm).collect();

        let compute = || -> Vec<Vec<f64>> {
            (0..n)
                .into_par_iter()
                .map(|i| {
                    let row = upper_row(rows, &norms, i);
                    if let Some(pb) = progress {
                        pb.inc(1);
                    }
                    row
                })
                .collect()
        };

        let upper = match self.dedicated_pool() {
            Some(pool) => pool.install(compute),
            None => compute(),
        };

        let mut values = vec![0.0; n * n];
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, score) in row.into_iter().enumerate() {
                let j = i + offset;
                values[i * n + j] = score;
                values[j * n + i] = score;
            }
        }

        info!(
            items = n,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Built similarity matrix"
        );

        SimilarityMatrix { n, values }
    }

    fn dedicated_pool(&self) -> Option<rayon::ThreadPool> {
        if self.threads == 0 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!(error = %e, threads = self.threads, "Thread pool unavailable, using global pool");
                None
            }
        }
    }
}

/// Similarities of row `i` against rows `i..n`. The diagonal is exactly 1
/// for non-zero rows and 0 for zero rows.
fn upper_row(rows: &[SparseVector], norms: &[f64], i: usize) -> Vec<f64> {
    (i..rows.len())
        .map(|j| {
            if i == j {
                if norms[i] > 0.0 {
                    1.0
                } else {
                    0.0
                }
            } else {
                cosine_with_norms(&rows[i], &rows[j], norms[i], norms[j])
            }
        })
        .collect()
}
