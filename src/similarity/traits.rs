// Vectorizer trait: swap-ready abstraction over the term weighting.
//
// The matrix builder only needs sparse rows. TF-IDF is the default, but a
// different weighting (BM25, binary counts) can slot in here without
// touching the builder, the store or the recommender.

use super::vectors::TermVectorMatrix;

/// Turns one feature string per item into a term-vector matrix.
pub trait Vectorizer {
    /// Build the vocabulary from `documents` and weight every row against it.
    /// Row i of the result corresponds to `documents[i]`.
    fn vectorize(&self, documents: &[&str]) -> TermVectorMatrix;
}
