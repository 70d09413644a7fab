// Cosine similarity between sparse term vectors.
//
//   cos(a, b) = a · b / (|a| |b|)
//
// TF-IDF weights are non-negative, so the result lives in [0, 1]. A zero
// vector has no direction; its similarity to anything (itself included)
// is defined as 0 rather than NaN.

use super::vectors::SparseVector;

/// Cosine similarity of two sparse vectors, 0 when either is all-zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    cosine_with_norms(a, b, a.norm(), b.norm())
}

/// Same as [`cosine_similarity`] with precomputed norms, for the O(N²) build.
pub fn cosine_with_norms(a: &SparseVector, b: &SparseVector, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let score = a.dot(b) / (norm_a * norm_b);
    // Rounding can push identical directions just past 1.0
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
