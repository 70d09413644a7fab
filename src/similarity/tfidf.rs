// TF-IDF vectorization of item feature text.
//
// Each item's combined features string is one document. Terms frequent in
// a single item but rare across the catalogue get boosted, while terms
// that appear everywhere ("film", a prolific actor) get downweighted.
//
// Weighting:
//   tf(t, d)  = raw count of t in d
//   idf(t)    = ln((1 + N) / (1 + df(t))) + 1
//   w(t, d)   = tf * idf, then each row is scaled to unit L2 length
//
// The vocabulary comes from the corpus itself, so vectors (and the
// similarities built from them) are only comparable within one snapshot
// of the item table.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use stop_words::{get, LANGUAGE};
use tracing::info;

use super::traits::Vectorizer;
use super::vectors::{SparseVector, TermVectorMatrix, Vocabulary};

/// Shortest token kept after splitting.
pub const MIN_TOKEN_CHARS: usize = 2;

/// TF-IDF vectorizer with smoothed IDF and L2-normalized rows.
pub struct TfIdfVectorizer {
    stop_words: HashSet<String>,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        // English stop words from the stop-words crate
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self::with_stop_words(stop_words)
    }
}

impl TfIdfVectorizer {
    /// Use a custom stop word list instead of the English default.
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    /// Lowercased, stop-word-free terms of `text` in order of appearance.
    pub fn terms(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn vectorize(&self, documents: &[&str]) -> TermVectorMatrix {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| self.terms(d)).collect();

        // Document frequency per term. BTreeMap keeps terms sorted, which
        // fixes the column order independent of input order.
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &tokenized {
            let unique: BTreeSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = df
            .values()
            .map(|&count| smoothed_idf(n_docs, count as f64))
            .collect();
        let vocabulary = Vocabulary::from_sorted_terms(df.keys().map(|t| t.to_string()).collect());

        let rows: Vec<SparseVector> = tokenized
            .iter()
            .map(|terms| {
                let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
                for term in terms {
                    if let Some(col) = vocabulary.column(term) {
                        *counts.entry(col).or_insert(0.0) += 1.0;
                    }
                }
                let mut row = SparseVector::from_sorted(
                    counts
                        .into_iter()
                        .map(|(col, tf)| (col, tf * idf[col]))
                        .collect(),
                );
                row.l2_normalize();
                row
            })
            .collect();

        let matrix = TermVectorMatrix::new(vocabulary, rows);
        info!(
            items = matrix.n_rows(),
            vocabulary = matrix.n_terms(),
            zero_vectors = matrix.zero_rows(),
            "Vectorized item features"
        );
        matrix
    }
}

/// `ln((1 + n) / (1 + df)) + 1`. Never zero, so a term present in every
/// document still contributes.
pub fn smoothed_idf(n_docs: f64, doc_freq: f64) -> f64 {
    ((1.0 + n_docs) / (1.0 + doc_freq)).ln() + 1.0
}

/// Split on anything that isn't alphanumeric or `_`, drop tokens shorter
/// than [`MIN_TOKEN_CHARS`], lowercase the rest.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_lowercase)
}
