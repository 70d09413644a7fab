// Sparse term vectors and the corpus vocabulary.

use std::collections::HashMap;

/// A sparse row of (column, weight) pairs, sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Wrap entries that are already sorted by column with no duplicates.
    pub fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// True when every weight is zero (empty or all-stopword text).
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|&(_, w)| w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product via a merge over both sorted column lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Scale to unit L2 length. Zero vectors are left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Term → column mapping, built once per corpus. Terms are kept in
/// lexicographic order so column i is the i-th smallest term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build from terms in ascending order.
    pub fn from_sorted_terms(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, index }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// N items × V terms, one sparse row per item in item-table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVectorMatrix {
    vocabulary: Vocabulary,
    rows: Vec<SparseVector>,
}

impl TermVectorMatrix {
    pub fn new(vocabulary: Vocabulary, rows: Vec<SparseVector>) -> Self {
        Self { vocabulary, rows }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    /// Weight of `term` in row `index`, 0 when absent.
    pub fn weight(&self, index: usize, term: &str) -> f64 {
        let (Some(row), Some(col)) = (self.rows.get(index), self.vocabulary.column(term)) else {
            return 0.0;
        };
        row.entries()
            .binary_search_by_key(&col, |&(c, _)| c)
            .map(|pos| row.entries()[pos].1)
            .unwrap_or(0.0)
    }

    pub fn zero_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.is_zero()).count()
    }
}
