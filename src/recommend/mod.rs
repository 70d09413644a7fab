// Recommender: ranks items by similarity to a query title.
//
// Lookup is by exact title, first matching row wins. The query's own row
// is excluded by index, so an exact duplicate elsewhere in the table
// (same features, same 1.0 score) still shows up as a recommendation.
// Ties are broken by ascending row index, which matters because most
// unrelated items tie at 0.

pub mod filter;

use serde::Serialize;
use tracing::{debug, warn};

use crate::items::ItemTable;
use crate::similarity::SimilarityMatrix;

/// One ranked neighbor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Row index in the item table
    pub index: usize,
    pub title: String,
    pub score: f64,
}

/// Up to `top_n` titles most similar to `query_title`, best first.
///
/// Unknown titles and `top_n == 0` give an empty list, not an error.
pub fn recommend(
    query_title: &str,
    table: &ItemTable,
    matrix: &SimilarityMatrix,
    top_n: usize,
) -> Vec<String> {
    recommend_scored(query_title, table, matrix, top_n)
        .into_iter()
        .map(|r| r.title)
        .collect()
}

/// Like [`recommend`], keeping the row index and similarity score.
pub fn recommend_scored(
    query_title: &str,
    table: &ItemTable,
    matrix: &SimilarityMatrix,
    top_n: usize,
) -> Vec<Recommendation> {
    if top_n == 0 {
        return Vec::new();
    }

    let Some(query_idx) = table.position_of(query_title) else {
        debug!(title = query_title, "Query title not in item table");
        return Vec::new();
    };

    let Some(row) = matrix.row(query_idx) else {
        warn!(
            index = query_idx,
            matrix_items = matrix.len(),
            table_items = table.len(),
            "Similarity matrix smaller than item table"
        );
        return Vec::new();
    };

    let candidates = row.len().min(table.len());
    let mut scored: Vec<(usize, f64)> = (0..candidates)
        .filter(|&i| i != query_idx)
        .map(|i| (i, row[i]))
        .collect();

    // Descending score, then ascending index
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(top_n);

    scored
        .into_iter()
        .filter_map(|(index, score)| {
            table.get(index).map(|item| Recommendation {
                index,
                title: item.title.clone(),
                score,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Item;

    fn fixture() -> (ItemTable, SimilarityMatrix) {
        let table = ItemTable::new(vec![
            Item::new(1, "A", ""),
            Item::new(2, "B", ""),
            Item::new(3, "C", ""),
            Item::new(4, "D", ""),
        ]);
        #[rustfmt::skip]
        let values = vec![
            1.0, 0.2, 0.9, 0.2,
            0.2, 1.0, 0.0, 0.0,
            0.9, 0.0, 1.0, 0.0,
            0.2, 0.0, 0.0, 1.0,
        ];
        (table, SimilarityMatrix::from_row_major(4, values).unwrap())
    }

    #[test]
    fn test_ranked_with_index_tiebreak() {
        let (table, matrix) = fixture();
        assert_eq!(recommend("A", &table, &matrix, 3), vec!["C", "B", "D"]);
    }

    #[test]
    fn test_zero_scores_keep_table_order() {
        let (table, matrix) = fixture();
        assert_eq!(recommend("D", &table, &matrix, 3), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let (table, matrix) = fixture();
        assert_eq!(recommend("A", &table, &matrix, 1), vec!["C"]);
    }

    #[test]
    fn test_self_excluded_even_when_tied() {
        let table = ItemTable::new(vec![Item::new(1, "X", ""), Item::new(2, "Y", "")]);
        let matrix = SimilarityMatrix::from_row_major(2, vec![1.0, 1.0, 1.0, 1.0]).unwrap();
        let recs = recommend_scored("Y", &table, &matrix, 5);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].index, 0);
    }

    #[test]
    fn test_matrix_smaller_than_table() {
        let table = ItemTable::new(vec![Item::new(1, "X", ""), Item::new(2, "Y", "")]);
        let matrix = SimilarityMatrix::from_row_major(1, vec![1.0]).unwrap();
        assert!(recommend("Y", &table, &matrix, 5).is_empty());
        assert!(recommend("X", &table, &matrix, 5).is_empty());
    }
}
