// Post-hoc filters over a recommendation list.
//
// Filtering happens after ranking, on titles joined back to the item
// table, so the filtered list can be much shorter than what was asked
// for. Ask for a generous top_n (50 or so) before filtering down to the
// handful that gets displayed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Recommendation;
use crate::items::{Item, ItemTable};

/// Release years at or below this are treated as unknown/placeholder.
pub const MIN_VALID_YEAR: i32 = 1900;

/// Genre, release-year and popularity constraints. Ranges are inclusive;
/// an empty genre list or a `None` range means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationFilter {
    pub genres: Vec<String>,
    pub year_range: Option<(i32, i32)>,
    pub popularity_range: Option<(f64, f64)>,
}

impl RecommendationFilter {
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.year_range.is_none() && self.popularity_range.is_none()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if !self.genres.is_empty() && !item.has_any_genre(&self.genres) {
            return false;
        }
        if let Some((min, max)) = self.year_range {
            if item.release_year < min || item.release_year > max {
                return false;
            }
        }
        if let Some((min, max)) = self.popularity_range {
            if item.popularity < min || item.popularity > max {
                return false;
            }
        }
        true
    }

    /// Keep the recommended titles whose item (first match by title)
    /// passes every constraint, in recommendation order.
    pub fn apply<'t>(&self, titles: &[String], table: &'t ItemTable) -> Vec<&'t Item> {
        titles
            .iter()
            .filter_map(|title| table.find_by_title(title))
            .filter(|item| self.matches(item))
            .collect()
    }

    /// Same as [`apply`](Self::apply) for scored results, joined on the
    /// row index each recommendation already carries.
    pub fn apply_scored<'r, 't>(
        &self,
        recommendations: &'r [Recommendation],
        table: &'t ItemTable,
    ) -> Vec<(&'r Recommendation, &'t Item)> {
        recommendations
            .iter()
            .filter_map(|rec| table.get(rec.index).map(|item| (rec, item)))
            .filter(|(_, item)| self.matches(item))
            .collect()
    }
}

/// The filter choices a table offers: its genres and value ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalogue {
    /// Unique genre names, sorted
    pub genres: Vec<String>,
    /// Earliest and latest release year above [`MIN_VALID_YEAR`]
    pub year_bounds: Option<(i32, i32)>,
    pub popularity_bounds: Option<(f64, f64)>,
}

impl Catalogue {
    pub fn from_table(table: &ItemTable) -> Self {
        let genres: BTreeSet<&str> = table
            .items()
            .iter()
            .flat_map(|item| item.genres.split_whitespace())
            .collect();

        let year_bounds = bounds(
            table
                .items()
                .iter()
                .map(|item| item.release_year)
                .filter(|&y| y > MIN_VALID_YEAR),
        );

        let popularity_bounds = table
            .items()
            .iter()
            .map(|item| item.popularity)
            .filter(|p| p.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            });

        Self {
            genres: genres.into_iter().map(str::to_string).collect(),
            year_bounds,
            popularity_bounds,
        }
    }

    /// A filter spanning the whole catalogue, i.e. one that keeps
    /// everything with a valid year.
    pub fn full_range_filter(&self) -> RecommendationFilter {
        RecommendationFilter {
            genres: Vec::new(),
            year_range: self.year_bounds,
            popularity_range: self.popularity_bounds,
        }
    }
}

fn bounds(values: impl Iterator<Item = i32>) -> Option<(i32, i32)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
