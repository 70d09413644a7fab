// Item table models: the rows the similarity engine ranks.
//
// Row order is the index space of the similarity matrix: row i of the
// table is row/column i of the matrix. Titles are the lookup and output
// key (first match wins), even though ids are unique.

use serde::{Deserialize, Deserializer, Serialize};

/// A single movie with its combined textual feature profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub title: String,
    /// Overview, genres, keywords, cast and director joined into one string
    #[serde(default, deserialize_with = "null_as_empty")]
    pub combined_features: String,
    /// Space-separated genre names (used by post-filters only)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: String,
    /// Release year, 0 when unknown
    #[serde(default)]
    pub release_year: i32,
    #[serde(default)]
    pub popularity: f64,
}

impl Item {
    /// Build an item with only the fields the similarity engine needs.
    pub fn new(id: i64, title: impl Into<String>, combined_features: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            combined_features: combined_features.into(),
            genres: String::new(),
            release_year: 0,
            popularity: 0.0,
        }
    }

    /// Whether any of the item's genres is in `wanted`.
    pub fn has_any_genre(&self, wanted: &[String]) -> bool {
        self.genres
            .split_whitespace()
            .any(|g| wanted.iter().any(|w| w == g))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered collection of items for one build cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemTable {
    items: Vec<Item>,
}

impl ItemTable {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Row index of the first item whose title matches exactly.
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|item| item.title == title)
    }

    /// First item whose title matches exactly.
    pub fn find_by_title(&self, title: &str) -> Option<&Item> {
        self.position_of(title).map(|i| &self.items[i])
    }

    /// The combined feature text of every row, in row order.
    pub fn features(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| item.combined_features.as_str())
            .collect()
    }

    /// Content fingerprint of the table: row count plus every id, title and
    /// feature string in row order. Reordering, adding or editing a row
    /// changes the result.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.items.len() as u64).to_le_bytes());
        for item in &self.items {
            hasher.update(&item.id.to_le_bytes());
            // Length prefixes keep ("ab","c") distinct from ("a","bc")
            for field in [&item.title, &item.combined_features] {
                hasher.update(&(field.len() as u64).to_le_bytes());
                hasher.update(field.as_bytes());
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}

impl From<Vec<Item>> for ItemTable {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}
