use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::store::{StoreConfig, DEFAULT_STORE_PATH};

/// Default location of the preprocessed item table.
pub const DEFAULT_ITEMS_PATH: &str = "./data/movies.json";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// setting has a default, so a bare checkout works with `data/movies.json`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Preprocessed item table (JSON array of items)
    pub items_path: PathBuf,
    /// Small demo table used when `items_path` doesn't exist
    pub sample_items_path: Option<PathBuf>,
    /// Similarity store artifact
    pub store_path: PathBuf,
    /// Worker threads for the similarity build (0 = rayon default)
    pub threads: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let threads = match env::var("CINESIM_THREADS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("CINESIM_THREADS must be a number, got {raw:?}"))?,
            Err(_) => 0,
        };

        Ok(Self {
            items_path: env::var("CINESIM_ITEMS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ITEMS_PATH)),
            sample_items_path: env::var("CINESIM_SAMPLE_ITEMS_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            store_path: env::var("CINESIM_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH)),
            threads,
        })
    }

    /// The store configuration handed to similarity store operations.
    pub fn store(&self) -> StoreConfig {
        StoreConfig {
            path: self.store_path.clone(),
        }
    }
}
