// Cinesim: content-based movie recommendations
//
// This is the library root. Each module corresponds to one stage of the
// pipeline: item table -> TF-IDF vectors -> cosine similarity matrix ->
// similarity store -> ranked recommendations.

pub mod config;
pub mod engine;
pub mod error;
pub mod items;
pub mod output;
pub mod recommend;
pub mod similarity;
pub mod status;
pub mod store;

pub use error::{Error, Result};
