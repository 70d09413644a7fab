// Similarity engine core: TF-IDF vectors and the pairwise cosine matrix.

pub mod cosine;
pub mod matrix;
pub mod tfidf;
pub mod traits;
pub mod vectors;

pub use matrix::{MatrixBuilder, SimilarityMatrix};
pub use tfidf::TfIdfVectorizer;
pub use traits::Vectorizer;
