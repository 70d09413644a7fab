// Item table: the ordered rows supplied by the ingestion step.

pub mod loader;
pub mod models;

pub use models::{Item, ItemTable};
