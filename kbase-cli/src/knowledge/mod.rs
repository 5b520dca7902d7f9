//! Knowledge base domain: documents, ordering and seed imports
//!
//! Sorting and import planning are pure functions over document lists.
//! Only [`Importer`] talks to a store.

pub mod catalog;
pub mod flow;
pub mod import;
pub mod importer;
pub mod models;
pub mod sort;

pub use catalog::Catalog;
pub use flow::ImportFlow;
pub use import::ImportPlan;
pub use importer::Importer;
pub use models::Document;
pub use sort::{SortKey, sort_documents};
