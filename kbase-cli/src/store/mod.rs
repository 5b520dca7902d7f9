//! Document store backends
//!
//! The knowledge base never owns its data. Reads and bulk writes go through
//! [`DocumentStore`], which is implemented for a local SQLite database and
//! for a hosted REST table endpoint.

pub mod rest;
pub mod sqlite;

#[cfg(test)]
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{Backend, Config};
use crate::knowledge::Document;

pub use rest::RestStore;
pub use sqlite::SqliteStore;

/// Read and bulk-write access to the external document collection
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short name for log and error messages
    fn name(&self) -> &str;

    /// Fetch every document currently stored
    async fn fetch_documents(&self) -> Result<Vec<Document>>;

    /// Insert all documents in one atomic call
    async fn insert_documents(&self, documents: &[Document]) -> Result<()>;
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch_documents(&self) -> Result<Vec<Document>> {
        (**self).fetch_documents().await
    }

    async fn insert_documents(&self, documents: &[Document]) -> Result<()> {
        (**self).insert_documents(documents).await
    }
}

/// Open the backend selected in the configuration
pub async fn open_store(config: &Config) -> Result<Box<dyn DocumentStore>> {
    match config.backend {
        Backend::Sqlite => {
            let store = SqliteStore::open(&config.database_url()).await?;
            Ok(Box::new(store))
        }
        Backend::Rest => {
            let store = RestStore::from_config(&config.rest, &config.table)?;
            Ok(Box::new(store))
        }
    }
}
