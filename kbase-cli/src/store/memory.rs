//! In-memory store for tests

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use super::DocumentStore;
use crate::knowledge::Document;

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<Document>>,
    insert_calls: Mutex<Vec<Vec<String>>>,
    fail_reads: Mutex<bool>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: Mutex::new(documents),
            ..Default::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Slugs passed to each insert call, in call order
    pub fn insert_calls(&self) -> Vec<Vec<String>> {
        self.insert_calls.lock().unwrap().clone()
    }

    pub fn slugs(&self) -> Vec<String> {
        self.documents.lock().unwrap().iter().map(|d| d.slug.clone()).collect()
    }

    /// Simulate another client writing to the store
    pub fn push(&self, document: Document) {
        self.documents.lock().unwrap().push(document);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_documents(&self) -> Result<Vec<Document>> {
        if *self.fail_reads.lock().unwrap() {
            anyhow::bail!("memory store: read failed");
        }
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn insert_documents(&self, documents: &[Document]) -> Result<()> {
        self.insert_calls
            .lock()
            .unwrap()
            .push(documents.iter().map(|d| d.slug.clone()).collect());

        if *self.fail_writes.lock().unwrap() {
            anyhow::bail!("memory store: write failed");
        }
        self.documents.lock().unwrap().extend_from_slice(documents);
        Ok(())
    }
}
