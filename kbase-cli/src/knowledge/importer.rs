//! Seed import service
//!
//! Owns the catalog, the last store read and the confirmation flow.
//! The store must be read before the dialog can open; the batch shown in
//! the dialog is the one that gets written.

use anyhow::Result;

use super::catalog::Catalog;
use super::flow::ImportFlow;
use super::import::{ImportPlan, existing_slugs, plan_import};
use super::models::{ExistingSet, Resource};
use crate::store::DocumentStore;

pub struct Importer<S: DocumentStore> {
    store: S,
    catalog: Catalog,
    existing: Resource<ExistingSet>,
    flow: ImportFlow,
}

impl<S: DocumentStore> Importer<S> {
    pub fn new(store: S, catalog: Catalog) -> Self {
        Self {
            store,
            catalog,
            existing: Resource::NotAsked,
            flow: ImportFlow::Idle,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn flow(&self) -> &ImportFlow {
        &self.flow
    }

    pub fn existing(&self) -> &Resource<ExistingSet> {
        &self.existing
    }

    /// Read the store and recompute the existing slug set
    pub async fn refresh(&mut self) -> Result<ImportPlan> {
        match self.store.fetch_documents().await {
            Ok(documents) => {
                let existing = existing_slugs(&documents);
                let plan = plan_import(&self.catalog, &existing);
                self.existing = Resource::Success(existing);
                Ok(plan)
            }
            Err(e) => {
                // A failed read must not look like an empty store
                log::warn!("Failed to read {} store: {:#}", self.store.name(), e);
                self.existing = Resource::Failure(format!("{:#}", e));
                Err(e.context(format!("Failed to read documents from {} store", self.store.name())))
            }
        }
    }

    /// Current plan against the last successful read, if any
    pub fn plan(&self) -> Option<ImportPlan> {
        self.existing
            .value()
            .map(|existing| plan_import(&self.catalog, existing))
    }

    /// Open the confirmation dialog. Returns the number of pending documents.
    pub fn open(&mut self) -> Result<usize> {
        let plan = match &self.existing {
            Resource::Success(existing) => plan_import(&self.catalog, existing),
            Resource::NotAsked => anyhow::bail!("Document store has not been read yet"),
            Resource::Failure(e) => anyhow::bail!("Document store could not be read: {}", e),
        };

        let pending = plan.len();
        self.flow.open(plan)?;
        Ok(pending)
    }

    /// Submit the pending batch as a single bulk write.
    ///
    /// Also used to retry after a failed write. On failure the flow stays
    /// in `Failed` with the batch intact and the error is returned.
    pub async fn confirm(&mut self) -> Result<usize> {
        let batch = self.flow.begin_submit()?;
        log::info!(
            "Importing {} catalog documents into {} store",
            batch.len(),
            self.store.name()
        );

        let outcome = self.store.insert_documents(&batch).await;
        match outcome {
            Ok(()) => {
                self.flow.finish(Ok(()))?;
                // Store contents changed; the old read is stale
                self.existing = Resource::NotAsked;
                Ok(batch.len())
            }
            Err(e) => {
                let message = format!("{:#}", e);
                log::info!("Import write failed: {}", message);
                self.flow.finish(Err(message))?;
                Err(e.context("Import failed; nothing was written, retry or cancel"))
            }
        }
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.flow.cancel()
    }

    /// Dismiss a finished import, returning how many documents it wrote
    pub fn acknowledge(&mut self) -> Result<usize> {
        self.flow.acknowledge()
    }
}
