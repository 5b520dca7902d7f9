//! Diff the seed catalog against the document store.
//!
//! Matching is by exact slug. The batch keeps catalog order so imports
//! land in the same sequence every time.

use super::catalog::Catalog;
use super::models::{Document, ExistingSet};

/// Collect the slugs of documents read from the store
pub fn existing_slugs(documents: &[Document]) -> ExistingSet {
    documents.iter().map(|d| d.slug.clone()).collect()
}

/// Outcome of diffing the catalog against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    /// Catalog documents not yet in the store, in catalog order
    pub batch: Vec<Document>,
    /// Catalog slugs already present (skipped)
    pub already_present: Vec<String>,
}

impl ImportPlan {
    /// Nothing to import: the import action must stay disabled
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.batch.iter().map(|d| d.slug.as_str()).collect()
    }
}

/// Compute the import batch: every catalog document whose slug is not in `existing`
pub fn plan_import(catalog: &Catalog, existing: &ExistingSet) -> ImportPlan {
    let mut batch = Vec::new();
    let mut already_present = Vec::new();

    for doc in catalog.documents() {
        if existing.contains(&doc.slug) {
            already_present.push(doc.slug.clone());
        } else {
            batch.push(doc.clone());
        }
    }

    log::debug!(
        "Import plan: {} to import, {} already present",
        batch.len(),
        already_present.len()
    );

    ImportPlan {
        batch,
        already_present,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::models::fixtures::slug_only;

    fn catalog(slugs: &[&str]) -> Catalog {
        Catalog::from_documents(slugs.iter().map(|s| slug_only(s)).collect()).unwrap()
    }

    #[test]
    fn test_skips_existing_and_keeps_catalog_order() {
        let catalog = catalog(&["a", "b", "c"]);
        let existing = existing_slugs(&[slug_only("b")]);

        let plan = plan_import(&catalog, &existing);
        assert_eq!(plan.slugs(), vec!["a", "c"]);
        assert_eq!(plan.already_present, vec!["b".to_string()]);
    }

    #[test]
    fn test_batch_never_intersects_existing() {
        let catalog = catalog(&["a", "b", "c", "d", "e"]);
        let existing = existing_slugs(&[slug_only("e"), slug_only("a"), slug_only("zzz")]);

        let plan = plan_import(&catalog, &existing);
        assert!(plan.batch.iter().all(|d| !existing.contains(&d.slug)));
        assert_eq!(plan.slugs(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_fully_imported_catalog_yields_empty_plan() {
        let catalog = catalog(&["a", "b"]);
        let existing = existing_slugs(&[slug_only("b"), slug_only("a"), slug_only("extra")]);

        let plan = plan_import(&catalog, &existing);
        assert!(plan.is_empty());
        assert_eq!(plan.len(), 0);
    }

    #[test]
    fn test_empty_store_imports_everything() {
        let catalog = catalog(&["a", "b"]);
        let plan = plan_import(&catalog, &ExistingSet::new());
        assert_eq!(plan.slugs(), vec!["a", "b"]);
        assert!(plan.already_present.is_empty());
    }

    #[test]
    fn test_plan_is_idempotent_for_unchanged_store() {
        let catalog = catalog(&["a", "b", "c"]);
        let stored = vec![slug_only("c")];

        let first = plan_import(&catalog, &existing_slugs(&stored));
        let second = plan_import(&catalog, &existing_slugs(&stored));
        assert_eq!(first, second);
    }
}
