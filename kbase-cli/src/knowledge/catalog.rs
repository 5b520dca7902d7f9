//! Built-in seed catalog
//!
//! The catalog is compiled into the binary from `catalog/*.json`, one
//! document per file. File names define catalog order.

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};
use std::collections::HashSet;

use super::models::Document;

static CATALOG_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/catalog");

/// Immutable, ordered list of candidate documents
#[derive(Debug, Clone)]
pub struct Catalog {
    documents: Vec<Document>,
}

impl Catalog {
    /// Load the catalog embedded at build time
    pub fn embedded() -> Result<Self> {
        let mut files: Vec<_> = CATALOG_DIR
            .files()
            .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort_by(|a, b| a.path().cmp(b.path()));

        let mut documents = Vec::with_capacity(files.len());
        for file in files {
            let contents = file
                .contents_utf8()
                .with_context(|| format!("Catalog file is not UTF-8: {}", file.path().display()))?;
            let doc: Document = serde_json::from_str(contents)
                .with_context(|| format!("Failed to parse catalog file: {}", file.path().display()))?;
            documents.push(doc);
        }

        let catalog = Self::from_documents(documents)?;
        if catalog.is_empty() {
            log::warn!("Embedded catalog is empty; there is nothing to import");
        } else {
            log::debug!("Loaded {} embedded catalog documents", catalog.len());
        }
        Ok(catalog)
    }

    /// Build a catalog from an explicit list, rejecting blank or repeated slugs
    pub fn from_documents(documents: Vec<Document>) -> Result<Self> {
        let mut seen = HashSet::new();
        for doc in &documents {
            if doc.slug.trim().is_empty() {
                anyhow::bail!("Catalog document '{}' has an empty slug", doc.title);
            }
            if !seen.insert(doc.slug.as_str()) {
                anyhow::bail!("Duplicate slug in catalog: '{}'", doc.slug);
            }
        }

        Ok(Self { documents })
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::models::fixtures::slug_only;

    #[test]
    fn test_embedded_catalog_loads_in_file_order() {
        let catalog = Catalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.documents()[0].slug, "welcome-to-the-knowledge-base");

        let unique: HashSet<_> = catalog.documents().iter().map(|d| &d.slug).collect();
        assert_eq!(unique.len(), catalog.len());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let result = Catalog::from_documents(vec![slug_only("a"), slug_only("b"), slug_only("a")]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Duplicate slug"));
    }

    #[test]
    fn test_blank_slug_rejected() {
        assert!(Catalog::from_documents(vec![slug_only("  ")]).is_err());
    }
}
