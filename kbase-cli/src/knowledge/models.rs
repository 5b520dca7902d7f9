//! Core data types for the knowledge base
//!
//! A document is identified by its slug. Everything else is display data
//! used for listing and ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// A knowledge base document as stored in the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identity key within a collection
    pub slug: String,
    pub title: String,
    pub category: String,
    /// Ordered tag list (order is preserved for display)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Tags joined for single-line display
    pub fn tags_display(&self) -> String {
        self.tags.join(", ")
    }
}

/// Nullable array columns come back as `null` rather than `[]`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Slugs currently present in the document store at read time
pub type ExistingSet = HashSet<String>;

/// Result of a store read, as seen by a consumer that may not have read yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Resource<T> {
    #[default]
    NotAsked,
    Success(T),
    Failure(String),
}

impl<T> Resource<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Resource::Success(value) => Some(value),
            _ => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_deserializes_without_tags() {
        let json = r#"{
            "slug": "pricing-faq",
            "title": "Pricing FAQ",
            "category": "sales",
            "created_at": "2025-03-01T10:00:00Z"
        }"#;

        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.slug, "pricing-faq");
        assert!(doc.tags.is_empty());
        assert_eq!(doc.tag_count(), 0);
    }

    #[test]
    fn test_document_deserializes_null_tags() {
        let json = r#"[
            {"slug": "a", "title": "A", "category": "sales", "tags": null, "created_at": "2025-03-01T10:00:00Z"},
            {"slug": "b", "title": "B", "category": "sales", "tags": ["x", "y"], "created_at": "2025-03-02T10:00:00Z"}
        ]"#;

        let docs: Vec<Document> = serde_json::from_str(json).unwrap();
        assert!(docs[0].tags.is_empty());
        assert_eq!(docs[1].tags, vec!["x", "y"]);
    }

    #[test]
    fn test_resource_accessors() {
        let loaded: Resource<u32> = Resource::Success(3);
        assert_eq!(loaded.value(), Some(&3));

        let failed: Resource<u32> = Resource::Failure("boom".to_string());
        assert_eq!(failed.value(), None);
        assert_eq!(Resource::<u32>::default(), Resource::NotAsked);
    }
}
