//! Document ordering
//!
//! Each [`SortKey`] maps to exactly one comparator. The match in
//! [`SortKey::compare`] is exhaustive, so a new key cannot be added
//! without also giving it an ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::models::Document;

/// User-selectable ordering for a document list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    NewestFirst,
    OldestFirst,
    TitleAsc,
    TitleDesc,
    CategoryAsc,
    TagsDesc,
    TagsAsc,
}

impl SortKey {
    /// All keys in the order they are offered to the user
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::NewestFirst,
            SortKey::OldestFirst,
            SortKey::TitleAsc,
            SortKey::TitleDesc,
            SortKey::CategoryAsc,
            SortKey::TagsDesc,
            SortKey::TagsAsc,
        ]
    }

    /// Stable identifier used on the command line and in config files
    pub fn id(&self) -> &'static str {
        match self {
            SortKey::NewestFirst => "newest-first",
            SortKey::OldestFirst => "oldest-first",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::CategoryAsc => "category-asc",
            SortKey::TagsDesc => "tags-desc",
            SortKey::TagsAsc => "tags-asc",
        }
    }

    /// Human-readable label for selection lists
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::NewestFirst => "Newest first",
            SortKey::OldestFirst => "Oldest first",
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
            SortKey::CategoryAsc => "Category",
            SortKey::TagsDesc => "Most tags",
            SortKey::TagsAsc => "Fewest tags",
        }
    }

    /// Compare two documents under this key, including its tie-break
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        match self {
            SortKey::NewestFirst => b
                .created_at
                .cmp(&a.created_at)
                .then_with(|| a.slug.cmp(&b.slug)),
            SortKey::OldestFirst => a
                .created_at
                .cmp(&b.created_at)
                .then_with(|| a.slug.cmp(&b.slug)),
            // Byte-wise: uppercase ASCII sorts before lowercase
            SortKey::TitleAsc => a.title.cmp(&b.title).then_with(|| a.slug.cmp(&b.slug)),
            SortKey::TitleDesc => b.title.cmp(&a.title).then_with(|| a.slug.cmp(&b.slug)),
            SortKey::CategoryAsc => a
                .category
                .cmp(&b.category)
                .then_with(|| a.title.cmp(&b.title)),
            SortKey::TagsDesc => b
                .tag_count()
                .cmp(&a.tag_count())
                .then_with(|| a.title.cmp(&b.title)),
            SortKey::TagsAsc => a
                .tag_count()
                .cmp(&b.tag_count())
                .then_with(|| a.title.cmp(&b.title)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortKey::all()
            .iter()
            .copied()
            .find(|key| key.id() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = SortKey::all().iter().map(|k| k.id()).collect();
                anyhow::anyhow!(
                    "Unknown sort key '{}'. Expected one of: {}",
                    wanted,
                    valid.join(", ")
                )
            })
    }
}

/// Return a new list with the same documents ordered by `key`.
///
/// Uses a stable sort: documents that compare equal keep their input order.
pub fn sort_documents(key: SortKey, documents: &[Document]) -> Vec<Document> {
    let mut sorted = documents.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}
