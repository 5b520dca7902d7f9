use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Config;
use crate::knowledge::{Document, SortKey, sort_documents};
use crate::store::{DocumentStore, open_store};

use super::output::{DOCUMENT_HEADERS, document_row, render_table};

pub async fn run(config: &Config, sort: Option<SortKey>, category: Option<&str>) -> Result<()> {
    let sort = sort.unwrap_or(config.default_sort);
    let store = open_store(config).await?;

    let documents = match store.fetch_documents().await {
        Ok(documents) => documents,
        Err(e) => {
            println!("{}", "No documents available.".yellow());
            return Err(e).context(format!("Failed to read documents from {} store", store.name()));
        }
    };

    let documents = filter_by_category(documents, category);
    if documents.is_empty() {
        println!("{}", "No documents found.".dimmed());
        return Ok(());
    }

    let sorted = sort_documents(sort, &documents);
    let rows: Vec<Vec<String>> = sorted.iter().map(document_row).collect();
    print!("{}", render_table(&DOCUMENT_HEADERS, &rows));
    println!(
        "\n{} documents, sorted by {}",
        sorted.len(),
        sort.label().to_lowercase()
    );
    Ok(())
}

/// Keep documents whose category matches, ignoring ASCII case
fn filter_by_category(documents: Vec<Document>, category: Option<&str>) -> Vec<Document> {
    match category {
        Some(wanted) => documents
            .into_iter()
            .filter(|d| d.category.eq_ignore_ascii_case(wanted.trim()))
            .collect(),
        None => documents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::models::fixtures::doc;

    #[test]
    fn test_filter_by_category() {
        let docs = vec![
            doc("a", "A", "Sales", &[], 1),
            doc("b", "B", "legal", &[], 2),
            doc("c", "C", "sales", &[], 3),
        ];

        let filtered = filter_by_category(docs.clone(), Some("sales"));
        let slugs: Vec<&str> = filtered.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "c"]);

        assert_eq!(filter_by_category(docs, None).len(), 3);
    }
}
