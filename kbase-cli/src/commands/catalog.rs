use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::knowledge::{Catalog, Importer, SortKey, sort_documents};
use crate::store::open_store;

use super::output::{DOCUMENT_HEADERS, document_row, render_table};

pub async fn run(config: &Config, sort: Option<SortKey>) -> Result<()> {
    let store = open_store(config).await?;
    let mut importer = Importer::new(store, Catalog::embedded()?);

    // Display only: an unreadable store shows "?" instead of failing
    if let Err(e) = importer.refresh().await {
        log::warn!("{:#}", e);
    }
    let existing = importer.existing().value();

    let catalog = importer.catalog();
    let documents = match sort {
        Some(key) => sort_documents(key, catalog.documents()),
        None => catalog.documents().to_vec(),
    };

    let mut headers = vec!["IMPORTED"];
    headers.extend(DOCUMENT_HEADERS);

    let rows: Vec<Vec<String>> = documents
        .iter()
        .map(|doc| {
            let marker = match existing {
                Some(set) if set.contains(&doc.slug) => "yes",
                Some(_) => "no",
                None => "?",
            };
            let mut row = vec![marker.to_string()];
            row.extend(document_row(doc));
            row
        })
        .collect();

    print!("{}", render_table(&headers, &rows));

    match importer.plan() {
        Some(plan) => println!(
            "\n{} catalog documents, {} not yet imported",
            catalog.len(),
            plan.len().to_string().cyan()
        ),
        None => println!("\n{}", "Store unavailable; import status unknown.".yellow()),
    }
    Ok(())
}
