//! SQLite-backed document store

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;

use super::DocumentStore;
use crate::knowledge::Document;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect (creating the file if needed) and run pending migrations
    pub async fn open(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true);

        // In-memory databases live and die with their connection, so keep exactly one forever
        let in_memory = database_url.contains(":memory:");
        if !in_memory {
            ensure_parent_dir(options.get_filename())?;
        }
        let mut pool_options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 4 });
        if in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {}", database_url))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;

        log::debug!("Opened SQLite document store at {}", database_url);
        Ok(Self { pool })
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.is_dir() {
        return Ok(());
    }

    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
    log::debug!("Created database directory {}", parent.display());
    Ok(())
}

#[async_trait]
impl DocumentStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn fetch_documents(&self) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            "SELECT slug, title, category, tags_json, created_at FROM documents ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch documents")?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            let slug: String = row.try_get("slug")?;
            let tags_json: String = row.try_get("tags_json")?;
            let created_at: String = row.try_get("created_at")?;

            let tags: Vec<String> = serde_json::from_str(&tags_json)
                .with_context(|| format!("Invalid tags for document '{}'", slug))?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .with_context(|| format!("Invalid created_at for document '{}'", slug))?
                .with_timezone(&Utc);

            documents.push(Document {
                title: row.try_get("title")?,
                category: row.try_get("category")?,
                slug,
                tags,
                created_at,
            });
        }

        log::debug!("Fetched {} documents from SQLite", documents.len());
        Ok(documents)
    }

    async fn insert_documents(&self, documents: &[Document]) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start transaction")?;

        for doc in documents {
            let tags_json = serde_json::to_string(&doc.tags)?;
            sqlx::query(
                "INSERT INTO documents (slug, title, category, tags_json, created_at)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&doc.slug)
            .bind(&doc.title)
            .bind(&doc.category)
            .bind(tags_json)
            .bind(doc.created_at.to_rfc3339())
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert document '{}'", doc.slug))?;
        }

        // Dropping the transaction on error rolls back the whole batch
        tx.commit().await.context("Failed to commit document batch")?;

        log::info!("Inserted {} documents into SQLite", documents.len());
        Ok(())
    }
}
