//! Hosted table store over a PostgREST-style HTTP endpoint
//!
//! Reads: `GET {url}/rest/v1/{table}?select=...&order=slug.asc&limit=..&offset=..`,
//! paged until the reported total (or a short page) is reached. Hosted
//! backends cap a single response (Supabase defaults to 1000 rows), so one
//! unpaged GET can silently drop stored slugs.
//! Writes: `POST {url}/rest/v1/{table}` with a JSON array body. The backend
//! inserts the array in a single statement, so a batch lands all-or-nothing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_RANGE, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;

use super::DocumentStore;
use crate::config::RestConfig;
use crate::knowledge::Document;

const SELECT_COLUMNS: &str = "slug,title,category,tags,created_at";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Rows requested per page; matches the common hosted `max-rows` cap
const FETCH_PAGE_SIZE: usize = 1000;

pub struct RestStore {
    client: reqwest::Client,
    table_url: String,
    page_size: usize,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str, table: &str) -> Result<Self> {
        let client = client_builder(api_key)?
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            table_url: table_url(base_url, table),
            page_size: FETCH_PAGE_SIZE,
        })
    }

    pub fn from_config(config: &RestConfig, table: &str) -> Result<Self> {
        let Some(url) = config.url.as_deref() else {
            anyhow::bail!("REST backend selected but no url configured (set KBASE_REST_URL)");
        };
        let Some(api_key) = config.api_key.as_deref() else {
            anyhow::bail!("REST backend selected but no api key configured (set KBASE_REST_KEY)");
        };
        Self::new(url, api_key, table)
    }

    async fn fetch_page(&self, offset: usize) -> Result<(Vec<Document>, Option<usize>)> {
        let limit = self.page_size.to_string();
        let offset = offset.to_string();
        log::debug!("GET {} (limit={}, offset={})", self.table_url, limit, offset);

        let response = self
            .client
            .get(&self.table_url)
            .query(&[
                ("select", SELECT_COLUMNS),
                ("order", "slug.asc"),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .header("Prefer", "count=exact")
            .send()
            .await
            .context("Failed to reach document store")?;

        let response = ensure_success(response, "Fetching documents").await?;
        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(content_range_total);

        let page = response
            .json()
            .await
            .context("Failed to decode documents response")?;
        Ok((page, total))
    }
}

/// Default headers carry the key both as `apikey` and as a bearer token
fn client_builder(api_key: &str) -> Result<reqwest::ClientBuilder> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "apikey",
        HeaderValue::from_str(api_key).context("API key contains invalid header characters")?,
    );
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))
            .context("API key contains invalid header characters")?,
    );

    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT))
}

/// Build the table endpoint, tolerating a trailing slash on the base url
fn table_url(base_url: &str, table: &str) -> String {
    format!(
        "{}/rest/v1/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(table)
    )
}

/// Total row count from `Content-Range: 0-999/1234`; `*` means unknown
fn content_range_total(value: &str) -> Option<usize> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

async fn ensure_success(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("{} failed with HTTP {}: {}", action, status, body.trim())
}

#[async_trait]
impl DocumentStore for RestStore {
    fn name(&self) -> &str {
        "rest"
    }

    async fn fetch_documents(&self) -> Result<Vec<Document>> {
        let mut documents: Vec<Document> = Vec::new();

        loop {
            let (page, total) = self.fetch_page(documents.len()).await?;
            let fetched = page.len();
            documents.extend(page);

            log::debug!(
                "Fetched {} documents over REST, {} so far, total={:?}",
                fetched,
                documents.len(),
                total
            );

            // A known total wins over page length: the server may cap pages below our limit
            let done = match total {
                Some(total) => fetched == 0 || documents.len() >= total,
                None => fetched < self.page_size,
            };
            if done {
                break;
            }
        }

        log::debug!("Fetched {} documents over REST", documents.len());
        Ok(documents)
    }

    async fn insert_documents(&self, documents: &[Document]) -> Result<()> {
        log::debug!("POST {} ({} documents)", self.table_url, documents.len());

        let response = self
            .client
            .post(&self.table_url)
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=minimal")
            .json(documents)
            .send()
            .await
            .context("Failed to reach document store")?;

        ensure_success(response, "Inserting documents").await?;

        log::info!("Inserted {} documents over REST", documents.len());
        Ok(())
    }
}
