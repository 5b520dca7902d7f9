//! Runtime configuration
//!
//! Resolution order: explicit `--config` file, else
//! `~/.config/kbase/config.toml` if present, else defaults. `KBASE_*`
//! environment variables (including those from a `.env` file) override
//! whatever the file set.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::knowledge::SortKey;

const APP_DIR: &str = "kbase";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Rest,
}

impl std::str::FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "rest" => Ok(Backend::Rest),
            other => anyhow::bail!("Unknown backend '{}'. Expected 'sqlite' or 'rest'", other),
        }
    }
}

/// Connection settings for the hosted REST backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: Backend,
    /// SQLite URL; falls back to a database under the user data dir
    pub database_url: Option<String>,
    /// Table / collection holding knowledge base documents
    pub table: String,
    pub default_sort: SortKey,
    pub rest: RestConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            database_url: None,
            table: "documents".to_string(),
            default_sort: SortKey::default(),
            rest: RestConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file (if any) and apply environment overrides
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `KBASE_*` overrides using the given variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("KBASE_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(url) = lookup("KBASE_DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(url) = lookup("KBASE_REST_URL") {
            self.rest.url = Some(url);
        }
        if let Some(key) = lookup("KBASE_REST_KEY") {
            self.rest.api_key = Some(key);
        }
        if let Some(table) = lookup("KBASE_TABLE") {
            self.table = table;
        }
        if let Some(sort) = lookup("KBASE_DEFAULT_SORT") {
            self.default_sort = sort
                .parse()
                .context("Invalid KBASE_DEFAULT_SORT")?;
        }
        Ok(())
    }

    /// Effective SQLite URL; the store creates the directory when it opens
    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }

        let path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("kbase.db");
        format!("sqlite://{}", path.display())
    }

    /// Render for display with the API key masked
    pub fn to_display_toml(&self) -> Result<String> {
        let mut shown = self.clone();
        if let Some(key) = &shown.rest.api_key {
            shown.rest.api_key = Some(mask_secret(key));
        }
        if shown.database_url.is_none() {
            shown.database_url = Some(self.database_url());
        }
        toml::to_string_pretty(&shown).context("Failed to render config")
    }
}

/// `~/.config/kbase/config.toml` (platform equivalent)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.table, "documents");
        assert_eq!(config.default_sort, SortKey::NewestFirst);
    }

    #[test]
    fn test_parse_toml() {
        let config = Config::from_toml(
            r#"
            backend = "rest"
            table = "kb_documents"
            default_sort = "title-desc"

            [rest]
            url = "https://example.supabase.co"
            api_key = "secret-key"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend, Backend::Rest);
        assert_eq!(config.table, "kb_documents");
        assert_eq!(config.default_sort, SortKey::TitleDesc);
        assert_eq!(config.rest.url.as_deref(), Some("https://example.supabase.co"));
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_unknown_sort_in_file_is_rejected() {
        assert!(Config::from_toml(r#"default_sort = "alphabetical""#).is_err());
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("KBASE_BACKEND", "REST"),
            ("KBASE_REST_URL", "http://localhost:54321"),
            ("KBASE_REST_KEY", "anon"),
            ("KBASE_DEFAULT_SORT", "tags-desc"),
        ]);

        let mut config = Config::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.backend, Backend::Rest);
        assert_eq!(config.rest.api_key.as_deref(), Some("anon"));
        assert_eq!(config.default_sort, SortKey::TagsDesc);
        assert_eq!(config.table, "documents");
    }

    #[test]
    fn test_bad_override_fails() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == "KBASE_DEFAULT_SORT").then(|| "random".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_display_masks_api_key() {
        let mut config = Config::default();
        config.database_url = Some("sqlite::memory:".to_string());
        config.rest.api_key = Some("supersecretvalue".to_string());

        let rendered = config.to_display_toml().unwrap();
        assert!(rendered.contains("supe****"));
        assert!(!rendered.contains("supersecretvalue"));
    }
}
