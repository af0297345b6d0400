//! Configuration management for beleza.
//!
//! Loads configuration from ${BELEZA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default base endpoint for the booking API.
pub const DEFAULT_BASE_URL: &str = "https://api.beleza.app";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for beleza configuration and data directories.
    //!
    //! BELEZA_HOME resolution order:
    //! 1. BELEZA_HOME environment variable (if set)
    //! 2. ~/.config/beleza (default)

    use std::path::PathBuf;

    /// Returns the beleza home directory.
    ///
    /// Checks BELEZA_HOME env var first, falls back to ~/.config/beleza
    pub fn beleza_home() -> PathBuf {
        if let Ok(home) = std::env::var("BELEZA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("beleza"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        beleza_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        beleza_home().join("session.json")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base endpoint for the booking API
    pub base_url: String,

    /// Default store (tenant) when the session carries none
    pub store_id: Option<String>,

    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            store_id: None,
            request_timeout_secs: 0,
        }
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the base URL with precedence: env > config > default.
    ///
    /// A trailing slash is stripped so paths can be appended verbatim.
    ///
    /// # Errors
    /// Returns an error if the resolved value is not a valid URL.
    pub fn resolved_base_url(&self) -> Result<String> {
        let raw = match std::env::var("BELEZA_BASE_URL") {
            Ok(env_url) if !env_url.trim().is_empty() => env_url.trim().to_string(),
            _ => self.base_url.trim().to_string(),
        };

        url::Url::parse(&raw).with_context(|| format!("Invalid base URL: {raw}"))?;

        Ok(raw.trim_end_matches('/').to_string())
    }

    /// Saves only the `store_id` field to the config file.
    ///
    /// Creates the file if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_store_id(store_id: &str) -> Result<()> {
        Self::save_store_id_to(&paths::config_path(), store_id)
    }

    /// Saves only the `store_id` field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    pub fn save_store_id_to(path: &Path, store_id: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["store_id"] = value(store_id);

        Self::write_config(path, &doc.to_string())
    }

    /// Writes a fresh config file from the embedded template.
    ///
    /// # Errors
    /// Returns an error if the file already exists.
    pub fn init_at(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: defaults are used when the file is absent.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.store_id, None);
        assert_eq!(config.request_timeout_secs, 0);
    }

    /// Test: partial files fall back to defaults for missing fields.
    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "store_id = \"rj-centro-02\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.store_id.as_deref(), Some("rj-centro-02"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    /// Test: save_store_id_to preserves customized values via template merge.
    #[test]
    fn test_save_store_id_preserves_user_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"http://localhost:3333\"\n").unwrap();

        Config::save_store_id_to(&path, "sp-moema-01").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://localhost:3333");
        assert_eq!(config.store_id.as_deref(), Some("sp-moema-01"));

        // Template comments survive the rewrite
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# beleza configuration"));
    }

    /// Test: trailing slash is stripped from the resolved base URL.
    #[test]
    fn test_resolved_base_url_strips_trailing_slash() {
        let config = Config {
            base_url: "http://localhost:8080/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.resolved_base_url().unwrap(), "http://localhost:8080");
    }

    /// Test: invalid base URL is rejected.
    #[test]
    fn test_resolved_base_url_rejects_garbage() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(config.resolved_base_url().is_err());
    }
}
