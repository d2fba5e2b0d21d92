use crate::{error::Result, ConsoleError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_API_BASE_URL: &str = "FOLIO_API_BASE_URL";
pub const ENV_API_TOKEN: &str = "FOLIO_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Server root; the REST resources live under `{api_base_url}/api`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub api_token: Option<String>,
    /// Pretty-print `content` JSON when writing it back.
    #[serde(default = "default_pretty_content")]
    pub pretty_content: bool,
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_pretty_content() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            api_token: None,
            pretty_content: default_pretty_content(),
        }
    }
}

impl Config {
    pub fn api_root(&self) -> String {
        format!("{}/api", self.api_base_url.trim_end_matches('/'))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Environment variables win over the file so CI and one-off runs can point elsewhere.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_BASE_URL) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        if let Ok(token) = std::env::var(ENV_API_TOKEN) {
            let token = token.trim().to_string();
            self.api_token = if token.is_empty() { None } else { Some(token) };
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir()
        .ok_or_else(|| ConsoleError::Internal("Failed to get config directory".to_string()))?;

    path.push("folio-console");
    fs::create_dir_all(&path)?;

    path.push("config.json");
    Ok(path)
}

pub fn load_config() -> Result<Config> {
    let mut config = load_config_from(&get_config_path()?)?;
    config.apply_env_overrides();
    Ok(config)
}

/// Reads the config at `path`, writing defaults first when the file is missing.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        let default_config = Config::default();
        save_config_to(path, &default_config)?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| ConsoleError::Internal(format!("Failed to parse config: {}", e)))?;
    let config: Config = serde_json::from_value(value.clone())
        .map_err(|e| ConsoleError::Internal(format!("Failed to parse config: {}", e)))?;

    // Older files predate some keys; persist them so the file documents every setting.
    let needs_backfill = value
        .as_object()
        .map(|obj| {
            ["api_base_url", "request_timeout_secs", "pretty_content"]
                .iter()
                .any(|key| !obj.contains_key(*key))
        })
        .unwrap_or(false);
    if needs_backfill {
        save_config_to(path, &config)?;
    }

    Ok(config)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ConsoleError::Internal(format!("Failed to serialize config: {}", e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = load_config_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_is_backfilled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_base_url":"https://blog.example.com"}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.api_base_url, "https://blog.example.com");
        assert_eq!(config.request_timeout_secs, 10);
        assert!(config.pretty_content);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("request_timeout_secs"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{oops").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConsoleError::Internal(_))));
    }

    #[test]
    fn test_api_root_strips_trailing_slash() {
        let config = Config {
            api_base_url: "http://localhost:8080/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.api_root(), "http://localhost:8080/api");
    }
}
