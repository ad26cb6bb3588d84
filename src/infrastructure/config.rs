//! Configuration file management.
//!
//! Handles loading, creating and rendering TOML configuration files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError, Result};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"# Chat Link Extractor Configuration
# Auto-generated - edit as needed

[ingest]
# Uploads larger than this many bytes are rejected (default: 10 MiB)
max_file_bytes = 10485760

# Header names accepted for each required column (case-insensitive)
date_columns = ["Date", "timestamp", "time", "날짜"]
user_columns = ["User", "author", "name", "sender", "사용자"]
message_columns = ["Message", "text", "content", "메시지"]

[export]
# Label and file name language: "en" or "ko"
locale = "en"

# Remove URLs from the message column of exports
strip_urls = false

[view]
# Initial sort: date, user, domain or url
sort_field = "date"

# asc or desc
sort_direction = "desc"
"#;

/// Get the path to the configuration file, honoring an override.
#[must_use]
pub fn config_file_path(custom: Option<&Path>) -> PathBuf {
    custom.map_or_else(AppConfig::default_config_path, Path::to_path_buf)
}

/// Load configuration from file or fall back to defaults.
///
/// # Errors
/// Returns error if file exists but cannot be read or parsed.
pub fn load_config(custom: Option<&Path>) -> Result<AppConfig> {
    let config_path = config_file_path(custom);

    if config_path.exists() {
        load_config_from_file(&config_path)
    } else if custom.is_some() {
        Err(AppError::Config {
            message: format!("Config file not found: {}", config_path.display()),
        })
    } else {
        tracing::debug!("No config at {}, using defaults", config_path.display());
        Ok(AppConfig::default())
    }
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

/// Create the commented default configuration file if it doesn't exist.
///
/// Returns whether a file was written.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| AppError::io("Failed to create default config", e))?;

    tracing::info!(path = %path.display(), "Created default configuration");

    Ok(true)
}

/// Render a configuration as TOML.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| AppError::Config {
        message: format!("Failed to serialize config: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Locale, SortDirection, SortField};
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses() {
        let config: AppConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_rendered_config_loads() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.export.locale = Locale::Ko;
        config.export.strip_urls = true;
        config.view.sort_field = SortField::Domain;
        config.view.sort_direction = SortDirection::Asc;

        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, render_config(&config).unwrap()).unwrap();
        let loaded = load_config(Some(&config_path)).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_custom_config_is_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            load_config(Some(&missing)),
            Err(AppError::Config { .. })
        ));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[export]\nlocale = \"fr\"\n").unwrap();
        assert!(load_config_from_file(&path).is_err());
    }

    #[test]
    fn test_ensure_config_exists_writes_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(ensure_config_exists(&path).unwrap());
        assert!(!ensure_config_exists(&path).unwrap());
        assert_eq!(load_config_from_file(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_render_config_round_trips() {
        let rendered = render_config(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}
