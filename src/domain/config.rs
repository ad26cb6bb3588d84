//! Application configuration models.
//!
//! Contains the ingestion limits, header aliases, export preferences
//! and the initial view used when nothing is given on the command line.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::view::{SortDirection, SortField, ViewState};

/// Largest accepted upload, in bytes (10 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Language used for export labels and file names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "ko" | "korean" => Ok(Self::Ko),
            _ => Err(format!("Unknown locale: {s}. Use: en, ko")),
        }
    }
}

/// Configuration for CSV ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Uploads larger than this are rejected before parsing.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Header names accepted for the timestamp column.
    #[serde(default = "default_date_columns")]
    pub date_columns: Vec<String>,

    /// Header names accepted for the author column.
    #[serde(default = "default_user_columns")]
    pub user_columns: Vec<String>,

    /// Header names accepted for the message text column.
    #[serde(default = "default_message_columns")]
    pub message_columns: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            date_columns: default_date_columns(),
            user_columns: default_user_columns(),
            message_columns: default_message_columns(),
        }
    }
}

const fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

fn default_date_columns() -> Vec<String> {
    to_strings(&["Date", "timestamp", "time", "날짜"])
}

fn default_user_columns() -> Vec<String> {
    to_strings(&["User", "author", "name", "sender", "사용자"])
}

fn default_message_columns() -> Vec<String> {
    to_strings(&["Message", "text", "content", "메시지"])
}

/// Configuration for exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Label and file name language.
    #[serde(default)]
    pub locale: Locale,

    /// Remove URLs from the message field of exported records.
    #[serde(default)]
    pub strip_urls: bool,
}

/// Initial view settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub sort_field: SortField,

    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl ViewConfig {
    /// A fresh view state with this configuration's sort order.
    #[must_use]
    pub fn initial_view(&self) -> ViewState {
        ViewState {
            sort_field: self.sort_field,
            sort_direction: self.sort_direction,
            ..ViewState::default()
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub view: ViewConfig,
}

impl AppConfig {
    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chat-links")
    }

    /// Get the default config file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        Self::default_data_dir().join("config.toml")
    }
}
