//! Domain layer - core types.
//!
//! This layer contains pure domain models, view state and error types
//! without any I/O.

pub mod config;
pub mod error;
pub mod models;
pub mod view;

pub use config::{AppConfig, ExportConfig, IngestConfig, Locale, ViewConfig};
pub use error::{AppError, Result};
pub use models::{ChatMessage, ExtractedLink, LinkStats, UNKNOWN_DOMAIN};
pub use view::{SortDirection, SortField, ViewState};
