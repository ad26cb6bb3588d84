//! Infrastructure layer - external adapters (filesystem).
//!
//! This layer handles all I/O operations.

pub mod config;
pub mod upload;

pub use config::{
    config_file_path, ensure_config_exists, load_config, load_config_from_file, render_config,
};
pub use upload::{read_upload, validate_upload};
