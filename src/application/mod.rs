//! Application layer - use cases and orchestration.
//!
//! This layer contains the ingestion, extraction, view and export logic.

pub mod collection;
pub mod dates;
pub mod exporter;
pub mod extractor;
pub mod formatter;
pub mod ingest;
pub mod resolver;

pub use collection::{compare_dates, filter_links, sort_links, LinkCollection};
pub use exporter::{
    export_csv, export_json, export_txt, import_json, ExportDocument, ExportFile, ExportFormat,
    ExportOptions, ExportedLink, Exporter,
};
pub use extractor::{extract_links, extract_urls, strip_urls};
pub use formatter::{format_links_table, format_share_summary, format_stats, format_users};
pub use ingest::{ingest, CsvIngester, Ingestion};
pub use resolver::resolve_domain;
