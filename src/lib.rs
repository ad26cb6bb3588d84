//! Chat Link Extractor - pull every link out of a chat export.
//!
//! The pipeline is a chain of plain functions:
//!
//! ```text
//! CSV bytes -> ingest -> ChatMessage[] -> extract_links -> LinkCollection
//!           -> view (search / user / sort) -> Exporter -> bytes + file name
//! ```
//!
//! ```
//! use chat_link_extractor::application::{ingest, ExportFormat, Exporter, LinkCollection};
//! use chat_link_extractor::domain::ViewState;
//!
//! let csv = "Date,User,Message\n2024-01-01 10:00,Alice,see https://a.com/x\n";
//! let (messages, error) = ingest(csv.as_bytes());
//! assert!(error.is_none());
//!
//! let links = LinkCollection::from_messages(&messages);
//! let view = links.view(&ViewState::default());
//! let file = Exporter::default().export(&view, ExportFormat::Json).unwrap();
//! assert!(file.filename.ends_with(".json"));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
