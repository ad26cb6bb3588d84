//! Domain models for extracted chat links.
//!
//! These models represent the entities produced by one ingestion run.

use serde::{Deserialize, Serialize};

/// Domain used when a URL cannot be parsed into a hostname.
pub const UNKNOWN_DOMAIN: &str = "Unknown";

/// A single row of a chat export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Raw timestamp as written in the export.
    pub timestamp: String,
    /// Author of the message.
    pub author: String,
    /// Plain message text.
    pub text: String,
}

impl ChatMessage {
    /// Creates a message from its three fields.
    pub fn new(
        timestamp: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            author: author.into(),
            text: text.into(),
        }
    }

    /// Whether all required fields carry a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.timestamp, &self.author, &self.text]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// One URL occurrence enriched with its originating message's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLink {
    /// `{message_index}-{url_index}`, unique within a collection.
    pub id: String,
    /// The matched URL, whitespace trimmed.
    pub url: String,
    /// Full text of the originating message.
    pub message: String,
    /// Author of the originating message.
    pub user: String,
    /// Raw timestamp of the originating message.
    pub date: String,
    /// Hostname of `url`, or [`UNKNOWN_DOMAIN`].
    pub domain: String,
}

impl ExtractedLink {
    /// Builds the deterministic record id.
    #[must_use]
    pub fn make_id(message_index: usize, url_index: usize) -> String {
        format!("{message_index}-{url_index}")
    }
}

/// Summary statistics for a link collection and its active view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    /// Links in the unfiltered collection.
    pub total_links: usize,
    /// Distinct authors in the unfiltered collection.
    pub unique_users: usize,
    /// Distinct domains in the unfiltered collection.
    pub unique_domains: usize,
    /// Links in the active view.
    pub filtered_links: usize,
}
