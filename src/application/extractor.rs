//! Link extraction service.
//!
//! Finds URLs in message text and turns ingested messages into
//! [`ExtractedLink`] records.
//!
//! A URL is any token starting with `http://` or `https://` and running up
//! to the next whitespace character. Trailing punctuation stays part of the
//! match: `(see https://a.com/x).` yields `https://a.com/x).`.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{ChatMessage, ExtractedLink};

use super::resolver::resolve_domain;

/// `\s` plus U+FEFF, which chat exports sometimes leave inside text.
#[allow(clippy::unwrap_used)]
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s\x{FEFF}]+").unwrap());

/// Horizontal whitespace runs left behind after removing a URL.
#[allow(clippy::unwrap_used)]
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Returns the URLs in `text`, in order of appearance.
#[must_use]
pub fn extract_urls(text: &str) -> Vec<&str> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|url| !url.is_empty())
        .collect()
}

/// Removes every URL from `text`, collapsing the gaps they leave.
#[must_use]
pub fn strip_urls(text: &str) -> String {
    let removed = URL_PATTERN.replace_all(text, "");
    let collapsed = SPACE_RUNS.replace_all(&removed, " ");
    collapsed
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Builds one record per URL occurrence across all complete messages.
///
/// Record ids are `{message_index}-{url_index}` where `message_index` is the
/// position of the message in `messages`, so identical input always yields
/// identical ids.
#[must_use]
pub fn extract_links(messages: &[ChatMessage]) -> Vec<ExtractedLink> {
    let mut links = Vec::new();
    let mut skipped = 0usize;

    for (message_index, message) in messages.iter().enumerate() {
        if !message.is_complete() {
            skipped += 1;
            continue;
        }

        for (url_index, url) in extract_urls(&message.text).into_iter().enumerate() {
            links.push(ExtractedLink {
                id: ExtractedLink::make_id(message_index, url_index),
                url: url.to_string(),
                message: message.text.clone(),
                user: message.author.clone(),
                date: message.timestamp.clone(),
                domain: resolve_domain(url),
            });
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} incomplete messages", skipped);
    }

    tracing::info!(
        "Extracted {} links from {} messages",
        links.len(),
        messages.len()
    );

    links
}
