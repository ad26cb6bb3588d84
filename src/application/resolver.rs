//! Hostname resolution for extracted URLs.

use url::Url;

use crate::domain::UNKNOWN_DOMAIN;

/// Returns the hostname of `url`, or `"Unknown"` when it is not a valid
/// absolute URL with a host. Never fails.
#[must_use]
pub fn resolve_domain(url: &str) -> String {
    match Url::parse(url.trim()) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => {
                tracing::debug!("URL has no host: {}", url);
                UNKNOWN_DOMAIN.to_string()
            }
        },
        Err(e) => {
            tracing::debug!("Failed to parse URL {}: {}", url, e);
            UNKNOWN_DOMAIN.to_string()
        }
    }
}
