//! In-memory link collection with filtered and sorted views.
//!
//! Views borrow from the backing sequence; nothing here mutates a record.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::domain::{ChatMessage, ExtractedLink, LinkStats, SortDirection, SortField, ViewState};

use super::dates::parse_timestamp_millis;
use super::extractor::extract_links;

/// The extracted links of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCollection {
    links: Vec<ExtractedLink>,
}

impl LinkCollection {
    /// Wraps the records of an ingestion run, dropping any repeated id.
    #[must_use]
    pub fn new(links: Vec<ExtractedLink>) -> Self {
        let mut seen = BTreeSet::new();
        let before = links.len();
        let links: Vec<ExtractedLink> = links
            .into_iter()
            .filter(|link| seen.insert(link.id.clone()))
            .collect();

        if links.len() < before {
            tracing::warn!("Dropped {} links with duplicate ids", before - links.len());
        }

        Self { links }
    }

    /// Runs link extraction over ingested messages.
    #[must_use]
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        Self::new(extract_links(messages))
    }

    /// All records in ingestion order.
    #[must_use]
    pub fn links(&self) -> &[ExtractedLink] {
        &self.links
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Records matching both the text query and the user selection.
    #[must_use]
    pub fn filter(&self, query: &str, user: Option<&str>) -> Vec<&ExtractedLink> {
        filter_links(&self.links, query, user)
    }

    /// The filtered and sorted view described by `view`.
    #[must_use]
    pub fn view(&self, view: &ViewState) -> Vec<&ExtractedLink> {
        let mut links = self.filter(&view.search, view.selected_user());
        sort_links(&mut links, view.sort_field, view.sort_direction);
        links
    }

    /// Distinct authors, sorted.
    #[must_use]
    pub fn users(&self) -> Vec<&str> {
        self.links
            .iter()
            .map(|l| l.user.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct domains, sorted.
    #[must_use]
    pub fn domains(&self) -> Vec<&str> {
        self.links
            .iter()
            .map(|l| l.domain.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Totals over the full collection plus the size of `view`.
    #[must_use]
    pub fn stats(&self, view: &ViewState) -> LinkStats {
        LinkStats {
            total_links: self.len(),
            unique_users: self.users().len(),
            unique_domains: self.domains().len(),
            filtered_links: self.filter(&view.search, view.selected_user()).len(),
        }
    }
}

impl From<Vec<ExtractedLink>> for LinkCollection {
    fn from(links: Vec<ExtractedLink>) -> Self {
        Self::new(links)
    }
}

/// Keeps records whose url, message or domain contains `query`
/// (case-insensitive) and whose user equals `user` exactly.
///
/// An empty query and an empty or missing user keep everything, in order.
#[must_use]
pub fn filter_links<'a>(
    links: &'a [ExtractedLink],
    query: &str,
    user: Option<&str>,
) -> Vec<&'a ExtractedLink> {
    let needle = query.to_lowercase();
    let user = user.filter(|u| !u.is_empty());

    links
        .iter()
        .filter(|link| matches_query(link, &needle))
        .filter(|link| user.is_none_or(|u| link.user == u))
        .collect()
}

fn matches_query(link: &ExtractedLink, needle: &str) -> bool {
    needle.is_empty()
        || [&link.url, &link.message, &link.domain]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Sorts a view in place.
///
/// Dates compare as instants when both parse and as raw strings when neither
/// does. In a mixed pair the parseable date counts as earlier, so ascending
/// views list unparseable dates last and descending views list them first;
/// see [`compare_dates`]. The sort is stable, so ties keep their incoming
/// order.
pub fn sort_links(links: &mut [&ExtractedLink], field: SortField, direction: SortDirection) {
    links.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &ExtractedLink, b: &ExtractedLink, field: SortField) -> Ordering {
    match field {
        SortField::Date => compare_dates(&a.date, &b.date),
        SortField::User => a.user.cmp(&b.user),
        SortField::Domain => a.domain.cmp(&b.domain),
        SortField::Url => a.url.cmp(&b.url),
    }
}

/// Orders two raw timestamps.
///
/// Two parseable dates compare by instant, two unparseable ones by raw
/// string. A parseable date sorts before an unparseable one so the ordering
/// stays total across a mixed view.
#[must_use]
pub fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_timestamp_millis(a), parse_timestamp_millis(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
