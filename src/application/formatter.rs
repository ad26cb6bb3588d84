//! Terminal rendering for link views.
//!
//! Table listing, statistics block, user list and share summary.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{ExtractedLink, LinkStats, Locale, SortDirection, SortField};

/// Number of links listed in a share summary.
const SHARE_PREVIEW_LINKS: usize = 5;

/// Formats a table listing of links.
pub fn format_links_table(
    links: &[&ExtractedLink],
    sort: Option<(SortField, SortDirection)>,
) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let header = |field: SortField, label: &str| match sort {
        Some((f, SortDirection::Asc)) if f == field => format!("{label} ▲"),
        Some((f, SortDirection::Desc)) if f == field => format!("{label} ▼"),
        _ => label.to_string(),
    };

    table.set_header(vec![
        "#".to_string(),
        header(SortField::Date, "Date"),
        header(SortField::User, "User"),
        header(SortField::Domain, "Domain"),
        header(SortField::Url, "URL"),
        "Message".to_string(),
    ]);

    for (i, link) in links.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            link.date.clone(),
            truncate(&link.user, 16),
            truncate(&link.domain, 24),
            truncate(&link.url, 48),
            truncate(&link.message, 40),
        ]);
    }

    table.to_string()
}

/// Formats collection statistics for display.
pub fn format_stats(stats: &LinkStats) -> String {
    format!(
        "{}\n  Total links: {}\n  Participants: {}\n  Unique domains: {}\n  Filtered results: {}",
        "📊 Statistics".bold(),
        stats.total_links.to_string().cyan(),
        stats.unique_users.to_string().green(),
        stats.unique_domains.to_string().blue(),
        stats.filtered_links.to_string().yellow()
    )
}

/// Formats the distinct user list with per-user link counts.
pub fn format_users(users: &[&str], links: &[ExtractedLink]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["User", "Links"]);

    for user in users {
        let count = links.iter().filter(|l| l.user == *user).count();
        table.add_row(vec![(*user).to_string(), count.to_string()]);
    }

    table.to_string()
}

/// Builds the short text shared with others: total plus the first few URLs.
pub fn format_share_summary(links: &[&ExtractedLink], locale: Locale) -> String {
    let (title, found, top) = match locale {
        Locale::En => (
            "Chat link extraction result",
            format!("Found {} links.", links.len()),
            "Top links:",
        ),
        Locale::Ko => (
            "카카오톡 링크 추출 결과",
            format!("총 {}개의 링크를 발견했습니다.", links.len()),
            "주요 링크:",
        ),
    };

    let preview = links
        .iter()
        .take(SHARE_PREVIEW_LINKS)
        .enumerate()
        .map(|(i, link)| format!("{}. {}", i + 1, link.url))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{title}\n\n{found}\n\n{top}\n{preview}")
}

/// Truncates to `max_chars` characters of the first line, with ellipsis.
fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
