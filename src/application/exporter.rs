//! Serialization of link views to downloadable files.
//!
//! Supports CSV (with a UTF-8 BOM for spreadsheet tools), a plain-text
//! report and JSON. Exports only produce bytes and a suggested file name;
//! writing them anywhere is the caller's job.

use std::borrow::Borrow;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AppError, ExportConfig, ExtractedLink, Locale, Result};

use super::extractor::strip_urls;
use super::ingest::{strip_bom, UTF8_BOM};

/// Export file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Spreadsheet-friendly CSV.
    #[default]
    Csv,
    /// Human-readable report.
    Txt,
    /// JSON document for programmatic use.
    Json,
}

impl ExportFormat {
    /// File extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "txt" | "text" => Ok(Self::Txt),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: csv, txt, json")),
        }
    }
}

/// Options shared by every format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub locale: Locale,
    /// Remove URLs from the exported message text.
    pub strip_urls: bool,
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            locale: config.locale,
            strip_urls: config.strip_urls,
        }
    }
}

/// A finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    /// Suggested file name, e.g. `chat_links_2024-01-31.csv`.
    pub filename: String,
    pub format: ExportFormat,
}

struct Labels {
    url: &'static str,
    domain: &'static str,
    user: &'static str,
    date: &'static str,
    message: &'static str,
    title: &'static str,
    exported_at: &'static str,
    total: &'static str,
    file_stem: &'static str,
}

static EN_LABELS: Labels = Labels {
    url: "URL",
    domain: "Domain",
    user: "User",
    date: "Date",
    message: "Message",
    title: "=== Chat Link Extraction Report ===",
    exported_at: "Exported",
    total: "Total links",
    file_stem: "chat_links",
};

static KO_LABELS: Labels = Labels {
    url: "URL",
    domain: "도메인",
    user: "사용자",
    date: "날짜",
    message: "메시지",
    title: "=== 카카오톡 링크 추출 결과 ===",
    exported_at: "추출 날짜",
    total: "총 링크 수",
    file_stem: "카카오톡_링크_추출",
};

fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::En => &EN_LABELS,
        Locale::Ko => &KO_LABELS,
    }
}

/// JSON export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// ISO-8601 generation time.
    pub export_date: String,
    pub total_links: usize,
    pub links: Vec<ExportedLink>,
}

/// One link as it appears in a JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedLink {
    pub url: String,
    pub domain: String,
    pub user: String,
    pub date: String,
    pub message: String,
}

/// Serializes link views with fixed options and generation time.
#[derive(Debug, Clone)]
pub struct Exporter {
    options: ExportOptions,
    generated_at: DateTime<Utc>,
}

impl Exporter {
    /// Creates an exporter stamped with the current time.
    #[must_use]
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            generated_at: Utc::now(),
        }
    }

    /// Overrides the generation time.
    #[must_use]
    pub const fn with_timestamp(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Exports `links` in `format`, preserving their order.
    ///
    /// # Errors
    /// Returns error only if in-memory serialization fails.
    pub fn export<L: Borrow<ExtractedLink>>(
        &self,
        links: &[L],
        format: ExportFormat,
    ) -> Result<ExportFile> {
        let bytes = match format {
            ExportFormat::Csv => self.render_csv(links)?,
            ExportFormat::Txt => self.render_txt(links).into_bytes(),
            ExportFormat::Json => self.render_json(links)?.into_bytes(),
        };

        tracing::info!(
            "Exported {} links as {} ({} bytes)",
            links.len(),
            format.extension(),
            bytes.len()
        );

        Ok(ExportFile {
            bytes,
            filename: self.filename(format),
            format,
        })
    }

    /// Suggested file name for `format`, dated in UTC.
    #[must_use]
    pub fn filename(&self, format: ExportFormat) -> String {
        format!(
            "{}_{}.{}",
            labels(self.options.locale).file_stem,
            self.generated_at.format("%Y-%m-%d"),
            format.extension()
        )
    }

    fn message_of(&self, link: &ExtractedLink) -> String {
        if self.options.strip_urls {
            strip_urls(&link.message)
        } else {
            link.message.clone()
        }
    }

    fn render_csv<L: Borrow<ExtractedLink>>(&self, links: &[L]) -> Result<Vec<u8>> {
        let labels = labels(self.options.locale);
        let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());

        writer
            .write_record([
                labels.url,
                labels.domain,
                labels.user,
                labels.date,
                labels.message,
            ])
            .map_err(|e| AppError::csv(&e))?;

        for link in links {
            let link: &ExtractedLink = link.borrow();
            let message = self.message_of(link);
            writer
                .write_record([
                    link.url.as_str(),
                    link.domain.as_str(),
                    link.user.as_str(),
                    link.date.as_str(),
                    message.as_str(),
                ])
                .map_err(|e| AppError::csv(&e))?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Io {
                message: format!("Failed to flush CSV export: {}", e.error()),
                source: None,
            })
    }

    fn render_txt<L: Borrow<ExtractedLink>>(&self, links: &[L]) -> String {
        let labels = labels(self.options.locale);
        let mut out = String::new();

        out.push_str(labels.title);
        out.push_str("\n\n");
        out.push_str(&format!(
            "{}: {}\n",
            labels.exported_at,
            self.generated_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("{}: {}\n\n", labels.total, links.len()));

        for (i, link) in links.iter().enumerate() {
            let link: &ExtractedLink = link.borrow();
            out.push_str(&format!("{}. {}\n", i + 1, link.url));
            out.push_str(&format!("   {}: {}\n", labels.domain, link.domain));
            out.push_str(&format!("   {}: {}\n", labels.user, link.user));
            out.push_str(&format!("   {}: {}\n", labels.date, link.date));
            out.push_str(&format!(
                "   {}: {}\n\n",
                labels.message,
                self.message_of(link)
            ));
        }

        out
    }

    fn render_json<L: Borrow<ExtractedLink>>(&self, links: &[L]) -> Result<String> {
        let document = ExportDocument {
            export_date: self
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            total_links: links.len(),
            links: links
                .iter()
                .map(|link| {
                    let link: &ExtractedLink = link.borrow();
                    ExportedLink {
                        url: link.url.clone(),
                        domain: link.domain.clone(),
                        user: link.user.clone(),
                        date: link.date.clone(),
                        message: self.message_of(link),
                    }
                })
                .collect(),
        };

        serde_json::to_string_pretty(&document).map_err(AppError::json_parse)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}

/// Exports `links` as CSV with default options.
///
/// # Errors
/// Returns error only if in-memory serialization fails.
pub fn export_csv<L: Borrow<ExtractedLink>>(links: &[L]) -> Result<ExportFile> {
    Exporter::default().export(links, ExportFormat::Csv)
}

/// Exports `links` as a plain-text report with default options.
///
/// # Errors
/// Never fails in practice; kept fallible for a uniform signature.
pub fn export_txt<L: Borrow<ExtractedLink>>(links: &[L]) -> Result<ExportFile> {
    Exporter::default().export(links, ExportFormat::Txt)
}

/// Exports `links` as JSON with default options.
///
/// # Errors
/// Returns error only if in-memory serialization fails.
pub fn export_json<L: Borrow<ExtractedLink>>(links: &[L]) -> Result<ExportFile> {
    Exporter::default().export(links, ExportFormat::Json)
}

/// Reads a JSON export back into link records.
///
/// Ids are reassigned as `{index}-0`.
///
/// # Errors
/// Returns error if the bytes are not a valid export document.
pub fn import_json(bytes: &[u8]) -> Result<Vec<ExtractedLink>> {
    let document: ExportDocument =
        serde_json::from_slice(strip_bom(bytes)).map_err(AppError::json_parse)?;

    if document.total_links != document.links.len() {
        tracing::warn!(
            "Export declares {} links but contains {}",
            document.total_links,
            document.links.len()
        );
    }

    Ok(document
        .links
        .into_iter()
        .enumerate()
        .map(|(i, link)| ExtractedLink {
            id: ExtractedLink::make_id(i, 0),
            url: link.url,
            message: link.message,
            user: link.user,
            date: link.date,
            domain: link.domain,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn link(id: &str, url: &str, message: &str) -> ExtractedLink {
        ExtractedLink {
            id: id.into(),
            url: url.into(),
            message: message.into(),
            user: "Alice".into(),
            date: "2024-01-01 10:00".into(),
            domain: "a.com".into(),
        }
    }

    fn sample() -> Vec<ExtractedLink> {
        vec![
            link("0-0", "https://a.com/x", "see https://a.com/x, \"quoted\""),
            link("1-0", "https://a.com/y", "multi\nline https://a.com/y"),
        ]
    }

    fn fixed() -> Exporter {
        Exporter::new(ExportOptions::default())
            .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_export_format_from_str() {
        assert!(matches!("csv".parse::<ExportFormat>(), Ok(ExportFormat::Csv)));
        assert!(matches!("TXT".parse::<ExportFormat>(), Ok(ExportFormat::Txt)));
        assert!(matches!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json)));
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_filenames() {
        let exporter = fixed();
        assert_eq!(exporter.filename(ExportFormat::Csv), "chat_links_2024-01-31.csv");
        let ko = Exporter::new(ExportOptions {
            locale: Locale::Ko,
            strip_urls: false,
        })
        .with_timestamp(Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap());
        assert_eq!(ko.filename(ExportFormat::Json), "카카오톡_링크_추출_2024-01-31.json");
    }

    #[test]
    fn test_csv_has_bom_header_and_rows() {
        let file = fixed().export(&sample(), ExportFormat::Csv).unwrap();
        assert!(file.bytes.starts_with(UTF8_BOM));

        let mut reader = csv::Reader::from_reader(strip_bom(&file.bytes));
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["URL", "Domain", "User", "Date", "Message"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "https://a.com/x");
        assert_eq!(&rows[0][4], "see https://a.com/x, \"quoted\"");
        assert_eq!(&rows[1][4], "multi\nline https://a.com/y");
    }

    #[test]
    fn test_csv_korean_labels() {
        let exporter = Exporter::new(ExportOptions {
            locale: Locale::Ko,
            strip_urls: false,
        });
        let file = exporter.export(&sample(), ExportFormat::Csv).unwrap();
        let text = String::from_utf8(strip_bom(&file.bytes).to_vec()).unwrap();
        assert!(text.starts_with("URL,도메인,사용자,날짜,메시지\n"));
    }

    #[test]
    fn test_strip_urls_variant() {
        let exporter = Exporter::new(ExportOptions {
            locale: Locale::En,
            strip_urls: true,
        });
        let file = exporter.export(&sample(), ExportFormat::Json).unwrap();
        let doc: ExportDocument = serde_json::from_slice(&file.bytes).unwrap();
        // The trailing comma belongs to the URL match and goes with it
        assert_eq!(doc.links[0].message, "see \"quoted\"");
        assert_eq!(doc.links[1].message, "multi\nline");
        assert_eq!(doc.links[0].url, "https://a.com/x");
    }

    #[test]
    fn test_txt_report_layout() {
        let file = fixed().export(&sample(), ExportFormat::Txt).unwrap();
        let text = String::from_utf8(file.bytes).unwrap();
        assert!(text.starts_with("=== Chat Link Extraction Report ===\n\nExported: "));
        assert!(text.contains("Total links: 2\n\n"));
        assert!(text.contains(
            "1. https://a.com/x\n   Domain: a.com\n   User: Alice\n   Date: 2024-01-01 10:00\n"
        ));
        assert!(text.contains("2. https://a.com/y\n"));
        assert!(text.ends_with("line https://a.com/y\n\n"));
    }

    #[test]
    fn test_json_document() {
        let file = fixed().export(&sample(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&file.bytes).unwrap();
        assert_eq!(value["exportDate"], "2024-01-31T12:00:00.000Z");
        assert_eq!(value["totalLinks"], 2);
        assert_eq!(value["links"][1]["url"], "https://a.com/y");
        assert!(value["links"][0].get("id").is_none());
    }

    #[test]
    fn test_json_field_order_is_stable() {
        let file = fixed().export(&sample()[..1], ExportFormat::Json).unwrap();
        let text = String::from_utf8(file.bytes).unwrap();
        let positions: Vec<usize> = ["\"url\"", "\"domain\"", "\"user\"", "\"date\"", "\"message\""]
            .iter()
            .map(|key| text.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_exports() {
        let empty: Vec<ExtractedLink> = Vec::new();

        let json = fixed().export(&empty, ExportFormat::Json).unwrap();
        let doc: ExportDocument = serde_json::from_slice(&json.bytes).unwrap();
        assert_eq!(doc.total_links, 0);
        assert!(doc.links.is_empty());

        let csv = fixed().export(&empty, ExportFormat::Csv).unwrap();
        let text = String::from_utf8(strip_bom(&csv.bytes).to_vec()).unwrap();
        assert_eq!(text, "URL,Domain,User,Date,Message\n");

        let txt = fixed().export(&empty, ExportFormat::Txt).unwrap();
        assert!(String::from_utf8(txt.bytes).unwrap().contains("Total links: 0"));
    }

    #[test]
    fn test_export_accepts_borrowed_views() {
        let links = sample();
        let view: Vec<&ExtractedLink> = links.iter().rev().collect();
        let file = fixed().export(&view, ExportFormat::Json).unwrap();
        let doc: ExportDocument = serde_json::from_slice(&file.bytes).unwrap();
        assert_eq!(doc.links[0].url, "https://a.com/y");
    }

    #[test]
    fn test_json_round_trip() {
        let links = sample();
        let file = export_json(&links).unwrap();
        let imported = import_json(&file.bytes).unwrap();
        assert_eq!(imported.len(), links.len());
        for (a, b) in links.iter().zip(&imported) {
            assert_eq!(a.url, b.url);
            assert_eq!(a.domain, b.domain);
            assert_eq!(a.user, b.user);
            assert_eq!(a.date, b.date);
            assert_eq!(a.message, b.message);
        }
        assert_eq!(imported[1].id, "1-0");
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(
            import_json(b"{\"links\": 3}"),
            Err(AppError::JsonParse { .. })
        ));
    }
}
