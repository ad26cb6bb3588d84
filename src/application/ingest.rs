//! CSV ingestion of chat exports.
//!
//! The first row is a header; the timestamp, author and message columns are
//! located by name, in any order. Rows missing any of the three values are
//! dropped without error. Input that cannot be tokenized at all yields a
//! parse error and no messages.

use crate::domain::{AppError, ChatMessage, IngestConfig};

/// UTF-8 byte-order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Outcome of one ingestion run.
#[derive(Debug, Default)]
pub struct Ingestion {
    /// Complete messages, in file order.
    pub messages: Vec<ChatMessage>,
    /// Set when the input could not be tokenized; `messages` is then empty.
    pub error: Option<AppError>,
    /// Data rows read, excluding the header.
    pub rows_read: usize,
    /// Data rows dropped for missing fields.
    pub rows_dropped: usize,
}

impl Ingestion {
    fn failed(error: AppError) -> Self {
        tracing::warn!("Ingestion failed: {}", error);
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Splits into the message list and the optional parse error.
    #[must_use]
    pub fn into_parts(self) -> (Vec<ChatMessage>, Option<AppError>) {
        (self.messages, self.error)
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    timestamp: usize,
    author: usize,
    text: usize,
}

/// Parses chat export CSV into [`ChatMessage`] records.
#[derive(Debug, Clone, Default)]
pub struct CsvIngester {
    config: IngestConfig,
}

impl CsvIngester {
    #[must_use]
    pub const fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Ingests raw file content.
    ///
    /// Never panics and never returns `Err`: a tokenizer failure is reported
    /// in [`Ingestion::error`] next to an empty message list.
    #[must_use]
    pub fn ingest(&self, bytes: &[u8]) -> Ingestion {
        let bytes = strip_bom(bytes);

        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                let line = bytes[..e.valid_up_to()]
                    .iter()
                    .filter(|&&b| b == b'\n')
                    .count() as u64
                    + 1;
                return Ingestion::failed(AppError::Parse {
                    message: "input is not valid UTF-8".into(),
                    line: Some(line),
                });
            }
        };

        if text.trim().is_empty() {
            return Ingestion::failed(AppError::parse("input is empty (missing header row)"));
        }

        if let Some(line) = unterminated_quote_line(text) {
            return Ingestion::failed(AppError::Parse {
                message: "unterminated quoted field".into(),
                line: Some(line),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = match reader.headers() {
            Ok(headers) => headers.clone(),
            Err(e) => return Ingestion::failed(AppError::csv(&e)),
        };

        let Some(columns) = self.resolve_columns(&headers) else {
            tracing::warn!(
                "Header row lacks a date, user or message column: {:?}",
                headers.iter().collect::<Vec<_>>()
            );
            return Ingestion::default();
        };

        let mut ingestion = Ingestion::default();

        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => return Ingestion::failed(AppError::csv(&e)),
            };
            ingestion.rows_read += 1;

            let field = |i: usize| record.get(i).unwrap_or_default().to_string();
            let message = ChatMessage {
                timestamp: field(columns.timestamp),
                author: field(columns.author),
                text: field(columns.text),
            };

            if message.is_complete() {
                ingestion.messages.push(message);
            } else {
                tracing::debug!(
                    "Dropping row {} with missing fields",
                    record.position().map_or(0, csv::Position::line)
                );
                ingestion.rows_dropped += 1;
            }
        }

        tracing::info!(
            "Read {} rows, kept {} messages, dropped {}",
            ingestion.rows_read,
            ingestion.messages.len(),
            ingestion.rows_dropped
        );

        ingestion
    }

    fn resolve_columns(&self, headers: &csv::StringRecord) -> Option<Columns> {
        Some(Columns {
            timestamp: find_column(headers, &self.config.date_columns)?,
            author: find_column(headers, &self.config.user_columns)?,
            text: find_column(headers, &self.config.message_columns)?,
        })
    }
}

/// Index of the first header matching one of `aliases`, ignoring case and
/// surrounding whitespace.
fn find_column(headers: &csv::StringRecord, aliases: &[String]) -> Option<usize> {
    aliases.iter().find_map(|alias| {
        let alias = alias.trim().to_lowercase();
        headers
            .iter()
            .position(|h| h.trim().trim_start_matches('\u{FEFF}').to_lowercase() == alias)
    })
}

/// Line on which a quoted field opens and is never closed.
///
/// A `"` opens a quoted field only at the start of a field; anywhere else in
/// an unquoted field it is a literal character. Inside a quoted field `""` is
/// an escaped quote and a lone `"` closes the field.
fn unterminated_quote_line(text: &str) -> Option<u64> {
    let mut bytes = text.bytes().peekable();
    let mut line: u64 = 1;
    let mut opened_at = None;
    let mut field_start = true;

    while let Some(b) = bytes.next() {
        if b == b'\n' {
            line += 1;
        }

        if opened_at.is_some() {
            if b == b'"' {
                if bytes.peek() == Some(&b'"') {
                    bytes.next();
                } else {
                    opened_at = None;
                }
            }
            continue;
        }

        match b {
            b'"' if field_start => {
                opened_at = Some(line);
                field_start = false;
            }
            b',' | b'\n' | b'\r' => field_start = true,
            _ => field_start = false,
        }
    }

    opened_at
}

/// Removes a leading UTF-8 byte-order mark, if any.
#[must_use]
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Ingests with the default header aliases.
#[must_use]
pub fn ingest(bytes: &[u8]) -> (Vec<ChatMessage>, Option<AppError>) {
    CsvIngester::default().ingest(bytes).into_parts()
}
