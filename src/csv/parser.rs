//! CSV parsing using the csv crate
//!
//! Comma-delimited text with double-quote escaping. Records may have any
//! number of fields, and malformed quoting never fails: an unclosed quote
//! runs to the end of the input.
//!
//! A `"` only opens a quoted section when it is the very first character of
//! a field. Anywhere else it is an ordinary character, so `ab"c` stays
//! `ab"c` and `a, "b"` keeps its leading space and quotes.

use std::io::Cursor;

use super::model::CsvData;

/// Parse CSV text into rows of fields
///
/// Line endings are normalized to `\n` and the whole input is trimmed before
/// reading. Rows consisting of a single empty field (blank lines) are
/// dropped; ragged rows are kept as-is. A record the reader rejects is
/// logged and skipped.
pub fn parse_csv(content: &str) -> CsvData {
    let normalized = normalize_line_endings(content);
    let input = normalized.trim();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(input.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut skipped = 0usize;

    for (record_num, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(record.iter().map(|s| s.to_string()).collect()),
            Err(e) => {
                skipped += 1;
                tracing::warn!("Skipping CSV record {}: {}", record_num + 1, e);
            }
        }
    }

    let scanned = rows.len();
    rows.retain(|row| !is_blank_row(row));

    tracing::debug!(scanned, kept = rows.len(), skipped, "CSV parse complete");

    CsvData::from_rows(rows)
}

/// Convert `\r\n` and lone `\r` to `\n`
fn normalize_line_endings(content: &str) -> String {
    if !content.contains('\r') {
        return content.to_string();
    }
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// A row with exactly one empty field is what a blank line reads as
fn is_blank_row(row: &[String]) -> bool {
    row.len() == 1 && row[0].is_empty()
}
