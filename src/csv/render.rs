//! Table markup
//!
//! Produces the HTML fragments the display surface inserts: header row,
//! the body rows of the current window, the throwaway sample row used for
//! height measurement, status panels, and the stats line.
//!
//! Cell text is always escaped before it is placed in markup. Search
//! highlighting escapes each matched and unmatched segment separately and
//! only then adds the `<mark>` wrapper, so data can never produce or alter
//! markup of its own.

use std::fmt::Write;

use super::model::{cell, CsvState};
use super::search::match_ranges;
use super::sort::SortDirection;

/// Escape the HTML metacharacters `<` and `>`
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(&mut out, s);
    out
}

fn push_escaped(out: &mut String, s: &str) {
    for ch in s.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Escaped cell text with matches of `term` wrapped in `<mark>`
///
/// `term` must already be normalized; an empty term only escapes.
pub fn highlight(text: &str, term: &str) -> String {
    let ranges = match_ranges(text, term);
    if ranges.is_empty() {
        return escape_html(text);
    }

    let mut out = String::with_capacity(text.len() + ranges.len() * 13);
    let mut cursor = 0;
    for range in ranges {
        push_escaped(&mut out, &text[cursor..range.start]);
        out.push_str("<mark>");
        push_escaped(&mut out, &text[range.clone()]);
        out.push_str("</mark>");
        cursor = range.end;
    }
    push_escaped(&mut out, &text[cursor..]);
    out
}

/// Check if a string looks like a number (for right-alignment)
pub fn is_number(s: &str) -> bool {
    super::sort::numeric_value(s).is_some()
}

fn sort_class(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::None => "sortable",
        SortDirection::Ascending => "sortable sorted-asc",
        SortDirection::Descending => "sortable sorted-desc",
    }
}

fn sort_indicator(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::None => "",
        SortDirection::Ascending => " ▲",
        SortDirection::Descending => " ▼",
    }
}

/// Header row markup (never highlighted)
///
/// Padded to the table's column count so ragged headers still line up.
pub fn header_html(csv: &CsvState) -> String {
    let Some(header) = csv.header() else {
        return String::new();
    };

    let sort = csv.sort();
    let mut out = String::from("<tr>");
    for col in 0..csv.column_count().max(header.len()) {
        let direction = sort.direction_for(col);
        let _ = write!(
            out,
            "<th data-col=\"{}\" class=\"{}\">{}<span class=\"sort-indicator\">{}</span></th>",
            col,
            sort_class(direction),
            escape_html(cell(header, col)),
            sort_indicator(direction)
        );
    }
    out.push_str("</tr>");
    out
}

/// One data row
///
/// `view_index` is the row's position in the filtered/sorted view; the page
/// echoes it back for copy requests.
pub fn row_html(row: &[String], view_index: usize, column_count: usize, term: &str) -> String {
    let mut out = String::new();
    push_row(&mut out, row, view_index, column_count, term);
    out
}

fn push_row(out: &mut String, row: &[String], view_index: usize, column_count: usize, term: &str) {
    let _ = write!(out, "<tr data-row=\"{}\">", view_index);
    for col in 0..column_count.max(row.len()) {
        let value = cell(row, col);
        let class = if is_number(value) { " class=\"num\"" } else { "" };
        let _ = write!(
            out,
            "<td data-col=\"{}\"{}>{}</td>",
            col,
            class,
            highlight(value, term)
        );
    }
    out.push_str("</tr>");
}

/// Markup for every row in the current window
pub fn body_html(csv: &CsvState) -> String {
    let column_count = csv.column_count();
    let term = csv.search_term();
    let mut out = String::new();
    for (view_index, row) in csv.window_rows() {
        push_row(&mut out, row, view_index, column_count, term);
    }
    out
}

/// A representative row for measuring rendered row height
pub fn sample_row_html(column_count: usize) -> String {
    let mut out = String::from("<tr class=\"sample-row\">");
    for _ in 0..column_count.max(1) {
        out.push_str("<td>Sample</td>");
    }
    out.push_str("</tr>");
    out
}

/// Severity of a status panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Error,
    Warning,
    Info,
}

impl PanelKind {
    fn class(self) -> &'static str {
        match self {
            PanelKind::Error => "is-danger",
            PanelKind::Warning => "is-warning",
            PanelKind::Info => "is-info",
        }
    }
}

/// A message panel that replaces the table
///
/// An empty `message` renders the title alone.
pub fn panel_html(kind: PanelKind, title: &str, message: &str) -> String {
    let mut out = format!(
        "<div class=\"notification {}\"><h1 class=\"title\">{}</h1>",
        kind.class(),
        escape_html(title)
    );
    if !message.is_empty() {
        let _ = write!(out, "<p>{}</p>", escape_html(message));
    }
    out.push_str("</div>");
    out
}

/// "Showing X of Y rows"
pub fn stats_text(shown: usize, total: usize) -> String {
    let noun = if total == 1 { "row" } else { "rows" };
    format!("Showing {} of {} {}", shown, total, noun)
}
