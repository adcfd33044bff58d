//! CSV data model types

use super::search::{filter_rows, normalize_term};
use super::sort::{sort_rows, SortState};
use super::viewport::{RowWindow, ScrollViewport};

/// Read a cell from a possibly short row
///
/// Rows are allowed to be ragged; a missing cell reads as `""`.
pub fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(String::as_str).unwrap_or("")
}

/// Parsed CSV rows, exactly as the parser produced them
#[derive(Debug, Clone, Default)]
pub struct CsvData {
    rows: Vec<Vec<String>>,
    /// Number of columns (max across all rows)
    column_count: usize,
}

impl CsvData {
    /// Create empty CSV data
    pub fn new() -> Self {
        Self::default()
    }

    /// Create CSV data from parsed rows
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let column_count = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        Self { rows, column_count }
    }

    /// Get number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get number of columns
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Get a whole row
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Get cell value at position (`""` when out of range)
    pub fn get(&self, row: usize, col: usize) -> &str {
        self.row(row).map(|r| cell(r, col)).unwrap_or("")
    }

    /// Check if data is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// State for the table view
///
/// `data` is the canonical parse result and is never reordered. Everything
/// else is derived from it:
///
/// ```text
/// data ──(header split)──▶ data_rows ──(sort)──▶ data_rows ──(search)──▶ visible_rows
/// ```
///
/// `visible_rows` is what the viewport windows over.
#[derive(Debug, Clone)]
pub struct CsvState {
    /// Parsed CSV data
    pub data: CsvData,
    /// Whether the first row is a header
    has_header_row: bool,
    /// Data row indices into `data`, in current sort order
    data_rows: Vec<usize>,
    /// Data rows passing the search filter, in current sort order
    visible_rows: Vec<usize>,
    /// Normalized search term (empty = no filter)
    search_term: String,
    /// Active sort
    sort: SortState,
    /// Scroll window over `visible_rows`
    pub viewport: ScrollViewport,
}

impl CsvState {
    /// Create new CSV state from parsed data
    pub fn new(data: CsvData, has_header_row: bool, viewport: ScrollViewport) -> Self {
        let mut state = Self {
            data,
            has_header_row,
            data_rows: Vec::new(),
            visible_rows: Vec::new(),
            search_term: String::new(),
            sort: SortState::default(),
            viewport,
        };
        state.rebuild_data_rows();
        state.refilter();
        state
    }

    pub fn has_header_row(&self) -> bool {
        self.has_header_row
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn column_count(&self) -> usize {
        self.data.column_count()
    }

    /// The header row, when header mode is on and a first row exists
    pub fn header(&self) -> Option<&[String]> {
        if self.has_header_row {
            self.data.row(0)
        } else {
            None
        }
    }

    /// Number of data rows (excluding the header)
    pub fn total_data_rows(&self) -> usize {
        self.data_rows.len()
    }

    /// Header mode is on and the header is the only row
    pub fn is_header_only(&self) -> bool {
        self.has_header_row && self.data_rows.is_empty()
    }

    /// Number of data rows passing the current filter
    pub fn visible_row_count(&self) -> usize {
        self.visible_rows.len()
    }

    /// Data row at a position in the filtered/sorted view
    pub fn visible_row(&self, view_index: usize) -> Option<&[String]> {
        self.visible_rows
            .get(view_index)
            .and_then(|&idx| self.data.row(idx))
    }

    /// Cell text at a position in the filtered/sorted view
    pub fn visible_cell(&self, view_index: usize, col: usize) -> Option<&str> {
        self.visible_row(view_index).map(|row| cell(row, col))
    }

    /// Header (if any) followed by every visible data row
    pub fn filtered_rows(&self) -> Vec<&[String]> {
        self.header()
            .into_iter()
            .chain(self.visible_rows.iter().filter_map(|&idx| self.data.row(idx)))
            .collect()
    }

    /// (shown, total) data-row counts for the stats line
    pub fn stats(&self) -> (usize, usize) {
        (self.visible_rows.len(), self.data_rows.len())
    }

    /// Window of visible rows to materialize for the current scroll offset
    pub fn window(&self) -> RowWindow {
        self.viewport.window(self.visible_rows.len())
    }

    /// Rows in the current window, paired with their view index
    pub fn window_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        let window = self.window();
        (window.start..window.end).filter_map(move |i| self.visible_row(i).map(|row| (i, row)))
    }

    /// Switch header mode
    ///
    /// The split is always re-derived from the canonical data, the sort is
    /// reset, and the current search term is re-applied.
    pub fn set_header_mode(&mut self, enabled: bool) {
        self.has_header_row = enabled;
        self.sort = SortState::default();
        self.rebuild_data_rows();
        self.refilter();
        tracing::debug!(
            "Header mode {}: {} data rows",
            if enabled { "on" } else { "off" },
            self.data_rows.len()
        );
    }

    /// Apply a search term (normalized here)
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = normalize_term(term);
        self.refilter();
        tracing::debug!(
            "Search {:?}: {} of {} rows",
            self.search_term,
            self.visible_rows.len(),
            self.data_rows.len()
        );
    }

    /// Advance the sort for a column and reorder data rows
    pub fn toggle_sort(&mut self, column: usize) {
        self.sort.toggle(column);
        self.rebuild_data_rows();
        self.refilter();
    }

    /// Data rows in original order, then sorted by the active sort
    fn rebuild_data_rows(&mut self) {
        let first = usize::from(self.has_header_row);
        self.data_rows = (first..self.data.row_count().max(first)).collect();
        if let Some(column) = self.sort.column {
            sort_rows(&self.data, &mut self.data_rows, column, self.sort.direction);
        }
    }

    /// Recompute the visible-rows cache from `data_rows`
    fn refilter(&mut self) {
        self.visible_rows = filter_rows(&self.data, &self.data_rows, &self.search_term);
        self.viewport.invalidate();
    }
}
