//! CSV Viewer
//!
//! Parses comma-separated text and presents it as a virtualized table with:
//! - Optional header row (first row), toggled at runtime
//! - Case-insensitive search over all fields with match highlighting
//! - Click-to-sort columns (ascending → descending → original)
//! - Scroll-driven rendering of only the rows near the viewport
//!
//! # Architecture
//!
//! ```text
//! text ──parse_csv──▶ CsvData (canonical rows, never reordered)
//!                          │
//!                          ▼
//!                      CsvState
//!                      ├── header split   (has_header_row)
//!                      ├── SortState      (data row order)
//!                      ├── search term    (visible rows)
//!                      └── ScrollViewport (rendered window)
//! ```

mod model;
mod parser;
pub mod render;
mod search;
mod sort;
mod viewport;

pub use model::{cell, CsvData, CsvState};
pub use parser::parse_csv;
pub use search::{filter_rows, match_ranges, normalize_term, row_matches};
pub use sort::{numeric_value, sort_rows, SortDirection, SortState};
pub use viewport::{
    RowWindow, ScrollViewport, DEFAULT_BUFFER_ROWS, FALLBACK_ROW_HEIGHT, SCROLL_EPSILON,
};
