//! Application model - the complete state of the viewer
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod ui;

pub use ui::{Tooltip, UiState};

use crate::config::ViewerConfig;
use crate::csv::{CsvData, CsvState, ScrollViewport};
use crate::loader::{self, LoadError, LoadOutcome};

/// Where the viewer is in its one-shot load
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Waiting for the page and the file
    Loading,
    /// Terminal failure (no URL, fetch error)
    Failed(String),
    /// File has no content
    Empty,
    /// Content produced no rows
    Unparsable,
    /// Table is up
    Ready(Box<CsvState>),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    pub config: ViewerConfig,
    /// The opaque file URL the viewer was opened with
    pub file_url: Option<String>,
    /// Document title (file name)
    pub title: String,
    pub load: LoadState,
    pub ui: UiState,
}

impl AppModel {
    pub fn new(config: ViewerConfig, file_url: Option<String>) -> Self {
        let title = file_url
            .as_deref()
            .map(loader::display_name)
            .unwrap_or_else(|| "CSV QuickView".to_string());
        let ui = UiState::new(config.header_row);
        Self {
            config,
            file_url,
            title,
            load: LoadState::Loading,
            ui,
        }
    }

    /// The table, once loaded
    pub fn csv(&self) -> Option<&CsvState> {
        match &self.load {
            LoadState::Ready(csv) => Some(csv.as_ref()),
            _ => None,
        }
    }

    /// Mutable access to the table, once loaded
    pub fn csv_mut(&mut self) -> Option<&mut CsvState> {
        match &mut self.load {
            LoadState::Ready(csv) => Some(csv.as_mut()),
            _ => None,
        }
    }

    /// Turn a fetch result into the load state
    pub fn finish_load(&mut self, result: Result<String, LoadError>) {
        self.load = match result {
            Err(e) => {
                tracing::error!("Failed to load {}: {}", self.title, e);
                LoadState::Failed(e.user_message())
            }
            Ok(text) => match loader::classify(&text) {
                LoadOutcome::Empty => LoadState::Empty,
                LoadOutcome::Unparsable => LoadState::Unparsable,
                LoadOutcome::Ready(data) => LoadState::Ready(Box::new(self.build_table(data))),
            },
        };
    }

    fn build_table(&self, data: CsvData) -> CsvState {
        let mut viewport = ScrollViewport::new(self.ui.viewport_height, self.config.buffer_rows);
        viewport.epsilon = self.config.scroll_epsilon;
        viewport.row_height = self.config.fallback_row_height;

        let mut csv = CsvState::new(data, self.ui.header_row, viewport);
        if !self.ui.search_input.trim().is_empty() {
            csv.set_search_term(&self.ui.search_input);
        }
        tracing::info!(
            "Table ready: {} rows x {} columns",
            csv.data.row_count(),
            csv.column_count()
        );
        csv
    }
}
