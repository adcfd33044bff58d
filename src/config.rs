//! Viewer configuration
//!
//! Read from `~/.config/csv-quickview/config.yaml`. The file is optional and
//! every field has a default; the viewer never writes it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::csv::{DEFAULT_BUFFER_ROWS, FALLBACK_ROW_HEIGHT, SCROLL_EPSILON};

/// Smallest usable row height (px)
const MIN_ROW_HEIGHT: f64 = 1.0;

/// Largest number of rows rendered past each viewport edge
const MAX_BUFFER_ROWS: usize = 500;

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Treat the first row as a header when a file is opened
    pub header_row: bool,
    /// Rows rendered above and below the viewport
    pub buffer_rows: usize,
    /// Row height (px) used when measurement fails
    pub fallback_row_height: f64,
    /// Scroll movement (px) below which the table is not redrawn
    pub scroll_epsilon: f64,
    /// Settle time for search input before filtering
    pub search_debounce_ms: u64,
    /// How long the "Copied" tooltip stays up
    pub tooltip_ms: u64,
    /// Initial window width (logical px)
    pub window_width: u32,
    /// Initial window height (logical px)
    pub window_height: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            header_row: true,
            buffer_rows: DEFAULT_BUFFER_ROWS,
            fallback_row_height: FALLBACK_ROW_HEIGHT,
            scroll_epsilon: SCROLL_EPSILON,
            search_debounce_ms: 180,
            tooltip_ms: 1200,
            window_width: 1024,
            window_height: 768,
        }
    }
}

impl ViewerConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse config from YAML, then clamp values into usable ranges
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.fallback_row_height.is_finite() && self.fallback_row_height > 0.0) {
            self.fallback_row_height = defaults.fallback_row_height;
        }
        self.fallback_row_height = self.fallback_row_height.max(MIN_ROW_HEIGHT);
        self.buffer_rows = self.buffer_rows.min(MAX_BUFFER_ROWS);
        if !(self.scroll_epsilon.is_finite() && self.scroll_epsilon >= 0.0) {
            self.scroll_epsilon = defaults.scroll_epsilon;
        }
        self.window_width = self.window_width.max(320);
        self.window_height = self.window_height.max(240);
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn tooltip_duration(&self) -> Duration {
        Duration::from_millis(self.tooltip_ms)
    }
}
