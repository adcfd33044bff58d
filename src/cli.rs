//! Command-line argument parsing for the viewer
//!
//! Supports:
//! - A file URL (`file://...`, percent-encoded, or a plain path)
//! - Starting with header mode off
//! - Starting with a search term

use clap::Parser;

use crate::config::ViewerConfig;
use crate::model::AppModel;

/// A fast CSV viewer
#[derive(Parser, Debug)]
#[command(name = "csv-quickview", version, about = "A fast CSV viewer")]
pub struct CliArgs {
    /// File to open, as a file URL or path
    #[arg(value_name = "FILE_URL")]
    pub file_url: Option<String>,

    /// Treat the first row as data rather than a header
    #[arg(long)]
    pub no_header: bool,

    /// Filter rows by this term on open
    #[arg(short = 's', long, value_name = "TERM")]
    pub search: Option<String>,
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub viewer: ViewerConfig,
    pub file_url: Option<String>,
    pub initial_search: Option<String>,
}

impl CliArgs {
    /// Merge parsed CLI args over the loaded config (flags win)
    pub fn into_config(self, mut viewer: ViewerConfig) -> StartupConfig {
        if self.no_header {
            viewer.header_row = false;
        }
        StartupConfig {
            viewer,
            file_url: self.file_url.filter(|url| !url.trim().is_empty()),
            initial_search: self.search.filter(|term| !term.trim().is_empty()),
        }
    }
}

impl StartupConfig {
    /// Build the initial model
    pub fn into_model(self) -> AppModel {
        let mut model = AppModel::new(self.viewer, self.file_url);
        if let Some(term) = self.initial_search {
            model.ui.search_input = term;
        }
        model
    }
}
