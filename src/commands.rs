//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::time::Duration;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Redraw everything: title, panel or table, stats, overlay
    Redraw,
    /// Redraw only the rendered row window (scroll fast path)
    RedrawRows,
    /// Redraw only the busy indicator and tooltip
    RedrawOverlay,
    /// Ask the page to measure a sample row
    MeasureRow,
    /// Push search box and header checkbox values to the page
    SyncControls,
    /// Start the search debounce timer
    /// After delay, sends Msg::Csv(ApplySearch)
    ScheduleSearch { generation: u64, delay: Duration },
    /// Run a sort on the next tick so the busy indicator paints first
    DeferSort { column: usize },
    /// Write text to the system clipboard
    /// Sends Msg::Csv(CopyConfirmed) on success
    CopyToClipboard { text: String, x: f64, y: f64 },
    /// Hide the tooltip with this id after a delay
    DismissTooltipAfter { id: u64, delay: Duration },
    /// Fetch file text
    /// Sends Msg::App(FileFetched) when done
    FetchFile { url: String },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }
}
