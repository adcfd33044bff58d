//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Page events arrive
//! through [`crate::ipc`], timers through [`crate::scheduler`], and file
//! results from the loader.

use crate::loader::LoadError;

/// Application lifecycle messages (page startup, file loading)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// The page shell is up and reports its scroll container height
    PageReady { viewport_height: f64 },
    /// Result of fetching the file named by the URL
    FileFetched { result: Result<String, LoadError> },
}

/// Table messages (scrolling, search, sort, header mode, copy)
#[derive(Debug, Clone)]
pub enum CsvMsg {
    /// Sample row height as measured by the page (px)
    RowMeasured { height: f64 },
    /// Scroll container moved to a new offset (px)
    Scrolled { offset: f64 },
    /// Scroll container changed height (px)
    Resized { height: f64 },

    // === Search ===
    /// Raw search input changed (debounced)
    SearchInput { term: String },
    /// Debounce for the input with this generation has elapsed
    ApplySearch { generation: u64 },
    /// Clear button pressed (immediate)
    ClearSearch,

    /// Header row checkbox changed
    SetHeaderMode(bool),

    // === Sort ===
    /// Header cell clicked; shows the busy indicator first
    Sort { column: usize },
    /// Deferred half of a sort, run after the indicator is drawn
    RunSort { column: usize },

    // === Copy ===
    /// Cell double-clicked at a view position, with pointer coordinates
    CopyCell {
        row: usize,
        column: usize,
        x: f64,
        y: f64,
    },
    /// Clipboard write succeeded
    CopyConfirmed { x: f64, y: f64 },
    /// Tooltip with this id has been shown long enough
    TooltipExpired { id: u64 },
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    App(AppMsg),
    Csv(CsvMsg),
}

impl From<AppMsg> for Msg {
    fn from(msg: AppMsg) -> Self {
        Msg::App(msg)
    }
}

impl From<CsvMsg> for Msg {
    fn from(msg: CsvMsg) -> Self {
        Msg::Csv(msg)
    }
}
