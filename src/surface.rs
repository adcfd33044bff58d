//! Display surface abstraction
//!
//! The engine never touches a DOM. It describes what changed as a [`Frame`]
//! of [`Patch`]es, and a surface applies them: the desktop runtime forwards
//! them to the webview page as JSON, tests record them.

use serde::Serialize;

/// One change to the displayed page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Patch {
    /// Document title
    Title { text: String },
    /// Message panel; an empty string hides it and shows the table.
    /// `toolbar` keeps the search box and header toggle usable.
    Panel { html: String, toolbar: bool },
    /// `<thead>` contents (empty when there is no header row)
    Header { html: String },
    /// Height reserved for all visible rows
    Spacer { height: f64 },
    /// Rendered row window and its vertical offset inside the spacer
    Body { html: String, offset: f64 },
    /// "Showing X of Y rows"
    Stats { text: String },
    /// Busy indicator
    Busy { visible: bool },
    /// Show a tooltip at page coordinates
    Tooltip { text: String, x: f64, y: f64 },
    HideTooltip,
    /// Render a throwaway row, measure it, and report its height back
    Measure { html: String },
    /// Set control values (search box text, header checkbox)
    Controls { search: String, header: bool },
}

/// An ordered batch of patches applied together
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Frame {
    pub patches: Vec<Patch>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, patch: Patch) {
        self.patches.push(patch);
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// JSON form consumed by the page's `__applyFrame`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Something that can display frames
pub trait DisplaySurface {
    fn apply(&mut self, frame: &Frame);
}

/// Surface that keeps every frame it was given (tests, snapshots)
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub frames: Vec<Frame>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All patches across all frames, oldest first
    pub fn patches(&self) -> impl DoubleEndedIterator<Item = &Patch> {
        self.frames.iter().flat_map(|f| f.patches.iter())
    }

    /// Most recent body markup
    pub fn last_body(&self) -> Option<&str> {
        self.patches().rev().find_map(|p| match p {
            Patch::Body { html, .. } => Some(html.as_str()),
            _ => None,
        })
    }

    /// Most recent panel markup (empty = table shown)
    pub fn last_panel(&self) -> Option<&str> {
        self.patches().rev().find_map(|p| match p {
            Patch::Panel { html, .. } => Some(html.as_str()),
            _ => None,
        })
    }

    /// Most recent stats text
    pub fn last_stats(&self) -> Option<&str> {
        self.patches().rev().find_map(|p| match p {
            Patch::Stats { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Most recent busy state
    pub fn busy(&self) -> bool {
        self.patches()
            .rev()
            .find_map(|p| match p {
                Patch::Busy { visible } => Some(*visible),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl DisplaySurface for RecordingSurface {
    fn apply(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}
