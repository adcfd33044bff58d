//! UI state: controls, busy indicator, copy tooltip

/// "Copied!" tooltip shown near a copied cell
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Identifies this tooltip so a stale dismiss timer can't hide a newer one
    pub id: u64,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// UI-level state that is not part of the table itself
#[derive(Debug, Clone)]
pub struct UiState {
    /// Header row checkbox
    pub header_row: bool,
    /// Raw search box contents (the table holds the normalized, applied term)
    pub search_input: String,
    /// Bumped on every search keystroke; a pending debounce only applies
    /// when its generation is still current
    pub search_generation: u64,
    /// Height of the page's scroll container, known before a table exists
    pub viewport_height: f64,
    /// Whether the busy indicator is shown
    pub busy: bool,
    /// Currently visible tooltip
    pub tooltip: Option<Tooltip>,
    next_tooltip_id: u64,
}

impl UiState {
    pub fn new(header_row: bool) -> Self {
        Self {
            header_row,
            search_input: String::new(),
            search_generation: 0,
            viewport_height: 0.0,
            busy: false,
            tooltip: None,
            next_tooltip_id: 0,
        }
    }

    /// Record new search input, returning the generation to debounce with
    pub fn bump_search(&mut self, input: String) -> u64 {
        self.search_input = input;
        self.search_generation += 1;
        self.search_generation
    }

    /// Show a tooltip, replacing any current one
    pub fn show_tooltip(&mut self, text: impl Into<String>, x: f64, y: f64) -> u64 {
        self.next_tooltip_id += 1;
        let id = self.next_tooltip_id;
        self.tooltip = Some(Tooltip {
            id,
            text: text.into(),
            x,
            y,
        });
        id
    }

    /// Hide the tooltip if it is still the one with `id`
    ///
    /// Returns true if something was hidden.
    pub fn dismiss_tooltip(&mut self, id: u64) -> bool {
        match &self.tooltip {
            Some(tooltip) if tooltip.id == id => {
                self.tooltip = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(true)
    }
}
