//! CSV viewport calculations
//!
//! Tracks which slice of the (filtered, sorted) data rows is materialized.
//! Rows are laid out with a fixed height inside a spacer that reserves the
//! full scroll extent; only the window around the scroll position is drawn.

/// Extra rows rendered above and below the viewport
pub const DEFAULT_BUFFER_ROWS: usize = 5;

/// Row height used when measurement yields nothing usable
pub const FALLBACK_ROW_HEIGHT: f64 = 30.0;

/// Scroll movement (in pixels) below which a redraw is skipped
pub const SCROLL_EPSILON: f64 = 1.0;

/// Half-open range `[start, end)` of data rows to materialize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowWindow {
    pub start: usize,
    pub end: usize,
}

impl RowWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Viewport state for the virtualized table
#[derive(Debug, Clone)]
pub struct ScrollViewport {
    /// Height of one rendered row in pixels
    pub row_height: f64,
    /// Height of the visible area in pixels
    pub viewport_height: f64,
    /// Current vertical scroll offset in pixels
    pub scroll_offset: f64,
    /// Rows rendered beyond each viewport edge
    pub buffer: usize,
    /// Minimum scroll delta that triggers a redraw
    pub epsilon: f64,
    /// Scroll offset of the last rendered window (None forces a redraw)
    last_rendered: Option<f64>,
}

impl Default for ScrollViewport {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_BUFFER_ROWS)
    }
}

impl ScrollViewport {
    /// Create a viewport with the fallback row height
    pub fn new(viewport_height: f64, buffer: usize) -> Self {
        Self {
            row_height: FALLBACK_ROW_HEIGHT,
            viewport_height: viewport_height.max(0.0),
            scroll_offset: 0.0,
            buffer,
            epsilon: SCROLL_EPSILON,
            last_rendered: None,
        }
    }

    /// Accept a measured sample-row height, falling back when unusable
    ///
    /// Returns the height actually in effect.
    pub fn set_measured_row_height(&mut self, measured: f64, fallback: f64) -> f64 {
        self.row_height = if measured.is_finite() && measured > 0.0 {
            measured
        } else {
            tracing::warn!(
                "Could not determine row height (measured {}), falling back to {}px",
                measured,
                fallback
            );
            fallback
        };
        self.invalidate();
        self.row_height
    }

    /// Number of rows that fit in the viewport
    pub fn visible_row_count(&self) -> usize {
        if self.row_height <= 0.0 {
            return 0;
        }
        (self.viewport_height / self.row_height).ceil() as usize
    }

    /// Upper bound on rows materialized for any scroll offset
    pub fn max_rendered_rows(&self) -> usize {
        self.visible_row_count()
            .saturating_add(self.buffer.saturating_mul(2))
    }

    /// Rows to materialize for the current scroll offset
    pub fn window(&self, total_rows: usize) -> RowWindow {
        let first_visible = if self.row_height > 0.0 {
            (self.scroll_offset.max(0.0) / self.row_height).floor() as usize
        } else {
            0
        };
        let start = first_visible.saturating_sub(self.buffer).min(total_rows);
        let end = start.saturating_add(self.max_rendered_rows()).min(total_rows);
        RowWindow { start, end }
    }

    /// Total scrollable height for `total_rows`
    pub fn spacer_height(&self, total_rows: usize) -> f64 {
        total_rows as f64 * self.row_height
    }

    /// Offset of the rendered block so it lines up with the spacer
    pub fn block_offset(&self, window: RowWindow) -> f64 {
        window.start as f64 * self.row_height
    }

    /// Record a scroll position
    ///
    /// Returns false when the offset moved less than `epsilon` since the
    /// last render, meaning the current window is still valid.
    pub fn scroll_to(&mut self, offset: f64) -> bool {
        self.scroll_offset = offset.max(0.0);
        match self.last_rendered {
            Some(last) if (self.scroll_offset - last).abs() < self.epsilon => false,
            _ => true,
        }
    }

    /// Update the viewport height and force the next render
    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height.max(0.0);
        self.invalidate();
    }

    /// Note that the window for the current offset has been drawn
    pub fn mark_rendered(&mut self) {
        self.last_rendered = Some(self.scroll_offset);
    }

    /// Forget the last rendered offset so the next scroll always redraws
    pub fn invalidate(&mut self) {
        self.last_rendered = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(height: f64, row_height: f64) -> ScrollViewport {
        let mut vp = ScrollViewport::new(height, DEFAULT_BUFFER_ROWS);
        vp.set_measured_row_height(row_height, FALLBACK_ROW_HEIGHT);
        vp
    }

    #[test]
    fn test_visible_row_count_rounds_up() {
        assert_eq!(viewport(600.0, 30.0).visible_row_count(), 20);
        assert_eq!(viewport(610.0, 30.0).visible_row_count(), 21);
    }

    #[test]
    fn test_window_at_top() {
        let vp = viewport(600.0, 30.0);
        assert_eq!(vp.window(1000), RowWindow { start: 0, end: 30 });
    }

    #[test]
    fn test_window_scrolled() {
        let mut vp = viewport(600.0, 30.0);
        vp.scroll_to(3000.0); // first visible row 100
        let window = vp.window(1000);
        assert_eq!(window, RowWindow { start: 95, end: 125 });
        assert_eq!(vp.block_offset(window), 95.0 * 30.0);
    }

    #[test]
    fn test_window_clamped_at_end() {
        let mut vp = viewport(600.0, 30.0);
        vp.scroll_to(29_900.0);
        let window = vp.window(1000);
        assert_eq!(window.end, 1000);
        assert!(window.start <= window.end);
    }

    #[test]
    fn test_window_past_end_is_empty() {
        // Scroll offset left over from a larger result set
        let mut vp = viewport(600.0, 30.0);
        vp.scroll_to(90_000.0);
        let window = vp.window(10);
        assert!(window.is_empty());
        assert_eq!(window.start, 10);
    }

    #[test]
    fn test_window_bounded_independent_of_total() {
        let mut vp = viewport(900.0, 24.0);
        let bound = vp.visible_row_count() + 2 * DEFAULT_BUFFER_ROWS;
        for offset in [0.0, 12.0, 5_000.0, 1_234_567.0, 23_999_000.0] {
            vp.scroll_to(offset);
            assert!(vp.window(1_000_000).len() <= bound);
        }
        assert!(bound <= 50);
    }

    #[test]
    fn test_spacer_height() {
        let vp = viewport(600.0, 25.0);
        assert_eq!(vp.spacer_height(1_000_000), 25_000_000.0);
    }

    #[test]
    fn test_row_height_fallback() {
        let mut vp = ScrollViewport::new(600.0, DEFAULT_BUFFER_ROWS);
        assert_eq!(vp.set_measured_row_height(0.0, 30.0), 30.0);
        assert_eq!(vp.set_measured_row_height(-4.0, 30.0), 30.0);
        assert_eq!(vp.set_measured_row_height(f64::NAN, 30.0), 30.0);
        assert_eq!(vp.set_measured_row_height(41.5, 30.0), 41.5);
    }

    #[test]
    fn test_scroll_epsilon_guard() {
        let mut vp = viewport(600.0, 30.0);
        assert!(vp.scroll_to(100.0));
        vp.mark_rendered();

        assert!(!vp.scroll_to(100.4));
        assert!(vp.scroll_to(101.0));
    }

    #[test]
    fn test_resize_forces_redraw() {
        let mut vp = viewport(600.0, 30.0);
        vp.scroll_to(100.0);
        vp.mark_rendered();

        vp.resize(900.0);
        assert_eq!(vp.visible_row_count(), 30);
        assert!(vp.scroll_to(100.0));
    }

    #[test]
    fn test_negative_offset_clamped() {
        let mut vp = viewport(600.0, 30.0);
        vp.scroll_to(-50.0);
        assert_eq!(vp.scroll_offset, 0.0);
        assert_eq!(vp.window(100).start, 0);
    }

    #[test]
    fn test_extreme_sizes_do_not_overflow() {
        let mut vp = ScrollViewport::new(600.0, usize::MAX);
        vp.set_measured_row_height(1e-300, FALLBACK_ROW_HEIGHT);
        assert_eq!(vp.max_rendered_rows(), usize::MAX);

        vp.scroll_to(1e9);
        let window = vp.window(1_000);
        assert!(window.end <= 1_000);
        assert!(window.start <= window.end);
    }
}
