//! Sliding window cursor over the full series.
//!
//! Boundary policy: WRAP. When auto-advance runs the start offset past the
//! end of the series the cursor resets to 0 and the view restarts from the
//! oldest records. Manual scrolling clamps at both edges instead, so the
//! arrow keys cannot jump across the boundary.

use std::ops::Range;

/// Minimum number of points a window needs to be worth rendering.
pub const MIN_WINDOW_POINTS: usize = 2;

#[derive(Debug, Clone)]
pub struct WindowCursor {
    start: usize,
    window_size: usize,
    step: usize,
}

impl WindowCursor {
    pub fn new(window_size: usize, step: usize) -> Self {
        Self {
            start: 0,
            window_size: window_size.max(MIN_WINDOW_POINTS),
            step: step.max(1),
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Current half-open range over a series of length `len`, clamped so it
    /// can never slice out of range even if `len` shrank under us since the
    /// last advance.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = self.start.min(len);
        let end = (start + self.window_size).min(len);
        start..end
    }

    /// Advance by `step`, wrapping to the front when the start offset runs
    /// past the end of the series.
    pub fn advance(&mut self, len: usize) {
        if len == 0 {
            self.start = 0;
            return;
        }
        self.start += self.step;
        if self.start >= len {
            self.start = 0;
        }
    }

    /// Manual scroll toward older records; clamps at the front.
    pub fn scroll_back(&mut self) {
        let step = self.window_size / 4;
        self.start = self.start.saturating_sub(step.max(1));
    }

    /// Manual scroll toward newer records; clamps so the window stays
    /// fully inside the series.
    pub fn scroll_forward(&mut self, len: usize) {
        let step = (self.window_size / 4).max(1);
        if self.start + self.window_size < len {
            self.start = (self.start + step).min(len.saturating_sub(self.window_size));
        }
    }

    /// Reset to the front of the series, used after a full data refresh.
    pub fn reset(&mut self) {
        self.start = 0;
    }
}
