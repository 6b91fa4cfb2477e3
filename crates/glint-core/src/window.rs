//! Line windows.
//!
//! A [`LineWindow`] selects the inclusive range of source lines to render and
//! the line to emphasize. Both renderers take their row range and boundary
//! markers from the same window so their output always lines up.

use std::ops::RangeInclusive;

/// Default number of lines shown either side of a focus line.
pub const DEFAULT_BUFFER: i64 = 8;

/// Smallest and largest accepted buffer radius.
pub const MIN_BUFFER: i64 = 1;
pub const MAX_BUFFER: i64 = 30;

/// Inclusive line range to render, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow {
    /// First rendered line, never below 1.
    pub start_line: usize,
    /// Last rendered line, or `None` to render to the end of the source.
    pub end_line: Option<usize>,
    /// Line marked as highlighted.
    pub focus_line: Option<usize>,
}

impl LineWindow {
    /// Creates a window, normalizing the bounds.
    ///
    /// A missing or zero start becomes 1, and an end before the start is
    /// raised to the start.
    pub fn new(start: Option<usize>, end: Option<usize>, focus: Option<usize>) -> Self {
        let start_line = start.unwrap_or(1).max(1);
        Self {
            start_line,
            end_line: end.map(|end| end.max(start_line)),
            focus_line: focus,
        }
    }

    /// Window of `buffer` lines either side of `line`.
    ///
    /// `buffer` is clamped to [`MIN_BUFFER`]..=[`MAX_BUFFER`] and `line` to 1
    /// or above.
    ///
    /// ```
    /// use glint_core::LineWindow;
    ///
    /// let window = LineWindow::around(50, 8);
    /// assert_eq!(window.start_line, 42);
    /// assert_eq!(window.end_line, Some(58));
    /// assert_eq!(window.focus_line, Some(50));
    /// ```
    pub fn around(line: i64, buffer: i64) -> Self {
        let line = to_line(line.max(1));
        let buffer = to_line(buffer.clamp(MIN_BUFFER, MAX_BUFFER));

        let window = Self {
            start_line: line.saturating_sub(buffer).max(1),
            end_line: Some(line.saturating_add(buffer)),
            focus_line: Some(line),
        };
        tracing::trace!(
            focus = line,
            buffer,
            start = window.start_line,
            end = ?window.end_line,
            "computed line window"
        );
        window
    }

    /// Returns true if `line` comes before the window.
    pub fn is_before(&self, line: usize) -> bool {
        line < self.start_line
    }

    /// Returns true if `line` comes after the window.
    pub fn is_after(&self, line: usize) -> bool {
        self.end_line.is_some_and(|end| line > end)
    }

    /// Returns true if `line` is the focus line.
    pub fn is_focus(&self, line: usize) -> bool {
        self.focus_line == Some(line)
    }

    /// Line numbers to emit as rows for a source of `total_lines` lines.
    ///
    /// Empty when the window starts past the end of the source.
    pub fn rows(&self, total_lines: usize) -> RangeInclusive<usize> {
        let last = self.end_line.map_or(total_lines, |end| end.min(total_lines));
        self.start_line..=last
    }

    /// Returns true if lines above the window are hidden.
    pub fn clips_top(&self) -> bool {
        self.start_line > 1
    }

    /// Returns true if lines below the window are hidden.
    pub fn clips_bottom(&self, total_lines: usize) -> bool {
        self.end_line.is_some_and(|end| total_lines > end)
    }
}

impl Default for LineWindow {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// Number of `\n`-separated lines in `source`. An empty source has one line.
pub fn line_count(source: &str) -> usize {
    source.bytes().filter(|&b| b == b'\n').count() + 1
}

fn to_line(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_bounds() {
        let window = LineWindow::new(None, Some(10), None);
        assert_eq!(window.start_line, 1);
        assert_eq!(window.end_line, Some(10));

        let window = LineWindow::new(Some(0), None, Some(3));
        assert_eq!(window.start_line, 1);
        assert_eq!(window.end_line, None);
        assert_eq!(window.focus_line, Some(3));

        let window = LineWindow::new(Some(12), Some(4), None);
        assert_eq!(window.end_line, Some(12));
    }

    #[test]
    fn test_around_clamps() {
        let window = LineWindow::around(50, 100);
        assert_eq!(window.start_line, 20);
        assert_eq!(window.end_line, Some(80));

        let window = LineWindow::around(50, 0);
        assert_eq!(window.start_line, 49);
        assert_eq!(window.end_line, Some(51));

        let window = LineWindow::around(-5, 8);
        assert_eq!(window.start_line, 1);
        assert_eq!(window.end_line, Some(9));
        assert_eq!(window.focus_line, Some(1));
    }

    #[test]
    fn test_around_near_top() {
        let window = LineWindow::around(3, 8);
        assert_eq!(window.start_line, 1);
        assert_eq!(window.end_line, Some(11));
        assert!(!window.clips_top());
    }

    #[test]
    fn test_rows_and_clipping() {
        let window = LineWindow::around(50, 8);
        assert_eq!(window.rows(200), 42..=58);
        assert!(window.clips_top());
        assert!(window.clips_bottom(200));

        assert_eq!(window.rows(55), 42..=55);
        assert!(!window.clips_bottom(55));
        assert!(!window.clips_bottom(58));
        assert!(window.clips_bottom(59));

        assert_eq!(window.rows(10).count(), 0);
    }

    #[test]
    fn test_filters() {
        let window = LineWindow::new(Some(5), Some(7), Some(6));
        assert!(window.is_before(4));
        assert!(!window.is_before(5));
        assert!(window.is_after(8));
        assert!(!window.is_after(7));
        assert!(window.is_focus(6));

        assert!(!LineWindow::default().is_after(usize::MAX));
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("a\nb"), 2);
        assert_eq!(line_count("a\r\nb\n"), 3);
    }
}
