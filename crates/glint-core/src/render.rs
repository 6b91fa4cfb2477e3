//! Row markup.
//!
//! Both the styled and the fallback path produce [`RenderedRow`]s; the
//! [`LineRenderer`] turns them into the final `<samp>` block, with one
//! boundary row above and one below.

use crate::window::{LineWindow, line_count};

/// Escapes `text` for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

/// Appends `text` to `out`, escaped.
pub fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
}

/// One numbered source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub line_number: usize,
    pub highlighted: bool,
    /// Row content, already escaped.
    pub html: String,
}

impl RenderedRow {
    fn write(&self, out: &mut String) {
        out.push_str("<span class=\"line");
        if self.highlighted {
            out.push_str(" highlighted");
        }
        out.push_str("\"><span class=\"number\">");
        out.push_str(&self.line_number.to_string());
        out.push_str("</span>");
        out.push_str(&self.html);
        out.push_str("</span>");
    }
}

/// Marker row above or below the numbered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Lines are hidden on this side.
    Ellipsis,
    /// Nothing is hidden on this side.
    Spacer,
}

impl Boundary {
    pub fn top(window: &LineWindow) -> Self {
        if window.clips_top() {
            Boundary::Ellipsis
        } else {
            Boundary::Spacer
        }
    }

    pub fn bottom(window: &LineWindow, total_lines: usize) -> Self {
        if window.clips_bottom(total_lines) {
            Boundary::Ellipsis
        } else {
            Boundary::Spacer
        }
    }

    fn markup(self) -> &'static str {
        match self {
            Boundary::Ellipsis => "<span class=\"line\"><span class=\"number x\">…</span></span>",
            Boundary::Spacer => "<span class=\"line spacer\"><span class=\"number x\"></span></span>",
        }
    }
}

/// Wraps rows in the output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRenderer {
    /// Token-styled output.
    Styled,
    /// Plain output after a tokenize failure.
    Fallback,
}

impl LineRenderer {
    /// Class of the `<samp>` container.
    pub fn container_class(self) -> &'static str {
        match self {
            LineRenderer::Styled => "styled",
            LineRenderer::Fallback => "styled error",
        }
    }

    /// Renders `rows` between the `top` and `bottom` markers, one row per line.
    pub fn render(self, rows: &[RenderedRow], top: Boundary, bottom: Boundary) -> String {
        let mut out = String::new();

        out.push_str("<samp class=\"");
        out.push_str(self.container_class());
        out.push_str("\">");
        out.push_str(top.markup());
        for row in rows {
            out.push('\n');
            row.write(&mut out);
        }
        out.push('\n');
        out.push_str(bottom.markup());
        out.push_str("</samp>");
        out
    }
}

/// Unstyled rendering used when the source cannot be tokenized.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawLineRenderer;

impl RawLineRenderer {
    /// Escaped source lines within `window`, keeping their real numbers.
    pub fn rows(source: &str, window: &LineWindow) -> Vec<RenderedRow> {
        let normalized = source.replace("\r\n", "\n");
        let lines: Vec<&str> = normalized.split('\n').collect();

        window
            .rows(lines.len())
            .map(|number| RenderedRow {
                line_number: number,
                highlighted: window.is_focus(number),
                html: escape_html(lines[number - 1]),
            })
            .collect()
    }

    /// Renders `source` as plain numbered lines in the error container.
    pub fn render(source: &str, window: &LineWindow) -> String {
        let rows = Self::rows(source, window);
        let total_lines = line_count(source);
        LineRenderer::Fallback.render(
            &rows,
            Boundary::top(window),
            Boundary::bottom(window, total_lines),
        )
    }
}
