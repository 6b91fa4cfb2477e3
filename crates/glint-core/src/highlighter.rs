//! Highlighting entry points.

use std::path::Path;

use glint_lexer::{PhpTokenizer, Tokenizer};

use crate::processor::TokenStreamProcessor;
use crate::render::{Boundary, LineRenderer, RawLineRenderer};
use crate::window::{LineWindow, line_count};
use crate::{HighlightError, HighlightResult};

const STYLES: &str = include_str!("../resources/styles.css");

/// Renders source code as numbered, styled HTML rows.
///
/// Rendering a string never fails: source the tokenizer rejects is shown
/// unstyled in a `styled error` container instead.
///
/// ```
/// use glint_core::Highlighter;
///
/// let html = Highlighter::new().highlight("<?php echo strlen($name);", None, None, None);
/// assert!(html.starts_with("<samp class=\"styled\">"));
/// assert!(html.contains("<span class=\"function\">strlen</span>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Highlighter<T = PhpTokenizer> {
    tokenizer: T,
}

impl Highlighter {
    /// Creates a PHP highlighter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Tokenizer> Highlighter<T> {
    /// Creates a highlighter driven by `tokenizer`.
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Highlights `source` from `start` to `end`, marking `focus`.
    ///
    /// Missing bounds extend to the start or end of the source.
    pub fn highlight(
        &self,
        source: &str,
        start: Option<usize>,
        end: Option<usize>,
        focus: Option<usize>,
    ) -> String {
        self.highlight_window(source, &LineWindow::new(start, end, focus))
    }

    /// Highlights the lines of `source` inside `window`.
    pub fn highlight_window(&self, source: &str, window: &LineWindow) -> String {
        match self.try_highlight(source, window) {
            Ok(html) => html,
            Err(err) => {
                tracing::debug!(error = %err, "rendering raw lines");
                RawLineRenderer::render(source, window)
            }
        }
    }

    /// Highlights `source` without the raw fallback.
    pub fn try_highlight(&self, source: &str, window: &LineWindow) -> HighlightResult<String> {
        let rows = TokenStreamProcessor::process(&self.tokenizer, source, window)?;
        Ok(LineRenderer::Styled.render(
            &rows,
            Boundary::top(window),
            Boundary::bottom(window, line_count(source)),
        ))
    }

    /// Highlights `buffer` lines either side of `line`.
    ///
    /// `buffer` is clamped to 1..=30 and `line` to 1 or above.
    pub fn extract(&self, source: &str, line: i64, buffer: i64) -> String {
        self.highlight_window(source, &LineWindow::around(line, buffer))
    }

    /// Reads and highlights a file.
    ///
    /// A path that does not exist yields an empty string.
    pub fn highlight_file(
        &self,
        path: impl AsRef<Path>,
        start: Option<usize>,
        end: Option<usize>,
        focus: Option<usize>,
    ) -> HighlightResult<String> {
        let Some(source) = read_source(path.as_ref())? else {
            return Ok(String::new());
        };
        Ok(self.highlight(&source, start, end, focus))
    }

    /// Reads a file and highlights `buffer` lines either side of `line`.
    ///
    /// A path that does not exist yields an empty string.
    pub fn extract_from_file(
        &self,
        path: impl AsRef<Path>,
        line: i64,
        buffer: i64,
    ) -> HighlightResult<String> {
        let Some(source) = read_source(path.as_ref())? else {
            return Ok(String::new());
        };
        Ok(self.extract(&source, line, buffer))
    }

    /// Returns the bundled stylesheet in a `<style>` element.
    pub fn export_inline_styles(&self) -> String {
        format!("<style>\n{STYLES}\n</style>")
    }
}

/// Reads `path`, or `None` if there is nothing there.
fn read_source(path: &Path) -> HighlightResult<Option<String>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "source file not found");
        return Ok(None);
    }

    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|source| HighlightError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_lexer::{LexError, Lexeme};

    struct Rejecting;

    impl Tokenizer for Rejecting {
        fn tokenize(&self, _source: &str) -> Result<Vec<Lexeme>, LexError> {
            Err(LexError::UnexpectedDelimiter { line: 1, found: ')' })
        }
    }

    fn source(lines: usize) -> String {
        let mut source = String::from("<?php");
        for i in 2..=lines {
            source.push_str(&format!("\n$line{i} = {i};"));
        }
        source
    }

    #[test]
    fn test_highlight_is_styled() {
        let html = Highlighter::new().highlight("<?php\nnew Foo();", None, None, None);
        assert!(html.starts_with("<samp class=\"styled\">"));
        assert!(html.contains("<span class=\"class\">Foo</span>"));
        assert_eq!(html.matches("class=\"line spacer\"").count(), 2);
    }

    #[test]
    fn test_extract_window() {
        let html = Highlighter::new().extract(&source(200), 50, 8);

        assert!(html.contains("<span class=\"number\">42</span>"));
        assert!(html.contains("<span class=\"number\">58</span>"));
        assert!(!html.contains("<span class=\"number\">41</span>"));
        assert!(!html.contains("<span class=\"number\">59</span>"));
        assert_eq!(html.matches("line highlighted").count(), 1);
        assert!(html.contains("<span class=\"line highlighted\"><span class=\"number\">50</span>"));
        assert_eq!(html.matches("number x\">…").count(), 2);
    }

    #[test]
    fn test_unterminated_string_falls_back() {
        let html = Highlighter::new().highlight("<?php\n$a = 'oops;\n$b = 1;", None, None, Some(2));

        assert!(html.starts_with("<samp class=\"styled error\">"));
        assert!(html.contains(
            "<span class=\"line highlighted\"><span class=\"number\">2</span>$a = &#039;oops;</span>"
        ));
        assert!(html.contains("<span class=\"number\">3</span>$b = 1;</span>"));
    }

    #[test]
    fn test_custom_tokenizer_falls_back() {
        let highlighter = Highlighter::with_tokenizer(Rejecting);
        let html = highlighter.highlight("a\nb", None, None, None);
        assert!(html.starts_with("<samp class=\"styled error\">"));

        let window = LineWindow::default();
        assert!(matches!(
            highlighter.try_highlight("a\nb", &window),
            Err(HighlightError::Tokenize(LexError::UnexpectedDelimiter { .. }))
        ));
    }

    #[test]
    fn test_highlight_is_repeatable() {
        let highlighter = Highlighter::new();
        let source = source(40);
        assert_eq!(
            highlighter.extract(&source, 20, 5),
            highlighter.extract(&source, 20, 5)
        );
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.php");

        let highlighter = Highlighter::new();
        assert_eq!(highlighter.highlight_file(&path, None, None, None).unwrap(), "");
        assert_eq!(highlighter.extract_from_file(&path, 3, 8).unwrap(), "");
    }

    #[test]
    fn test_file_entry_points() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.php");
        std::fs::write(&path, source(30)).unwrap();

        let highlighter = Highlighter::new();
        let from_file = highlighter.extract_from_file(&path, 10, 2).unwrap();
        assert_eq!(from_file, highlighter.extract(&source(30), 10, 2));

        let whole = highlighter.highlight_file(&path, None, None, None).unwrap();
        assert_eq!(whole.matches("<span class=\"number\">").count(), 30);
    }

    #[test]
    fn test_unreadable_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.php");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = Highlighter::new()
            .highlight_file(&path, None, None, None)
            .unwrap_err();
        assert!(matches!(err, HighlightError::Io { .. }));

        let err = Highlighter::new().extract_from_file(dir.path(), 1, 8).unwrap_err();
        assert!(matches!(err, HighlightError::Io { .. }));
    }

    #[test]
    fn test_export_inline_styles() {
        let styles = Highlighter::new().export_inline_styles();
        assert!(styles.starts_with("<style>\n"));
        assert!(styles.ends_with("\n</style>"));
        assert!(styles.contains("samp.styled"));
    }
}
