//! Token stream to styled rows.
//!
//! The processor walks the lexemes once, front to back, keeping a pending
//! queue and a [`TokenHistory`]. Multi-line tokens crossing a window edge are
//! cut there and the tail is pushed back onto the front of the queue with the
//! line it starts on, so every piece is filtered against the window on its
//! own line.
//!
//! Output is accumulated in a single buffer where `\n` separates lines, then
//! cut into one [`RenderedRow`] per line of the window.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::ops::ControlFlow;

use glint_lexer::{LexError, Lexeme, Token, TokenKind, Tokenizer};

use crate::history::TokenHistory;
use crate::render::{RenderedRow, escape_into};
use crate::resolver;
use crate::rules::{self, PUNCTUATION_CLASS};
use crate::window::{LineWindow, line_count};

#[derive(Debug)]
struct Pending {
    lexeme: Lexeme,
    /// Set on the tail of a split token; its opening delimiter went out
    /// with an earlier piece.
    continued: bool,
}

impl From<Lexeme> for Pending {
    fn from(lexeme: Lexeme) -> Self {
        Self {
            lexeme,
            continued: false,
        }
    }
}

/// One styling pass over a token stream.
#[derive(Debug)]
pub struct TokenStreamProcessor<'w> {
    window: &'w LineWindow,
    pending: VecDeque<Pending>,
    history: TokenHistory,
    buffer: String,
    /// Line the stream has reached, used to place bare characters.
    current_line: usize,
}

impl<'w> TokenStreamProcessor<'w> {
    pub fn new(lexemes: Vec<Lexeme>, window: &'w LineWindow) -> Self {
        Self {
            window,
            pending: lexemes.into_iter().map(Pending::from).collect(),
            history: TokenHistory::new(),
            buffer: String::new(),
            current_line: 1,
        }
    }

    /// Tokenizes `source` and returns its styled rows for `window`.
    ///
    /// Nothing is rendered if tokenizing fails.
    pub fn process<T: Tokenizer + ?Sized>(
        tokenizer: &T,
        source: &str,
        window: &LineWindow,
    ) -> Result<Vec<RenderedRow>, LexError> {
        let lexemes = tokenizer.tokenize(source)?;
        let mut processor = TokenStreamProcessor::new(lexemes, window);
        processor.run();
        Ok(processor.into_rows(line_count(source)))
    }

    /// Consumes the stream up to the end of the window.
    pub fn run(&mut self) {
        while let Some(Pending { lexeme, continued }) = self.pending.pop_front() {
            let flow = match lexeme {
                Lexeme::Token(token) => self.token(token, continued),
                Lexeme::Char(c) => self.bare_char(c),
            };
            if flow.is_break() {
                break;
            }
        }
        tracing::trace!(
            bytes = self.buffer.len(),
            unprocessed = self.pending.len(),
            "styled token stream"
        );
    }

    /// Cuts the buffer into rows for a source of `total_lines` lines.
    pub fn into_rows(self, total_lines: usize) -> Vec<RenderedRow> {
        let window = self.window;
        let mut lines = self.buffer.split('\n');

        window
            .rows(total_lines)
            .map(|number| RenderedRow {
                line_number: number,
                highlighted: window.is_focus(number),
                html: lines.next().unwrap_or_default().to_owned(),
            })
            .collect()
    }

    fn token(&mut self, token: Token, continued: bool) -> ControlFlow<()> {
        let token = self.split(token);
        self.current_line = token.end_line();
        self.history.push(Lexeme::Token(token.clone()));

        if self.window.is_before(token.line) {
            return ControlFlow::Continue(());
        }
        if self.window.is_after(token.line) {
            return ControlFlow::Break(());
        }

        self.write_token(&token, continued);
        ControlFlow::Continue(())
    }

    fn bare_char(&mut self, c: char) -> ControlFlow<()> {
        self.history.push(Lexeme::Char(c));

        if self.window.is_before(self.current_line) {
            return ControlFlow::Continue(());
        }
        if self.window.is_after(self.current_line) {
            return ControlFlow::Break(());
        }

        write_fragments(
            &mut self.buffer,
            PUNCTUATION_CLASS,
            None,
            c.encode_utf8(&mut [0; 4]),
        );
        ControlFlow::Continue(())
    }

    /// Cuts `token` where it crosses a window edge and queues the tail.
    ///
    /// A token starting above the window keeps everything up to the newline
    /// that ends the line before `start_line`. Whitespace or a comment
    /// running past the last window line keeps the text before the newline
    /// that ends it. Each edge costs at most one cut.
    fn split(&mut self, mut token: Token) -> Token {
        let (at, tail_line) = if self.window.is_before(token.line) {
            let start = self.window.start_line;
            let Some(newline) = nth_newline(&token.text, start - token.line) else {
                return token;
            };
            (newline + 1, start)
        } else {
            let Some(end) = self
                .window
                .end_line
                .filter(|&end| end >= token.line && cut_at_end(token.kind))
            else {
                return token;
            };
            let Some(newline) = nth_newline(&token.text, end - token.line + 1) else {
                return token;
            };
            (newline, end + 1)
        };

        let tail = token.text.split_off(at);
        if !tail.is_empty() {
            self.pending.push_front(Pending {
                lexeme: Lexeme::Token(Token::new(token.kind, tail, tail_line)),
                continued: true,
            });
        }
        token
    }

    fn write_token(&mut self, token: &Token, continued: bool) {
        let mut class = rules::class_for(token.kind);
        let mut text = token.text.as_str();
        let mut quote = None;

        match token.kind {
            TokenKind::Whitespace => {
                self.buffer.extend(token.text.chars().filter(|&c| c != '\r'));
                return;
            }
            TokenKind::ConstantEncapsedString => {
                (text, quote) = strip_quotes(text, continued);
            }
            TokenKind::Variable if token.text == "$this" => {
                class = Cow::Owned(format!("{class} this"));
            }
            TokenKind::String => {
                let next = self.pending.front().map(|p| &p.lexeme);
                let after = self.pending.get(1).map(|p| &p.lexeme);
                if let Some(resolved) = resolver::resolve(&self.history, next, after) {
                    class = Cow::Borrowed(resolved);
                }
            }
            _ => {}
        }

        write_fragments(&mut self.buffer, &class, quote, text);
    }
}

fn cut_at_end(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment
    )
}

/// Byte offset of the `n`th newline in `text`, counting from 1.
fn nth_newline(text: &str, n: usize) -> Option<usize> {
    let index = n.checked_sub(1)?;
    text.match_indices('\n').nth(index).map(|(at, _)| at)
}

/// Splits a quoted literal into its content and quote character.
///
/// A continued piece only carries the closing quote.
fn strip_quotes(text: &str, continued: bool) -> (&str, Option<char>) {
    let Some(quote) = text.chars().last().filter(|c| matches!(c, '\'' | '"')) else {
        return (text, None);
    };
    let inner = &text[..text.len() - 1];
    if continued {
        return (inner, Some(quote));
    }
    match inner.split_once(quote) {
        Some((_, content)) => (content, Some(quote)),
        None => (inner, Some(quote)),
    }
}

/// Wraps every non-empty line of `text` in a span, keeping the newlines.
fn write_fragments(out: &mut String, class: &str, quote: Option<char>, text: &str) {
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let part: Cow<'_, str> = if part.contains('\r') {
            Cow::Owned(part.replace('\r', ""))
        } else {
            Cow::Borrowed(part)
        };
        if part.is_empty() {
            continue;
        }

        out.push_str("<span class=\"");
        out.push_str(class);
        out.push('"');
        if let Some(quote) = quote {
            out.push_str(" data-quote=\"");
            escape_into(out, quote.encode_utf8(&mut [0; 4]));
            out.push('"');
        }
        out.push('>');
        escape_into(out, &part);
        out.push_str("</span>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_lexer::PhpTokenizer;

    /// Replays a fixed lexeme sequence.
    struct Scripted(Vec<Lexeme>);

    impl Tokenizer for Scripted {
        fn tokenize(&self, _source: &str) -> Result<Vec<Lexeme>, LexError> {
            Ok(self.0.clone())
        }
    }

    fn styled_rows(source: &str, window: LineWindow) -> Vec<RenderedRow> {
        TokenStreamProcessor::process(&PhpTokenizer, source, &window).unwrap()
    }

    fn html(rows: &[RenderedRow]) -> Vec<&str> {
        rows.iter().map(|row| row.html.as_str()).collect()
    }

    #[test]
    fn test_whole_source() {
        let rows = styled_rows("<?php\n$a = 1;", LineWindow::default());
        assert_eq!(
            html(&rows),
            vec![
                "<span class=\"tag open-tag\">&lt;?php</span>",
                "<span class=\"var variable\">$a</span> <span class=\"g\">=</span> \
                 <span class=\"int\">1</span><span class=\"g\">;</span>",
            ]
        );
        assert_eq!(rows[1].line_number, 2);
        assert!(!rows[1].highlighted);
    }

    #[test]
    fn test_string_quotes_and_this() {
        let rows = styled_rows("<?php $this->x = 'it';", LineWindow::default());
        let line = &rows[0].html;
        assert!(line.contains("<span class=\"var variable this\">$this</span>"));
        assert!(line.contains("<span class=\"member\">x</span>"));
        assert!(line.contains(
            "<span class=\"string constant-encapsed-string\" data-quote=\"&#039;\">it</span>"
        ));
    }

    #[test]
    fn test_window_rows_keep_real_numbers() {
        let source = "<?php\n$a = 1;\n$b = 2;\n$c = 3;\n$d = 4;";
        let rows = styled_rows(source, LineWindow::new(Some(3), Some(4), Some(4)));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line_number, 3);
        assert!(rows[0].html.contains("$b"));
        assert!(!rows[0].html.contains("$a"));
        assert_eq!(rows[1].line_number, 4);
        assert!(rows[1].html.contains("$c"));
        assert!(rows[1].highlighted);
    }

    #[test]
    fn test_comment_crossing_window_end() {
        let source = "<?php\n/* one\ntwo\nthree */\n$a;";
        let rows = styled_rows(source, LineWindow::new(Some(2), Some(3), None));

        assert_eq!(
            html(&rows),
            vec![
                "<span class=\"comment\">/* one</span>",
                "<span class=\"comment\">two</span>",
            ]
        );
    }

    #[test]
    fn test_multiline_string_above_window() {
        let source = "<?php $a = 'first\nsecond';\n$b;";
        let rows = styled_rows(source, LineWindow::new(Some(2), None, None));

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].html,
            "<span class=\"string constant-encapsed-string\" data-quote=\"&#039;\">second</span>\
             <span class=\"g\">;</span>"
        );
        assert!(rows[1].html.contains("$b"));
    }

    #[test]
    fn test_long_token_above_window_is_cut_once() {
        let window = LineWindow::new(Some(900), Some(902), None);
        let mut processor = TokenStreamProcessor::new(Vec::new(), &window);
        let text = "<p>row</p>\n".repeat(1000);

        let head = processor.split(Token::new(TokenKind::InlineHtml, text, 1));
        assert_eq!(head.end_line(), 900);
        assert_eq!(processor.pending.len(), 1);

        let Some(Pending { lexeme: Lexeme::Token(tail), continued }) = processor.pending.pop_front()
        else {
            panic!("tail should be a token");
        };
        assert!(continued);
        assert_eq!(tail.line, 900);
        assert!(tail.text.starts_with("<p>row</p>\n"));

        let tail = processor.split(tail);
        assert_eq!(tail.text.matches('\n').count(), 101);
        assert!(processor.pending.is_empty());
    }

    #[test]
    fn test_token_ending_above_window_is_kept_whole() {
        let window = LineWindow::new(Some(10), None, None);
        let mut processor = TokenStreamProcessor::new(Vec::new(), &window);

        let token = processor.split(Token::new(TokenKind::Comment, "/* a\nb */", 2));
        assert_eq!(token.text, "/* a\nb */");
        assert!(processor.pending.is_empty());
    }

    #[test]
    fn test_whole_source_is_not_cut() {
        let window = LineWindow::default();
        let mut processor = TokenStreamProcessor::new(Vec::new(), &window);

        let token = processor.split(Token::new(TokenKind::Whitespace, "\n\n\n", 4));
        assert_eq!(token.text, "\n\n\n");
        assert!(processor.pending.is_empty());
    }

    #[test]
    fn test_history_reaches_above_window() {
        let rows = styled_rows("<?php\n$a = new\nWidget();", LineWindow::new(Some(3), None, None));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line_number, 3);
        assert!(rows[0].html.starts_with("<span class=\"class\">Widget</span>"));

        let source = "<?php\nfinal class Cache extends\nStore {}";
        let rows = styled_rows(source, LineWindow::new(Some(3), Some(3), None));
        assert_eq!(rows.len(), 1);
        assert!(rows[0].html.starts_with("<span class=\"class\">Store</span>"));
    }

    #[test]
    fn test_crlf_is_dropped() {
        let rows = styled_rows("<?php\r\n// note\r\n$a;", LineWindow::default());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].html, "<span class=\"comment\">// note</span>");
        assert!(rows.iter().all(|row| !row.html.contains('\r')));
    }

    #[test]
    fn test_rows_clamped_to_source() {
        let rows = styled_rows("<?php\n$a;", LineWindow::new(Some(1), Some(10), None));
        assert_eq!(rows.len(), 2);

        let rows = styled_rows("<?php\n$a;", LineWindow::new(Some(5), Some(9), None));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_bare_chars_follow_multiline_tokens() {
        let lexemes = vec![
            Lexeme::Token(Token::new(TokenKind::OpenTag, "<?php ", 1)),
            Lexeme::Token(Token::new(TokenKind::InlineHtml, "a\nb\nc", 1)),
            Lexeme::Char(';'),
        ];
        let source = "<?php a\nb\nc;";
        let window = LineWindow::new(Some(3), Some(3), None);
        let rows = TokenStreamProcessor::process(&Scripted(lexemes), source, &window).unwrap();

        assert_eq!(
            html(&rows),
            vec!["<span class=\"html\">c</span><span class=\"g\">;</span>"]
        );
    }

    #[test]
    fn test_tokenize_error_propagates() {
        let window = LineWindow::default();
        let err = TokenStreamProcessor::process(&PhpTokenizer, "<?php 'open", &window).unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { line: 1 }));
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"abc\"", false), ("abc", Some('"')));
        assert_eq!(strip_quotes("''", false), ("", Some('\'')));
        assert_eq!(strip_quotes("tail'", true), ("tail", Some('\'')));
    }
}
