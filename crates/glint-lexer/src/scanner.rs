//! PHP scanning state machine.
//!
//! The scanner is lossless: concatenating the text of every emitted lexeme
//! reproduces the input byte for byte.
//!
//! ## States
//!
//! ```text
//!  inline html ──<?php──▶ script ──?>──▶ inline html
//!                           │  ▲
//!              "..${  {$    ▼  │ }
//!                        encapsed ("...", `...`, heredoc)
//! ```

use std::num::IntErrorKind;

use crate::LexError;
use crate::cursor::{Cursor, is_ident_continue, is_ident_start, is_whitespace};
use crate::keywords;
use crate::token::{Lexeme, Token, TokenKind};

/// Multi-byte operators, longest first so prefixes never shadow them.
const OPERATORS: &[(&str, TokenKind)] = &[
    ("<=>", TokenKind::Spaceship),
    ("**=", TokenKind::PowEqual),
    ("...", TokenKind::Ellipsis),
    ("<<=", TokenKind::SlEqual),
    (">>=", TokenKind::SrEqual),
    ("===", TokenKind::IsIdentical),
    ("!==", TokenKind::IsNotIdentical),
    ("??=", TokenKind::CoalesceEqual),
    ("?->", TokenKind::NullsafeObjectOperator),
    ("::", TokenKind::PaamayimNekudotayim),
    ("->", TokenKind::ObjectOperator),
    ("=>", TokenKind::DoubleArrow),
    ("++", TokenKind::Inc),
    ("--", TokenKind::Dec),
    ("==", TokenKind::IsEqual),
    ("!=", TokenKind::IsNotEqual),
    ("<>", TokenKind::IsNotEqual),
    ("<=", TokenKind::IsSmallerOrEqual),
    (">=", TokenKind::IsGreaterOrEqual),
    ("&&", TokenKind::BooleanAnd),
    ("||", TokenKind::BooleanOr),
    ("??", TokenKind::Coalesce),
    ("+=", TokenKind::PlusEqual),
    ("-=", TokenKind::MinusEqual),
    ("*=", TokenKind::MulEqual),
    ("/=", TokenKind::DivEqual),
    (".=", TokenKind::ConcatEqual),
    ("%=", TokenKind::ModEqual),
    ("&=", TokenKind::AndEqual),
    ("|=", TokenKind::OrEqual),
    ("^=", TokenKind::XorEqual),
    ("<<", TokenKind::Sl),
    (">>", TokenKind::Sr),
    ("**", TokenKind::Pow),
];

/// Characters emitted as bare [`Lexeme::Char`] values.
const PUNCTUATION: &[u8] = b";,.[]()|^&+-/*=%!~$<>?:@{}";

/// Where a script-mode scan hands control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    /// At `?>` or end of input.
    CloseTag,
    /// At the `}` that brings the delimiter stack back below this depth.
    Brace(usize),
}

/// End marker of an interpolated literal.
#[derive(Debug, Clone, Copy)]
enum Terminator<'a> {
    Quote(u8),
    Heredoc(&'a str),
}

/// Parsed `<<<LABEL` opener.
#[derive(Debug, Clone, Copy)]
struct HeredocHeader<'a> {
    label: &'a str,
    nowdoc: bool,
    len: usize,
}

pub(crate) struct Scanner<'a> {
    cursor: Cursor<'a>,
    out: Vec<Lexeme>,
    /// Open brackets with the line they were opened on.
    delimiters: Vec<(char, usize)>,
    /// Set by `__halt_compiler`; the rest of the input becomes inline data.
    halt_pending: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            cursor: Cursor::new(src),
            out: Vec::new(),
            delimiters: Vec::new(),
            halt_pending: false,
        }
    }

    /// Scans the whole input.
    pub(crate) fn run(mut self) -> Result<Vec<Lexeme>, LexError> {
        while !self.cursor.is_eof() {
            self.scan_inline_html();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_open_tag();
            self.scan_script(Stop::CloseTag)?;
        }

        if let Some(&(open, line)) = self.delimiters.last() {
            return Err(LexError::UnclosedDelimiter { line, open });
        }

        Ok(self.out)
    }

    // ------------------------------------------------------------------
    // Emission helpers
    // ------------------------------------------------------------------

    /// Emits the text between `start` and the cursor as one token.
    fn push(&mut self, kind: TokenKind, start: usize, line: usize) {
        let text = self.cursor.slice_from(start);
        self.out.push(Lexeme::Token(Token::new(kind, text, line)));
    }

    fn emit_char(&mut self, c: char) {
        self.cursor.bump(1);
        self.out.push(Lexeme::Char(c));
    }

    fn flush_literal(&mut self, start: usize, line: usize) {
        if self.cursor.pos() > start {
            self.push(TokenKind::EncapsedAndWhitespace, start, line);
        }
    }

    fn last_significant(&self) -> Option<&Lexeme> {
        self.out.iter().rev().find(|lexeme| {
            !matches!(
                lexeme.kind(),
                Some(TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment)
            )
        })
    }

    // ------------------------------------------------------------------
    // Markup mode
    // ------------------------------------------------------------------

    fn scan_inline_html(&mut self) {
        let start = self.cursor.pos();
        let line = self.cursor.line();

        loop {
            match self.cursor.rest().find("<?") {
                None => {
                    self.cursor.bump_to_end();
                    break;
                }
                Some(offset) => {
                    self.cursor.bump(offset);
                    if self.at_open_tag() {
                        break;
                    }
                    self.cursor.bump(2);
                }
            }
        }

        if self.cursor.pos() > start {
            self.push(TokenKind::InlineHtml, start, line);
        }
    }

    fn at_open_tag(&self) -> bool {
        self.cursor.starts_with("<?=")
            || (self.cursor.starts_with_ignore_case("<?php")
                && self.cursor.peek_at(5).is_none_or(is_whitespace))
    }

    fn scan_open_tag(&mut self) {
        let start = self.cursor.pos();
        let line = self.cursor.line();

        if self.cursor.starts_with("<?=") {
            self.cursor.bump(3);
            self.push(TokenKind::OpenTagWithEcho, start, line);
            return;
        }

        self.cursor.bump(5);
        if self.cursor.starts_with("\r\n") {
            self.cursor.bump(2);
        } else if self.cursor.peek().is_some_and(is_whitespace) {
            self.cursor.bump(1);
        }
        self.push(TokenKind::OpenTag, start, line);
    }

    // ------------------------------------------------------------------
    // Script mode
    // ------------------------------------------------------------------

    fn scan_script(&mut self, stop: Stop) -> Result<(), LexError> {
        loop {
            if self.finish_halt_if_due() {
                return Ok(());
            }

            let Some(b) = self.cursor.peek() else {
                return Ok(());
            };
            let start = self.cursor.pos();
            let line = self.cursor.line();

            match b {
                b if is_whitespace(b) => {
                    self.cursor.bump_while(is_whitespace);
                    self.push(TokenKind::Whitespace, start, line);
                }
                b'?' if self.cursor.starts_with("?>") => {
                    self.cursor.bump(2);
                    if self.cursor.starts_with("\r\n") {
                        self.cursor.bump(2);
                    } else if self.cursor.peek() == Some(b'\n') {
                        self.cursor.bump(1);
                    }
                    self.push(TokenKind::CloseTag, start, line);
                    self.finish_halt_if_due();
                    return Ok(());
                }
                b'#' if self.cursor.starts_with("#[") => {
                    self.cursor.bump(2);
                    self.push(TokenKind::Attribute, start, line);
                    self.delimiters.push(('[', line));
                }
                b'#' => self.scan_line_comment(start, line),
                b'/' if self.cursor.starts_with("//") => self.scan_line_comment(start, line),
                b'/' if self.cursor.starts_with("/*") => self.scan_block_comment(start, line)?,
                b'$' if self.cursor.peek_at(1).is_some_and(is_ident_start) => {
                    self.cursor.bump(1);
                    self.cursor.bump_while(is_ident_continue);
                    self.push(TokenKind::Variable, start, line);
                }
                b'\'' => self.scan_single_quoted(start, line)?,
                b'"' => self.scan_double_quoted(line)?,
                b'`' => {
                    self.emit_char('`');
                    self.scan_encapsed(Terminator::Quote(b'`'), line)?;
                    self.emit_char('`');
                }
                b'<' if self.cursor.starts_with("<<<") => match self.heredoc_header() {
                    Some(header) => self.scan_heredoc(header, start, line)?,
                    None => self.scan_operator(b, start, line),
                },
                b'0'..=b'9' => self.scan_number(start, line),
                b'.' if self.cursor.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                    self.scan_number(start, line)
                }
                b if is_ident_start(b) => self.scan_word(start, line),
                b'\\' => {
                    self.cursor.bump(1);
                    self.push(TokenKind::NsSeparator, start, line);
                }
                b'(' => match self.cast_ahead() {
                    Some((kind, len)) => {
                        self.cursor.bump(len);
                        self.push(kind, start, line);
                    }
                    None => self.open_delimiter('(', line),
                },
                b'[' => self.open_delimiter('[', line),
                b'{' => self.open_delimiter('{', line),
                b'}' if matches!(stop, Stop::Brace(depth) if depth == self.delimiters.len()) => {
                    self.delimiters.pop();
                    self.emit_char('}');
                    return Ok(());
                }
                b')' | b']' | b'}' => self.close_delimiter(b as char, line)?,
                _ => self.scan_operator(b, start, line),
            }
        }
    }

    /// Consumes everything after `__halt_compiler();` as inline data.
    fn finish_halt_if_due(&mut self) -> bool {
        let due = self.halt_pending
            && self
                .out
                .last()
                .is_some_and(|lexeme| lexeme.is_char(';') || lexeme.is(TokenKind::CloseTag));
        if !due {
            return false;
        }

        self.halt_pending = false;
        let start = self.cursor.pos();
        let line = self.cursor.line();
        self.cursor.bump_to_end();
        if self.cursor.pos() > start {
            self.push(TokenKind::InlineHtml, start, line);
        }
        true
    }

    fn open_delimiter(&mut self, c: char, line: usize) {
        self.delimiters.push((c, line));
        self.emit_char(c);
    }

    fn close_delimiter(&mut self, c: char, line: usize) -> Result<(), LexError> {
        let expected = match c {
            ')' => '(',
            ']' => '[',
            _ => '{',
        };
        match self.delimiters.pop() {
            Some((open, _)) if open == expected => {
                self.emit_char(c);
                Ok(())
            }
            _ => Err(LexError::UnexpectedDelimiter { line, found: c }),
        }
    }

    fn scan_operator(&mut self, b: u8, start: usize, line: usize) {
        for &(op, kind) in OPERATORS {
            if self.cursor.starts_with(op) {
                self.cursor.bump(op.len());
                self.push(kind, start, line);
                return;
            }
        }

        if PUNCTUATION.contains(&b) {
            self.emit_char(b as char);
        } else {
            self.cursor.bump(1);
            self.push(TokenKind::BadCharacter, start, line);
        }
    }

    fn cast_ahead(&self) -> Option<(TokenKind, usize)> {
        let rest = self.cursor.rest();
        let bytes = rest.as_bytes();
        let skip_blank = |mut i: usize| {
            while matches!(bytes.get(i), Some(b' ' | b'\t')) {
                i += 1;
            }
            i
        };

        let name_start = skip_blank(1);
        let mut i = name_start;
        while bytes.get(i).is_some_and(|b| b.is_ascii_alphabetic()) {
            i += 1;
        }
        let kind = keywords::cast(&rest[name_start..i])?;
        let i = skip_blank(i);

        (bytes.get(i) == Some(&b')')).then_some((kind, i + 1))
    }

    fn scan_line_comment(&mut self, start: usize, line: usize) {
        loop {
            match self.cursor.peek() {
                None => break,
                Some(b'\n') => {
                    self.cursor.bump(1);
                    break;
                }
                Some(b'?') if self.cursor.starts_with("?>") => break,
                Some(_) => self.cursor.bump(1),
            }
        }
        self.push(TokenKind::Comment, start, line);
    }

    fn scan_block_comment(&mut self, start: usize, line: usize) -> Result<(), LexError> {
        let kind = if self.cursor.starts_with("/**") && self.cursor.peek_at(3).is_some_and(is_whitespace)
        {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };

        let offset = self.cursor.rest()[2..]
            .find("*/")
            .ok_or(LexError::UnterminatedComment { line })?;
        self.cursor.bump(offset + 4);
        self.push(kind, start, line);
        Ok(())
    }

    fn scan_word(&mut self, start: usize, line: usize) {
        self.cursor.bump_while(is_ident_continue);
        let word = self.cursor.slice_from(start);

        let after_arrow = self.last_significant().is_some_and(|lexeme| {
            lexeme.is(TokenKind::ObjectOperator) || lexeme.is(TokenKind::NullsafeObjectOperator)
        });

        let kind = if after_arrow {
            TokenKind::String
        } else {
            match keywords::keyword(word) {
                Some(TokenKind::Yield) => match self.yield_from_len() {
                    Some(len) => {
                        self.cursor.bump(len);
                        TokenKind::YieldFrom
                    }
                    None => TokenKind::Yield,
                },
                Some(TokenKind::HaltCompiler) => {
                    self.halt_pending = true;
                    TokenKind::HaltCompiler
                }
                Some(kind) => kind,
                None if word.eq_ignore_ascii_case("enum") && self.enum_follows() => TokenKind::Enum,
                None => TokenKind::String,
            }
        };

        self.push(kind, start, line);
    }

    /// Length of `<ws>from` following a `yield`, if present.
    fn yield_from_len(&self) -> Option<usize> {
        let bytes = self.cursor.rest().as_bytes();
        let ws = bytes.iter().take_while(|&&b| is_whitespace(b)).count();
        let word = bytes.get(ws..ws + 4)?;
        let boundary = bytes.get(ws + 4).is_none_or(|&b| !is_ident_continue(b));
        (ws > 0 && word.eq_ignore_ascii_case(b"from") && boundary).then_some(ws + 4)
    }

    /// `enum` is only reserved when a name follows it.
    fn enum_follows(&self) -> bool {
        let bytes = self.cursor.rest().as_bytes();
        let ws = bytes.iter().take_while(|&&b| is_whitespace(b)).count();
        ws > 0 && bytes.get(ws).is_some_and(|&b| is_ident_start(b))
    }

    fn scan_number(&mut self, start: usize, line: usize) {
        let prefixed = [("0x", 16), ("0b", 2), ("0o", 8)]
            .into_iter()
            .find(|&(prefix, radix)| {
                self.cursor.starts_with_ignore_case(prefix)
                    && self.cursor.peek_at(2).is_some_and(|b| (b as char).is_digit(radix))
            });

        if let Some((_, radix)) = prefixed {
            self.cursor.bump(2);
            let digits_start = self.cursor.pos();
            self.bump_digits(|b| (b as char).is_digit(radix));
            let kind = integer_kind(self.cursor.slice_from(digits_start), radix);
            self.push(kind, start, line);
            return;
        }

        let mut float = false;
        self.bump_digits(|b| b.is_ascii_digit());
        if self.cursor.peek() == Some(b'.') && !self.cursor.starts_with("...") {
            self.cursor.bump(1);
            self.bump_digits(|b| b.is_ascii_digit());
            float = true;
        }

        let sign = usize::from(matches!(self.cursor.peek_at(1), Some(b'+' | b'-')));
        if matches!(self.cursor.peek(), Some(b'e' | b'E'))
            && self.cursor.peek_at(1 + sign).is_some_and(|b| b.is_ascii_digit())
        {
            self.cursor.bump(1 + sign);
            self.bump_digits(|b| b.is_ascii_digit());
            float = true;
        }

        let kind = if float {
            TokenKind::Dnumber
        } else {
            let text = self.cursor.slice_from(start);
            if text.len() > 1 && text.starts_with('0') {
                integer_kind(&text[1..], 8)
            } else {
                integer_kind(text, 10)
            }
        };
        self.push(kind, start, line);
    }

    /// Consumes digits, allowing single `_` separators between them.
    fn bump_digits(&mut self, is_digit: impl Fn(u8) -> bool) {
        loop {
            match self.cursor.peek() {
                Some(b) if is_digit(b) => self.cursor.bump(1),
                Some(b'_') if self.cursor.peek_at(1).is_some_and(&is_digit) => self.cursor.bump(1),
                _ => break,
            }
        }
    }

    // ------------------------------------------------------------------
    // String literals
    // ------------------------------------------------------------------

    fn scan_single_quoted(&mut self, start: usize, line: usize) -> Result<(), LexError> {
        self.cursor.bump(1);
        loop {
            match self.cursor.peek() {
                None => return Err(LexError::UnterminatedString { line }),
                Some(b'\\') => self.cursor.bump(2),
                Some(b'\'') => {
                    self.cursor.bump(1);
                    break;
                }
                Some(_) => self.cursor.bump(1),
            }
        }
        self.push(TokenKind::ConstantEncapsedString, start, line);
        Ok(())
    }

    fn scan_double_quoted(&mut self, line: usize) -> Result<(), LexError> {
        let start = self.cursor.pos();
        let bytes = self.cursor.rest().as_bytes();
        let mut closing = None;
        let mut interpolated = false;
        let mut i = 1;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'"' => {
                    closing = Some(i);
                    break;
                }
                b'$' if bytes.get(i + 1).is_some_and(|&b| is_ident_start(b) || b == b'{') => {
                    interpolated = true;
                    break;
                }
                b'{' if bytes.get(i + 1) == Some(&b'$') => {
                    interpolated = true;
                    break;
                }
                _ => {}
            }
            i += 1;
        }

        if interpolated {
            self.emit_char('"');
            self.scan_encapsed(Terminator::Quote(b'"'), line)?;
            self.emit_char('"');
            return Ok(());
        }

        let end = closing.ok_or(LexError::UnterminatedString { line })?;
        self.cursor.bump(end + 1);
        self.push(TokenKind::ConstantEncapsedString, start, line);
        Ok(())
    }

    /// Scans an interpolated body up to, but not including, its terminator.
    fn scan_encapsed(&mut self, terminator: Terminator<'a>, open_line: usize) -> Result<(), LexError> {
        let mut literal_start = self.cursor.pos();
        let mut literal_line = self.cursor.line();

        loop {
            if self.at_terminator(terminator) {
                self.flush_literal(literal_start, literal_line);
                return Ok(());
            }

            let Some(b) = self.cursor.peek() else {
                return Err(match terminator {
                    Terminator::Quote(_) => LexError::UnterminatedString { line: open_line },
                    Terminator::Heredoc(label) => LexError::UnterminatedHeredoc {
                        line: open_line,
                        label: label.to_string(),
                    },
                });
            };

            let embedded = match b {
                b'\\' => {
                    self.cursor.bump(2);
                    false
                }
                b'$' if self.cursor.peek_at(1).is_some_and(is_ident_start) => {
                    self.flush_literal(literal_start, literal_line);
                    self.scan_encapsed_variable();
                    true
                }
                b'$' if self.cursor.peek_at(1) == Some(b'{') => {
                    self.flush_literal(literal_start, literal_line);
                    self.scan_dollar_brace(open_line)?;
                    true
                }
                b'{' if self.cursor.peek_at(1) == Some(b'$') => {
                    self.flush_literal(literal_start, literal_line);
                    self.scan_curly_open(open_line)?;
                    true
                }
                _ => {
                    self.cursor.bump(1);
                    false
                }
            };

            if embedded {
                literal_start = self.cursor.pos();
                literal_line = self.cursor.line();
            }
        }
    }

    fn at_terminator(&self, terminator: Terminator<'_>) -> bool {
        match terminator {
            Terminator::Quote(q) => self.cursor.peek() == Some(q),
            Terminator::Heredoc(label) => self.heredoc_end_len(label).is_some(),
        }
    }

    /// `$name`, optionally followed by one `[index]` or `->prop` access.
    fn scan_encapsed_variable(&mut self) {
        let start = self.cursor.pos();
        let line = self.cursor.line();
        self.cursor.bump(1);
        self.cursor.bump_while(is_ident_continue);
        self.push(TokenKind::Variable, start, line);

        if self.cursor.peek() == Some(b'[') {
            self.emit_char('[');
            let start = self.cursor.pos();
            match self.cursor.peek() {
                Some(b) if is_ident_start(b) => {
                    self.cursor.bump_while(is_ident_continue);
                    self.push(TokenKind::String, start, line);
                }
                Some(b) if b.is_ascii_digit() => {
                    self.cursor.bump_while(|b| b.is_ascii_digit());
                    self.push(TokenKind::NumString, start, line);
                }
                Some(b'-') if self.cursor.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                    self.emit_char('-');
                    let start = self.cursor.pos();
                    self.cursor.bump_while(|b| b.is_ascii_digit());
                    self.push(TokenKind::NumString, start, line);
                }
                Some(b'$') if self.cursor.peek_at(1).is_some_and(is_ident_start) => {
                    self.cursor.bump(1);
                    self.cursor.bump_while(is_ident_continue);
                    self.push(TokenKind::Variable, start, line);
                }
                _ => {}
            }
            if self.cursor.peek() == Some(b']') {
                self.emit_char(']');
            }
            return;
        }

        let arrow = if self.cursor.starts_with("->") {
            Some((2, TokenKind::ObjectOperator))
        } else if self.cursor.starts_with("?->") {
            Some((3, TokenKind::NullsafeObjectOperator))
        } else {
            None
        };

        let Some((len, kind)) =
            arrow.filter(|&(len, _)| self.cursor.peek_at(len).is_some_and(is_ident_start))
        else {
            return;
        };

        let start = self.cursor.pos();
        self.cursor.bump(len);
        self.push(kind, start, line);
        let start = self.cursor.pos();
        self.cursor.bump_while(is_ident_continue);
        self.push(TokenKind::String, start, line);
    }

    /// `{$expr}` inside an interpolated literal.
    fn scan_curly_open(&mut self, open_line: usize) -> Result<(), LexError> {
        let start = self.cursor.pos();
        let line = self.cursor.line();
        self.cursor.bump(1);
        self.push(TokenKind::CurlyOpen, start, line);
        self.scan_embedded_script(line, open_line)
    }

    /// `${name}` or `${expr}` inside an interpolated literal.
    fn scan_dollar_brace(&mut self, open_line: usize) -> Result<(), LexError> {
        let start = self.cursor.pos();
        let line = self.cursor.line();
        self.cursor.bump(2);
        self.push(TokenKind::DollarOpenCurlyBraces, start, line);

        if self.cursor.peek().is_some_and(is_ident_start) {
            let len = self
                .cursor
                .rest()
                .bytes()
                .take_while(|&b| is_ident_continue(b))
                .count();
            if matches!(self.cursor.peek_at(len), Some(b'}' | b'[')) {
                let start = self.cursor.pos();
                self.cursor.bump(len);
                self.push(TokenKind::StringVarname, start, line);
            }
        }

        self.scan_embedded_script(line, open_line)
    }

    fn scan_embedded_script(&mut self, brace_line: usize, open_line: usize) -> Result<(), LexError> {
        self.delimiters.push(('{', brace_line));
        let depth = self.delimiters.len();
        self.scan_script(Stop::Brace(depth))?;

        if self.delimiters.len() >= depth {
            return Err(LexError::UnterminatedString { line: open_line });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Heredoc / nowdoc
    // ------------------------------------------------------------------

    fn heredoc_header(&self) -> Option<HeredocHeader<'a>> {
        let rest = self.cursor.rest();
        let bytes = rest.as_bytes();
        let mut i = 3;
        while matches!(bytes.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }

        let quote = match bytes.get(i) {
            Some(&q @ (b'"' | b'\'')) => {
                i += 1;
                Some(q)
            }
            _ => None,
        };

        let label_start = i;
        if !bytes.get(i).is_some_and(|&b| is_ident_start(b)) {
            return None;
        }
        while bytes.get(i).is_some_and(|&b| is_ident_continue(b)) {
            i += 1;
        }
        let label = &rest[label_start..i];

        if let Some(q) = quote {
            if bytes.get(i) != Some(&q) {
                return None;
            }
            i += 1;
        }

        if rest[i..].starts_with("\r\n") {
            i += 2;
        } else if bytes.get(i) == Some(&b'\n') {
            i += 1;
        } else {
            return None;
        }

        Some(HeredocHeader {
            label,
            nowdoc: quote == Some(b'\''),
            len: i,
        })
    }

    /// Length of the closing `LABEL` line prefix if the cursor sits on one.
    fn heredoc_end_len(&self, label: &str) -> Option<usize> {
        if !self.cursor.at_line_start() {
            return None;
        }
        let rest = self.cursor.rest();
        let indent = rest.bytes().take_while(|&b| b == b' ' || b == b'\t').count();
        let end = indent + label.len();
        let boundary = rest.as_bytes().get(end).is_none_or(|&b| !is_ident_continue(b));
        (rest[indent..].starts_with(label) && boundary).then_some(end)
    }

    fn scan_heredoc(&mut self, header: HeredocHeader<'a>, start: usize, line: usize) -> Result<(), LexError> {
        self.cursor.bump(header.len);
        self.push(TokenKind::StartHeredoc, start, line);

        if header.nowdoc {
            let body_start = self.cursor.pos();
            let body_line = self.cursor.line();
            while self.heredoc_end_len(header.label).is_none() {
                if self.cursor.is_eof() {
                    return Err(LexError::UnterminatedHeredoc {
                        line,
                        label: header.label.to_string(),
                    });
                }
                match self.cursor.rest().find('\n') {
                    Some(offset) => self.cursor.bump(offset + 1),
                    None => self.cursor.bump_to_end(),
                }
            }
            self.flush_literal(body_start, body_line);
        } else {
            self.scan_encapsed(Terminator::Heredoc(header.label), line)?;
        }

        if let Some(len) = self.heredoc_end_len(header.label) {
            let start = self.cursor.pos();
            let end_line = self.cursor.line();
            self.cursor.bump(len);
            self.push(TokenKind::EndHeredoc, start, end_line);
        }
        Ok(())
    }
}

/// Integer literals that overflow a signed 64-bit value are floats in PHP.
fn integer_kind(digits: &str, radix: u32) -> TokenKind {
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    match i64::from_str_radix(&digits, radix) {
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => TokenKind::Dnumber,
        _ => TokenKind::Lnumber,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str) -> Vec<Lexeme> {
        Scanner::new(src).run().unwrap()
    }

    fn kinds(src: &str) -> Vec<Option<TokenKind>> {
        scan(src)
            .iter()
            .filter(|lexeme| !lexeme.is(TokenKind::Whitespace))
            .map(Lexeme::kind)
            .collect()
    }

    #[test]
    fn test_integer_overflow_becomes_float() {
        assert_eq!(integer_kind("9223372036854775807", 10), TokenKind::Lnumber);
        assert_eq!(integer_kind("9223372036854775808", 10), TokenKind::Dnumber);
        assert_eq!(integer_kind("ff_ff", 16), TokenKind::Lnumber);
    }

    #[test]
    fn test_open_tag_takes_one_newline() {
        let lexemes = scan("<?php\n\necho 1;");
        let open = lexemes[0].as_token().unwrap();
        assert_eq!(open.kind, TokenKind::OpenTag);
        assert_eq!(open.text, "<?php\n");
        let ws = lexemes[1].as_token().unwrap();
        assert_eq!(ws.text, "\n");
        assert_eq!(ws.line, 2);
    }

    #[test]
    fn test_line_comment_keeps_newline() {
        let lexemes = scan("<?php // note\n$a;");
        let comment = lexemes[1].as_token().unwrap();
        assert_eq!(comment.kind, TokenKind::Comment);
        assert_eq!(comment.text, "// note\n");
    }

    #[test]
    fn test_line_comment_stops_before_close_tag() {
        assert_eq!(
            kinds("<?php # x ?>tail"),
            vec![
                Some(TokenKind::OpenTag),
                Some(TokenKind::Comment),
                Some(TokenKind::CloseTag),
                Some(TokenKind::InlineHtml),
            ]
        );
    }

    #[test]
    fn test_doc_comment_requires_whitespace() {
        assert_eq!(kinds("<?php /** doc */")[1], Some(TokenKind::DocComment));
        assert_eq!(kinds("<?php /**/")[1], Some(TokenKind::Comment));
    }

    #[test]
    fn test_casts_and_parens() {
        assert_eq!(kinds("<?php ( int )$a;")[1], Some(TokenKind::IntCast));
        assert_eq!(kinds("<?php (foo);")[1], None);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("<?php 1_000;")[1], Some(TokenKind::Lnumber));
        assert_eq!(kinds("<?php 0x1F;")[1], Some(TokenKind::Lnumber));
        assert_eq!(kinds("<?php 1.5e-3;")[1], Some(TokenKind::Dnumber));
        assert_eq!(kinds("<?php .5;")[1], Some(TokenKind::Dnumber));
    }

    #[test]
    fn test_keyword_after_arrow_is_name() {
        let found = kinds("<?php $a->class;");
        assert_eq!(found[2], Some(TokenKind::ObjectOperator));
        assert_eq!(found[3], Some(TokenKind::String));
    }

    #[test]
    fn test_yield_from() {
        let lexemes = scan("<?php function g() { yield  from h(); }");
        let token = lexemes
            .iter()
            .filter_map(Lexeme::as_token)
            .find(|t| t.kind == TokenKind::YieldFrom)
            .unwrap();
        assert_eq!(token.text, "yield  from");
    }

    #[test]
    fn test_interpolated_string() {
        let found = kinds("<?php \"a $b[0] {$c->d} e\";");
        assert_eq!(
            found,
            vec![
                Some(TokenKind::OpenTag),
                None,
                Some(TokenKind::EncapsedAndWhitespace),
                Some(TokenKind::Variable),
                None,
                Some(TokenKind::NumString),
                None,
                Some(TokenKind::EncapsedAndWhitespace),
                Some(TokenKind::CurlyOpen),
                Some(TokenKind::Variable),
                Some(TokenKind::ObjectOperator),
                Some(TokenKind::String),
                None,
                Some(TokenKind::EncapsedAndWhitespace),
                None,
                None,
            ]
        );
    }

    #[test]
    fn test_heredoc_and_nowdoc() {
        let found = kinds("<?php $a = <<<EOT\n  hi $x\n  EOT;\n$b = <<<'RAW'\n$y\nRAW;\n");
        assert!(found.contains(&Some(TokenKind::StartHeredoc)));
        assert_eq!(
            found.iter().filter(|k| **k == Some(TokenKind::EndHeredoc)).count(),
            2
        );
        assert_eq!(
            found.iter().filter(|k| **k == Some(TokenKind::Variable)).count(),
            3
        );
    }

    #[test]
    fn test_halt_compiler_data() {
        let lexemes = scan("<?php __halt_compiler(); <?php raw ?> data");
        let last = lexemes.last().unwrap().as_token().unwrap();
        assert_eq!(last.kind, TokenKind::InlineHtml);
        assert_eq!(last.text, " <?php raw ?> data");
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            Scanner::new("<?php\n$a = 'open;").run(),
            Err(LexError::UnterminatedString { line: 2 })
        );
        assert_eq!(
            Scanner::new("<?php /* x").run(),
            Err(LexError::UnterminatedComment { line: 1 })
        );
        assert_eq!(
            Scanner::new("<?php foo(];").run(),
            Err(LexError::UnexpectedDelimiter { line: 1, found: ']' })
        );
        assert_eq!(
            Scanner::new("<?php\nif (1) {\n").run(),
            Err(LexError::UnclosedDelimiter { line: 2, open: '{' })
        );
        assert!(matches!(
            Scanner::new("<?php <<<EOT\nbody\n").run(),
            Err(LexError::UnterminatedHeredoc { .. })
        ));
    }
}
