//! # Glint Lexer
//!
//! PHP tokenizer producing a lossless, line-attributed token stream.
//!
//! The highlighter never looks at source text directly; it consumes the
//! [`Lexeme`] sequence produced by a [`Tokenizer`]. [`PhpTokenizer`] is the
//! stock implementation.
//!
//! ## Learning: Traits at the Seams
//!
//! `Tokenizer` is a trait so the highlighter can be retargeted at another
//! grammar, or driven by a scripted token stream in tests, without touching
//! the engine:
//!
//! ```
//! use glint_lexer::{PhpTokenizer, Tokenizer};
//!
//! let lexemes = PhpTokenizer.tokenize("<?php echo 1;").unwrap();
//! assert!(!lexemes.is_empty());
//! ```

mod cursor;
mod keywords;
mod scanner;
mod token;

pub use token::{Lexeme, Token, TokenKind};

/// Errors that reject source text as malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Unterminated string starting on line {line}")]
    UnterminatedString { line: usize },

    #[error("Unterminated comment starting on line {line}")]
    UnterminatedComment { line: usize },

    #[error("Unterminated heredoc `{label}` starting on line {line}")]
    UnterminatedHeredoc { line: usize, label: String },

    #[error("Unexpected `{found}` on line {line}")]
    UnexpectedDelimiter { line: usize, found: char },

    #[error("Unclosed `{open}` opened on line {line}")]
    UnclosedDelimiter { line: usize, open: char },
}

impl LexError {
    /// Returns the line the error points at.
    pub fn line(&self) -> usize {
        match self {
            LexError::UnterminatedString { line }
            | LexError::UnterminatedComment { line }
            | LexError::UnterminatedHeredoc { line, .. }
            | LexError::UnexpectedDelimiter { line, .. }
            | LexError::UnclosedDelimiter { line, .. } => *line,
        }
    }
}

/// Source text to token stream.
pub trait Tokenizer {
    /// Tokenizes `source`, or rejects it as malformed.
    fn tokenize(&self, source: &str) -> Result<Vec<Lexeme>, LexError>;
}

/// Tokenizer for PHP source, including inline HTML around `<?php` tags.
///
/// Besides lexical errors, bracket nesting is checked so structurally
/// broken sources are rejected rather than half-styled.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpTokenizer;

impl Tokenizer for PhpTokenizer {
    fn tokenize(&self, source: &str) -> Result<Vec<Lexeme>, LexError> {
        let lexemes = scanner::Scanner::new(source).run()?;
        tracing::trace!(bytes = source.len(), lexemes = lexemes.len(), "tokenized PHP source");
        Ok(lexemes)
    }
}
