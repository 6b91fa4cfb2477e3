//! # Glint Core
//!
//! Windowed source highlighting to HTML.
//!
//! This crate turns a token stream into numbered HTML rows, optionally
//! limited to a window of lines around a focus line. It provides:
//!
//! - **Classification**: token kinds to CSS classes ([`rules`])
//! - **Name resolution**: telling classes, functions and constants apart ([`resolver`])
//! - **Windowing**: line ranges and boundary markers ([`LineWindow`])
//! - **Fallback**: plain numbered lines when tokenizing fails ([`RawLineRenderer`])
//!
//! ## Learning: Fallback as a Value
//!
//! Tokenizing returns a `Result`. [`Highlighter::highlight`] matches on it
//! once and renders raw lines on `Err`, so callers always get markup back and
//! the `styled error` container class is the only trace of the failure.
//!
//! ```
//! use glint_core::Highlighter;
//!
//! let html = Highlighter::new().highlight("<?php echo 'unterminated;", None, None, None);
//! assert!(html.starts_with("<samp class=\"styled error\">"));
//! ```

pub mod config;
pub mod highlighter;
pub mod history;
pub mod processor;
pub mod render;
pub mod resolver;
pub mod rules;
pub mod window;

use std::path::PathBuf;

pub use config::{Config, ConfigError};
pub use glint_lexer::{LexError, Lexeme, PhpTokenizer, Token, TokenKind, Tokenizer};
pub use highlighter::Highlighter;
pub use history::TokenHistory;
pub use processor::TokenStreamProcessor;
pub use render::{Boundary, LineRenderer, RawLineRenderer, RenderedRow, escape_html};
pub use window::{DEFAULT_BUFFER, LineWindow};

/// Result type for highlighting operations.
pub type HighlightResult<T> = Result<T, HighlightError>;

/// Highlighting errors.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] LexError),

    #[error("Could not load source from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
