//! Bare identifier disambiguation.
//!
//! PHP spells a class name, a function call, a constant and a namespace
//! segment with the same identifier token. This module guesses which one a
//! given identifier is from its immediate neighbours. It is a heuristic, not
//! a parser: unusual but valid code can be misclassified.
//!
//! ## Rule order
//!
//! Rules are tried top to bottom and the first hit wins.
//!
//! 1. `null` is `null`, `true`/`false` are `bool`.
//! 2. Next lexeme: `->`/`?->` is `member`, `::` is `class`, `\` is
//!    `namespace`, a variable is `class`.
//! 3. Next lexeme is whitespace: a variable or `...` after it is `class`; a
//!    `{` after it marks a possible return type.
//! 4. Next lexeme `(` marks a possible function call.
//! 5. An all-caps name that is not called is `constant`.
//! 6. Walk back through history, skipping whitespace:
//!    - possible call: skip name segments and `\`; `new` is `class`,
//!      anything else is `function`;
//!    - `const` or `::` is `constant`, `->` is `member`, a class-introducing
//!      keyword or `\` is `class`;
//!    - otherwise a possible return type is `class return`;
//!    - `;` stops the walk; `:` followed by `{` is `class return`.
//! 7. Nothing matched: unresolved.

use glint_lexer::{Lexeme, TokenKind};

use crate::history::TokenHistory;

pub const NULL: &str = "null";
pub const BOOL: &str = "bool";
pub const MEMBER: &str = "member";
pub const CLASS: &str = "class";
pub const NAMESPACE: &str = "namespace";
pub const CONSTANT: &str = "constant";
pub const FUNCTION: &str = "function";
pub const CLASS_RETURN: &str = "class return";

/// Resolves the class of the identifier at the front of `history`.
///
/// `next` and `after` are the two lexemes following it in the stream.
/// Returns `None` when no rule applies.
pub fn resolve(
    history: &TokenHistory,
    next: Option<&Lexeme>,
    after: Option<&Lexeme>,
) -> Option<&'static str> {
    let current = history.current()?.as_token()?;

    match current.text.as_str() {
        "null" => return Some(NULL),
        "true" | "false" => return Some(BOOL),
        _ => {}
    }

    let mut maybe_class_return = false;

    match next.and_then(Lexeme::kind) {
        Some(TokenKind::ObjectOperator | TokenKind::NullsafeObjectOperator) => return Some(MEMBER),
        Some(TokenKind::PaamayimNekudotayim) => return Some(CLASS),
        Some(TokenKind::NsSeparator) => return Some(NAMESPACE),
        Some(TokenKind::Variable) => return Some(CLASS),
        Some(TokenKind::Whitespace) => {
            if matches!(
                after.and_then(Lexeme::kind),
                Some(TokenKind::Variable | TokenKind::Ellipsis)
            ) {
                return Some(CLASS);
            }
            maybe_class_return = after.is_some_and(|lexeme| lexeme.is_char('{'));
        }
        _ => {}
    }

    let maybe_function = next.is_some_and(|lexeme| lexeme.is_char('('));

    if !maybe_function && is_constant_name(&current.text) {
        return Some(CONSTANT);
    }

    let brace_ahead = |lexeme: Option<&Lexeme>| lexeme.is_some_and(|l| l.is_char('{'));

    for lexeme in history.iter().skip(1) {
        match lexeme {
            Lexeme::Token(token) if token.kind == TokenKind::Whitespace => continue,
            Lexeme::Token(token) if maybe_function => match token.kind {
                TokenKind::NsSeparator | TokenKind::String => continue,
                TokenKind::New => return Some(CLASS),
                _ => return Some(FUNCTION),
            },
            Lexeme::Token(token) => {
                return match token.kind {
                    TokenKind::Const | TokenKind::PaamayimNekudotayim => Some(CONSTANT),
                    TokenKind::ObjectOperator | TokenKind::NullsafeObjectOperator => Some(MEMBER),
                    TokenKind::Extends
                    | TokenKind::Implements
                    | TokenKind::Class
                    | TokenKind::Trait
                    | TokenKind::Interface
                    | TokenKind::Enum
                    | TokenKind::Use
                    | TokenKind::NsSeparator
                    | TokenKind::Instanceof => Some(CLASS),
                    _ if maybe_class_return => Some(CLASS_RETURN),
                    _ => None,
                };
            }
            Lexeme::Char(_) if maybe_function => return Some(FUNCTION),
            Lexeme::Char(';') => return None,
            Lexeme::Char(':') if brace_ahead(next) || brace_ahead(after) => {
                return Some(CLASS_RETURN);
            }
            Lexeme::Char(_) => {}
        }
    }

    None
}

/// Matches `[A-Z_]+`.
fn is_constant_name(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_uppercase() || b == b'_')
}
