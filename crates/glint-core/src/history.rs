//! Bounded lookbehind over the token stream.
//!
//! ## Learning: VecDeque as a Ring Buffer
//!
//! New lexemes go on the front and the oldest fall off the back once the
//! capacity is reached, so `iter()` walks from the most recent lexeme
//! backwards. Both ends are O(1) on a `VecDeque`.

use std::collections::VecDeque;

use glint_lexer::Lexeme;

/// Number of lexemes kept for lookbehind.
pub const HISTORY_CAPACITY: usize = 20;

/// The most recent lexemes of one processing pass, newest first.
#[derive(Debug, Clone)]
pub struct TokenHistory {
    entries: VecDeque<Lexeme>,
    max_size: usize,
}

impl TokenHistory {
    /// Creates an empty history holding [`HISTORY_CAPACITY`] lexemes.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Creates an empty history holding at most `max_size` lexemes.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size + 1),
            max_size,
        }
    }

    /// Records `lexeme` as the most recent entry, dropping the oldest past capacity.
    pub fn push(&mut self, lexeme: Lexeme) {
        self.entries.push_front(lexeme);
        if self.entries.len() > self.max_size {
            self.entries.pop_back();
        }
    }

    /// Returns the most recent entry.
    pub fn current(&self) -> Option<&Lexeme> {
        self.entries.front()
    }

    /// Iterates from the most recent entry to the oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Lexeme> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TokenHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut history = TokenHistory::new();
        history.push(Lexeme::Char('a'));
        history.push(Lexeme::Char('b'));

        assert_eq!(history.current(), Some(&Lexeme::Char('b')));
        let order: Vec<_> = history.iter().cloned().collect();
        assert_eq!(order, vec![Lexeme::Char('b'), Lexeme::Char('a')]);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = TokenHistory::new();
        for i in 0..25u8 {
            history.push(Lexeme::Char((b'a' + i) as char));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.current(), Some(&Lexeme::Char('y')));
        assert_eq!(history.iter().last(), Some(&Lexeme::Char('f')));
    }
}
