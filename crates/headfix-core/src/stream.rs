//! Mutable, index-addressable token sequence
//!
//! The stream is a growable ordered sequence with O(1) index reads and O(n)
//! insertion. Slots can be cleared instead of removed so that indices held by
//! a caller stay stable across a removal; every search primitive treats a
//! cleared slot as absent.

use crate::token::{Token, TokenKind};

/// An ordered, mutable sequence of tokens for one file.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    slots: Vec<Option<Token>>,
}

impl TokenStream {
    /// Create an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stream from a list of tokens
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            slots: tokens.into_iter().map(Some).collect(),
        }
    }

    /// Number of slots, including cleared ones
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the stream has no slots at all
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Token at `index`, or `None` if the slot is cleared or out of range
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Replace the token at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, token: Token) {
        self.slots[index] = Some(token);
    }

    /// Insert a token at `index`, shifting subsequent slots.
    ///
    /// `index == len()` appends.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_at(&mut self, index: usize, token: Token) {
        self.slots.insert(index, Some(token));
    }

    /// Clear the slot at `index`. A cleared slot keeps its position but is
    /// invisible to all searches. Out-of-range indices are ignored.
    pub fn clear_at(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Whether any occupied slot has the given kind
    pub fn contains_kind(&self, kind: TokenKind) -> bool {
        self.tokens().any(|token| token.kind() == kind)
    }

    /// First occupied index strictly after `index`
    pub fn next_occupied(&self, index: usize) -> Option<usize> {
        (index + 1..self.slots.len()).find(|&i| self.get(i).is_some())
    }

    /// Last occupied index strictly before `index`
    pub fn prev_occupied(&self, index: usize) -> Option<usize> {
        (0..index.min(self.slots.len())).rev().find(|&i| self.get(i).is_some())
    }

    /// First occupied index strictly after `index` whose token has `kind`
    pub fn next_of_kind(&self, index: usize, kind: TokenKind) -> Option<usize> {
        (index + 1..self.slots.len()).find(|&i| {
            self.get(i).map(|token| token.kind() == kind).unwrap_or(false)
        })
    }

    /// First occupied, non-whitespace index strictly after `index`
    pub fn next_non_whitespace(&self, index: usize) -> Option<usize> {
        (index + 1..self.slots.len()).find(|&i| {
            self.get(i).map(|token| !token.is_whitespace()).unwrap_or(false)
        })
    }

    /// Last occupied, non-whitespace index strictly before `index`
    pub fn prev_non_whitespace(&self, index: usize) -> Option<usize> {
        (0..index.min(self.slots.len()))
            .rev()
            .find(|&i| self.get(i).map(|token| !token.is_whitespace()).unwrap_or(false))
    }

    /// First index at or after `index` holding a non-whitespace token, or
    /// `len()` if the stream ends in whitespace (or cleared slots).
    pub fn skip_whitespace(&self, index: usize) -> usize {
        let mut i = index;
        while i < self.slots.len() {
            match self.get(i) {
                Some(token) if !token.is_whitespace() => return i,
                _ => i += 1,
            }
        }
        self.slots.len()
    }

    /// Iterator over occupied tokens in order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.slots.iter().filter_map(|slot| slot.as_ref())
    }

    /// Concatenate occupied token contents back into source text
    pub fn to_source(&self) -> String {
        self.tokens().map(Token::content).collect()
    }
}

/// Streams compare equal when their occupied tokens match in order; cleared
/// slots do not participate.
impl PartialEq for TokenStream {
    fn eq(&self, other: &Self) -> bool {
        self.tokens().eq(other.tokens())
    }
}

impl Eq for TokenStream {}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, content: &str) -> Token {
        Token::new(kind, content)
    }

    fn sample() -> TokenStream {
        TokenStream::from_tokens(vec![
            token(TokenKind::OpenTag, "<?php\n"),
            token(TokenKind::Whitespace, "\n"),
            token(TokenKind::Declare, "declare"),
            token(TokenKind::Other, "(strict_types=1)"),
            token(TokenKind::Semicolon, ";"),
            token(TokenKind::Whitespace, "\n\n"),
            token(TokenKind::Other, "namespace App;"),
        ])
    }

    #[test]
    fn test_get_and_len() {
        let stream = sample();
        assert_eq!(stream.len(), 7);
        assert_eq!(stream.get(0).unwrap().kind(), TokenKind::OpenTag);
        assert!(stream.get(7).is_none());
    }

    #[test]
    fn test_insert_shifts_indices() {
        let mut stream = sample();
        stream.insert_at(1, token(TokenKind::Comment, "/* hi */"));
        assert_eq!(stream.get(1).unwrap().kind(), TokenKind::Comment);
        assert_eq!(stream.get(2).unwrap().kind(), TokenKind::Whitespace);
        assert_eq!(stream.len(), 8);
    }

    #[test]
    fn test_insert_at_end_appends() {
        let mut stream = sample();
        stream.insert_at(stream.len(), token(TokenKind::Whitespace, "\n"));
        assert_eq!(stream.get(7).unwrap().content(), "\n");
    }

    #[test]
    fn test_cleared_slot_is_absent() {
        let mut stream = sample();
        stream.clear_at(1);
        assert!(stream.get(1).is_none());
        assert_eq!(stream.len(), 7);
        // searches skip the cleared slot
        assert_eq!(stream.next_of_kind(0, TokenKind::Whitespace), Some(5));
        assert_eq!(stream.next_occupied(0), Some(2));
    }

    #[test]
    fn test_next_of_kind() {
        let stream = sample();
        assert_eq!(stream.next_of_kind(0, TokenKind::Declare), Some(2));
        assert_eq!(stream.next_of_kind(2, TokenKind::Semicolon), Some(4));
        assert_eq!(stream.next_of_kind(4, TokenKind::Semicolon), None);
    }

    #[test]
    fn test_next_non_whitespace() {
        let stream = sample();
        assert_eq!(stream.next_non_whitespace(0), Some(2));
        assert_eq!(stream.next_non_whitespace(5), Some(6));
        assert_eq!(stream.next_non_whitespace(6), None);
    }

    #[test]
    fn test_prev_non_whitespace() {
        let stream = sample();
        assert_eq!(stream.prev_non_whitespace(2), Some(0));
        assert_eq!(stream.prev_non_whitespace(6), Some(4));
        assert_eq!(stream.prev_non_whitespace(0), None);
    }

    #[test]
    fn test_skip_whitespace() {
        let stream = sample();
        assert_eq!(stream.skip_whitespace(1), 2);
        assert_eq!(stream.skip_whitespace(2), 2);
        // trailing whitespace runs to the end of the stream
        let tail = TokenStream::from_tokens(vec![
            token(TokenKind::OpenTag, "<?php\n"),
            token(TokenKind::Whitespace, "\n"),
        ]);
        assert_eq!(tail.skip_whitespace(1), 2);
    }

    #[test]
    fn test_skip_whitespace_over_cleared() {
        let mut stream = sample();
        stream.clear_at(2);
        stream.clear_at(3);
        assert_eq!(stream.skip_whitespace(1), 4);
    }

    #[test]
    fn test_contains_kind() {
        let mut stream = sample();
        assert!(stream.contains_kind(TokenKind::OpenTag));
        stream.clear_at(0);
        assert!(!stream.contains_kind(TokenKind::OpenTag));
    }

    #[test]
    fn test_to_source_skips_cleared() {
        let mut stream = sample();
        stream.clear_at(5);
        assert_eq!(
            stream.to_source(),
            "<?php\n\ndeclare(strict_types=1);namespace App;"
        );
    }

    #[test]
    fn test_eq_ignores_cleared_slots() {
        let mut a = sample();
        a.clear_at(1);
        let mut b = TokenStream::from_tokens(vec![
            token(TokenKind::OpenTag, "<?php\n"),
            token(TokenKind::Declare, "declare"),
            token(TokenKind::Other, "(strict_types=1)"),
            token(TokenKind::Semicolon, ";"),
            token(TokenKind::Whitespace, "\n\n"),
            token(TokenKind::Other, "namespace App;"),
        ]);
        assert_eq!(a, b);
        b.set(4, token(TokenKind::Whitespace, "\n"));
        assert_ne!(a, b);
    }
}
