//! Seekable cursor over an annotated token slice.

use crate::{ContextId, SyntaxKind, Token};
use std::ops::{Deref, DerefMut};

/// Saved cursor position. Captures nothing but the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    index: usize,
}

/// Cursor over a token slice and the source it was lexed from.
///
/// The slice ends with an `EndOfFileToken`. Walking past it is an upstream
/// contract violation: accessors index the slice directly and panic.
#[derive(Clone, Debug)]
pub struct TokenStream<'a> {
    source: &'a str,
    tokens: &'a [Token],
    index: usize,
}

impl<'a> TokenStream<'a> {
    #[must_use]
    pub const fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            source,
            tokens,
            index: 0,
        }
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.tokens.len()
            || self.tokens[self.index].kind == SyntaxKind::EndOfFileToken
    }

    #[must_use]
    pub fn current_token(&self) -> &'a Token {
        &self.tokens[self.index]
    }

    /// Token at a fixed offset from the cursor; negative offsets look behind.
    #[must_use]
    pub fn token_at_relative_index(&self, offset: isize) -> &'a Token {
        let index = self
            .index
            .checked_add_signed(offset)
            .unwrap_or_else(|| panic!("token offset {offset} before start of stream"));
        &self.tokens[index]
    }

    pub fn next_token(&mut self) {
        self.index += 1;
    }

    pub fn previous_token(&mut self) {
        self.index -= 1;
    }

    #[must_use]
    pub fn matches1(&self, kind: SyntaxKind) -> bool {
        self.current_token().kind == kind
    }

    #[must_use]
    pub fn matches2(&self, first: SyntaxKind, second: SyntaxKind) -> bool {
        self.matches1(first) && self.tokens.get(self.index + 1).map(|t| t.kind) == Some(second)
    }

    #[must_use]
    pub fn matches_context_id_and_kind(&self, kind: SyntaxKind, context_id: ContextId) -> bool {
        let token = self.current_token();
        token.kind == kind && token.context_id == Some(context_id)
    }

    /// Contextual keywords are matched by text, since upstream may demote a
    /// keyword used as a name to a plain identifier.
    #[must_use]
    pub fn matches_contextual(&self, keyword: &str) -> bool {
        let token = self.current_token();
        token.kind.is_identifier_or_keyword() && token.text(self.source) == keyword
    }

    #[must_use]
    pub fn identifier_name(&self) -> &'a str {
        self.identifier_name_for_token(self.current_token())
    }

    #[must_use]
    pub fn identifier_name_for_token(&self, token: &Token) -> &'a str {
        token.text(self.source)
    }

    #[must_use]
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot { index: self.index }
    }

    pub fn restore_to_snapshot(&mut self, snapshot: Snapshot) {
        self.index = snapshot.index;
    }

    /// Borrow the stream behind a guard that restores the current position
    /// when dropped, on every exit path.
    pub fn guard(&mut self) -> CursorGuard<'_, 'a> {
        let snapshot = self.snapshot();
        CursorGuard {
            stream: self,
            snapshot,
        }
    }
}

/// Restores the cursor captured by [`TokenStream::guard`] on drop.
pub struct CursorGuard<'s, 'a> {
    stream: &'s mut TokenStream<'a>,
    snapshot: Snapshot,
}

impl<'a> Deref for CursorGuard<'_, 'a> {
    type Target = TokenStream<'a>;

    fn deref(&self) -> &Self::Target {
        self.stream
    }
}

impl DerefMut for CursorGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stream
    }
}

impl Drop for CursorGuard<'_, '_> {
    fn drop(&mut self) {
        self.stream.restore_to_snapshot(self.snapshot);
    }
}
