//! Annotated tokens.

use crate::SyntaxKind;
use serde::Serialize;

/// Opaque pairing tag.
///
/// Every matched `{}`/`()`/`[]` pair gets a fresh id. The annotator also
/// stamps a class body's id onto the class token and onto each member name,
/// and a parameter list's id onto its top-level commas, so token-level passes
/// can jump to structural boundaries by equality instead of counting depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContextId(pub u32);

/// A token plus the structural annotations computed before any transform runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: SyntaxKind,
    /// Byte offset of the first character
    pub start: u32,
    /// Byte offset one past the last character
    pub end: u32,
    pub has_preceding_line_break: bool,
    pub context_id: Option<ContextId>,
    /// Erased by type stripping; carries no runtime meaning
    pub is_type: bool,
    /// Set on `class` tokens only: true for class expressions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_expression: Option<bool>,
    /// Set on a class field's `=`: index of the first token after its value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rhs_end_index: Option<usize>,
}

impl Token {
    #[must_use]
    pub const fn new(kind: SyntaxKind, start: u32, end: u32, has_preceding_line_break: bool) -> Self {
        Self {
            kind,
            start,
            end,
            has_preceding_line_break,
            context_id: None,
            is_type: false,
            is_expression: None,
            rhs_end_index: None,
        }
    }

    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Source text of this token.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start as usize..self.end as usize).unwrap_or("")
    }
}
