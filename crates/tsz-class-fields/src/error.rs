//! Errors raised while analysing a class.

use std::fmt;
use thiserror::Error;
use tsz_common::diagnostics::{Diagnostic, diagnostic_codes};
use tsz_scanner::{SyntaxKind, Token};

/// A token annotation the analysis requires from the annotator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Annotation {
    ContextId,
    IsExpression,
    RhsEndIndex,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ContextId => "context id",
            Self::IsExpression => "is_expression",
            Self::RhsEndIndex => "rhs_end_index",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClassInfoError {
    /// The token stream was not annotated the way the analysis expects.
    #[error("token {index} is missing its {annotation} annotation")]
    MissingAnnotation { annotation: Annotation, index: usize },

    /// An expression rewriter returned without moving the cursor.
    #[error("expression rewriter did not advance past token {index}")]
    RewriterStalled { index: usize },

    /// An expression rewriter moved the cursor past the initializer's end.
    #[error("expression rewriter moved to token {index}, past initializer end {end}")]
    RewriterOvershot { index: usize, end: usize },

    /// A parameter property declared with something other than a plain name.
    #[error("parameter property at token {index} is not an identifier (found {found:?})")]
    InvalidParameterProperty { index: usize, found: SyntaxKind },
}

impl ClassInfoError {
    /// Whether the error describes the input program rather than a broken
    /// upstream pass.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidParameterProperty { .. })
    }

    /// Token index the error points at.
    #[must_use]
    pub const fn index(&self) -> usize {
        match *self {
            Self::MissingAnnotation { index, .. }
            | Self::RewriterStalled { index }
            | Self::RewriterOvershot { index, .. }
            | Self::InvalidParameterProperty { index, .. } => index,
        }
    }

    /// Render a user-facing error as a diagnostic against `tokens`.
    ///
    /// Internal errors have no diagnostic code and return `None`.
    #[must_use]
    pub fn to_diagnostic(&self, file: &str, tokens: &[Token]) -> Option<Diagnostic> {
        match *self {
            Self::InvalidParameterProperty { index, .. } => {
                let (start, length) = tokens.get(index).map_or((0, 0), |t| (t.start, t.len()));
                Some(Diagnostic::from_code(
                    file.to_string(),
                    start,
                    length,
                    diagnostic_codes::A_PARAMETER_PROPERTY_MAY_NOT_BE_DECLARED_USING_A_BINDING_PATTERN,
                    &[],
                ))
            }
            _ => None,
        }
    }
}
