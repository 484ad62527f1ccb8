//! Scanner errors.

use thiserror::Error;
use tsz_common::diagnostics::{Diagnostic, diagnostic_codes};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("unterminated string literal at byte {pos}")]
    UnterminatedString { pos: u32 },

    #[error("unterminated template literal at byte {pos}")]
    UnterminatedTemplate { pos: u32 },

    #[error("unterminated regular expression at byte {pos}")]
    UnterminatedRegularExpression { pos: u32 },

    #[error("unterminated block comment at byte {pos}")]
    UnterminatedComment { pos: u32 },

    #[error("invalid character {ch:?} at byte {pos}")]
    InvalidCharacter { pos: u32, ch: char },

    #[error("'{expected}' expected at byte {pos}")]
    UnbalancedDelimiter { pos: u32, expected: &'static str },

    #[error("unexpected '{found}' at byte {pos}")]
    UnexpectedCloser { pos: u32, found: &'static str },
}

impl ScanError {
    /// Byte offset the error points at.
    #[must_use]
    pub const fn pos(&self) -> u32 {
        match *self {
            Self::UnterminatedString { pos }
            | Self::UnterminatedTemplate { pos }
            | Self::UnterminatedRegularExpression { pos }
            | Self::UnterminatedComment { pos }
            | Self::InvalidCharacter { pos, .. }
            | Self::UnbalancedDelimiter { pos, .. }
            | Self::UnexpectedCloser { pos, .. } => pos,
        }
    }

    /// Render as a `tsc`-style diagnostic.
    #[must_use]
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        let file = file.to_string();
        let pos = self.pos();
        match self {
            Self::UnterminatedString { .. } | Self::UnterminatedRegularExpression { .. } => {
                Diagnostic::from_code(file, pos, 1, diagnostic_codes::UNTERMINATED_STRING_LITERAL, &[])
            }
            Self::UnterminatedTemplate { .. } => Diagnostic::from_code(
                file,
                pos,
                1,
                diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                &[],
            ),
            Self::UnterminatedComment { .. } => {
                Diagnostic::from_code(file, pos, 2, diagnostic_codes::EXPECTED, &["*/"])
            }
            Self::InvalidCharacter { ch, .. } => Diagnostic::from_code(
                file,
                pos,
                ch.len_utf8() as u32,
                diagnostic_codes::INVALID_CHARACTER,
                &[],
            ),
            Self::UnbalancedDelimiter { expected, .. } => {
                Diagnostic::from_code(file, pos, 1, diagnostic_codes::EXPECTED, &[*expected])
            }
            Self::UnexpectedCloser { .. } => {
                Diagnostic::from_code(file, pos, 1, diagnostic_codes::UNEXPECTED_TOKEN, &[])
            }
        }
    }
}
