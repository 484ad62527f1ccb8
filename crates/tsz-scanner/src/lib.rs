//! TypeScript tokenizer for the tsz class-field transform.
//!
//! This crate provides the lexical phase and the structural annotations
//! token-level transforms rely on:
//! - `SyntaxKind` - Token kinds
//! - `Token`, `ContextId` - Annotated tokens and pairing tags
//! - `TokenStream` - Seekable cursor with snapshot/restore
//! - `tokenize` / `annotate` - Lexing and annotation passes

pub mod annotate;
pub mod error;
pub mod lexer;
pub mod syntax_kind;
pub mod token;
pub mod token_stream;

pub use annotate::annotate;
pub use error::ScanError;
pub use lexer::tokenize;
pub use syntax_kind::{SyntaxKind, punctuation_to_text, string_to_token, text_to_keyword};
pub use token::{ContextId, Token};
pub use token_stream::{CursorGuard, Snapshot, TokenStream};

/// Lex and annotate `source` in one go.
pub fn scan(source: &str) -> Result<Vec<Token>, ScanError> {
    let mut tokens = tokenize(source)?;
    annotate(&mut tokens)?;
    Ok(tokens)
}
