//! Constructor scan: parameter properties and the initializer insertion point.

use crate::error::{Annotation, ClassInfoError};
use crate::members::{is_access_modifier, skip_type_tokens};
use serde::Serialize;
use tsz_scanner::{SyntaxKind, TokenStream};

/// What a constructor contributes to the class analysis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConstructorInfo {
    /// `this.<name> = <name>` for each parameter property, in source order.
    pub initializer_statements: Vec<String>,
    /// Token index before which field initializers are inserted: just inside
    /// the body's `{`, or just after the first `super(...)` call.
    ///
    /// Both are insert-before boundaries: `tokens[insert_pos]` is the first
    /// token that follows the inserted code, never the `{` or `)` itself.
    pub insert_pos: usize,
}

/// Scan the constructor whose `constructor` token is under the cursor.
///
/// Leaves the cursor after the constructor body's closing brace.
pub fn process_constructor(tokens: &mut TokenStream<'_>) -> Result<ConstructorInfo, ClassInfoError> {
    let mut initializer_statements = Vec::new();

    tokens.next_token();
    let params_id = tokens
        .current_token()
        .context_id
        .ok_or(ClassInfoError::MissingAnnotation {
            annotation: Annotation::ContextId,
            index: tokens.current_index(),
        })?;

    // The `(` and each top-level comma carry the parameter list's id; each
    // starts a parameter.
    while !tokens.matches_context_id_and_kind(SyntaxKind::CloseParenToken, params_id) {
        if tokens.current_token().context_id != Some(params_id) {
            tokens.next_token();
            continue;
        }
        tokens.next_token();
        if !is_access_modifier(tokens.current_token()) {
            continue;
        }
        while is_access_modifier(tokens.current_token()) {
            tokens.next_token();
        }
        let token = tokens.current_token();
        if token.kind != SyntaxKind::Identifier {
            return Err(ClassInfoError::InvalidParameterProperty {
                index: tokens.current_index(),
                found: token.kind,
            });
        }
        let name = tokens.identifier_name_for_token(token);
        initializer_statements.push(format!("this.{name} = {name}"));
    }
    tokens.next_token();
    skip_type_tokens(tokens);

    let body_index = tokens.current_index();
    let body_id = tokens
        .current_token()
        .context_id
        .ok_or(ClassInfoError::MissingAnnotation {
            annotation: Annotation::ContextId,
            index: body_index,
        })?;
    let mut insert_pos = body_index + 1;
    tokens.next_token();

    let mut found_super_call = false;
    while !tokens.matches_context_id_and_kind(SyntaxKind::CloseBraceToken, body_id) {
        if !found_super_call && tokens.matches2(SyntaxKind::SuperKeyword, SyntaxKind::OpenParenToken) {
            tokens.next_token();
            let call_id = tokens
                .current_token()
                .context_id
                .ok_or(ClassInfoError::MissingAnnotation {
                    annotation: Annotation::ContextId,
                    index: tokens.current_index(),
                })?;
            tokens.next_token();
            while !tokens.matches_context_id_and_kind(SyntaxKind::CloseParenToken, call_id) {
                tokens.next_token();
            }
            insert_pos = tokens.current_index() + 1;
            found_super_call = true;
            tracing::trace!(insert_pos, "constructor calls super");
        }
        tokens.next_token();
    }
    tokens.next_token();

    Ok(ConstructorInfo {
        initializer_statements,
        insert_pos,
    })
}
