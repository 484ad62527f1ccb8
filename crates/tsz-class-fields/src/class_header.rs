//! The class header: everything from `class` up to the body's `{`.

use crate::error::{Annotation, ClassInfoError};
use serde::Serialize;
use tsz_scanner::{SyntaxKind, TokenStream};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassHeaderInfo {
    pub is_expression: bool,
    pub class_name: Option<String>,
    pub has_superclass: bool,
}

/// Read the header of the class whose `class` token is under the cursor.
///
/// Leaves the cursor on the body's opening brace.
pub fn process_class_header(tokens: &mut TokenStream<'_>) -> Result<ClassHeaderInfo, ClassInfoError> {
    let class_index = tokens.current_index();
    let class_token = tokens.current_token();
    let context_id = class_token.context_id.ok_or(ClassInfoError::MissingAnnotation {
        annotation: Annotation::ContextId,
        index: class_index,
    })?;
    let is_expression = class_token.is_expression.ok_or(ClassInfoError::MissingAnnotation {
        annotation: Annotation::IsExpression,
        index: class_index,
    })?;

    tokens.next_token();
    let class_name = tokens
        .matches1(SyntaxKind::Identifier)
        .then(|| tokens.identifier_name().to_string());

    let mut has_superclass = false;
    while !tokens.matches_context_id_and_kind(SyntaxKind::OpenBraceToken, context_id) {
        // `extends` inside type parameters is a constraint
        if tokens.matches1(SyntaxKind::ExtendsKeyword) && !tokens.current_token().is_type {
            has_superclass = true;
        }
        tokens.next_token();
    }

    Ok(ClassHeaderInfo {
        is_expression,
        class_name,
        has_superclass,
    })
}
