//! Predicates and cursor moves shared by the class body and constructor scans.

use crate::error::{Annotation, ClassInfoError};
use tsz_scanner::{ContextId, SyntaxKind, Token, TokenStream};

/// Member modifiers seen before a member's name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemberModifiers {
    pub is_static: bool,
    /// `declare` or `abstract`: the member never has a runtime counterpart.
    pub is_declare_or_abstract: bool,
    /// An ES private name (`#name`).
    pub is_private_name: bool,
}

/// Whether `token` can prefix a class member or parameter property.
///
/// Keywords used as names have been demoted to identifiers upstream, so the
/// kind alone decides.
#[must_use]
pub fn is_access_modifier(token: &Token) -> bool {
    matches!(
        token.kind,
        SyntaxKind::AsyncKeyword
            | SyntaxKind::GetKeyword
            | SyntaxKind::SetKeyword
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ReadonlyKeyword
            | SyntaxKind::StaticKeyword
            | SyntaxKind::PublicKeyword
            | SyntaxKind::PrivateKeyword
            | SyntaxKind::ProtectedKeyword
            | SyntaxKind::AbstractKeyword
            | SyntaxKind::OverrideKeyword
            | SyntaxKind::DeclareKeyword
            | SyntaxKind::AsteriskToken
            | SyntaxKind::HashToken
    )
}

/// Consume a run of modifiers, in any order.
pub fn skip_modifiers(tokens: &mut TokenStream<'_>) -> MemberModifiers {
    let mut modifiers = MemberModifiers::default();
    while is_access_modifier(tokens.current_token()) {
        match tokens.current_token().kind {
            SyntaxKind::StaticKeyword => modifiers.is_static = true,
            SyntaxKind::DeclareKeyword | SyntaxKind::AbstractKeyword => {
                modifiers.is_declare_or_abstract = true;
            }
            SyntaxKind::HashToken => modifiers.is_private_name = true,
            _ => {}
        }
        tokens.next_token();
    }
    modifiers
}

/// Step over a member name: one token, or a computed `[...]` name whose
/// brackets carry the class body's id.
pub fn skip_field_name(tokens: &mut TokenStream<'_>) -> Result<(), ClassInfoError> {
    if !tokens.matches1(SyntaxKind::OpenBracketToken) {
        tokens.next_token();
        return Ok(());
    }
    let class_context_id =
        tokens
            .current_token()
            .context_id
            .ok_or(ClassInfoError::MissingAnnotation {
                annotation: Annotation::ContextId,
                index: tokens.current_index(),
            })?;
    tokens.next_token();
    while !tokens.matches_context_id_and_kind(SyntaxKind::CloseBracketToken, class_context_id) {
        tokens.next_token();
    }
    tokens.next_token();
    Ok(())
}

/// Move from inside a member we do not analyse to the start of the next one.
///
/// Member names and the closing brace carry the class body's id, so the
/// cursor stops at the next name; modifiers directly before it belong to
/// that member and are stepped back over.
pub fn skip_to_next_class_element(tokens: &mut TokenStream<'_>, class_context_id: ContextId) {
    tokens.next_token();
    while !tokens.is_at_end() && tokens.current_token().context_id != Some(class_context_id) {
        tokens.next_token();
    }
    while is_access_modifier(tokens.token_at_relative_index(-1)) {
        tokens.previous_token();
    }
}

/// Step over tokens flagged as types.
pub fn skip_type_tokens(tokens: &mut TokenStream<'_>) {
    while !tokens.is_at_end() && tokens.current_token().is_type {
        tokens.next_token();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_modifiers_in_any_order() {
        let source = "class A { readonly static declare x; }";
        let tokens = tsz_scanner::scan(source).expect("source should scan");
        let mut stream = TokenStream::new(source, &tokens);
        stream.set_index(3);
        let modifiers = skip_modifiers(&mut stream);
        assert!(modifiers.is_static);
        assert!(modifiers.is_declare_or_abstract);
        assert!(!modifiers.is_private_name);
        assert_eq!(stream.identifier_name(), "x");
    }

    #[test]
    fn test_modifier_used_as_name_is_not_a_modifier() {
        let source = "class A { static = 1; }";
        let tokens = tsz_scanner::scan(source).expect("source should scan");
        assert!(!is_access_modifier(&tokens[3]));
    }

    #[test]
    fn test_skip_computed_field_name() {
        let source = "class A { [a[0]] = 1; }";
        let tokens = tsz_scanner::scan(source).expect("source should scan");
        let mut stream = TokenStream::new(source, &tokens);
        stream.set_index(3);
        skip_field_name(&mut stream).expect("computed name is tagged");
        assert!(stream.matches1(SyntaxKind::EqualsToken));
    }

    #[test]
    fn test_untagged_computed_name_is_missing_annotation() {
        let source = "class A { [k] = 1; }";
        let mut tokens = tsz_scanner::scan(source).expect("source should scan");
        tokens[3].context_id = None;
        let mut stream = TokenStream::new(source, &tokens);
        stream.set_index(3);
        assert_eq!(
            skip_field_name(&mut stream),
            Err(ClassInfoError::MissingAnnotation {
                annotation: Annotation::ContextId,
                index: 3,
            })
        );
    }

    #[test]
    fn test_skip_to_next_class_element_backs_over_modifiers() {
        let source = "class A { m() { return 1; } static async n() {} }";
        let tokens = tsz_scanner::scan(source).expect("source should scan");
        let class_id = tokens[0].context_id.expect("class token is tagged");
        let mut stream = TokenStream::new(source, &tokens);
        // at `(` of `m`
        stream.set_index(4);
        skip_to_next_class_element(&mut stream, class_id);
        assert!(stream.matches1(SyntaxKind::StaticKeyword));
        assert_eq!(stream.token_at_relative_index(2).text(source), "n");
    }
}
