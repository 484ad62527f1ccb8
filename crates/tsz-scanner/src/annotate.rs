//! Structural annotations over a lexed token vector.
//!
//! Token-level transforms never build a tree. Everything they need to know
//! about structure is stamped onto the tokens here, once:
//!
//! - every `{}`/`()`/`[]` pair shares a fresh [`ContextId`];
//! - a `class` token carries its body's id and an `is_expression` flag;
//! - class member names (both brackets of a computed name) carry the body's id;
//! - top-level commas of a member's parameter list carry the list's id;
//! - type annotations, type parameters, `implements` clauses, index
//!   signatures and body-less overloads are flagged `is_type`;
//! - a field initializer's `=` records where its value ends.
//!
//! Contextual keywords used as member or parameter names are demoted to
//! `Identifier` so later passes can tell modifiers from names.

use crate::error::ScanError;
use crate::syntax_kind::punctuation_to_text;
use crate::{ContextId, SyntaxKind, Token};
use smallvec::SmallVec;

/// Annotate `tokens` in place.
pub fn annotate(tokens: &mut [Token]) -> Result<(), ScanError> {
    let partners = pair_delimiters(tokens)?;
    let mut annotator = Annotator { tokens, partners };
    // Outer classes are visited first, so names they demote (a member called
    // `class`, say) are no longer class keywords when the loop reaches them.
    for index in 0..annotator.tokens.len() {
        if annotator.kind(index) == SyntaxKind::ClassKeyword && annotator.starts_class(index) {
            annotator.annotate_class(index);
        }
    }
    Ok(())
}

fn pair_delimiters(tokens: &mut [Token]) -> Result<Vec<Option<usize>>, ScanError> {
    let mut partners = vec![None; tokens.len()];
    let mut open: SmallVec<[usize; 16]> = SmallVec::new();
    let mut next_id = 0u32;

    for index in 0..tokens.len() {
        let kind = tokens[index].kind;
        if kind.is_open_delimiter() {
            open.push(index);
            continue;
        }
        if !kind.is_close_delimiter() {
            continue;
        }
        let Some(opener) = open.pop() else {
            return Err(ScanError::UnexpectedCloser {
                pos: tokens[index].start,
                found: punctuation_to_text(kind).unwrap_or("?"),
            });
        };
        let expected = tokens[opener].kind.closing_delimiter();
        if expected != Some(kind) {
            return Err(ScanError::UnbalancedDelimiter {
                pos: tokens[index].start,
                expected: expected.and_then(punctuation_to_text).unwrap_or("?"),
            });
        }
        let id = Some(ContextId(next_id));
        next_id += 1;
        tokens[opener].context_id = id;
        tokens[index].context_id = id;
        partners[opener] = Some(index);
        partners[index] = Some(opener);
    }

    if let Some(opener) = open.pop() {
        let expected = tokens[opener].kind.closing_delimiter();
        return Err(ScanError::UnbalancedDelimiter {
            pos: tokens.last().map_or(0, |t| t.start),
            expected: expected.and_then(punctuation_to_text).unwrap_or("?"),
        });
    }
    Ok(partners)
}

struct Annotator<'t> {
    tokens: &'t mut [Token],
    partners: Vec<Option<usize>>,
}

impl Annotator<'_> {
    fn kind(&self, index: usize) -> SyntaxKind {
        self.tokens
            .get(index)
            .map_or(SyntaxKind::EndOfFileToken, |t| t.kind)
    }

    fn partner(&self, index: usize) -> usize {
        self.partners.get(index).copied().flatten().unwrap_or(index)
    }

    /// Index after the token at `index`, jumping over a whole delimited group.
    fn skip(&self, index: usize) -> usize {
        if self.kind(index).is_open_delimiter() {
            self.partner(index) + 1
        } else {
            index + 1
        }
    }

    fn flag_types(&mut self, start: usize, end: usize) {
        let end = end.min(self.tokens.len());
        for token in &mut self.tokens[start.min(end)..end] {
            token.is_type = true;
        }
    }

    fn demote_to_identifier(&mut self, index: usize) {
        if self.kind(index).is_keyword() {
            self.tokens[index].kind = SyntaxKind::Identifier;
        }
    }

    /// `class` as a declaration or expression head, not a property name.
    fn starts_class(&self, index: usize) -> bool {
        if index > 0
            && matches!(
                self.kind(index - 1),
                SyntaxKind::DotToken | SyntaxKind::QuestionDotToken
            )
        {
            return false;
        }
        let next = self.kind(index + 1);
        matches!(
            next,
            SyntaxKind::OpenBraceToken | SyntaxKind::LessThanToken
        ) || next.is_identifier_or_keyword()
    }

    fn is_class_expression(&self, class_index: usize) -> bool {
        let mut head = class_index;
        while head > 0
            && matches!(
                self.kind(head - 1),
                SyntaxKind::ExportKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::DeclareKeyword
                    | SyntaxKind::AbstractKeyword
            )
        {
            head -= 1;
        }
        if head == 0 {
            return false;
        }
        match self.kind(head - 1) {
            SyntaxKind::SemicolonToken | SyntaxKind::OpenBraceToken | SyntaxKind::CloseBraceToken => {
                false
            }
            previous => !(self.tokens[head].has_preceding_line_break && previous.ends_expression()),
        }
    }

    fn annotate_class(&mut self, class_index: usize) {
        let is_expression = self.is_class_expression(class_index);
        let mut index = class_index + 1;

        let name = self.kind(index);
        if name.is_identifier_or_keyword()
            && !matches!(
                name,
                SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
            )
        {
            self.demote_to_identifier(index);
            index += 1;
        }
        if self.kind(index) == SyntaxKind::LessThanToken {
            let end = self.skip_angle_brackets(index, self.tokens.len());
            self.flag_types(index, end);
            index = end;
        }

        let mut in_implements = false;
        loop {
            match self.kind(index) {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::OpenBraceToken => break,
                SyntaxKind::ImplementsKeyword => in_implements = true,
                // type arguments of the superclass
                SyntaxKind::LessThanToken if !in_implements => {
                    let end = self.skip_angle_brackets(index, self.tokens.len());
                    self.flag_types(index, end);
                    index = end;
                    continue;
                }
                _ => {}
            }
            let next = self.skip(index);
            if in_implements {
                self.flag_types(index, next);
            }
            index = next;
        }

        let body_open = index;
        let class_id = self.tokens[body_open].context_id;
        self.tokens[class_index].context_id = class_id;
        self.tokens[class_index].is_expression = Some(is_expression);
        if let Some(class_id) = class_id {
            let body_close = self.partner(body_open);
            self.annotate_class_body(body_open, body_close, class_id);
        }
    }

    fn annotate_class_body(&mut self, open: usize, close: usize, class_id: ContextId) {
        let mut index = open + 1;
        while index < close {
            index = match self.kind(index) {
                SyntaxKind::SemicolonToken => index + 1,
                _ => self.annotate_member(index, close, class_id).max(index + 1),
            };
        }
    }

    /// Annotate one class member starting at `start`; returns the index after it.
    fn annotate_member(&mut self, start: usize, close: usize, class_id: ContextId) -> usize {
        let mut index = start;
        let mut is_static = false;
        loop {
            let kind = self.kind(index);
            if kind.is_class_member_modifier() {
                if self.modifier_is_member_name(index) {
                    self.demote_to_identifier(index);
                    break;
                }
                is_static |= kind == SyntaxKind::StaticKeyword;
                index += 1;
            } else if matches!(kind, SyntaxKind::AsteriskToken | SyntaxKind::HashToken) {
                index += 1;
            } else {
                break;
            }
        }
        if index >= close {
            return close;
        }

        if is_static && self.kind(index) == SyntaxKind::OpenBraceToken {
            return self.partner(index) + 1;
        }

        if self.is_index_signature(index) {
            let mut end = self.partner(index) + 1;
            if self.kind(end) == SyntaxKind::ColonToken {
                end = self.skip_type(end + 1, close);
            }
            self.flag_types(start, end);
            return end;
        }

        if self.kind(index) == SyntaxKind::OpenBracketToken {
            let closer = self.partner(index);
            self.tokens[index].context_id = Some(class_id);
            self.tokens[closer].context_id = Some(class_id);
            index = closer + 1;
        } else {
            if self.kind(index) != SyntaxKind::ConstructorKeyword {
                self.demote_to_identifier(index);
            }
            self.tokens[index].context_id = Some(class_id);
            index += 1;
        }

        if matches!(
            self.kind(index),
            SyntaxKind::QuestionToken | SyntaxKind::ExclamationToken
        ) {
            self.tokens[index].is_type = true;
            index += 1;
        }
        if self.kind(index) == SyntaxKind::LessThanToken {
            let end = self.skip_angle_brackets(index, close);
            self.flag_types(index, end);
            index = end;
        }
        if self.kind(index) == SyntaxKind::OpenParenToken {
            return self.annotate_method(start, index, close);
        }

        if self.kind(index) == SyntaxKind::ColonToken {
            let end = self.skip_type(index + 1, close);
            self.flag_types(index, end);
            index = end;
        }
        if self.kind(index) == SyntaxKind::EqualsToken {
            let end = self.find_rhs_end(index, close);
            self.tokens[index].rhs_end_index = Some(end);
            index = end;
        }
        index
    }

    /// A modifier keyword directly followed by something only a name can be
    /// followed by is the member's name: `get = 1`, `static() {}`.
    fn modifier_is_member_name(&self, index: usize) -> bool {
        match self.kind(index + 1) {
            SyntaxKind::OpenParenToken
            | SyntaxKind::EqualsToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::ColonToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::CommaToken
            | SyntaxKind::EndOfFileToken => true,
            SyntaxKind::OpenBraceToken => self.kind(index) != SyntaxKind::StaticKeyword,
            _ => false,
        }
    }

    fn is_index_signature(&self, index: usize) -> bool {
        self.kind(index) == SyntaxKind::OpenBracketToken
            && self.kind(index + 1).is_identifier_or_keyword()
            && self.kind(index + 2) == SyntaxKind::ColonToken
    }

    fn annotate_method(&mut self, start: usize, open_paren: usize, close: usize) -> usize {
        let params_close = self.partner(open_paren);
        self.annotate_parameters(open_paren, params_close);
        let mut index = params_close + 1;
        if self.kind(index) == SyntaxKind::ColonToken {
            let end = self.skip_type(index + 1, close);
            self.flag_types(index, end);
            index = end;
        }
        if self.kind(index) == SyntaxKind::OpenBraceToken {
            return self.partner(index) + 1;
        }
        // Overload signature or abstract method: nothing survives type stripping.
        if self.kind(index) == SyntaxKind::SemicolonToken {
            index += 1;
        }
        self.flag_types(start, index);
        index
    }

    fn annotate_parameters(&mut self, open: usize, close: usize) {
        let Some(params_id) = self.tokens[open].context_id else {
            return;
        };
        let mut index = open + 1;
        while index < close {
            while self.kind(index).is_class_member_modifier()
                && !matches!(
                    self.kind(index + 1),
                    SyntaxKind::ColonToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::CloseParenToken
                        | SyntaxKind::QuestionToken
                        | SyntaxKind::EqualsToken
                )
            {
                index += 1;
            }
            if self.kind(index) == SyntaxKind::DotDotDotToken {
                index += 1;
            }
            if self.kind(index) != SyntaxKind::ThisKeyword {
                self.demote_to_identifier(index);
            }
            index = self.skip(index);

            if self.kind(index) == SyntaxKind::QuestionToken {
                self.tokens[index].is_type = true;
                index += 1;
            }
            if self.kind(index) == SyntaxKind::ColonToken {
                let end = self.skip_type(index + 1, close);
                self.flag_types(index, end);
                index = end;
            }
            // default value
            while index < close && self.kind(index) != SyntaxKind::CommaToken {
                index = self.skip(index);
            }
            if index < close {
                self.tokens[index].context_id = Some(params_id);
                index += 1;
            }
        }
    }

    /// End of a field initializer: the `;`, the class body's `}`, or the
    /// first token after a line break that cannot continue the expression.
    fn find_rhs_end(&self, equals: usize, close: usize) -> usize {
        let mut index = equals + 1;
        while index < close {
            let token = &self.tokens[index];
            if token.kind == SyntaxKind::SemicolonToken {
                break;
            }
            if index > equals + 1
                && token.has_preceding_line_break
                && self.is_automatic_semicolon_before(index)
            {
                break;
            }
            index = self.skip(index);
        }
        index.min(close)
    }

    fn is_automatic_semicolon_before(&self, index: usize) -> bool {
        if !self.ends_expression_at(index - 1) {
            return false;
        }
        match self.kind(index) {
            SyntaxKind::InKeyword | SyntaxKind::InstanceOfKeyword | SyntaxKind::AsKeyword => false,
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::HashToken => true,
            kind => kind.is_identifier_or_keyword(),
        }
    }

    /// `const` closing an `as const` assertion ends the value like a name does.
    fn ends_expression_at(&self, index: usize) -> bool {
        match self.kind(index) {
            SyntaxKind::ConstKeyword => index > 0 && self.kind(index - 1) == SyntaxKind::AsKeyword,
            kind => kind.ends_expression(),
        }
    }

    /// Skip a `<...>` group starting at `start`; returns the index after `>`.
    fn skip_angle_brackets(&self, start: usize, limit: usize) -> usize {
        let mut depth = 0usize;
        let mut index = start;
        while index < limit {
            match self.kind(index) {
                SyntaxKind::LessThanToken => depth += 1,
                SyntaxKind::GreaterThanToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return index + 1;
                    }
                }
                SyntaxKind::EndOfFileToken => break,
                kind if kind.is_open_delimiter() => {
                    index = self.partner(index) + 1;
                    continue;
                }
                _ => {}
            }
            index += 1;
        }
        limit
    }

    /// Skip a type starting at `start`; returns the index after it.
    fn skip_type(&self, start: usize, limit: usize) -> usize {
        let mut index = start;
        let mut in_conditional = false;
        while index < limit {
            while matches!(
                self.kind(index),
                SyntaxKind::BarToken
                    | SyntaxKind::AmpersandToken
                    | SyntaxKind::KeyOfKeyword
                    | SyntaxKind::TypeOfKeyword
                    | SyntaxKind::ReadonlyKeyword
                    | SyntaxKind::NewKeyword
            ) {
                index += 1;
            }

            match self.kind(index) {
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenBracketToken => index = self.partner(index) + 1,
                // generic function type: `<T>(value: T) => T`
                SyntaxKind::LessThanToken => {
                    index = self.skip_angle_brackets(index, limit);
                    continue;
                }
                // negative literal type
                SyntaxKind::MinusToken => index += 2,
                _ => {
                    index += 1;
                    while self.kind(index) == SyntaxKind::DotToken {
                        index += 2;
                    }
                    if self.kind(index) == SyntaxKind::LessThanToken
                        && !self.tokens[index].has_preceding_line_break
                    {
                        index = self.skip_angle_brackets(index, limit);
                    }
                }
            }

            // array types and indexed access
            while self.kind(index) == SyntaxKind::OpenBracketToken
                && !self.tokens[index].has_preceding_line_break
            {
                index = self.partner(index) + 1;
            }

            match self.kind(index) {
                SyntaxKind::EqualsGreaterThanToken
                | SyntaxKind::BarToken
                | SyntaxKind::AmpersandToken
                | SyntaxKind::IsKeyword => index += 1,
                SyntaxKind::ExtendsKeyword => {
                    in_conditional = true;
                    index += 1;
                }
                SyntaxKind::QuestionToken | SyntaxKind::ColonToken if in_conditional => index += 1,
                _ => break,
            }
        }
        index.min(limit)
    }
}
