//! The class body scan.
//!
//! One forward pass over the body classifies each member:
//!
//! - the constructor yields parameter properties and an insertion point;
//! - a field with an initializer yields a [`ClassField`] and a generated
//!   initializer call (`this.__init()` or `.__initStatic()`);
//! - a field without one, a stray `;` and other erasable syntax yield a
//!   removal range;
//! - methods, accessors, static blocks and `#private` members are stepped
//!   over untouched.
//!
//! Initializer values are handed token by token to the injected
//! [`ExpressionRewriter`]. The stream position is restored on return, on
//! success and on error alike.

use crate::class_header::{ClassHeaderInfo, process_class_header};
use crate::constructor::{ConstructorInfo, process_constructor};
use crate::error::{Annotation, ClassInfoError};
use crate::members::{
    MemberModifiers, skip_field_name, skip_modifiers, skip_to_next_class_element,
    skip_type_tokens,
};
use crate::name_manager::NameAllocator;
use crate::options::ClassTransformOptions;
use crate::rewriter::ExpressionRewriter;
use serde::Serialize;
use tracing::trace;
use tsz_scanner::{ContextId, SyntaxKind, TokenStream};

/// Half-open token index interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

impl TokenRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn overlaps(&self, other: &TokenRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A field declaration with an initializer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassField {
    /// First token of the name (the `[` of a computed name)
    pub start: usize,
    /// Index after the initializer value
    pub end: usize,
    pub equals_index: usize,
    /// Name of the generated method holding the initializer
    pub initializer_name: String,
}

impl ClassField {
    #[must_use]
    pub const fn range(&self) -> TokenRange {
        TokenRange::new(self.start, self.end)
    }
}

/// Everything the emitter needs to rewrite one class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    pub header_info: ClassHeaderInfo,
    /// Parameter property assignments, then `this.<init>()` calls in
    /// declaration order
    pub initializer_statements: Vec<String>,
    /// `.<init>()` suffixes to append after the class, in declaration order
    pub static_initializer_suffixes: Vec<String>,
    /// `None` when the class declares no constructor
    pub constructor_insert_pos: Option<usize>,
    pub fields: Vec<ClassField>,
    pub ranges_to_remove: Vec<TokenRange>,
}

/// Analyse the class whose `class` token is under the cursor.
///
/// The cursor is back on the `class` token when this returns.
#[tracing::instrument(level = "debug", skip_all, fields(class_index = tokens.current_index()))]
pub fn get_class_info(
    tokens: &mut TokenStream<'_>,
    rewriter: &mut dyn ExpressionRewriter,
    names: &mut dyn NameAllocator,
    options: &ClassTransformOptions,
) -> Result<ClassInfo, ClassInfoError> {
    let mut tokens = tokens.guard();

    let header_info = process_class_header(&mut tokens)?;
    let class_context_id =
        tokens
            .current_token()
            .context_id
            .ok_or(ClassInfoError::MissingAnnotation {
                annotation: Annotation::ContextId,
                index: tokens.current_index(),
            })?;
    tokens.next_token();

    let mut scan = ClassScan::new(options);
    while !tokens.matches_context_id_and_kind(SyntaxKind::CloseBraceToken, class_context_id) {
        scan.scan_member(&mut tokens, rewriter, names, class_context_id)?;
    }

    let info = scan.finish(header_info);
    tracing::debug!(
        fields = info.fields.len(),
        removed = info.ranges_to_remove.len(),
        has_constructor = info.constructor_insert_pos.is_some(),
        "class analysed"
    );
    Ok(info)
}

/// Running state of one body scan.
struct ClassScan<'o> {
    options: &'o ClassTransformOptions,
    constructor: Option<ConstructorInfo>,
    instance_initializers: Vec<String>,
    static_initializer_suffixes: Vec<String>,
    fields: Vec<ClassField>,
    ranges_to_remove: Vec<TokenRange>,
}

impl<'o> ClassScan<'o> {
    fn new(options: &'o ClassTransformOptions) -> Self {
        Self {
            options,
            constructor: None,
            instance_initializers: Vec::new(),
            static_initializer_suffixes: Vec::new(),
            fields: Vec::new(),
            ranges_to_remove: Vec::new(),
        }
    }

    fn scan_member(
        &mut self,
        tokens: &mut TokenStream<'_>,
        rewriter: &mut dyn ExpressionRewriter,
        names: &mut dyn NameAllocator,
        class_context_id: ContextId,
    ) -> Result<(), ClassInfoError> {
        if tokens.matches_contextual("constructor") && !tokens.current_token().is_type {
            self.constructor = Some(process_constructor(tokens)?);
            return Ok(());
        }
        if tokens.matches1(SyntaxKind::SemicolonToken) {
            if !self.options.disable_es_transforms {
                let index = tokens.current_index();
                self.ranges_to_remove.push(TokenRange::new(index, index + 1));
            }
            tokens.next_token();
            return Ok(());
        }
        if tokens.current_token().is_type {
            tokens.next_token();
            return Ok(());
        }

        let statement_start = tokens.current_index();
        let modifiers = skip_modifiers(tokens);

        if modifiers.is_static && tokens.matches1(SyntaxKind::OpenBraceToken) {
            trace!(statement_start, "static block");
            skip_to_next_class_element(tokens, class_context_id);
            return Ok(());
        }
        if modifiers.is_private_name {
            trace!(statement_start, "private member");
            skip_to_next_class_element(tokens, class_context_id);
            return Ok(());
        }
        if tokens.matches_contextual("constructor") {
            self.constructor = Some(process_constructor(tokens)?);
            return Ok(());
        }

        let name_start = tokens.current_index();
        skip_field_name(tokens)?;
        skip_type_tokens(tokens);

        if tokens.matches1(SyntaxKind::LessThanToken) || tokens.matches1(SyntaxKind::OpenParenToken)
        {
            trace!(statement_start, "method");
            skip_to_next_class_element(tokens, class_context_id);
            return Ok(());
        }

        if tokens.matches1(SyntaxKind::EqualsToken) {
            self.scan_field_initializer(tokens, rewriter, names, name_start, modifiers)?;
        } else if !self.options.disable_es_transforms || modifiers.is_declare_or_abstract {
            trace!(statement_start, "declaration without initializer");
            self.ranges_to_remove
                .push(TokenRange::new(statement_start, tokens.current_index()));
        }
        Ok(())
    }

    fn scan_field_initializer(
        &mut self,
        tokens: &mut TokenStream<'_>,
        rewriter: &mut dyn ExpressionRewriter,
        names: &mut dyn NameAllocator,
        name_start: usize,
        modifiers: MemberModifiers,
    ) -> Result<(), ClassInfoError> {
        let equals_index = tokens.current_index();
        let value_end = tokens
            .current_token()
            .rhs_end_index
            .ok_or(ClassInfoError::MissingAnnotation {
                annotation: Annotation::RhsEndIndex,
                index: equals_index,
            })?;
        tokens.next_token();
        while tokens.current_index() < value_end {
            let before = tokens.current_index();
            rewriter.process_token(tokens);
            let after = tokens.current_index();
            if after <= before {
                return Err(ClassInfoError::RewriterStalled { index: before });
            }
            if after > value_end {
                return Err(ClassInfoError::RewriterOvershot {
                    index: after,
                    end: value_end,
                });
            }
        }

        if self.options.disable_es_transforms {
            // the field stays a native class field
            return Ok(());
        }

        let initializer_name = if modifiers.is_static {
            let name = names.claim_free_name("__initStatic");
            self.static_initializer_suffixes.push(format!(".{name}()"));
            name
        } else {
            let name = names.claim_free_name("__init");
            self.instance_initializers.push(format!("this.{name}()"));
            name
        };
        trace!(equals_index, %initializer_name, is_static = modifiers.is_static, "field");
        self.fields.push(ClassField {
            start: name_start,
            end: tokens.current_index(),
            equals_index,
            initializer_name,
        });
        Ok(())
    }

    fn finish(self, header_info: ClassHeaderInfo) -> ClassInfo {
        let (mut initializer_statements, constructor_insert_pos) = match self.constructor {
            Some(constructor) => (
                constructor.initializer_statements,
                Some(constructor.insert_pos),
            ),
            None => (Vec::new(), None),
        };
        initializer_statements.extend(self.instance_initializers);
        ClassInfo {
            header_info,
            initializer_statements,
            static_initializer_suffixes: self.static_initializer_suffixes,
            constructor_insert_pos,
            fields: self.fields,
            ranges_to_remove: self.ranges_to_remove,
        }
    }
}
