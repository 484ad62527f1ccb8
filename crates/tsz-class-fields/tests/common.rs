//! Fixture helpers shared by the integration tests.

#![allow(dead_code)]

use tsz_class_fields::{
    ClassInfo, ClassInfoError, ClassTransformOptions, ExpressionRewriter, NameManager,
    SkipRewriter, TokenRange, get_class_info,
};
use tsz_scanner::{SyntaxKind, Token, TokenStream, scan};

/// A scanned fixture and the analysis of its first class.
pub struct Analysis {
    pub source: &'static str,
    pub tokens: Vec<Token>,
    pub class_index: usize,
    pub info: ClassInfo,
}

impl Analysis {
    /// Token texts in `range`, joined with single spaces.
    pub fn text(&self, range: TokenRange) -> String {
        self.tokens[range.start..range.end]
            .iter()
            .map(|token| token.text(self.source))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn token_text(&self, index: usize) -> &str {
        self.tokens[index].text(self.source)
    }

    pub fn field_texts(&self) -> Vec<String> {
        self.info
            .fields
            .iter()
            .map(|field| self.text(field.range()))
            .collect()
    }

    pub fn removed_texts(&self) -> Vec<String> {
        self.info
            .ranges_to_remove
            .iter()
            .map(|range| self.text(*range))
            .collect()
    }
}

pub fn first_class_index(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .position(|token| token.kind == SyntaxKind::ClassKeyword && token.is_expression.is_some())
        .expect("fixture should contain a class")
}

/// Run the analysis on the first class of `source` with `rewriter`.
pub fn try_analyse_with(
    source: &'static str,
    options: &ClassTransformOptions,
    rewriter: &mut dyn ExpressionRewriter,
) -> (Vec<Token>, usize, Result<ClassInfo, ClassInfoError>) {
    let tokens = scan(source).expect("fixture should scan");
    let class_index = first_class_index(&tokens);
    let mut names = NameManager::from_tokens(source, &tokens);
    let result = {
        let mut stream = TokenStream::new(source, &tokens);
        stream.set_index(class_index);
        let result = get_class_info(&mut stream, rewriter, &mut names, options);
        assert_eq!(
            stream.current_index(),
            class_index,
            "cursor should be restored to the class token"
        );
        result
    };
    (tokens, class_index, result)
}

pub fn analyse_with(source: &'static str, options: &ClassTransformOptions) -> Analysis {
    let (tokens, class_index, result) = try_analyse_with(source, options, &mut SkipRewriter);
    Analysis {
        source,
        tokens,
        class_index,
        info: result.expect("class should analyse"),
    }
}

pub fn analyse(source: &'static str) -> Analysis {
    analyse_with(source, &ClassTransformOptions::default())
}

pub fn es_transforms_disabled() -> ClassTransformOptions {
    ClassTransformOptions {
        disable_es_transforms: true,
    }
}
