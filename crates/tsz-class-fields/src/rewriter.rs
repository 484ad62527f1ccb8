//! The expression rewriter capability invoked on field initializers.

use tsz_scanner::TokenStream;

/// Lowers the tokens of a field initializer's value.
///
/// Each call must consume at least one token and must not move the cursor
/// past the initializer's end. The analysis checks both.
pub trait ExpressionRewriter {
    fn process_token(&mut self, tokens: &mut TokenStream<'_>);
}

impl<F> ExpressionRewriter for F
where
    F: FnMut(&mut TokenStream<'_>),
{
    fn process_token(&mut self, tokens: &mut TokenStream<'_>) {
        self(tokens);
    }
}

/// Steps over every token unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkipRewriter;

impl ExpressionRewriter for SkipRewriter {
    fn process_token(&mut self, tokens: &mut TokenStream<'_>) {
        tokens.next_token();
    }
}

/// Records the source text of every token it steps over.
#[derive(Clone, Debug, Default)]
pub struct TextCollector {
    pub texts: Vec<String>,
}

impl ExpressionRewriter for TextCollector {
    fn process_token(&mut self, tokens: &mut TokenStream<'_>) {
        self.texts.push(tokens.identifier_name().to_string());
        tokens.next_token();
    }
}
