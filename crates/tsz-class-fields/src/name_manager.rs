//! Collision-free synthetic identifiers.

use rustc_hash::FxHashSet;
use tsz_scanner::{SyntaxKind, Token};

/// Hands out identifiers that do not clash with anything in the file or with
/// names handed out before.
pub trait NameAllocator {
    fn claim_free_name(&mut self, hint: &str) -> String;
}

/// [`NameAllocator`] over a set of taken names.
///
/// A taken hint gets a numeric suffix starting at `2`: `__init`, `__init2`,
/// `__init3`. Output depends only on the seed and the call order.
#[derive(Clone, Debug, Default)]
pub struct NameManager {
    used_names: FxHashSet<String>,
}

impl NameManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with every identifier in `tokens`.
    #[must_use]
    pub fn from_tokens(source: &str, tokens: &[Token]) -> Self {
        let used_names = tokens
            .iter()
            .filter(|token| token.kind == SyntaxKind::Identifier)
            .map(|token| token.text(source).to_string())
            .collect();
        Self { used_names }
    }

    /// Mark `name` as taken.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.used_names.insert(name.into());
    }

    #[must_use]
    pub fn is_used(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    /// The name `claim_free_name` would return next, without claiming it.
    #[must_use]
    pub fn find_free_name(&self, hint: &str) -> String {
        if !self.is_used(hint) {
            return hint.to_string();
        }
        let mut suffix = 2usize;
        loop {
            let candidate = format!("{hint}{suffix}");
            if !self.is_used(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

impl NameAllocator for NameManager {
    fn claim_free_name(&mut self, hint: &str) -> String {
        let name = self.find_free_name(hint);
        self.used_names.insert(name.clone());
        name
    }
}
