//! Rule allowing one class or interface per file.
//!
//! # Configuration
//!
//! - `excluded_classes`: glob patterns of class names that may share a file

use crate::naming::{declared_name, ClassExcluder};
use stubble_lint_core::{FileContext, Rule, Severity, TokenKind, Violation};

/// Rule code for single-declaration.
pub const CODE: &str = "SL012";

/// Rule name for single-declaration.
pub const NAME: &str = "single-declaration";

/// Reports every class or interface after the first one in a file.
#[derive(Debug, Clone, Default)]
pub struct SingleDeclaration {
    /// Names allowed as additional declarations.
    pub excluder: ClassExcluder,
}

impl SingleDeclaration {
    /// Creates a new rule with the default exclusions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the class exclusions.
    #[must_use]
    pub fn excluder(mut self, excluder: ClassExcluder) -> Self {
        self.excluder = excluder;
        self
    }
}

impl Rule for SingleDeclaration {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Allows only one class or interface per file"
    }

    fn trigger_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::Class, TokenKind::Interface]
    }

    fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
        let tokens = ctx.tokens;
        if declared_name(tokens, index).is_none() {
            return Vec::new();
        }

        let kinds = &[TokenKind::Class, TokenKind::Interface];
        let mut from = index + 1;
        while let Some(next) = tokens.find_next(kinds, from, None) {
            if let Some(name) = declared_name(tokens, next) {
                if self.excluder.is_excluded(&tokens[name].text) {
                    return Vec::new();
                }
                return vec![self.violation_at(
                    ctx,
                    next,
                    Severity::Error,
                    "Only one interface or class is allowed in a file",
                )];
            }
            from = next + 1;
        }
        Vec::new()
    }
}
