//! Rule requiring the class name to match the file name.
//!
//! # Configuration
//!
//! - `excluded_classes`: glob patterns of class names exempt from the check

use crate::naming::{declaration_type, declared_name, ClassExcluder};
use stubble_lint_core::{FileContext, Rule, Severity, TokenKind, Violation};

/// Rule code for class-file-name.
pub const CODE: &str = "SL014";

/// Rule name for class-file-name.
pub const NAME: &str = "class-file-name";

/// Checks that `Foo.php` declares `Foo`.
#[derive(Debug, Clone, Default)]
pub struct ClassFileName {
    /// Names exempt from the check.
    pub excluder: ClassExcluder,
}

impl ClassFileName {
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

impl Rule for ClassFileName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires class and interface names to match the file name"
    }

    fn trigger_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::Class, TokenKind::Interface]
    }

    fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
        let tokens = ctx.tokens;
        let Some(name_index) = declared_name(tokens, index) else {
            return Vec::new();
        };
        let name = tokens[name_index].text.as_str();
        let stem = ctx.file_stem().unwrap_or_default();

        if name == stem || self.excluder.is_excluded(name) {
            return Vec::new();
        }

        let keyword = tokens[index].text.as_str();
        vec![self.violation_at(
            ctx,
            index,
            Severity::Error,
            format!(
                "{} name ({name}) doesn't match filename. Expected \"{keyword} {stem}\".",
                declaration_type(keyword)
            ),
        )]
    }
}
