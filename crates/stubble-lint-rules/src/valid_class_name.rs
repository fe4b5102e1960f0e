//! Rule enforcing camel-caps class and interface names.
//!
//! Names start with a capital letter, except for the `stub` and `vfs`
//! prefixes, and contain only letters and digits. Two capitals in a row
//! (`HTTPRequest`) are legal but warned about.

use crate::naming::{declaration_type, declared_name};
use stubble_lint_core::{FileContext, Rule, Severity, TokenKind, Violation};

/// Rule code for valid-class-name.
pub const CODE: &str = "SL013";

/// Rule name for valid-class-name.
pub const NAME: &str = "valid-class-name";

/// Checks the spelling of declared class and interface names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidClassName;

impl ValidClassName {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ValidClassName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires camel-caps class and interface names"
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
        let kind = declaration_type(&tokens[index].text);

        let prefixed = name.starts_with("stub") || name.starts_with("vfs");
        let (severity, problem) =
            if !prefixed && !name.starts_with(|c: char| c.is_ascii_uppercase()) {
                (Severity::Error, "does not start with a capital letter")
            } else if name.chars().skip(1).any(|c| !c.is_ascii_alphanumeric()) {
                (Severity::Error, "is not in camel caps format")
            } else if has_two_following_capitals(name) {
                (Severity::Warning, "contains two following capital letters")
            } else {
                return Vec::new();
            };

        vec![self.violation_at(ctx, index, severity, format!("{kind} \"{name}\" {problem}"))]
    }
}

/// The first character counts as a capital.
fn has_two_following_capitals(name: &str) -> bool {
    let mut last_caps = true;
    for c in name.chars().skip(1) {
        let caps = c.is_ascii_uppercase();
        if caps && last_caps {
            return true;
        }
        last_caps = caps;
    }
    false
}
