//! Rule requiring a space after type casts.

use stubble_lint_core::{FileContext, Rule, Severity, TokenKind, Violation};

/// Rule code for space-after-cast.
pub const CODE: &str = "SL011";

/// Rule name for space-after-cast.
pub const NAME: &str = "space-after-cast";

/// Requires whitespace after `(int)`, `(string)` and the other casts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceAfterCast;

impl SpaceAfterCast {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for SpaceAfterCast {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a space after type casts"
    }

    fn trigger_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::Cast]
    }

    fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
        let spaced = ctx
            .tokens
            .get(index + 1)
            .is_some_and(|t| t.is(TokenKind::Whitespace));
        if spaced {
            return Vec::new();
        }
        vec![self.violation_at(
            ctx,
            index,
            Severity::Error,
            "A cast statement must be followed by a space",
        )]
    }
}
