//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::token::TokenKind;
use crate::types::{Severity, Violation};

/// A token-triggered lint rule.
///
/// A rule registers the token kinds it listens to. The analyzer walks each
/// token stream and calls [`check`](Rule::check) once per matching token,
/// passing the index of the trigger. Rules hold no mutable state; every
/// invocation derives what it needs from the stream.
///
/// # Example
///
/// ```ignore
/// use stubble_lint_core::{FileContext, Rule, TokenKind, Violation};
///
/// pub struct SpaceAfterCast;
///
/// impl Rule for SpaceAfterCast {
///     fn name(&self) -> &'static str { "space-after-cast" }
///     fn code(&self) -> &'static str { "SL011" }
///     fn trigger_kinds(&self) -> &'static [TokenKind] { &[TokenKind::Cast] }
///
///     fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
///         // inspect ctx.tokens around `index`
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "switch-declaration").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SL003").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Token kinds that trigger this rule.
    fn trigger_kinds(&self) -> &'static [TokenKind];

    /// Checks the token at `index` and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The source unit being checked
    /// * `index` - Index of the trigger token in `ctx.tokens`
    fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation>;

    /// Builds a violation of this rule at the given token.
    fn violation_at(
        &self,
        ctx: &FileContext,
        index: usize,
        severity: Severity,
        message: impl Into<String>,
    ) -> Violation
    where
        Self: Sized,
    {
        Violation::new(
            self.code(),
            self.name(),
            severity,
            ctx.location(index),
            message,
        )
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{CommentParseError, CommentParser, DocComment};
    use crate::token::TokenStream;
    use std::path::Path;

    struct NoParser;

    impl CommentParser for NoParser {
        fn parse(&self, _raw: &str) -> Result<DocComment, CommentParseError> {
            Ok(DocComment::default())
        }
    }

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }
        fn trigger_kinds(&self) -> &'static [TokenKind] {
            &[TokenKind::Cast]
        }

        fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
            vec![self.violation_at(ctx, index, self.default_severity(), "Test violation")]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
        assert_eq!(rule.trigger_kinds(), &[TokenKind::Cast]);
    }

    #[test]
    fn test_violation_at_uses_token_position() {
        let mut b = TokenStream::builder();
        b.push(TokenKind::Whitespace, "\n");
        b.push(TokenKind::Cast, "(int)");
        let tokens = b.finish();
        let ctx = FileContext::new(Path::new("Foo.php"), &tokens, &NoParser);

        let violations = TestRule.check(&ctx, 1);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, "TEST001");
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(violations[0].location.token, 1);
    }
}
