//! Rule to forbid whitespace at the end of a line.
//!
//! Lines consisting of whitespace only are left alone, and so are Windows
//! line breaks. In doc comments a space right after the leading `*` is
//! accepted, so an empty ` * ` line passes.

use stubble_lint_core::{FileContext, Rule, Severity, TokenKind, Violation};

/// Rule code for trailing-whitespace.
pub const CODE: &str = "SL010";

/// Rule name for trailing-whitespace.
pub const NAME: &str = "trailing-whitespace";

const MESSAGE: &str = "Trailing Whitespace at the end of line is not allowed";

/// Forbids trailing whitespace in code, comments and doc comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingWhitespace;

impl TrailingWhitespace {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for TrailingWhitespace {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids whitespace at the end of a line"
    }

    fn trigger_kinds(&self) -> &'static [TokenKind] {
        &[
            TokenKind::Whitespace,
            TokenKind::Comment,
            TokenKind::DocComment,
        ]
    }

    fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
        let tokens = ctx.tokens;
        let token = &tokens[index];
        let line = token.text.trim_end_matches(['\r', '\n']);

        let trailing = match token.kind {
            TokenKind::DocComment => {
                let body = line.trim_end_matches(' ');
                body.len() < line.len() && !body.is_empty() && !body.ends_with('*')
            }
            TokenKind::Comment => line.ends_with(' '),
            TokenKind::Whitespace => {
                !token.text.contains("\r\n")
                    && token.text.find('\n').is_some_and(|pos| pos > 0)
                    && index > 0
                    && tokens[index - 1].line == token.line
            }
            _ => false,
        };

        if trailing {
            vec![self.violation_at(ctx, index, Severity::Error, MESSAGE)]
        } else {
            Vec::new()
        }
    }
}
