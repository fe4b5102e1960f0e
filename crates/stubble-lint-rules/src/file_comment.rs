//! Rule requiring a well-formed file-level doc comment.
//!
//! The first open tag of a unit must be followed by a `/** */` block that
//! documents the file. A block separated from the next class or function
//! by a single newline documents that declaration instead, and the file
//! counts as undocumented.
//!
//! # Configuration
//!
//! - `revision_marker`: substring a `@version` tag must carry (default: `$Id`)

use crate::doc_block::{self, schema::DocSchema};
use stubble_lint_core::{FileContext, Rule, Severity, TokenKind, Violation};

/// Rule code for file-comment.
pub const CODE: &str = "SL001";

/// Rule name for file-comment.
pub const NAME: &str = "file-comment";

/// Checks the documentation block at the top of each source unit.
#[derive(Debug, Clone)]
pub struct FileComment {
    /// Expected shape of the block.
    pub schema: DocSchema,
}

impl Default for FileComment {
    fn default() -> Self {
        Self::new()
    }
}

impl FileComment {
    /// Creates a new rule with the standard file schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: DocSchema::file(),
        }
    }

    /// Sets the `@version` revision marker.
    #[must_use]
    pub fn revision_marker(mut self, marker: impl Into<String>) -> Self {
        self.schema = self.schema.with_revision_marker(marker);
        self
    }

    fn missing(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
        vec![self.violation_at(ctx, index, Severity::Error, "Missing file doc comment")]
    }
}

impl Rule for FileComment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a file doc comment after the first open tag"
    }

    fn trigger_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::OpenTag]
    }

    fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
        let tokens = ctx.tokens;

        if index > 0 && tokens.find_previous(&[TokenKind::OpenTag], index - 1, 0).is_some() {
            return Vec::new();
        }

        let ws = &[TokenKind::Whitespace];
        let mut comment = tokens.find_next_excluding(ws, index + 1, None);

        // editor modelines may sit above the doc block
        if let Some(c) = comment {
            if tokens[c].is(TokenKind::Comment) && tokens[c].text.contains("vim:") {
                comment = tokens.find_next_excluding(ws, c + 1, None);
            }
        }

        let Some(start) = comment else {
            return self.missing(ctx, index + 1);
        };

        match tokens[start].kind {
            TokenKind::CloseTag => return Vec::new(),
            TokenKind::Comment => {
                return vec![self.violation_at(
                    ctx,
                    index + 1,
                    Severity::Error,
                    "You must use \"/**\" style comments for a file comment",
                )];
            }
            TokenKind::DocComment => {}
            _ => return self.missing(ctx, index + 1),
        }

        let end = tokens
            .find_next_excluding(&[TokenKind::DocComment], start, None)
            .map_or(tokens.len() - 1, |i| i - 1);

        let declarations = &[
            TokenKind::Abstract,
            TokenKind::Class,
            TokenKind::Function,
            TokenKind::DocComment,
        ];
        if let Some(next) = tokens.find_next(declarations, end + 1, None) {
            if !tokens[next].is(TokenKind::DocComment) {
                let newlines = (end + 1..next)
                    .filter(|&i| {
                        tokens[i].is(TokenKind::Whitespace)
                            && matches!(tokens[i].text.as_str(), "\n" | "\r\n")
                    })
                    .count();
                if newlines == 1 {
                    return self.missing(ctx, index + 1);
                }
            }
        }

        doc_block::check_span(self, ctx, start, end, &self.schema)
    }
}
