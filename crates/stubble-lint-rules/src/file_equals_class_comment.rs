//! Rule requiring the class doc block to repeat the file doc block.
//!
//! Every line of the file-level block must also appear in the class block.
//! `@author` and `@version` lines are not compared. The comparison runs in
//! one direction only: the class block may carry extra lines.

use stubble_lint_core::{FileContext, Rule, Severity, TokenKind, Violation};

/// Rule code for file-equals-class-comment.
pub const CODE: &str = "SL015";

/// Rule name for file-equals-class-comment.
pub const NAME: &str = "file-equals-class-comment";

const EXCLUDED_TAGS: &[&str] = &["@author", "@version"];

/// Compares the file doc block with the class doc block.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileEqualsClassComment;

impl FileEqualsClassComment {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for FileEqualsClassComment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires the class doc block to repeat the file doc block"
    }

    fn trigger_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::Class]
    }

    fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
        if ctx.file_stem() == Some("stubClassLoader") {
            return Vec::new();
        }

        let mut file_lines: Vec<&str> = Vec::new();
        let mut class_lines: Vec<&str> = Vec::new();

        for token in &ctx.tokens.tokens()[..index] {
            if !token.is(TokenKind::DocComment) {
                continue;
            }
            let line = token.text.trim();
            let tag = line.get(2..).unwrap_or_default();
            if EXCLUDED_TAGS.iter().any(|t| tag.starts_with(t)) {
                continue;
            }
            if file_lines.last().map_or(true, |last| *last != "*/") {
                file_lines.push(line);
            } else {
                class_lines.push(line);
            }
        }

        file_lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !class_lines.contains(line))
            .map(|(k, _)| {
                self.violation_at(
                    ctx,
                    index,
                    Severity::Error,
                    format!("File and class doc block differ in line {k}"),
                )
            })
            .collect()
    }
}
