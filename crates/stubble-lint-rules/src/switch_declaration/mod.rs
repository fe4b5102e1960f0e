//! Rule enforcing the layout and completeness of `switch` statements.
//!
//! Every branch must end in an owned `break`, a `return`, a `throw`, or a
//! comment starting with the fallthrough marker. Labels sit one indent
//! level below the keyword and breaks one level below the labels. Blank
//! lines are required after terminators and forbidden after labels.
//!
//! # Configuration
//!
//! - `indent`: spaces per indent level (default: 4)
//! - `fallthrough_marker`: comment prefix marking an intentional
//!   fallthrough (default: `// break omitted`)

pub mod construct;

use construct::{Branch, DispatchConstruct, Terminator};
use stubble_lint_core::{FileContext, Rule, Severity, TokenKind, TokenStream, Violation};
use tracing::debug;

/// Rule code for switch-declaration.
pub const CODE: &str = "SL003";

/// Rule name for switch-declaration.
pub const NAME: &str = "switch-declaration";

/// Default fallthrough marker.
pub const FALLTHROUGH_MARKER: &str = "// break omitted";

/// Checks `switch` statements.
#[derive(Debug, Clone)]
pub struct SwitchDeclaration {
    /// Spaces per indent level.
    pub indent: usize,
    /// Comment prefix marking an intentional fallthrough.
    pub fallthrough_marker: String,
}

impl Default for SwitchDeclaration {
    fn default() -> Self {
        Self::new()
    }
}

impl SwitchDeclaration {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            indent: 4,
            fallthrough_marker: FALLTHROUGH_MARKER.to_string(),
        }
    }

    /// Sets the indent width.
    #[must_use]
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the fallthrough marker.
    #[must_use]
    pub fn fallthrough_marker(mut self, marker: impl Into<String>) -> Self {
        self.fallthrough_marker = marker.into();
        self
    }
}

impl Rule for SwitchDeclaration {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces layout and terminators of switch statements"
    }

    fn trigger_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::Switch]
    }

    fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
        let construct =
            match DispatchConstruct::extract(ctx.tokens, index, &self.fallthrough_marker) {
                Ok(construct) => construct,
                Err(err) => {
                    debug!("Skipping switch at token {}: {}", index, err);
                    return vec![self.violation_at(ctx, index, Severity::Error, err.to_string())];
                }
            };

        let mut checker = Checker {
            rule: self,
            ctx: *ctx,
            tokens: ctx.tokens,
            construct: &construct,
            label_column: ctx.tokens[index].column + self.indent,
            violations: Vec::new(),
        };
        checker.run();
        checker.violations
    }
}

struct Checker<'a> {
    rule: &'a SwitchDeclaration,
    ctx: FileContext<'a>,
    tokens: &'a TokenStream,
    construct: &'a DispatchConstruct,
    label_column: usize,
    violations: Vec<Violation>,
}

impl Checker<'_> {
    fn error(&mut self, index: usize, message: impl Into<String>) {
        let violation = self
            .rule
            .violation_at(&self.ctx, index, Severity::Error, message);
        self.violations.push(violation);
    }

    fn run(&mut self) {
        let construct = self.construct;

        if construct.branches.is_empty() {
            self.error(
                construct.keyword,
                "All SWITCH statements must contain at least one CASE statement",
            );
        }

        for branch in &construct.branches {
            self.check_case(branch);
        }

        match &construct.default_branch {
            Some(default) => self.check_default(default),
            None => self.error(
                construct.keyword,
                "All SWITCH statements must contain a DEFAULT case",
            ),
        }

        let closer = construct.closer;
        if self.tokens[closer].column != self.tokens[construct.keyword].column {
            self.error(
                closer,
                "Closing brace of SWITCH statement must be aligned with SWITCH keyword",
            );
        }
    }

    fn check_case(&mut self, branch: &Branch) {
        let tokens = self.tokens;
        let label = branch.trigger;

        self.check_label(branch, "CASE");

        let spaced = tokens
            .get(label + 1)
            .is_some_and(|t| t.is(TokenKind::Whitespace) && t.text == " ");
        if !spaced {
            self.error(label, "CASE keyword must be followed by a single space");
        }

        if !branch.stacked {
            match branch.terminator {
                Terminator::Break(b) => self.check_case_break(branch, b),
                Terminator::None => self.error(
                    label,
                    format!(
                        "CASE statement must have a BREAK, THROW or RETURN statement or the following comment: {}",
                        self.rule.fallthrough_marker
                    ),
                ),
                Terminator::Return(t) | Terminator::Throw(t) => {
                    let end = tokens
                        .find_next(&[TokenKind::Semicolon], t, Some(branch.body_end))
                        .unwrap_or(t);
                    self.check_blank_after_terminator(t, end);
                }
                Terminator::FallthroughComment(t) => self.check_blank_after_terminator(t, t),
            }
        }

        if !self.content_on_next_line(branch) {
            self.error(label, "Blank lines are not allowed after CASE statements");
        }
    }

    fn check_default(&mut self, branch: &Branch) {
        let tokens = self.tokens;
        let label = branch.trigger;

        self.check_label(branch, "DEFAULT");

        if let Terminator::Break(b) = branch.terminator {
            self.check_break_indent(b);

            let next_line = self
                .next_content(b)
                .map_or(tokens[self.construct.closer].line, |i| tokens[i].line);
            if next_line != tokens[b].line + 1 {
                self.error(
                    b,
                    "Blank lines are not allowed after the DEFAULT case's BREAK statement",
                );
            }
        }

        let bound = self.content_bound(branch);
        let has_content = tokens
            .find_next_excluding(&[TokenKind::Whitespace], branch.body_start, Some(bound))
            .is_some();
        if !has_content {
            self.error(label, "Comment required for empty DEFAULT case");
        }

        if !self.content_on_next_line(branch) {
            self.error(label, "Blank lines are not allowed after DEFAULT statements");
        }
    }

    /// Casing, column and colon checks shared by both label kinds.
    fn check_label(&mut self, branch: &Branch, name: &str) {
        let tokens = self.tokens;
        let label = branch.trigger;
        let text = tokens[label].text.as_str();

        if text != text.to_lowercase() {
            self.error(
                label,
                format!(
                    "{name} keyword must be lowercase; expected \"{}\" but found \"{text}\"",
                    text.to_lowercase()
                ),
            );
        }

        self.check_label_column(label, name);
        self.check_colon(branch, name);
    }

    fn check_label_column(&mut self, label: usize, name: &str) {
        if self.tokens[label].column != self.label_column {
            self.error(
                label,
                format!(
                    "{name} keyword must be indented {} spaces from SWITCH keyword",
                    self.rule.indent
                ),
            );
        }
    }

    fn check_colon(&mut self, branch: &Branch, name: &str) {
        if self.tokens[branch.opener - 1].is(TokenKind::Whitespace) {
            self.error(
                branch.trigger,
                format!("There must be no space before the colon in a {name} statement"),
            );
        }
    }

    fn check_break_indent(&mut self, b: usize) {
        if self.tokens[b].column != self.label_column + self.rule.indent {
            self.error(
                b,
                format!(
                    "BREAK statement must be indented {} spaces from CASE keyword",
                    self.rule.indent
                ),
            );
        }
    }

    fn check_case_break(&mut self, branch: &Branch, b: usize) {
        let tokens = self.tokens;
        let keyword = self.construct.keyword;

        self.check_break_indent(b);

        let has_code = (branch.body_start..b).any(|i| !tokens[i].is_trivia());
        if !has_code {
            self.error(branch.trigger, "Empty CASE statements are not allowed");
        }

        let prev_line = tokens
            .find_previous_excluding(&[TokenKind::Whitespace], b - 1, keyword + 1)
            .map_or(0, |i| tokens[i].line);
        if prev_line + 1 != tokens[b].line {
            self.error(b, "Blank lines are not allowed before BREAK statements");
        }

        if let Some(next) = self.next_content(b) {
            if tokens[next].line != tokens[b].line + 2 {
                self.error(b, "BREAK statements must be followed by a single blank line");
            }
        }
    }

    /// `terminator` ends at `end`; the following content must sit after
    /// exactly one blank line.
    fn check_blank_after_terminator(&mut self, terminator: usize, end: usize) {
        let tokens = self.tokens;
        let next = tokens.find_next_excluding(
            &[TokenKind::Whitespace],
            end + 1,
            Some(self.construct.closer),
        );
        if let Some(next) = next {
            if tokens[next].line != tokens[terminator].line + 2 {
                self.error(
                    terminator,
                    "THROW/RETURN/COMMENT statement must be followed by a single blank line",
                );
            }
        }
    }

    /// First non-whitespace token after the statement of `b`, before the
    /// closing brace.
    fn next_content(&self, b: usize) -> Option<usize> {
        let closer = self.construct.closer;
        let semicolon = self
            .tokens
            .find_next(&[TokenKind::Semicolon], b, Some(closer))
            .unwrap_or(b);
        self.tokens
            .find_next_excluding(&[TokenKind::Whitespace], semicolon + 1, Some(closer))
    }

    fn content_bound(&self, branch: &Branch) -> usize {
        match branch.terminator {
            Terminator::Break(b) => b,
            _ => branch.body_end,
        }
    }

    /// The body starts on the line right after the label.
    fn content_on_next_line(&self, branch: &Branch) -> bool {
        let tokens = self.tokens;
        let bound = self.content_bound(branch);
        let first = tokens
            .find_next_excluding(&[TokenKind::Whitespace], branch.body_start, Some(bound))
            .unwrap_or(bound);
        tokens[first].line == tokens[branch.trigger].line + 1
    }
}
