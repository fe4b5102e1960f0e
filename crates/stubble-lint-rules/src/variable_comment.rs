//! Rule requiring a doc comment on every member variable.
//!
//! Members are the variables declared directly in a class or interface
//! body after a modifier keyword (`public`, `static`, `var`, ...).
//! Parameters and variables inside method bodies are not members.

use crate::doc_block::{self, schema::DocSchema};
use stubble_lint_core::{FileContext, Rule, Severity, TokenKind, Violation};

/// Rule code for variable-comment.
pub const CODE: &str = "SL002";

/// Rule name for variable-comment.
pub const NAME: &str = "variable-comment";

/// Checks the documentation block of each member variable.
#[derive(Debug, Clone)]
pub struct VariableComment {
    /// Expected shape of the block.
    pub schema: DocSchema,
}

impl Default for VariableComment {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableComment {
    /// Creates a new rule with the standard variable schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: DocSchema::variable(),
        }
    }

    /// Returns true if the variable at `index` is a member declaration.
    fn is_member(ctx: &FileContext, index: usize) -> bool {
        let tokens = ctx.tokens;
        let in_type_body = tokens
            .innermost_condition(index)
            .is_some_and(|owner| matches!(tokens[owner].kind, TokenKind::Class | TokenKind::Interface));
        if !in_type_body || index == 0 {
            return false;
        }

        let skip = &[
            TokenKind::Whitespace,
            TokenKind::Comment,
            TokenKind::DocComment,
            TokenKind::Identifier,
        ];
        let Some(prev) = tokens.find_previous_excluding(skip, index - 1, 0) else {
            return false;
        };
        match tokens[prev].kind {
            TokenKind::Keyword => true,
            TokenKind::Comma => Self::continues_declaration(ctx, prev),
            _ => false,
        }
    }

    /// Returns true if the comma at `comma` separates variables of one
    /// member declaration, as in `protected $a, $b;`.
    fn continues_declaration(ctx: &FileContext, comma: usize) -> bool {
        let tokens = ctx.tokens;
        let statement = tokens
            .find_previous(
                &[TokenKind::Semicolon, TokenKind::OpenBrace, TokenKind::CloseBrace],
                comma,
                0,
            )
            .map_or(0, |i| i + 1);
        if tokens
            .find_next(&[TokenKind::Function], statement, Some(comma))
            .is_some()
        {
            return false;
        }

        let trivia = &[TokenKind::Whitespace, TokenKind::Comment, TokenKind::DocComment];
        tokens
            .find_next_excluding(trivia, statement, Some(comma))
            .is_some_and(|first| tokens[first].is(TokenKind::Keyword))
    }
}

impl Rule for VariableComment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a doc comment on member variables"
    }

    fn trigger_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::Variable]
    }

    fn check(&self, ctx: &FileContext, index: usize) -> Vec<Violation> {
        if !Self::is_member(ctx, index) {
            return Vec::new();
        }

        let tokens = ctx.tokens;
        let missing = || {
            vec![self.violation_at(ctx, index, Severity::Error, "Missing variable doc comment")]
        };

        let Some(comment_end) =
            tokens.find_previous(&[TokenKind::Comment, TokenKind::DocComment], index - 1, 0)
        else {
            return missing();
        };

        // the comment documents whatever declaration or statement comes next
        let boundaries = &[
            TokenKind::Variable,
            TokenKind::Class,
            TokenKind::Interface,
            TokenKind::Semicolon,
            TokenKind::OpenBrace,
            TokenKind::CloseBrace,
        ];
        if tokens.find_next(boundaries, comment_end + 1, None) != Some(index) {
            return missing();
        }

        if tokens[comment_end].is(TokenKind::Comment) {
            return vec![self.violation_at(
                ctx,
                index,
                Severity::Error,
                "You must use \"/**\" style comments for a variable comment",
            )];
        }

        let start = tokens
            .find_previous_excluding(&[TokenKind::DocComment], comment_end, 0)
            .map_or(0, |i| i + 1);

        doc_block::check_span(self, ctx, start, comment_end, &self.schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{messages, run};

    fn check_code(source: &str) -> Vec<Violation> {
        run(&VariableComment::new(), "Foo.php", source)
    }

    #[test]
    fn test_accepts_documented_member() {
        let violations = check_code(
            "<?php
class Foo
{
    /**
     * The name.
     *
     * @var  string
     */
    protected static $name;
}
",
        );
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_detects_missing_comment() {
        let violations = check_code(
            "<?php
class Foo
{
    public $name;
}
",
        );
        assert_eq!(messages(&violations), ["Missing variable doc comment"]);
        assert_eq!(violations[0].code, CODE);
        assert_eq!(violations[0].location.line, 4);
        assert_eq!(violations[0].location.column, 12);
    }

    #[test]
    fn test_rejects_plain_comment() {
        let violations = check_code(
            "<?php
class Foo
{
    // The name.
    public $name;
}
",
        );
        assert_eq!(
            messages(&violations),
            ["You must use \"/**\" style comments for a variable comment"]
        );
    }

    #[test]
    fn test_comment_of_previous_member_does_not_count() {
        let violations = check_code(
            "<?php
class Foo
{
    /**
     * The first.
     *
     * @var  int
     */
    public $a;
    public $b;
}
",
        );
        assert_eq!(messages(&violations), ["Missing variable doc comment"]);
        assert_eq!(violations[0].location.line, 10);
    }

    #[test]
    fn test_each_variable_of_a_declaration_needs_a_comment() {
        let violations = check_code(
            "<?php
class Foo
{
    /**
     * The name.
     *
     * @var  string
     */
    protected $a, $b;
}
",
        );
        assert_eq!(messages(&violations), ["Missing variable doc comment"]);
        assert_eq!(violations[0].location.line, 9);
        assert_eq!(violations[0].location.column, 19);
    }

    #[test]
    fn test_ignores_parameters_and_locals() {
        let violations = check_code(
            "<?php
class Foo
{
    /**
     * Does it.
     */
    public function bar(Baz $a, $b)
    {
        $c = $a;
        // local
        $d = $b;
    }
}

$e = 1;
",
        );
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_checks_block_against_variable_schema() {
        let violations = check_code(
            "<?php
class Foo
{
    /**
     * The name.
     *
     * @see  Bar
     * @var  string
     */
    public $name;

    /**
     * The size.
     *
     * @var int
     */
    public $size;
}
",
        );
        let found: Vec<(usize, &str)> = violations
            .iter()
            .map(|v| (v.location.line, v.message.as_str()))
            .collect();
        assert_eq!(
            found,
            [
                (8, "The @var tag must be the first tag in a variable comment"),
                (15, "@var tag indented incorrectly. Expected 2 spaces but found 1."),
            ]
        );
    }

    #[test]
    fn test_unknown_tag_is_a_warning() {
        let violations = check_code(
            "<?php
class Foo
{
    /**
     * The name.
     *
     * @var     string
     * @author  Frank
     */
    public $name;
}
",
        );
        assert_eq!(
            messages(&violations),
            ["@author tag is not allowed in variable comment"]
        );
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn test_missing_short_description() {
        let violations = check_code(
            "<?php
interface Foo
{
    /**
     * @var  string
     */
    public $name;
}
",
        );
        assert_eq!(
            messages(&violations),
            ["Missing short description in variable doc comment"]
        );
        assert_eq!(violations[0].location.line, 4);
    }
}
