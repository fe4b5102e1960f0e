//! Documentation block validation.
//!
//! [`validate`] checks a parsed [`DocComment`] against a [`DocSchema`]:
//! description layout first, then every schema tag in schema order, then
//! tag indentation. It is a pure function; the comment rules translate its
//! [`Finding`]s into violations at token positions.

mod content;
pub mod schema;

use schema::{DocSchema, Indentation, Placement, ShortDescription, UnknownTags};
use stubble_lint_core::{DocComment, FileContext, Rule, Severity, TagOccurrence, Violation};
use tracing::debug;

/// Where inside the comment span a finding belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPosition {
    /// The `/**` line.
    Start,
    /// A line offset from the `/**` line.
    Line(usize),
    /// The `*/` line.
    End,
}

/// One problem found in a documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Severity of the problem.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Position within the comment span.
    pub position: CommentPosition,
}

impl Finding {
    fn error(position: CommentPosition, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            position,
        }
    }

    fn warning(position: CommentPosition, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            position,
        }
    }
}

/// Validates `doc` against `schema`.
///
/// Findings come out in the order the checks run. An empty comment, a
/// missing required short description and an unknown tag each end the
/// validation early.
#[must_use]
pub fn validate(doc: &DocComment, schema: &DocSchema) -> Vec<Finding> {
    let mut findings = Vec::new();
    let label = schema.label;

    if doc.is_empty() {
        findings.push(Finding::error(
            CommentPosition::Start,
            format!("{} doc comment is empty", schema.title()),
        ));
        return findings;
    }

    let mut short = doc.short_description.as_str();
    let single_line = schema.short_description == ShortDescription::RequiredSingleLine;

    if single_line && short.trim().is_empty() {
        findings.push(Finding::error(
            CommentPosition::Start,
            format!("Missing short description in {label} doc comment"),
        ));
        return findings;
    }

    let leading = short.chars().take_while(|&c| c == '\n').count();
    if !short.is_empty() && leading > 0 {
        let word = if leading > 1 { "newlines" } else { "newline" };
        findings.push(Finding::error(
            CommentPosition::Line(1),
            format!("Extra {word} found before {label} comment short description"),
        ));
    }

    let mut newline_count = short.matches('\n').count() + 1;
    let long = doc.long_description.as_str();

    if !long.is_empty() {
        if doc.newlines_between != 2 {
            findings.push(Finding::error(
                CommentPosition::Line(newline_count + 1),
                format!("There must be exactly one blank line between descriptions in {label} comment"),
            ));
        }
        newline_count += doc.newlines_between;
    }

    if !doc.tags.is_empty() && doc.newlines_before_tags != 2 {
        let mut offset = newline_count;
        if !long.is_empty() {
            offset = (offset + long.matches('\n').count() + 1)
                .saturating_sub(doc.newlines_before_tags);
        }
        findings.push(Finding::error(
            CommentPosition::Line(offset),
            format!("There must be exactly one blank line before the tags in {label} comment"),
        ));
        short = short.trim_end_matches(['\n', ' ']);
    }

    if single_line && short.trim().contains('\n') {
        findings.push(Finding::error(
            CommentPosition::Line(1),
            format!("{} comment short description must be on a single line", schema.title()),
        ));
    }

    if matches!(schema.unknown_tags, UnknownTags::Warn { .. }) {
        if let Some(tag) = doc.tags.iter().find(|t| !schema.accepts(&t.name)) {
            findings.push(Finding::warning(
                CommentPosition::Line(tag.line),
                format!("@{} tag is not allowed in {label} comment", tag.name),
            ));
            return findings;
        }
    }

    check_tags(doc, schema, &mut findings);
    findings
}

/// Runs the per-tag pass in schema order, then the indentation pass.
fn check_tags(doc: &DocComment, schema: &DocSchema, findings: &mut Vec<Finding>) {
    let label = schema.label;
    let mut order_index = 0;
    let mut longest = 0;
    let mut spacing: Vec<(&TagOccurrence, usize)> = Vec::new();

    for spec in &schema.tags {
        let positions = doc.positions_of(spec.name);
        let occurrences: Vec<&TagOccurrence> = doc.occurrences(spec.name).collect();

        let (Some(&first), Some(first_tag)) = (positions.first(), occurrences.first()) else {
            if spec.required {
                findings.push(Finding::error(
                    CommentPosition::End,
                    format!("Missing @{} tag in {label} comment", spec.name),
                ));
            }
            continue;
        };

        if spec.discouraged {
            findings.push(Finding::warning(
                CommentPosition::End,
                format!("The usage of the @{} in any comment is discouraged", spec.name),
            ));
            continue;
        }

        let first_line = CommentPosition::Line(first_tag.line);

        if positions.len() > 1 {
            if spec.allow_multiple {
                for (k, (&position, tag)) in positions.iter().zip(&occurrences).enumerate() {
                    if position != first + k {
                        findings.push(Finding::error(
                            CommentPosition::Line(tag.line),
                            format!("@{} tags must be grouped together", spec.name),
                        ));
                    }
                }
            } else if spec.placement == Placement::First {
                findings.push(Finding::error(
                    first_line,
                    format!("Only 1 @{} tag is allowed in {label} comment", spec.name),
                ));
                continue;
            } else {
                findings.push(Finding::error(
                    first_line,
                    format!("Only 1 @{} tag is allowed in a {label} comment", spec.name),
                ));
            }
        }

        match spec.placement {
            Placement::Ordered if first > order_index => order_index = first,
            Placement::Ordered => findings.push(Finding::error(
                first_line,
                format!(
                    "The @{} tag is in the wrong order; the tag {}",
                    spec.name, spec.order_text
                ),
            )),
            Placement::First => {
                if first != 1 {
                    findings.push(Finding::error(
                        first_line,
                        format!("The @{} tag must be the first tag in a {label} comment", spec.name),
                    ));
                }
                order_index = order_index.max(first);
            }
        }

        longest = longest.max(spec.name.len());
        // a single-valued tag is checked once, through its first occurrence
        let checked = if spec.allow_multiple { occurrences.len() } else { 1 };
        for tag in &occurrences[..checked] {
            if !tag.content.trim().is_empty() {
                spacing.push((tag, tag.spacing()));
            }
            if let Some(message) = content::check(tag, schema) {
                findings.push(Finding::error(CommentPosition::Line(tag.line), message));
            }
        }
    }

    for (tag, found) in spacing {
        let (expected, message) = match schema.indentation {
            Indentation::AlignToLongest { padding } => {
                (longest - tag.name.len() + padding, "tag comment indented incorrectly")
            }
            Indentation::Fixed(expected) => (expected, "tag indented incorrectly"),
        };
        if found != expected {
            findings.push(Finding::error(
                CommentPosition::Line(tag.line),
                format!(
                    "@{} {message}. Expected {expected} spaces but found {found}.",
                    tag.name
                ),
            ));
        }
    }
}

/// Parses the doc comment spanning tokens `start..=end` and validates it.
///
/// A parse error is reported once at the offending line and ends the check.
pub(crate) fn check_span<R: Rule>(
    rule: &R,
    ctx: &FileContext,
    start: usize,
    end: usize,
    schema: &DocSchema,
) -> Vec<Violation> {
    let raw = ctx.tokens.text_between(start, end);
    let doc = match ctx.comments.parse(&raw) {
        Ok(doc) => doc,
        Err(err) => {
            debug!("Doc comment at token {} failed to parse: {}", start, err);
            let index = (start + err.line).min(end);
            return vec![rule.violation_at(ctx, index, Severity::Error, err.message)];
        }
    };

    validate(&doc, schema)
        .into_iter()
        .map(|finding| {
            let index = match finding.position {
                CommentPosition::Start => start,
                CommentPosition::Line(offset) => (start + offset).min(end),
                CommentPosition::End => end,
            };
            rule.violation_at(ctx, index, finding.severity, finding.message)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::schema::TagSpec;
    use super::*;

    fn tag(name: &str, spaces: usize, content: &str, line: usize) -> TagOccurrence {
        TagOccurrence::new(name, " ".repeat(spaces), content, line)
    }

    fn messages(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.message.as_str()).collect()
    }

    fn file_block(tags: Vec<TagOccurrence>) -> DocComment {
        let mut doc = DocComment::new("Does X.").with_newlines_before_tags(2);
        doc.tags = tags;
        doc
    }

    #[test]
    fn test_empty_comment_short_circuits() {
        let findings = validate(&DocComment::default(), &DocSchema::file());
        assert_eq!(
            findings,
            vec![Finding::error(CommentPosition::Start, "File doc comment is empty")]
        );
    }

    #[test]
    fn test_package_without_name() {
        let doc = file_block(vec![tag("package", 0, "", 3)]);
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            findings,
            vec![Finding::error(
                CommentPosition::Line(3),
                "@package tag must contain a name"
            )]
        );
    }

    #[test]
    fn test_extra_newlines_before_short_description() {
        let schema = DocSchema::file();
        let block = |short: &str| {
            DocComment::new(short)
                .with_newlines_before_tags(2)
                .with_tag(tag("package", 2, "net", 4))
        };
        let one = validate(&block("\nShort."), &schema);
        assert_eq!(
            messages(&one),
            ["Extra newline found before file comment short description"]
        );
        assert_eq!(one[0].position, CommentPosition::Line(1));

        let two = validate(&block("\n\nShort."), &schema);
        assert_eq!(
            messages(&two),
            ["Extra newlines found before file comment short description"]
        );
    }

    #[test]
    fn test_blank_line_between_descriptions() {
        let doc = DocComment::new("Short.")
            .with_long(3, "Long.")
            .with_newlines_before_tags(2)
            .with_tag(tag("package", 2, "net", 6));
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            findings,
            vec![Finding::error(
                CommentPosition::Line(2),
                "There must be exactly one blank line between descriptions in file comment"
            )]
        );

        let doc = DocComment::new("Short.")
            .with_long(2, "Long.")
            .with_newlines_before_tags(2)
            .with_tag(tag("package", 2, "net", 5));
        assert!(validate(&doc, &DocSchema::file()).is_empty());
    }

    #[test]
    fn test_blank_line_before_tags() {
        let doc = DocComment::new("Short.")
            .with_newlines_before_tags(1)
            .with_tag(tag("package", 2, "net", 2));
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            findings,
            vec![Finding::error(
                CommentPosition::Line(1),
                "There must be exactly one blank line before the tags in file comment"
            )]
        );
    }

    #[test]
    fn test_blank_line_before_tags_after_long_description() {
        let doc = DocComment::new("Short.")
            .with_long(2, "Long\ntext")
            .with_newlines_before_tags(1)
            .with_tag(tag("package", 2, "net", 5));
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].position, CommentPosition::Line(4));
    }

    #[test]
    fn test_missing_required_tag_reported_once() {
        let doc = file_block(vec![tag("link", 2, "http://example.org", 3)]);
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            findings,
            vec![Finding::error(
                CommentPosition::End,
                "Missing @package tag in file comment"
            )]
        );
    }

    #[test]
    fn test_discouraged_tag_warns_and_skips_checks() {
        let doc = file_block(vec![
            tag("author", 7, "Frank", 3),
            tag("package", 2, "net", 4),
            tag("author", 1, "Richard", 5),
        ]);
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            findings,
            vec![Finding::warning(
                CommentPosition::End,
                "The usage of the @author in any comment is discouraged"
            )]
        );
    }

    #[test]
    fn test_duplicate_single_tag() {
        let doc = file_block(vec![tag("package", 2, "net", 3), tag("package", 2, "io", 4)]);
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            findings,
            vec![Finding::error(
                CommentPosition::Line(3),
                "Only 1 @package tag is allowed in a file comment"
            )]
        );
    }

    #[test]
    fn test_duplicate_single_tag_content_checked_once() {
        let doc = file_block(vec![tag("package", 0, "", 3), tag("package", 0, "", 4)]);
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            findings,
            vec![
                Finding::error(
                    CommentPosition::Line(3),
                    "Only 1 @package tag is allowed in a file comment"
                ),
                Finding::error(CommentPosition::Line(3), "@package tag must contain a name"),
            ]
        );
    }

    #[test]
    fn test_duplicate_var_tag_ends_tag_checks() {
        let doc = DocComment::new("The name.")
            .with_newlines_before_tags(2)
            .with_tag(tag("var", 1, "", 3))
            .with_tag(tag("var", 5, "int", 4));
        assert_eq!(
            validate(&doc, &DocSchema::variable()),
            vec![Finding::error(
                CommentPosition::Line(3),
                "Only 1 @var tag is allowed in variable comment"
            )]
        );
    }

    #[test]
    fn test_multiple_tags_must_be_grouped() {
        let doc = file_block(vec![
            tag("package", 2, "net", 3),
            tag("link", 5, "http://a", 4),
            tag("see", 6, "Foo", 5),
            tag("link", 5, "http://b", 6),
        ]);
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            findings,
            vec![Finding::error(
                CommentPosition::Line(6),
                "@link tags must be grouped together"
            )]
        );
    }

    #[test]
    fn test_wrong_order_uses_order_text() {
        let doc = file_block(vec![tag("link", 5, "http://a", 3), tag("package", 2, "net", 4)]);
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            findings,
            vec![Finding::error(
                CommentPosition::Line(3),
                "The @link tag is in the wrong order; the tag follows @link"
            )]
        );
    }

    #[test]
    fn test_author_before_package_in_schema_order() {
        let schema = DocSchema {
            tags: vec![
                TagSpec::new("author", "precedes @package").multiple(),
                TagSpec::new("package", "follows @author").required(),
            ],
            ..DocSchema::file()
        };
        let doc = file_block(vec![tag("author", 3, "Frank", 3), tag("package", 2, "net", 4)]);
        assert!(validate(&doc, &schema).is_empty());
    }

    #[test]
    fn test_ordering_is_schema_relative() {
        let specs = |names: [&'static str; 3]| DocSchema {
            tags: names.into_iter().map(|n| TagSpec::new(n, "is out of place")).collect(),
            ..DocSchema::file()
        };
        // source order: beta, alpha, gamma
        let doc = file_block(vec![
            tag("beta", 3, "b", 3),
            tag("alpha", 2, "a", 4),
            tag("gamma", 2, "c", 5),
        ]);

        let flagged = |schema: &DocSchema| -> Vec<String> {
            validate(&doc, schema)
                .into_iter()
                .filter(|f| f.message.contains("wrong order"))
                .map(|f| f.message)
                .collect()
        };

        assert_eq!(
            flagged(&specs(["alpha", "beta", "gamma"])),
            ["The @beta tag is in the wrong order; the tag is out of place"]
        );
        assert_eq!(
            flagged(&specs(["beta", "gamma", "alpha"])),
            ["The @alpha tag is in the wrong order; the tag is out of place"]
        );
        assert!(flagged(&specs(["beta", "alpha", "gamma"])).is_empty());
    }

    #[test]
    fn test_indentation_aligns_to_longest_tag() {
        // contents start at the same column: "@package  net" / "@see      Foo"
        let doc = file_block(vec![tag("package", 2, "net", 3), tag("see", 6, "Foo", 4)]);
        assert!(validate(&doc, &DocSchema::file()).is_empty());

        let doc = file_block(vec![tag("package", 2, "net", 3), tag("see", 2, "Foo", 4)]);
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            findings,
            vec![Finding::error(
                CommentPosition::Line(4),
                "@see tag comment indented incorrectly. Expected 6 spaces but found 2."
            )]
        );
    }

    #[test]
    fn test_indentation_expectation_tracks_longest_name() {
        let doc = file_block(vec![
            tag("package", 5, "net", 3),
            tag("see", 9, "Foo", 4),
            tag("deprecated", 2, "since 1.1", 5),
        ]);
        assert!(validate(&doc, &DocSchema::file()).is_empty());

        let doc = file_block(vec![
            tag("package", 2, "net", 3),
            tag("see", 6, "Foo", 4),
            tag("deprecated", 2, "since 1.1", 5),
        ]);
        let findings = validate(&doc, &DocSchema::file());
        assert_eq!(
            messages(&findings),
            [
                "@package tag comment indented incorrectly. Expected 5 spaces but found 2.",
                "@see tag comment indented incorrectly. Expected 9 spaces but found 6.",
            ]
        );
    }

    #[test]
    fn test_content_less_tags_are_not_indented() {
        // deprecated still sets the alignment column
        let doc = file_block(vec![tag("package", 5, "net", 3), tag("deprecated", 0, "", 4)]);
        assert!(validate(&doc, &DocSchema::file()).is_empty());
    }

    #[test]
    fn test_version_content_checked_when_not_discouraged() {
        let schema = DocSchema {
            tags: vec![TagSpec::new("version", "follows @package")],
            ..DocSchema::file()
        };
        let doc = file_block(vec![tag("version", 2, "1.0", 3)]);
        assert_eq!(
            messages(&validate(&doc, &schema)),
            ["Invalid @version tag content \"1.0\" in file comment; consider \"$Id$\" instead"]
        );
    }

    #[test]
    fn test_variable_block() {
        let schema = DocSchema::variable();
        let ok = DocComment::new("The name.")
            .with_newlines_before_tags(2)
            .with_tag(tag("var", 2, "string", 3));
        assert!(validate(&ok, &schema).is_empty());

        let spaced = DocComment::new("The name.")
            .with_newlines_before_tags(2)
            .with_tag(tag("var", 1, "string", 3));
        assert_eq!(
            messages(&validate(&spaced, &schema)),
            ["@var tag indented incorrectly. Expected 2 spaces but found 1."]
        );

        let untyped = DocComment::new("The name.")
            .with_newlines_before_tags(2)
            .with_tag(tag("var", 0, "", 3));
        assert_eq!(
            messages(&validate(&untyped, &schema)),
            ["Var type missing for @var tag in variable comment"]
        );
    }

    #[test]
    fn test_variable_block_short_description() {
        let schema = DocSchema::variable();
        let missing = DocComment::default()
            .with_newlines_before_tags(1)
            .with_tag(tag("var", 2, "int", 1));
        assert_eq!(
            validate(&missing, &schema),
            vec![Finding::error(
                CommentPosition::Start,
                "Missing short description in variable doc comment"
            )]
        );

        let multi = DocComment::new("The\nname.")
            .with_newlines_before_tags(2)
            .with_tag(tag("var", 2, "int", 4));
        assert_eq!(
            validate(&multi, &schema),
            vec![Finding::error(
                CommentPosition::Line(1),
                "Variable comment short description must be on a single line"
            )]
        );
    }

    #[test]
    fn test_variable_block_tags() {
        let schema = DocSchema::variable();
        let unknown = DocComment::new("The name.")
            .with_newlines_before_tags(2)
            .with_tag(tag("var", 2, "int", 3))
            .with_tag(tag("author", 1, "Frank", 4))
            .with_tag(tag("todo", 1, "x", 5));
        assert_eq!(
            validate(&unknown, &schema),
            vec![Finding::warning(
                CommentPosition::Line(4),
                "@author tag is not allowed in variable comment"
            )]
        );

        let late = DocComment::new("The name.")
            .with_newlines_before_tags(2)
            .with_tag(tag("see", 1, "Foo", 3))
            .with_tag(tag("var", 2, "int", 4));
        assert_eq!(
            messages(&validate(&late, &schema)),
            ["The @var tag must be the first tag in a variable comment"]
        );

        let missing = DocComment::new("The name.")
            .with_newlines_before_tags(2)
            .with_tag(tag("see", 1, "Foo", 3));
        assert_eq!(
            validate(&missing, &schema),
            vec![Finding::error(
                CommentPosition::End,
                "Missing @var tag in variable comment"
            )]
        );
    }

    #[test]
    fn test_validation_is_repeatable() {
        let doc = file_block(vec![
            tag("link", 1, "http://a", 3),
            tag("package", 2, "", 4),
            tag("link", 1, "http://b", 5),
        ]);
        let schema = DocSchema::file();
        let first = validate(&doc, &schema);
        let second = validate(&doc, &schema);
        assert!(!first.is_empty());
        assert_eq!(first, second);
        insta::assert_snapshot!(messages(&first).join("\n"), @r"
        @package tag must contain a name
        @link tags must be grouped together
        The @link tag is in the wrong order; the tag follows @link
        @link tag comment indented incorrectly. Expected 5 spaces but found 1.
        @link tag comment indented incorrectly. Expected 5 spaces but found 1.
        ");
    }
}
