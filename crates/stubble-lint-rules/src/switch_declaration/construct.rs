//! Branch structure of a `switch` construct.
//!
//! Extraction resolves every position the layout checks need once: the
//! braces, each owned label with its colon and body range, and how each
//! body ends. Nested constructs are skipped wholesale; their labels belong
//! to their own extraction.

use stubble_lint_core::{TokenKind, TokenStream};

/// How a branch body hands control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    /// `break` owned by the construct.
    Break(usize),
    /// Last `return` of the body.
    Return(usize),
    /// Last `throw` of the body.
    Throw(usize),
    /// Comment starting with the fallthrough marker.
    FallthroughComment(usize),
    /// Nothing ends the body.
    None,
}

impl Terminator {
    /// Token index of the terminator, if any.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Break(i) | Self::Return(i) | Self::Throw(i) | Self::FallthroughComment(i) => {
                Some(i)
            }
            Self::None => None,
        }
    }
}

/// One labeled alternative of a construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// The `case` or `default` label.
    pub trigger: usize,
    /// Colon ending the label.
    pub opener: usize,
    /// First token after the colon.
    pub body_start: usize,
    /// Next owned label or the closing brace (exclusive).
    pub body_end: usize,
    /// How the body ends.
    pub terminator: Terminator,
    /// Body holds only whitespace and runs into the next label.
    pub stacked: bool,
}

/// A `switch` with its resolved branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConstruct {
    /// The `switch` keyword.
    pub keyword: usize,
    /// Opening brace.
    pub opener: usize,
    /// Closing brace.
    pub closer: usize,
    /// `case` branches in source order.
    pub branches: Vec<Branch>,
    /// Last `default` branch owned by the construct.
    pub default_branch: Option<Branch>,
}

/// Reasons a construct cannot be extracted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// The keyword has no linked opening brace.
    #[error("SWITCH statement has no opening brace")]
    MissingOpener,
    /// The keyword has no linked closing brace.
    #[error("SWITCH statement has no closing brace")]
    MissingCloser,
    /// A label is not followed by its colon.
    #[error("{label} statement has no colon")]
    MissingColon {
        /// Label keyword in upper case.
        label: String,
    },
    /// A nested construct is never closed.
    #[error("Nested SWITCH statement has no closing brace")]
    UnclosedNested,
}

impl DispatchConstruct {
    /// Extracts the construct whose keyword sits at `keyword`.
    ///
    /// `marker` is the prefix a comment needs to count as an intentional
    /// fallthrough.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError`] when braces, colons or a nested closer
    /// are missing.
    pub fn extract(
        tokens: &TokenStream,
        keyword: usize,
        marker: &str,
    ) -> Result<Self, StructureError> {
        let opener = tokens
            .scope_opener(keyword)
            .ok_or(StructureError::MissingOpener)?;
        let closer = tokens
            .scope_closer(keyword)
            .ok_or(StructureError::MissingCloser)?;

        let mut labels = Vec::new();
        let mut i = opener + 1;
        while i < closer {
            match tokens[i].kind {
                TokenKind::Switch => {
                    i = tokens
                        .scope_closer(i)
                        .ok_or(StructureError::UnclosedNested)?;
                }
                kind if kind.is_branch_label()
                    && tokens.innermost_condition(i) == Some(keyword) =>
                {
                    labels.push(i);
                }
                _ => {}
            }
            i += 1;
        }

        let mut branches = Vec::new();
        let mut default_branch = None;

        for (n, &trigger) in labels.iter().enumerate() {
            let colon = tokens
                .scope_opener(trigger)
                .ok_or_else(|| StructureError::MissingColon {
                    label: tokens[trigger].text.to_uppercase(),
                })?;
            let body_end = labels.get(n + 1).copied().unwrap_or(closer);
            let body_start = colon + 1;

            let stacked = body_end != closer
                && (body_start..body_end).all(|j| tokens[j].is(TokenKind::Whitespace));
            let terminator = if stacked {
                Terminator::None
            } else {
                find_terminator(tokens, keyword, body_start, body_end, marker)
            };

            let branch = Branch {
                trigger,
                opener: colon,
                body_start,
                body_end,
                terminator,
                stacked,
            };

            if tokens[trigger].is(TokenKind::Default) {
                default_branch = Some(branch);
            } else {
                branches.push(branch);
            }
        }

        Ok(Self {
            keyword,
            opener,
            closer,
            branches,
            default_branch,
        })
    }
}

fn find_terminator(
    tokens: &TokenStream,
    keyword: usize,
    start: usize,
    end: usize,
    marker: &str,
) -> Terminator {
    let owned_break = (start..end).find(|&j| {
        tokens[j].is(TokenKind::Break) && tokens.innermost_condition(j) == Some(keyword)
    });
    if let Some(b) = owned_break {
        return Terminator::Break(b);
    }

    let last_of = |kind: TokenKind| (start..end).rev().find(|&j| tokens[j].is(kind));
    let marker_comment = (start..end).rev().find(|&j| {
        tokens[j].is(TokenKind::Comment) && tokens[j].text.trim_start().starts_with(marker)
    });

    [
        last_of(TokenKind::Return).map(Terminator::Return),
        last_of(TokenKind::Throw).map(Terminator::Throw),
        marker_comment.map(Terminator::FallthroughComment),
    ]
    .into_iter()
    .flatten()
    .max_by_key(|t| t.index())
    .unwrap_or(Terminator::None)
}
