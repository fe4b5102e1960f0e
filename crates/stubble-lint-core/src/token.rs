//! Token stream model consumed by rules.
//!
//! The scanning host tokenizes source text and pushes `(kind, text)` pairs
//! into a [`TokenStreamBuilder`]. The builder computes positions and links
//! scopes so rules can query explicit fields instead of re-deriving them
//! from index arithmetic.
//!
//! Text conventions expected from the host:
//!
//! - whitespace runs are split so that each token ends at (and includes) a newline
//! - a `//` comment includes its trailing newline
//! - a doc comment is one [`TokenKind::DocComment`] token per line, every line
//!   but the last including its newline

use serde::{Deserialize, Serialize};
use std::ops::Index;
use tracing::warn;

/// Category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// `<?php` open tag.
    OpenTag,
    /// `?>` close tag.
    CloseTag,
    /// Text outside of the open/close tags.
    InlineHtml,
    /// Spaces, tabs and newlines.
    Whitespace,
    /// `//`, `#` or `/* */` comment.
    Comment,
    /// One line of a `/** */` documentation comment.
    DocComment,
    /// Bare identifier (names, constants, function names).
    Identifier,
    /// `$variable`.
    Variable,
    /// Keyword that never owns a scope (`public`, `static`, `echo`, ...).
    Keyword,
    /// Control-structure keyword owning a scope (`if`, `for`, `while`, ...).
    ControlKeyword,
    /// `class`.
    Class,
    /// `interface`.
    Interface,
    /// `abstract`.
    Abstract,
    /// `final`.
    Final,
    /// `extends`.
    Extends,
    /// `implements`.
    Implements,
    /// `function`.
    Function,
    /// `new`.
    New,
    /// `switch`.
    Switch,
    /// `case` branch label.
    Case,
    /// `default` branch label.
    Default,
    /// `break`.
    Break,
    /// `return`.
    Return,
    /// `throw`.
    Throw,
    /// Type cast such as `(int)`.
    Cast,
    /// Number or string literal.
    Literal,
    /// `(`.
    OpenParen,
    /// `)`.
    CloseParen,
    /// `{`.
    OpenBrace,
    /// `}`.
    CloseBrace,
    /// `[`.
    OpenBracket,
    /// `]`.
    CloseBracket,
    /// `:`.
    Colon,
    /// `::`.
    DoubleColon,
    /// `;`.
    Semicolon,
    /// `,`.
    Comma,
    /// `->`.
    ObjectOperator,
    /// Any other operator.
    Operator,
}

impl TokenKind {
    /// Whitespace and comments; carries no code.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment | Self::DocComment)
    }

    /// Keywords whose following brace opens a scope they own.
    #[must_use]
    pub fn is_scope_owner(self) -> bool {
        matches!(
            self,
            Self::Switch | Self::Class | Self::Interface | Self::Function | Self::ControlKeyword
        )
    }

    /// Branch labels of a dispatch construct.
    #[must_use]
    pub fn is_branch_label(self) -> bool {
        matches!(self, Self::Case | Self::Default)
    }
}

/// Immutable unit of the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token category.
    pub kind: TokenKind,
    /// Raw source text.
    pub text: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in the source unit.
    pub offset: usize,
    /// Opening brace of an owned scope, or the colon of a branch label.
    pub scope_opener: Option<usize>,
    /// Closing brace of an owned scope.
    pub scope_closer: Option<usize>,
    /// Enclosing scope owners, innermost first.
    pub conditions: Vec<usize>,
}

impl Token {
    /// Returns true if the token is of the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Returns true for whitespace and comments.
    #[must_use]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// Innermost enclosing scope owner.
    #[must_use]
    pub fn innermost_condition(&self) -> Option<usize> {
        self.conditions.first().copied()
    }
}

/// Randomly indexable, already-linked token sequence of one source unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Returns a builder for constructing a stream.
    #[must_use]
    pub fn builder() -> TokenStreamBuilder {
        TokenStreamBuilder::new()
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the stream holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the token at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// All tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// First index in `[start, end)` whose kind is one of `kinds`.
    ///
    /// `end` defaults to the end of the stream.
    #[must_use]
    pub fn find_next(&self, kinds: &[TokenKind], start: usize, end: Option<usize>) -> Option<usize> {
        let end = end.unwrap_or(self.tokens.len()).min(self.tokens.len());
        (start..end).find(|&i| kinds.contains(&self.tokens[i].kind))
    }

    /// First index in `[start, end)` whose kind is *not* one of `kinds`.
    #[must_use]
    pub fn find_next_excluding(
        &self,
        kinds: &[TokenKind],
        start: usize,
        end: Option<usize>,
    ) -> Option<usize> {
        let end = end.unwrap_or(self.tokens.len()).min(self.tokens.len());
        (start..end).find(|&i| !kinds.contains(&self.tokens[i].kind))
    }

    /// Last index in `[floor, start]` whose kind is one of `kinds`,
    /// scanning downwards from `start`.
    #[must_use]
    pub fn find_previous(&self, kinds: &[TokenKind], start: usize, floor: usize) -> Option<usize> {
        if self.tokens.is_empty() {
            return None;
        }
        let start = start.min(self.tokens.len() - 1);
        (floor..=start)
            .rev()
            .find(|&i| kinds.contains(&self.tokens[i].kind))
    }

    /// Last index in `[floor, start]` whose kind is *not* one of `kinds`.
    #[must_use]
    pub fn find_previous_excluding(
        &self,
        kinds: &[TokenKind],
        start: usize,
        floor: usize,
    ) -> Option<usize> {
        if self.tokens.is_empty() {
            return None;
        }
        let start = start.min(self.tokens.len() - 1);
        (floor..=start)
            .rev()
            .find(|&i| !kinds.contains(&self.tokens[i].kind))
    }

    /// Scope opener linked to the token at `index`.
    #[must_use]
    pub fn scope_opener(&self, index: usize) -> Option<usize> {
        self.tokens.get(index).and_then(|t| t.scope_opener)
    }

    /// Scope closer linked to the token at `index`.
    #[must_use]
    pub fn scope_closer(&self, index: usize) -> Option<usize> {
        self.tokens.get(index).and_then(|t| t.scope_closer)
    }

    /// Innermost scope owner enclosing the token at `index`.
    #[must_use]
    pub fn innermost_condition(&self, index: usize) -> Option<usize> {
        self.tokens.get(index).and_then(Token::innermost_condition)
    }

    /// Concatenated text of the inclusive range `[start, end]`.
    #[must_use]
    pub fn text_between(&self, start: usize, end: usize) -> String {
        let end = end.min(self.tokens.len().saturating_sub(1));
        if start > end || self.tokens.is_empty() {
            return String::new();
        }
        self.tokens[start..=end]
            .iter()
            .map(|t| t.text.as_str())
            .collect()
    }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

/// Builds a [`TokenStream`] from host-provided `(kind, text)` pairs.
///
/// Positions are computed from the pushed text. Calling
/// [`finish`](Self::finish) links braces to their owning keywords, branch
/// labels to their colons, and records each token's condition chain.
#[derive(Debug)]
pub struct TokenStreamBuilder {
    tokens: Vec<Token>,
    line: usize,
    column: usize,
    offset: usize,
}

impl Default for TokenStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStreamBuilder {
    /// Creates an empty builder positioned at line 1, column 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Appends a token and returns its index.
    pub fn push(&mut self, kind: TokenKind, text: impl Into<String>) -> usize {
        let text = text.into();
        let index = self.tokens.len();
        self.tokens.push(Token {
            kind,
            text: text.clone(),
            line: self.line,
            column: self.column,
            offset: self.offset,
            scope_opener: None,
            scope_closer: None,
            conditions: Vec::new(),
        });

        self.offset += text.len();
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        index
    }

    /// Number of tokens pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if nothing has been pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Links scopes and returns the finished stream.
    #[must_use]
    pub fn finish(mut self) -> TokenStream {
        link_scopes(&mut self.tokens);
        TokenStream {
            tokens: self.tokens,
        }
    }
}

/// Fills `scope_opener`, `scope_closer` and `conditions`.
fn link_scopes(tokens: &mut [Token]) {
    // (owner, opener) per open scope, outermost first
    let mut scopes: Vec<(usize, usize)> = Vec::new();
    let mut pending_owner: Option<usize> = None;
    // (label, paren depth at the label)
    let mut pending_label: Option<(usize, usize)> = None;
    let mut paren_depth = 0usize;

    for i in 0..tokens.len() {
        tokens[i].conditions = scopes.iter().rev().map(|&(owner, _)| owner).collect();

        match tokens[i].kind {
            kind if kind.is_scope_owner() => pending_owner = Some(i),
            TokenKind::Semicolon => pending_owner = None,
            TokenKind::OpenParen => paren_depth += 1,
            TokenKind::CloseParen => paren_depth = paren_depth.saturating_sub(1),
            TokenKind::Case | TokenKind::Default => pending_label = Some((i, paren_depth)),
            TokenKind::Colon => {
                if let Some((label, depth)) = pending_label {
                    if depth == paren_depth {
                        tokens[label].scope_opener = Some(i);
                        pending_label = None;
                    }
                }
            }
            TokenKind::OpenBrace => {
                let owner = pending_owner.take().unwrap_or(i);
                tokens[owner].scope_opener = Some(i);
                tokens[i].scope_opener = Some(i);
                scopes.push((owner, i));
            }
            TokenKind::CloseBrace => match scopes.pop() {
                Some((owner, opener)) => {
                    tokens[owner].scope_closer = Some(i);
                    tokens[opener].scope_closer = Some(i);
                    tokens[i].scope_opener = Some(opener);
                    tokens[i].scope_closer = Some(i);
                    tokens[i].conditions =
                        scopes.iter().rev().map(|&(owner, _)| owner).collect();
                }
                None => warn!(
                    "Unbalanced closing brace at {}:{}",
                    tokens[i].line, tokens[i].column
                ),
            },
            _ => {}
        }
    }

    for &(owner, _) in &scopes {
        warn!(
            "Scope opened at {}:{} is never closed",
            tokens[owner].line, tokens[owner].column
        );
    }
}
