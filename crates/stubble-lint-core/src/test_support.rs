//! Fixtures for writing rule tests against source text.
//!
//! [`lex`] turns a PHP-like snippet into a linked [`TokenStream`] following
//! the host text conventions, and [`FixtureCommentParser`] understands the
//! usual `/** ... */` layout. Neither aims to be complete; they cover the
//! constructs the rules look at.

use crate::doc::{CommentParseError, CommentParser, DocComment, TagOccurrence};
use crate::token::{TokenKind, TokenStream, TokenStreamBuilder};

const CASTS: &[&str] = &[
    "int", "integer", "bool", "boolean", "float", "double", "real", "string", "array", "object",
    "unset",
];

const OPERATORS: &[&str] = &[
    "===", "!==", "<=>", "**=", "==", "!=", "<>", "<=", ">=", "=>", "&&", "||", "++", "--", "+=",
    "-=", "*=", "/=", ".=", "%=", "??", "<<", ">>",
];

fn keyword_kind(word: &str) -> TokenKind {
    match word.to_ascii_lowercase().as_str() {
        "class" => TokenKind::Class,
        "interface" => TokenKind::Interface,
        "abstract" => TokenKind::Abstract,
        "final" => TokenKind::Final,
        "extends" => TokenKind::Extends,
        "implements" => TokenKind::Implements,
        "function" => TokenKind::Function,
        "new" => TokenKind::New,
        "switch" => TokenKind::Switch,
        "case" => TokenKind::Case,
        "default" => TokenKind::Default,
        "break" => TokenKind::Break,
        "return" => TokenKind::Return,
        "throw" => TokenKind::Throw,
        "if" | "else" | "elseif" | "for" | "foreach" | "while" | "do" | "try" | "catch" => {
            TokenKind::ControlKeyword
        }
        "public" | "protected" | "private" | "static" | "var" | "const" | "echo" | "print"
        | "require" | "require_once" | "include" | "include_once" | "instanceof" | "as"
        | "global" | "continue" | "isset" | "unset" | "empty" | "array" | "list" => {
            TokenKind::Keyword
        }
        _ => TokenKind::Identifier,
    }
}

/// Tokenizes `source` and links the resulting stream.
#[must_use]
pub fn lex(source: &str) -> TokenStream {
    let mut lexer = Lexer {
        src: source,
        pos: 0,
        out: TokenStream::builder(),
    };
    lexer.run();
    lexer.out.finish()
}

struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    out: TokenStreamBuilder,
}

impl<'s> Lexer<'s> {
    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn emit(&mut self, kind: TokenKind, len: usize) {
        let text = &self.src[self.pos..self.pos + len];
        self.out.push(kind, text);
        self.pos += len;
    }

    fn run(&mut self) {
        while self.pos < self.src.len() {
            self.inline_html();
            self.code();
        }
    }

    fn inline_html(&mut self) {
        let len = self.rest().find("<?php").unwrap_or(self.rest().len());
        if len > 0 {
            self.emit(TokenKind::InlineHtml, len);
        }
        if self.rest().starts_with("<?php") {
            let mut len = "<?php".len();
            if self.rest()[len..].starts_with("\r\n") {
                len += 2;
            } else if self.rest()[len..].starts_with(['\n', ' ']) {
                len += 1;
            }
            self.emit(TokenKind::OpenTag, len);
        }
    }

    fn code(&mut self) {
        while let Some(c) = self.rest().chars().next() {
            let rest = self.rest();
            if rest.starts_with("?>") {
                let len = if rest[2..].starts_with('\n') { 3 } else { 2 };
                self.emit(TokenKind::CloseTag, len);
                return;
            }
            if c.is_whitespace() {
                self.whitespace();
            } else if rest.starts_with("/**") {
                self.doc_comment();
            } else if rest.starts_with("/*") {
                let len = rest.find("*/").map_or(rest.len(), |i| i + 2);
                self.emit(TokenKind::Comment, len);
            } else if rest.starts_with("//") || c == '#' {
                let len = rest.find('\n').map_or(rest.len(), |i| i + 1);
                self.emit(TokenKind::Comment, len);
            } else if c == '$' {
                let len = 1 + word_len(&rest[1..]);
                self.emit(TokenKind::Variable, len);
            } else if c.is_ascii_alphabetic() || c == '_' || c == '\\' {
                let len = word_len(rest);
                self.emit(keyword_kind(&rest[..len]), len);
            } else if c.is_ascii_digit() {
                let len = rest
                    .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '.'))
                    .unwrap_or(rest.len());
                self.emit(TokenKind::Literal, len);
            } else if c == '\'' || c == '"' {
                self.emit(TokenKind::Literal, string_len(rest, c));
            } else if c == '(' {
                match cast_len(rest) {
                    Some(len) => self.emit(TokenKind::Cast, len),
                    None => self.emit(TokenKind::OpenParen, 1),
                }
            } else {
                self.punctuation(c);
            }
        }
    }

    fn whitespace(&mut self) {
        let rest = self.rest();
        let run = rest
            .find(|ch: char| !ch.is_whitespace())
            .unwrap_or(rest.len());
        let mut start = 0;
        for (i, ch) in rest[..run].char_indices() {
            if ch == '\n' {
                self.emit(TokenKind::Whitespace, i + 1 - start);
                start = i + 1;
            }
        }
        if start < run {
            self.emit(TokenKind::Whitespace, run - start);
        }
    }

    fn doc_comment(&mut self) {
        let rest = self.rest();
        let len = rest.find("*/").map_or(rest.len(), |i| i + 2);
        let lines: Vec<usize> = rest[..len].split_inclusive('\n').map(str::len).collect();
        for line in lines {
            self.emit(TokenKind::DocComment, line);
        }
    }

    fn punctuation(&mut self, c: char) {
        let rest = self.rest();
        let kind = match c {
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' if rest.starts_with("::") => {
                self.emit(TokenKind::DoubleColon, 2);
                return;
            }
            ':' => TokenKind::Colon,
            '-' if rest.starts_with("->") => {
                self.emit(TokenKind::ObjectOperator, 2);
                return;
            }
            _ => {
                let len = OPERATORS
                    .iter()
                    .find(|op| rest.starts_with(**op))
                    .map_or(c.len_utf8(), |op| op.len());
                self.emit(TokenKind::Operator, len);
                return;
            }
        };
        self.emit(kind, 1);
    }
}

fn word_len(s: &str) -> usize {
    s.find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '\\'))
        .unwrap_or(s.len())
}

fn string_len(s: &str, quote: char) -> usize {
    let mut escaped = false;
    for (i, ch) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return i + 1;
        }
    }
    s.len()
}

fn cast_len(s: &str) -> Option<usize> {
    let close = s.find(')')?;
    let inner = s[1..close].trim_matches([' ', '\t']);
    CASTS
        .iter()
        .any(|cast| inner.eq_ignore_ascii_case(cast))
        .then_some(close + 1)
}

/// Parses `/** ... */` spans laid out one item per line.
///
/// - description lines come before the first tag line
/// - a blank line ends the short description
/// - a tag line is `@name<whitespace>content`; following non-tag lines
///   continue its content
///
/// A tag line with no name and an unterminated span are parse errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCommentParser;

impl CommentParser for FixtureCommentParser {
    fn parse(&self, raw: &str) -> Result<DocComment, CommentParseError> {
        let Some(body) = raw.strip_prefix("/**") else {
            return Err(CommentParseError::new("Comment does not start with /**", 0));
        };
        let Some(body) = body.trim_end().strip_suffix("*/") else {
            return Err(CommentParseError::new(
                "Unterminated doc comment",
                raw.lines().count().saturating_sub(1),
            ));
        };

        let lines: Vec<(usize, &str)> = body
            .split('\n')
            .enumerate()
            .map(|(i, line)| (i, strip_star(line, i == 0)))
            .collect();

        let mut doc = DocComment::default();
        let first_tag = lines.iter().position(|(_, l)| l.starts_with('@'));
        let (desc, tags) = lines.split_at(first_tag.unwrap_or(lines.len()));

        // the `/**` line carries no description text in this layout
        let desc: Vec<&str> = desc
            .iter()
            .enumerate()
            .filter(|(i, (_, l))| *i > 0 || !l.is_empty())
            .map(|(_, (_, l))| l.trim())
            .collect();

        let leading = desc.iter().take_while(|l| l.is_empty()).count();
        let text = &desc[leading..];
        let short_len = text.iter().take_while(|l| !l.is_empty()).count();
        let short_end = leading + short_len;

        if short_len > 0 {
            doc.short_description = format!("{}{}", "\n".repeat(leading), text[..short_len].join("\n"));
        }

        let after_short = &desc[short_end..];
        let blank_between = after_short.iter().take_while(|l| l.is_empty()).count();
        let long: &[&str] = &after_short[blank_between..];
        let long_len = long.len() - long.iter().rev().take_while(|l| l.is_empty()).count();

        if long_len > 0 {
            doc.long_description = long[..long_len].join("\n");
            doc.newlines_between = blank_between + 1;
            doc.newlines_before_tags = long.len() - long_len + 1;
        } else if short_len > 0 {
            doc.newlines_before_tags = blank_between + 1;
        } else {
            doc.newlines_before_tags = desc.len() + 1;
        }

        for &(line, text) in tags {
            if let Some(tag) = text.strip_prefix('@') {
                let name_len = tag
                    .find(char::is_whitespace)
                    .unwrap_or(tag.len());
                if name_len == 0 {
                    return Err(CommentParseError::new("Tag name missing after @", line));
                }
                let after = &tag[name_len..];
                let content = after.trim_start();
                let whitespace = if content.is_empty() {
                    ""
                } else {
                    &after[..after.len() - content.len()]
                };
                doc.tags.push(TagOccurrence::new(
                    &tag[..name_len],
                    whitespace,
                    content.trim_end(),
                    line,
                ));
            } else if let Some(last) = doc.tags.last_mut() {
                let text = text.trim();
                if !text.is_empty() {
                    if !last.content.is_empty() {
                        last.content.push(' ');
                    }
                    last.content.push_str(text);
                }
            }
        }

        Ok(doc)
    }
}

fn strip_star(line: &str, first: bool) -> &str {
    let line = line.trim_end_matches(['\r', ' ', '\t']);
    if first {
        return line.trim_start();
    }
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => trimmed,
    }
}
