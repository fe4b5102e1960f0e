//! Structured documentation comments.
//!
//! The host's comment parser turns the raw text of a `/** */` span into a
//! [`DocComment`]. Rules never parse comment text themselves.

use serde::{Deserialize, Serialize};

/// One tag occurrence inside a documentation comment, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOccurrence {
    /// Tag name without the `@`.
    pub name: String,
    /// Tag content after the separating whitespace.
    pub content: String,
    /// Raw whitespace between the tag name and its content.
    pub whitespace_before_content: String,
    /// Line offset within the comment span (the `/**` line is 0).
    pub line: usize,
}

impl TagOccurrence {
    /// Creates a tag occurrence.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        whitespace_before_content: impl Into<String>,
        content: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            whitespace_before_content: whitespace_before_content.into(),
            line,
        }
    }

    /// Number of spaces between the tag name and its content.
    #[must_use]
    pub fn spacing(&self) -> usize {
        self.whitespace_before_content.matches(' ').count()
    }
}

/// A parsed documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    /// Short description, possibly empty, possibly starting with newlines.
    pub short_description: String,
    /// Long description, possibly empty.
    pub long_description: String,
    /// Newlines between the short and the long description.
    pub newlines_between: usize,
    /// Newlines between the last description line and the first tag.
    pub newlines_before_tags: usize,
    /// Tags in the order they were written.
    pub tags: Vec<TagOccurrence>,
}

impl DocComment {
    /// Creates a comment with only a short description.
    #[must_use]
    pub fn new(short_description: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            ..Self::default()
        }
    }

    /// Sets the long description and the newlines separating it.
    #[must_use]
    pub fn with_long(mut self, newlines_between: usize, long: impl Into<String>) -> Self {
        self.newlines_between = newlines_between;
        self.long_description = long.into();
        self
    }

    /// Sets the newlines before the tag section.
    #[must_use]
    pub fn with_newlines_before_tags(mut self, newlines: usize) -> Self {
        self.newlines_before_tags = newlines;
        self
    }

    /// Appends a tag occurrence.
    #[must_use]
    pub fn with_tag(mut self, tag: TagOccurrence) -> Self {
        self.tags.push(tag);
        self
    }

    /// Returns true if the comment has neither text nor tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.short_description.trim().is_empty()
            && self.long_description.trim().is_empty()
            && self.tags.is_empty()
    }

    /// 1-based occurrence positions of `name`.
    ///
    /// Position 0 belongs to the description section, so the first tag of
    /// the comment is at position 1.
    #[must_use]
    pub fn positions_of(&self, name: &str) -> Vec<usize> {
        self.tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| tag.name == name)
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// All occurrences of `name`, in source order.
    pub fn occurrences<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TagOccurrence> + 'a {
        self.tags.iter().filter(move |tag| tag.name == name)
    }
}

/// Error raised by a comment parser for malformed comment text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CommentParseError {
    /// Human-readable parser message.
    pub message: String,
    /// Line offset within the comment where parsing failed.
    pub line: usize,
}

impl CommentParseError {
    /// Creates a parse error at a comment line offset.
    #[must_use]
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

/// Turns the raw text of a documentation comment into a [`DocComment`].
///
/// Implemented by the scanning host.
pub trait CommentParser: Send + Sync {
    /// Parses a raw `/** ... */` span.
    ///
    /// # Errors
    ///
    /// Returns [`CommentParseError`] if the comment text is malformed.
    fn parse(&self, raw: &str) -> Result<DocComment, CommentParseError>;
}
