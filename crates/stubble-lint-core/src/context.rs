//! Context types for rule execution.

use crate::doc::CommentParser;
use crate::token::TokenStream;
use crate::types::Location;
use std::path::Path;

/// Context provided to rules for one source unit.
///
/// Bundles the unit's path with the host collaborators a rule may query:
/// the linked token stream and the documentation-comment parser.
#[derive(Clone, Copy)]
pub struct FileContext<'a> {
    /// Path of the source unit.
    pub path: &'a Path,
    /// Linked tokens of the unit.
    pub tokens: &'a TokenStream,
    /// Host parser for documentation comments.
    pub comments: &'a dyn CommentParser,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, tokens: &'a TokenStream, comments: &'a dyn CommentParser) -> Self {
        Self {
            path,
            tokens,
            comments,
        }
    }

    /// File name without its extension, if any.
    #[must_use]
    pub fn file_stem(&self) -> Option<&str> {
        self.path.file_stem().and_then(|s| s.to_str())
    }

    /// Location of the token at `index`.
    ///
    /// Indices past the end are clamped to the last token; an empty stream
    /// yields line 1, column 1.
    #[must_use]
    pub fn location(&self, index: usize) -> Location {
        let last = self.tokens.len().saturating_sub(1);
        match self.tokens.get(index.min(last)) {
            Some(token) => Location::at_token(self.path.to_path_buf(), index.min(last), token),
            None => Location::new(self.path.to_path_buf(), 1, 1),
        }
    }
}

impl std::fmt::Debug for FileContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileContext")
            .field("path", &self.path)
            .field("tokens", &self.tokens.len())
            .finish_non_exhaustive()
    }
}
