//! Declaration names and class-name exclusions.

use glob::Pattern;
use stubble_lint_core::{ConfigError, TokenKind, TokenStream};

/// Class names exempt from the one-class-per-file and file-name checks.
pub const DEFAULT_EXCLUDED_CLASSES: &[&str] = &[
    "Binford",
    "*ClassLoader",
    "*ClassNotFoundException",
    "*TestSuite",
    "Stubbles_Sniffs*",
];

/// Matches class names against glob patterns.
#[derive(Debug, Clone)]
pub struct ClassExcluder {
    patterns: Vec<Pattern>,
}

impl Default for ClassExcluder {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_EXCLUDED_CLASSES
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }
}

impl ClassExcluder {
    /// Creates an excluder from glob patterns, replacing the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] for the first pattern that
    /// is not a valid glob.
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).map_err(|e| ConfigError::InvalidPattern {
                    pattern: p.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns true if `name` matches any pattern.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }
}

/// Index of the name declared by the `class`/`interface` keyword at `keyword`.
///
/// Returns `None` when the keyword is not followed by a name, as in
/// `Foo::class`.
pub(crate) fn declared_name(tokens: &TokenStream, keyword: usize) -> Option<usize> {
    tokens
        .find_next_excluding(&[TokenKind::Whitespace], keyword + 1, None)
        .filter(|&i| tokens[i].is(TokenKind::Identifier))
}

/// Keyword text with its first letter in upper case ("Class", "Interface").
pub(crate) fn declaration_type(keyword: &str) -> String {
    let mut chars = keyword.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
