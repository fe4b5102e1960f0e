//! Tag schemas for documentation blocks.

/// Where a tag must sit relative to the other tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// First occurrence must come after every earlier schema tag that occurs.
    Ordered,
    /// Must be the first tag of the block.
    First,
}

/// How the whitespace between a tag name and its content is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indentation {
    /// Contents line up one column past the longest tag name plus `padding`.
    AlignToLongest {
        /// Spaces after the longest tag name.
        padding: usize,
    },
    /// Every tag is followed by exactly this many spaces.
    Fixed(usize),
}

/// Requirements on the short description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortDescription {
    /// May be absent or span several lines.
    Free,
    /// Must be present and fit on one line.
    RequiredSingleLine,
}

/// Handling of tags the schema does not name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownTags {
    /// Unknown tags are not looked at.
    Ignore,
    /// The first tag outside the schema and `permitted` is a warning, and
    /// the block is not checked further.
    Warn {
        /// Non-schema tags that are still accepted.
        permitted: Vec<&'static str>,
    },
}

/// Expectations for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpec {
    /// Tag name without the `@`.
    pub name: &'static str,
    /// Block must contain the tag.
    pub required: bool,
    /// Tag is legal but warned about; no further checks run for it.
    pub discouraged: bool,
    /// Tag may occur more than once (occurrences must be grouped).
    pub allow_multiple: bool,
    /// Ordering constraint.
    pub placement: Placement,
    /// Wording of the ordering constraint used in messages.
    pub order_text: &'static str,
}

impl TagSpec {
    /// An optional, single, ordered tag.
    #[must_use]
    pub fn new(name: &'static str, order_text: &'static str) -> Self {
        Self {
            name,
            required: false,
            discouraged: false,
            allow_multiple: false,
            placement: Placement::Ordered,
            order_text,
        }
    }

    /// Marks the tag as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the tag as discouraged.
    #[must_use]
    pub fn discouraged(mut self) -> Self {
        self.discouraged = true;
        self
    }

    /// Allows several grouped occurrences.
    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.allow_multiple = true;
        self
    }

    /// Requires the tag to be the first tag of the block.
    #[must_use]
    pub fn first(mut self) -> Self {
        self.placement = Placement::First;
        self
    }
}

/// Expected shape of one kind of documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSchema {
    /// Lowercase block name used in messages ("file", "variable").
    pub label: &'static str,
    /// Tags in schema order.
    pub tags: Vec<TagSpec>,
    /// Tag content alignment.
    pub indentation: Indentation,
    /// Short description requirements.
    pub short_description: ShortDescription,
    /// Handling of tags outside the schema.
    pub unknown_tags: UnknownTags,
    /// Substring a `@version` tag must contain.
    pub revision_marker: String,
}

/// Default `@version` revision marker.
pub const REVISION_MARKER: &str = "$Id";

impl DocSchema {
    /// Schema of the file-level doc block.
    #[must_use]
    pub fn file() -> Self {
        Self {
            label: "file",
            tags: vec![
                TagSpec::new("author", "precedes @package")
                    .discouraged()
                    .multiple(),
                TagSpec::new("package", "follows @author").required(),
                TagSpec::new("subpackage", "follows @package").discouraged(),
                TagSpec::new("version", "follows @package or @subpackage (is used)").discouraged(),
                TagSpec::new("link", "follows @link").multiple(),
                TagSpec::new("see", "follows @see").multiple(),
                TagSpec::new(
                    "deprecated",
                    "follows @subpackage or @see (if used) or @link (if used)",
                ),
            ],
            indentation: Indentation::AlignToLongest { padding: 2 },
            short_description: ShortDescription::Free,
            unknown_tags: UnknownTags::Ignore,
            revision_marker: REVISION_MARKER.to_string(),
        }
    }

    /// Schema of a member-variable doc block.
    #[must_use]
    pub fn variable() -> Self {
        Self {
            label: "variable",
            tags: vec![TagSpec::new("var", "must be the first tag")
                .required()
                .first()],
            indentation: Indentation::Fixed(2),
            short_description: ShortDescription::RequiredSingleLine,
            unknown_tags: UnknownTags::Warn {
                permitted: vec!["see", "link", "since", "deprecated"],
            },
            revision_marker: REVISION_MARKER.to_string(),
        }
    }

    /// Replaces the `@version` revision marker.
    #[must_use]
    pub fn with_revision_marker(mut self, marker: impl Into<String>) -> Self {
        self.revision_marker = marker.into();
        self
    }

    /// Looks up a tag by name.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&TagSpec> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Returns true if the schema names the tag or tolerates it.
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        match &self.unknown_tags {
            UnknownTags::Ignore => true,
            UnknownTags::Warn { permitted } => {
                self.tag(name).is_some() || permitted.contains(&name)
            }
        }
    }

    /// Label with a capital first letter, for sentence starts.
    #[must_use]
    pub fn title(&self) -> String {
        let mut chars = self.label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_schema_order() {
        let schema = DocSchema::file();
        let names: Vec<&str> = schema.tags.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            ["author", "package", "subpackage", "version", "link", "see", "deprecated"]
        );
        assert!(schema.tag("package").is_some_and(|t| t.required));
        assert!(schema.tag("author").is_some_and(|t| t.discouraged && t.allow_multiple));
        assert!(schema.accepts("anything"));
    }

    #[test]
    fn test_variable_schema() {
        let schema = DocSchema::variable();
        let var = schema.tag("var").expect("var tag");
        assert_eq!(var.placement, Placement::First);
        assert_eq!(schema.indentation, Indentation::Fixed(2));
        assert!(schema.accepts("see"));
        assert!(schema.accepts("var"));
        assert!(!schema.accepts("author"));
    }

    #[test]
    fn test_title() {
        assert_eq!(DocSchema::file().title(), "File");
        assert_eq!(DocSchema::variable().title(), "Variable");
    }

    #[test]
    fn test_revision_marker_override() {
        let schema = DocSchema::file().with_revision_marker("$Rev");
        assert_eq!(schema.revision_marker, "$Rev");
        assert_eq!(DocSchema::file().revision_marker, REVISION_MARKER);
    }
}
