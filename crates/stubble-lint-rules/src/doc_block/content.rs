//! Per-tag content checks.

use super::schema::DocSchema;
use stubble_lint_core::TagOccurrence;

/// Checks the content of one tag occurrence.
///
/// Returns the message of the first problem found. Tags without a
/// dedicated check always pass.
pub(crate) fn check(tag: &TagOccurrence, schema: &DocSchema) -> Option<String> {
    let content = tag.content.trim();
    match tag.name.as_str() {
        "package" | "subpackage" if content.is_empty() => {
            Some(format!("@{} tag must contain a name", tag.name))
        }
        "version" if content.is_empty() => Some(format!(
            "Content missing for @version tag in {} comment, must be at least {}$",
            schema.label, schema.revision_marker
        )),
        "version" if !content.contains(schema.revision_marker.as_str()) => Some(format!(
            "Invalid @version tag content \"{}\" in {} comment; consider \"{}$\" instead",
            content, schema.label, schema.revision_marker
        )),
        "var" if content.is_empty() => Some(format!(
            "Var type missing for @var tag in {} comment",
            schema.label
        )),
        _ => None,
    }
}
