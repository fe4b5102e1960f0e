//! # stubble-lint-rules
//!
//! Built-in rules of the Stubbles coding standard.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SL001 | `file-comment` | Requires a well-formed file doc comment |
//! | SL002 | `variable-comment` | Requires a well-formed doc comment on member variables |
//! | SL003 | `switch-declaration` | Enforces layout and terminators of `switch` statements |
//! | SL010 | `trailing-whitespace` | Forbids whitespace at the end of a line |
//! | SL011 | `space-after-cast` | Requires a space after type casts |
//! | SL012 | `single-declaration` | Allows one class or interface per file |
//! | SL013 | `valid-class-name` | Requires camel-caps class names |
//! | SL014 | `class-file-name` | Requires the class name to match the file name |
//! | SL015 | `file-equals-class-comment` | Requires the class doc block to repeat the file doc block |
//!
//! ## Usage
//!
//! ```ignore
//! use stubble_lint_core::Analyzer;
//! use stubble_lint_rules::{FileComment, SwitchDeclaration};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(FileComment::new())
//!     .rule(SwitchDeclaration::new().indent(4))
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod class_file_name;
pub mod doc_block;
pub mod file_comment;
pub mod file_equals_class_comment;
mod naming;
mod presets;
pub mod single_declaration;
pub mod space_after_cast;
pub mod switch_declaration;
pub mod trailing_whitespace;
pub mod valid_class_name;
pub mod variable_comment;

pub use class_file_name::ClassFileName;
pub use doc_block::schema::{DocSchema, TagSpec};
pub use doc_block::{validate, CommentPosition, Finding};
pub use file_comment::FileComment;
pub use file_equals_class_comment::FileEqualsClassComment;
pub use naming::{ClassExcluder, DEFAULT_EXCLUDED_CLASSES};
pub use presets::{all_rules, configured_rules, stubbles_rules, structural_rules, Preset};
pub use single_declaration::SingleDeclaration;
pub use space_after_cast::SpaceAfterCast;
pub use switch_declaration::construct::{DispatchConstruct, StructureError, Terminator};
pub use switch_declaration::SwitchDeclaration;
pub use trailing_whitespace::TrailingWhitespace;
pub use valid_class_name::ValidClassName;
pub use variable_comment::VariableComment;
