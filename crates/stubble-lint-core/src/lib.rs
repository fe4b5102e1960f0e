//! # stubble-lint-core
//!
//! Core framework for style checking over a host-supplied token stream.
//!
//! This crate provides the foundational traits and types for building
//! token-triggered style rules. It includes:
//!
//! - [`TokenStream`] and [`TokenStreamBuilder`] for linked, indexable tokens
//! - [`DocComment`] and the [`CommentParser`] seam for documentation comments
//! - [`Rule`] trait for rules dispatched on trigger token kinds
//! - [`Analyzer`], the rule registry that walks each stream
//! - [`Violation`] and [`LintResult`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use stubble_lint_core::{Analyzer, FileContext};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! let ctx = FileContext::new(path, &tokens, &host_parser);
//! let violations = analyzer.analyze_file(&ctx);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod doc;
mod rule;
mod token;
mod types;

/// Fixture lexer and comment parser for tests.
#[cfg(feature = "test-support")]
pub mod test_support;

pub use analyzer::{Analyzer, AnalyzerBuilder};
pub use config::{Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use doc::{CommentParseError, CommentParser, DocComment, TagOccurrence};
pub use rule::{Rule, RuleBox};
pub use token::{Token, TokenKind, TokenStream, TokenStreamBuilder};
pub use types::{LintResult, Location, Severity, Violation, ViolationDiagnostic};
