//! # stubble-lint
//!
//! Style checker for the Stubbles coding standard, driven by a token stream
//! the host tokenizer supplies.
//!
//! This is the main facade crate that re-exports core functionality and rules.
//!
//! ## Configuration
//!
//! ```toml
//! # stubble-lint.toml
//! preset = "stubbles"
//!
//! [rules.switch-declaration]
//! indent = 4
//!
//! [rules.class-file-name]
//! severity = "warning"
//! excluded_classes = ["*Fixture"]
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use stubble_lint::{Config, FileContext};
//!
//! let config = Config::from_file(Path::new("stubble-lint.toml"))?;
//! let analyzer = stubble_lint::analyzer_from_config(config)?;
//!
//! let ctx = FileContext::new(path, &tokens, &host_parser);
//! let result = analyzer.analyze(&[ctx]);
//! if result.has_violations_at(fail_on) {
//!     eprintln!("{}", result.format_report(fail_on));
//! }
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use stubble_lint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use stubble_lint_rules::*;
}

/// Builds an analyzer holding the configured preset's rules.
///
/// Rule options are applied when the rules are constructed. Enabling and
/// severity overrides stay with the analyzer.
///
/// # Errors
///
/// Returns an error for an unknown preset or an invalid exclusion pattern.
pub fn analyzer_from_config(config: Config) -> Result<Analyzer, ConfigError> {
    let rules = stubble_lint_rules::configured_rules(&config)?;
    Ok(Analyzer::builder().rules(rules).config(config).build())
}
