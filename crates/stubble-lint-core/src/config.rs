//! Configuration types for stubble-lint.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for stubble-lint.
///
/// ```toml
/// preset = "stubbles"
/// fail_on = "warning"
///
/// [rules.switch-declaration]
/// indent = 4
/// fallthrough_marker = "// break omitted"
///
/// [rules.trailing-whitespace]
/// enabled = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use ("stubbles" or "structural").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold at which the host should treat the run as failed
    /// (default: "error").
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration block of a rule, if any.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Failure threshold, defaulting to [`Severity::Error`].
    #[must_use]
    pub fn fail_on_severity(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets an unsigned integer option with a default value.
    ///
    /// Negative values fall back to the default.
    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// The named preset does not exist.
    #[error("Unknown preset `{name}`. Valid presets: stubbles, structural")]
    UnknownPreset {
        /// Preset name as written in the config.
        name: String,
    },

    /// A class exclusion pattern is not a valid glob.
    #[error("Invalid exclusion pattern `{pattern}`: {message}")]
    InvalidPattern {
        /// Pattern as written in the config.
        pattern: String,
        /// Glob error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.rules.is_empty());
        assert!(config.is_rule_enabled("switch-declaration"));
        assert_eq!(config.fail_on_severity(), Severity::Error);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "structural"
fail_on = "warning"

[rules.switch-declaration]
severity = "warning"
indent = 2
fallthrough_marker = "// fall through"

[rules.single-declaration]
excluded_classes = ["Legacy*", "Binford"]

[rules.trailing-whitespace]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("structural"));
        assert_eq!(config.fail_on_severity(), Severity::Warning);
        assert!(!config.is_rule_enabled("trailing-whitespace"));
        assert!(config.is_rule_enabled("switch-declaration"));
        assert_eq!(
            config.rule_severity("switch-declaration"),
            Some(Severity::Warning)
        );

        let switch = config.rule("switch-declaration").expect("rule block");
        assert_eq!(switch.get_usize("indent", 4), 2);
        assert_eq!(
            switch.get_str("fallthrough_marker", "// break omitted"),
            "// fall through"
        );
        assert_eq!(switch.get_option::<i64>("indent"), Some(2));

        let single = config.rule("single-declaration").expect("rule block");
        assert_eq!(single.get_str_array("excluded_classes"), ["Legacy*", "Binford"]);
    }

    #[test]
    fn test_option_defaults() {
        let rule = RuleConfig::default();
        assert_eq!(rule.get_usize("indent", 4), 4);
        assert_eq!(rule.get_str("marker", "x"), "x");
        assert!(rule.get_str_array("excluded_classes").is_empty());

        let config = Config::parse("[rules.x]\nindent = -3\n").expect("parses");
        assert_eq!(config.rule("x").expect("rule").get_usize("indent", 4), 4);
    }

    #[test]
    fn test_invalid_severity_is_a_parse_error() {
        let err = Config::parse("fail_on = \"info\"").expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "preset = \"stubbles\"").expect("write");
        let config = Config::from_file(file.path()).expect("loads");
        assert_eq!(config.preset.as_deref(), Some("stubbles"));

        let missing = Config::from_file(std::path::Path::new("/nonexistent/stubble-lint.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
