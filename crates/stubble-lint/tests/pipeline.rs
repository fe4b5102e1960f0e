//! Integration test: configuration → preset rules → Analyzer → report.
//!
//! Sources are tokenized with the fixture lexer and doc comments are parsed
//! by the fixture comment parser, standing in for the host.

use std::io::Write;
use std::path::Path;
use stubble_lint::{analyzer_from_config, Config, ConfigError, FileContext, Severity};
use stubble_lint_core::test_support::{lex, FixtureCommentParser};

const CLEAN: &str = "<?php
/**
 * Does X.
 *
 * @package  net
 */

/**
 * Does X.
 *
 * @package  net
 */
class Foo
{
    /**
     * The name.
     *
     * @var  string
     */
    protected $name;
}
";

/// The clean unit with a trailing space on line 20.
fn trailing() -> String {
    CLEAN.replace("$name;", "$name; ")
}

const SWITCH: &str = "<?php
switch ($a) {
    case 1:
        $b = 1;
      break;

    default:
        $b = 2;
        break;
}
";

fn found(config: Config, units: &[(&str, &str)]) -> stubble_lint::LintResult {
    let analyzer = analyzer_from_config(config).expect("analyzer should build");
    let streams: Vec<_> = units.iter().map(|(_, source)| lex(source)).collect();
    let contexts: Vec<FileContext> = units
        .iter()
        .zip(&streams)
        .map(|((path, _), tokens)| FileContext::new(Path::new(path), tokens, &FixtureCommentParser))
        .collect();
    analyzer.analyze(&contexts)
}

fn codes_and_lines(result: &stubble_lint::LintResult) -> Vec<(&str, usize)> {
    result
        .violations
        .iter()
        .map(|v| (v.code.as_str(), v.location.line))
        .collect()
}

// ── Default preset ──

#[test]
fn clean_unit_passes_every_rule() {
    let result = found(Config::default(), &[("lib/Foo.php", CLEAN)]);
    assert!(result.violations.is_empty(), "{:?}", result.violations);
    assert_eq!(result.files_checked, 1);
}

#[test]
fn violations_follow_token_order() {
    let result = found(Config::default(), &[("lib/Bar.php", trailing().as_str())]);
    assert_eq!(codes_and_lines(&result), [("SL014", 13), ("SL010", 20)]);
    assert_eq!(
        result.violations[0].message,
        "Class name (Foo) doesn't match filename. Expected \"class Bar\"."
    );
    assert!(result.has_errors());
}

#[test]
fn units_keep_input_order() {
    let source = trailing();
    let result = found(
        Config::default(),
        &[
            ("a/Bar.php", source.as_str()),
            ("b/Foo.php", CLEAN),
            ("c/Foo.php", source.as_str()),
        ],
    );
    assert_eq!(result.files_checked, 3);
    let files: Vec<String> = result
        .violations
        .iter()
        .map(|v| v.location.file.display().to_string())
        .collect();
    assert_eq!(files, ["a/Bar.php", "a/Bar.php", "c/Foo.php"]);
}

// ── Configuration ──

#[test]
fn config_file_overrides_and_disables_rules() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
fail_on = "error"

[rules.class-file-name]
severity = "warning"

[rules.trailing-whitespace]
enabled = false
"#
    )
    .expect("write config");

    let config = Config::from_file(file.path()).expect("config should load");
    let fail_on = config.fail_on_severity();
    let result = found(config, &[("Bar.php", trailing().as_str())]);

    assert_eq!(codes_and_lines(&result), [("SL014", 13)]);
    assert_eq!(result.violations[0].severity, Severity::Warning);
    assert!(!result.has_violations_at(fail_on));
    assert!(result.has_violations_at(Severity::Warning));
    assert_eq!(result.count_by_severity(), (0, 1));
}

#[test]
fn structural_preset_with_rule_options() {
    let config = Config::parse(
        r#"
preset = "structural"

[rules.file-comment]
enabled = false
"#,
    )
    .expect("config should parse");
    let result = found(config, &[("Foo.php", SWITCH)]);
    insta::assert_snapshot!(result.format_report(Severity::Warning).trim(), @r"
    === stubble-lint: 1 violation(s) ===

    SL003 switch-declaration at Foo.php:5:7
      error: BREAK statement must be indented 4 spaces from CASE keyword

    Total: 1 error(s), 0 warning(s) in 1 file(s)
    ");

    let config = Config::parse(
        r#"
preset = "structural"

[rules.file-comment]
enabled = false

[rules.switch-declaration]
indent = 2
"#,
    )
    .expect("config should parse");
    let result = found(config, &[("Foo.php", SWITCH)]);
    assert!(!result.violations.is_empty());
    assert!(result
        .violations
        .iter()
        .all(|v| v.rule == "switch-declaration"));
}

#[test]
fn invalid_configuration_is_reported() {
    let config = Config::parse("preset = \"pear\"").expect("config should parse");
    assert!(matches!(
        analyzer_from_config(config),
        Err(ConfigError::UnknownPreset { .. })
    ));

    let config = Config::parse("[rules.class-file-name]\nexcluded_classes = [\"[Foo\"]\n")
        .expect("config should parse");
    assert!(matches!(
        analyzer_from_config(config),
        Err(ConfigError::InvalidPattern { .. })
    ));
}

// ── Output ──

#[test]
fn result_renders_as_json() {
    let result = found(Config::default(), &[("Bar.php", trailing().as_str())]);
    let json = result.to_json().expect("serializes");
    assert!(json.contains("\"code\": \"SL014\""));
    assert!(json.contains("\"severity\": \"error\""));
    assert!(json.contains("\"files_checked\": 1"));

    let diagnostic = stubble_lint::ViolationDiagnostic::from(&result.violations[1]);
    assert_eq!(
        diagnostic.to_string(),
        "[SL010] Trailing Whitespace at the end of line is not allowed"
    );
}
