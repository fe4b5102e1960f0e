//! Rule presets and configuration-driven rule construction.

use crate::naming::ClassExcluder;
use crate::{
    class_file_name, file_comment, single_declaration, switch_declaration, ClassFileName,
    FileComment, FileEqualsClassComment, SingleDeclaration, SpaceAfterCast, SwitchDeclaration,
    TrailingWhitespace, ValidClassName, VariableComment,
};
use stubble_lint_core::{Config, ConfigError, RuleBox};

/// Preset configurations for stubble-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every rule: doc blocks, switch layout, whitespace and naming.
    Stubbles,
    /// Doc blocks and switch layout only.
    Structural,
}

impl Preset {
    /// Looks up a preset by its config name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPreset`] for any other name.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "stubbles" => Ok(Self::Stubbles),
            "structural" => Ok(Self::Structural),
            _ => Err(ConfigError::UnknownPreset {
                name: name.to_string(),
            }),
        }
    }

    /// Returns the rules for this preset with default options.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Stubbles => stubbles_rules(),
            Self::Structural => structural_rules(),
        }
    }
}

/// Returns the structural rules.
///
/// Includes:
/// - `file-comment` (SL001)
/// - `variable-comment` (SL002)
/// - `switch-declaration` (SL003)
#[must_use]
pub fn structural_rules() -> Vec<RuleBox> {
    vec![
        Box::new(FileComment::new()),
        Box::new(VariableComment::new()),
        Box::new(SwitchDeclaration::new()),
    ]
}

/// Returns the full Stubbles rule set.
///
/// Includes the structural rules plus:
/// - `trailing-whitespace` (SL010)
/// - `space-after-cast` (SL011)
/// - `single-declaration` (SL012)
/// - `valid-class-name` (SL013)
/// - `class-file-name` (SL014)
/// - `file-equals-class-comment` (SL015)
#[must_use]
pub fn stubbles_rules() -> Vec<RuleBox> {
    let mut rules = structural_rules();
    rules.extend(peripheral_rules(ClassExcluder::default(), ClassExcluder::default()));
    rules
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    stubbles_rules()
}

/// Builds the rules of the configured preset with their configured options.
///
/// The preset defaults to `stubbles`. Recognised options:
///
/// - `file-comment.revision_marker`
/// - `switch-declaration.indent` and `switch-declaration.fallthrough_marker`
/// - `single-declaration.excluded_classes` and `class-file-name.excluded_classes`
///
/// Enabling, disabling and severity overrides are applied later by the
/// analyzer.
///
/// # Errors
///
/// Returns an error for an unknown preset or an invalid exclusion pattern.
pub fn configured_rules(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let preset = match config.preset.as_deref() {
        Some(name) => Preset::from_name(name)?,
        None => Preset::Stubbles,
    };

    let mut file = FileComment::new();
    if let Some(marker) = config
        .rule(file_comment::NAME)
        .and_then(|rc| rc.get_option::<String>("revision_marker"))
    {
        file = file.revision_marker(marker);
    }

    let mut switch = SwitchDeclaration::new();
    if let Some(rc) = config.rule(switch_declaration::NAME) {
        let indent = rc.get_usize("indent", switch.indent);
        let marker = rc
            .get_str("fallthrough_marker", &switch.fallthrough_marker)
            .to_string();
        switch = switch.indent(indent).fallthrough_marker(marker);
    }

    let mut rules: Vec<RuleBox> = vec![
        Box::new(file),
        Box::new(VariableComment::new()),
        Box::new(switch),
    ];

    if preset == Preset::Stubbles {
        rules.extend(peripheral_rules(
            excluder_for(config, single_declaration::NAME)?,
            excluder_for(config, class_file_name::NAME)?,
        ));
    }

    Ok(rules)
}

fn peripheral_rules(single: ClassExcluder, file_name: ClassExcluder) -> Vec<RuleBox> {
    vec![
        Box::new(TrailingWhitespace::new()),
        Box::new(SpaceAfterCast::new()),
        Box::new(SingleDeclaration::new().excluder(single)),
        Box::new(ValidClassName::new()),
        Box::new(ClassFileName::new().excluder(file_name)),
        Box::new(FileEqualsClassComment::new()),
    ]
}

/// `excluded_classes` replaces the default patterns when present.
fn excluder_for(config: &Config, rule_name: &str) -> Result<ClassExcluder, ConfigError> {
    match config.rule(rule_name) {
        Some(rc) if rc.options.contains_key("excluded_classes") => {
            ClassExcluder::new(rc.get_str_array("excluded_classes"))
        }
        _ => Ok(ClassExcluder::default()),
    }
}
