//! Rule registry and token dispatch.

use crate::config::{Config, RuleConfig};
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::token::TokenKind;
use crate::types::{LintResult, Violation};

use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, trace, warn};

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer and its trigger table.
    ///
    /// Disabled rules are left out of the table. Rule names in the
    /// configuration that match no registered rule are logged.
    #[must_use]
    pub fn build(self) -> Analyzer {
        let config = self.config.unwrap_or_default();

        for name in config.rules.keys() {
            if !self.rules.iter().any(|r| r.name() == name) {
                warn!("Configuration for unknown rule: {}", name);
            }
        }

        let mut triggers: HashMap<TokenKind, Vec<usize>> = HashMap::new();
        for (index, rule) in self.rules.iter().enumerate() {
            if !config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            for &kind in rule.trigger_kinds() {
                triggers.entry(kind).or_default().push(index);
            }
        }

        Analyzer {
            rules: self.rules,
            triggers,
            config,
        }
    }
}

/// Dispatches tokens to the rules listening for their kind.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    triggers: HashMap<TokenKind, Vec<usize>>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Names of the enabled rules listening for `kind`, in registration order.
    #[must_use]
    pub fn listeners(&self, kind: TokenKind) -> Vec<&'static str> {
        self.triggers
            .get(&kind)
            .map(|indices| indices.iter().map(|&i| self.rules[i].name()).collect())
            .unwrap_or_default()
    }

    /// Checks one source unit.
    ///
    /// Violations come out in token order, then registration order, then
    /// the order each rule performs its checks.
    #[must_use]
    pub fn analyze_file(&self, ctx: &FileContext) -> Vec<Violation> {
        debug!("Analyzing: {}", ctx.path.display());

        let mut violations = Vec::new();
        for (index, token) in ctx.tokens.tokens().iter().enumerate() {
            let Some(listeners) = self.triggers.get(&token.kind) else {
                continue;
            };
            for &rule_index in listeners {
                let rule = &self.rules[rule_index];
                trace!(
                    "Dispatching {} to {} at {}:{}",
                    index,
                    rule.name(),
                    token.line,
                    token.column
                );
                let found = rule.check(ctx, index);
                violations.extend(self.apply_severity_override(rule.name(), found));
            }
        }
        violations
    }

    /// Checks several source units in parallel.
    ///
    /// Units are independent; the result keeps their input order.
    #[must_use]
    pub fn analyze(&self, files: &[FileContext]) -> LintResult {
        info!("Starting analysis of {} source unit(s)", files.len());

        let per_file: Vec<Vec<Violation>> =
            files.par_iter().map(|ctx| self.analyze_file(ctx)).collect();

        let mut result = LintResult::new();
        for violations in per_file {
            result.violations.extend(violations);
            result.files_checked += 1;
        }

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        result
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Gets the rule configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rules.get(rule_name)
    }
}
