//! Rule engine
//!
//! Walks the syntax tree in preorder, hands every assignment to the enabled
//! builtin rules, and drives the fix loop with itself as the linter.

use std::path::Path;

use tracing::{debug, warn};
use unchain_core::cst::SourceCode;
use unchain_core::cst::ast::{AssignExpr, AstNode};
use unchain_core::{
    ConvergenceReport, Diagnostic, FixConfig, Result, UnchainConfig, fix_until_stable,
};

use crate::builtin::{BuiltinRules, chained_assignments, parse_errors};
use crate::rules::Rule;

/// Runs the builtin rules over parsed sources
#[derive(Debug, Clone)]
pub struct RuleEngine {
    /// Enabled rules with their effective severity
    rules: Vec<Rule>,
    enabled: bool,
}

impl RuleEngine {
    /// Engine with every builtin rule at its default severity
    pub fn new() -> Self {
        Self::from_config(&UnchainConfig::default())
    }

    /// Engine configured from `linter` settings
    ///
    /// A configured severity replaces the rule default and `off` drops the
    /// rule. Unknown rule IDs are logged and ignored.
    pub fn from_config(config: &UnchainConfig) -> Self {
        if let Some(configured) = config.linter_config().rules {
            for id in configured.keys() {
                if BuiltinRules::find(id).is_none() {
                    warn!("Unknown rule '{}' in configuration", id);
                }
            }
        }

        let rules = BuiltinRules::all_rules()
            .into_iter()
            .filter_map(|mut rule| match config.rule_severity(&rule.id) {
                Some(level) => match level.to_severity() {
                    Some(severity) => {
                        rule.severity = severity;
                        Some(rule)
                    }
                    None => {
                        debug!("Rule '{}' disabled by configuration", rule.id);
                        None
                    }
                },
                None => Some(rule),
            })
            .collect();

        Self {
            rules,
            enabled: config.is_linter_enabled(),
        }
    }

    /// Enabled rules with their effective severity
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Run the AST rules over a parsed source
    ///
    /// Diagnostics come back ordered by offset. Syntax errors are not
    /// included; see [`RuleEngine::lint_source`].
    pub fn lint(&self, source: &SourceCode) -> Result<Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();
        if !self.enabled {
            return Ok(diagnostics);
        }

        for node in source.root().descendants() {
            let Some(assign) = AssignExpr::cast(node) else {
                continue;
            };

            for rule in &self.rules {
                let found = match rule.id.as_str() {
                    chained_assignments::NO_CHAINED_ASSIGNMENTS => {
                        chained_assignments::check_chained_assignment(source, &assign)?
                    }
                    // Parse errors come from the parse result, not from nodes
                    _ => None,
                };
                if let Some(diagnostic) = found {
                    diagnostics.push(diagnostic.with_severity(rule.severity));
                }
            }
        }

        diagnostics.sort_by_key(|diagnostic| diagnostic.location.offset);
        debug!(
            "{}: {} diagnostic(s)",
            source.file().display(),
            diagnostics.len()
        );
        Ok(diagnostics)
    }

    /// Parse and lint a file's contents
    ///
    /// Syntax errors are reported as `correctness/parse-error` diagnostics
    /// and linting continues on the recovered tree.
    pub fn lint_source(&self, path: &Path, text: &str) -> Result<Vec<Diagnostic>> {
        if !self.enabled {
            return Ok(Vec::new());
        }

        let source = SourceCode::parse(path, text);
        let mut diagnostics = match self.rule(parse_errors::PARSE_ERROR) {
            Some(rule) => parse_errors::check_parse_errors(&source)
                .into_iter()
                .map(|diagnostic| diagnostic.with_severity(rule.severity))
                .collect(),
            None => Vec::new(),
        };

        diagnostics.extend(self.lint(&source)?);
        diagnostics.sort_by_key(|diagnostic| diagnostic.location.offset);
        Ok(diagnostics)
    }

    /// Fix a file's contents until no applicable fix remains
    pub fn fix_source(
        &self,
        path: &Path,
        text: &str,
        config: &FixConfig,
    ) -> Result<ConvergenceReport> {
        fix_until_stable(text, config, |current| self.lint_source(path, current))
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
