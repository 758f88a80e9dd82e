//! Configuration types for unchain

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::autofix::{DEFAULT_MAX_PASSES, FixConfig};
use crate::{Result, Severity, UnchainError};

/// Root configuration document
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnchainConfig {
    /// JSON Schema reference for editor support
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "JSON Schema reference")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Linter configuration")]
    pub linter: Option<LinterConfiguration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Autofix configuration")]
    pub autofix: Option<AutofixConfiguration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Which files to lint")]
    pub files: Option<FilesConfiguration>,
}

/// Linter configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinterConfiguration {
    /// Enable/disable linter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable or disable the linter")]
    pub enabled: Option<bool>,

    /// Severity per rule id, e.g. `"style/no-chained-assignments": "error"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Rule severity configuration keyed by rule id")]
    pub rules: Option<BTreeMap<String, RuleSeverity>>,
}

/// Rule severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Disable the rule
    Off,
    /// Informational message
    Info,
    /// Warning (doesn't fail build)
    Warn,
    /// Error (fails build)
    Error,
}

impl RuleSeverity {
    /// Diagnostic severity for this level, `None` when the rule is off
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            RuleSeverity::Off => None,
            RuleSeverity::Info => Some(Severity::Info),
            RuleSeverity::Warn => Some(Severity::Warning),
            RuleSeverity::Error => Some(Severity::Error),
        }
    }
}

/// Autofix configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutofixConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Maximum fix-and-relint passes per file")]
    pub max_passes: Option<usize>,

    #[serde(rename = "unsafe", default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Also apply fixes marked unsafe")]
    pub apply_unsafe: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Reject fix passes that introduce syntax errors")]
    pub validate_syntax: Option<bool>,
}

/// Files configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilesConfiguration {
    /// Glob patterns to include
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Glob patterns for files to include")]
    pub include: Option<Vec<String>>,

    /// Glob patterns to exclude
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Glob patterns for files to exclude")]
    pub exclude: Option<Vec<String>>,
}

impl Default for LinterConfiguration {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            rules: None,
        }
    }
}

impl Default for AutofixConfiguration {
    fn default() -> Self {
        Self {
            max_passes: Some(DEFAULT_MAX_PASSES),
            apply_unsafe: Some(false),
            validate_syntax: Some(true),
        }
    }
}

impl Default for FilesConfiguration {
    fn default() -> Self {
        Self {
            include: Some(vec![
                "**/*.js".to_string(),
                "**/*.mjs".to_string(),
                "**/*.cjs".to_string(),
            ]),
            exclude: Some(vec!["**/node_modules/**".to_string()]),
        }
    }
}

impl UnchainConfig {
    /// Load a configuration file, choosing the format by extension
    ///
    /// `.json` and `.jsonc` are read as JSON5 so comments and trailing commas
    /// are accepted in both.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| UnchainError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed = match ext {
            Some("json") | Some("jsonc") => json5::from_str(&content).map_err(|e| e.to_string()),
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).map_err(|e| e.to_string())
            }
            _ => Err(
                "unsupported file extension (expected .json, .jsonc, .toml, .yaml or .yml)".into(),
            ),
        };

        parsed.map_err(|message| {
            UnchainError::config_error(format!("Invalid config '{}': {}", path.display(), message))
        })
    }

    /// Configuration written by `unchain config init`
    pub fn recommended() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert("style/no-chained-assignments".to_string(), RuleSeverity::Warn);

        Self {
            schema: None,
            linter: Some(LinterConfiguration {
                enabled: Some(true),
                rules: Some(rules),
            }),
            autofix: Some(AutofixConfiguration::default()),
            files: Some(FilesConfiguration::default()),
        }
    }

    /// Fill every unset field with its default
    pub fn resolved(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            linter: Some(self.linter_config()),
            autofix: Some(self.autofix_config()),
            files: Some(self.files_config()),
        }
    }

    /// Linter configuration with defaults applied
    pub fn linter_config(&self) -> LinterConfiguration {
        let defaults = LinterConfiguration::default();
        match &self.linter {
            Some(linter) => LinterConfiguration {
                enabled: linter.enabled.or(defaults.enabled),
                rules: linter.rules.clone(),
            },
            None => defaults,
        }
    }

    /// Autofix configuration with defaults applied
    pub fn autofix_config(&self) -> AutofixConfiguration {
        let defaults = AutofixConfiguration::default();
        match &self.autofix {
            Some(autofix) => AutofixConfiguration {
                max_passes: autofix.max_passes.or(defaults.max_passes),
                apply_unsafe: autofix.apply_unsafe.or(defaults.apply_unsafe),
                validate_syntax: autofix.validate_syntax.or(defaults.validate_syntax),
            },
            None => defaults,
        }
    }

    /// Files configuration with defaults applied
    pub fn files_config(&self) -> FilesConfiguration {
        let defaults = FilesConfiguration::default();
        match &self.files {
            Some(files) => FilesConfiguration {
                include: files.include.clone().or(defaults.include),
                exclude: files.exclude.clone().or(defaults.exclude),
            },
            None => defaults,
        }
    }

    /// Whether linting is enabled at all
    pub fn is_linter_enabled(&self) -> bool {
        self.linter_config().enabled.unwrap_or(true)
    }

    /// Configured severity of a rule, if any
    pub fn rule_severity(&self, rule_id: &str) -> Option<RuleSeverity> {
        self.linter
            .as_ref()
            .and_then(|linter| linter.rules.as_ref())
            .and_then(|rules| rules.get(rule_id))
            .copied()
    }

    /// Fix settings for the convergence loop
    pub fn fix_config(&self) -> FixConfig {
        let autofix = self.autofix_config();
        FixConfig {
            apply_unsafe: autofix.apply_unsafe.unwrap_or(false),
            dry_run: false,
            max_passes: autofix.max_passes.unwrap_or(DEFAULT_MAX_PASSES),
            validate_syntax: autofix.validate_syntax.unwrap_or(true),
        }
    }

    /// JSON Schema for configuration files
    pub fn json_schema() -> serde_json::Value {
        let mut schema = serde_json::to_value(schemars::schema_for!(UnchainConfig))
            .unwrap_or_else(|_| serde_json::json!({}));
        schema["title"] = serde_json::json!("unchain configuration");
        schema
    }
}
