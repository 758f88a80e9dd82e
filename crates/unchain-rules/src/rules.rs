//! Rule metadata

use serde::{Deserialize, Serialize};
use std::fmt;
use unchain_core::Severity;

/// A builtin lint rule and its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique identifier for the rule, `<category>/<name>`
    pub id: String,
    /// Severity of diagnostics from this rule
    pub severity: Severity,
    /// One-line description of what the rule checks
    pub description: String,
    /// Whether the rule can offer automatic fixes
    pub fixable: bool,
    /// Additional metadata for the rule
    pub metadata: RuleMetadata,
}

/// Metadata associated with a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleMetadata {
    pub id: String,
    /// Human-readable name for the rule
    pub name: String,
    /// Detailed description shown by `unchain rules explain`
    pub description: String,
    /// Default severity level
    pub severity: Severity,
    pub category: RuleCategory,
    /// Tags for organizing and filtering rules
    pub tags: Vec<String>,
    pub version: Option<String>,
    pub docs_url: Option<String>,
}

/// Categories for organizing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Syntax and semantic violations
    Correctness,
    /// Style and readability preferences
    Style,
}

impl RuleCategory {
    /// Slug used as the rule ID prefix
    pub fn slug(&self) -> &'static str {
        match self {
            RuleCategory::Correctness => "correctness",
            RuleCategory::Style => "style",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
