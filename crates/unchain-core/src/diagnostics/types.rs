//! Diagnostic types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One finding of a rule in one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule that produced it, e.g. `style/no-chained-assignments`
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    /// Where the finding points; for chains this is the inner assignment
    pub location: Location,
    /// Edits that would resolve it, possibly none
    pub suggestions: Vec<CodeSuggestion>,
    /// What produced it when it was not a tree rule (`"parser"`)
    pub source: Option<String>,
    pub category: Option<DiagnosticCategory>,
}

/// Diagnostic severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Hint,
    Warning,
    /// Fails `unchain lint`
    Error,
}

/// A span of a file, both as line/column and as byte offsets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    /// 1-based
    pub line: usize,
    /// 1-based, counted in characters
    pub column: usize,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
    /// Start of the span in bytes
    pub offset: usize,
    /// Span length in bytes
    pub length: usize,
}

/// Whether a suggestion may be applied without review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Applicability {
    /// Keeps behavior; applied by `--write`
    Always,
    /// May change behavior; only applied with `--unsafe`
    MaybeIncorrect,
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Applicability::Always => write!(f, "safe"),
            Applicability::MaybeIncorrect => write!(f, "unsafe"),
        }
    }
}

/// A text edit attached to a diagnostic
///
/// Applying it replaces `location.offset .. location.offset + location.length`
/// with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSuggestion {
    pub message: String,
    pub replacement: String,
    pub location: Location,
    pub applicability: Applicability,
}

/// Rule family a diagnostic belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    /// Code that does not parse
    Correctness,
    /// Readability issues such as chained assignments
    Style,
}

impl DiagnosticCategory {
    /// Prefix used in rule IDs
    pub fn slug(&self) -> &str {
        match self {
            DiagnosticCategory::Correctness => "correctness",
            DiagnosticCategory::Style => "style",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl Diagnostic {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            location,
            suggestions: Vec::new(),
            source: None,
            category: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: CodeSuggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    pub fn with_category(mut self, category: DiagnosticCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Override the severity, e.g. from configuration
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether `--write` could fix it without `--unsafe`
    pub fn has_safe_fixes(&self) -> bool {
        self.suggestions
            .iter()
            .any(|suggestion| matches!(suggestion.applicability, Applicability::Always))
    }

    pub fn is_fixable(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

impl Location {
    /// Location without end position
    pub fn new(file: PathBuf, line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            file,
            line,
            column,
            end_line: None,
            end_column: None,
            offset,
            length,
        }
    }

    /// Byte range covered by this location
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.length
    }
}

impl CodeSuggestion {
    pub fn new(
        message: impl Into<String>,
        replacement: impl Into<String>,
        location: Location,
        applicability: Applicability,
    ) -> Self {
        Self {
            message: message.into(),
            replacement: replacement.into(),
            location,
            applicability,
        }
    }

    /// Suggestion applied by a plain `--write`
    pub fn safe(
        message: impl Into<String>,
        replacement: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(message, replacement, location, Applicability::Always)
    }

    /// Suggestion that needs `--unsafe`
    pub fn unsafe_fix(
        message: impl Into<String>,
        replacement: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::new(
            message,
            replacement,
            location,
            Applicability::MaybeIncorrect,
        )
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Hint => "hint",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> Location {
        Location::new(PathBuf::from("a.js"), 1, 9, 8, 5)
    }

    #[test]
    fn test_location_display_and_range() {
        let loc = location();
        assert_eq!(loc.to_string(), "a.js:1:9");
        assert_eq!(loc.range(), 8..13);
    }

    #[test]
    fn test_safe_fix_detection() {
        let diagnostic = Diagnostic::new("style/x", Severity::Warning, "msg", location());
        assert!(!diagnostic.is_fixable());

        let unsafe_only = diagnostic
            .clone()
            .with_suggestion(CodeSuggestion::unsafe_fix("fix", "y", location()));
        assert!(unsafe_only.is_fixable());
        assert!(!unsafe_only.has_safe_fixes());

        let safe = diagnostic.with_suggestion(CodeSuggestion::safe("fix", "y", location()));
        assert!(safe.has_safe_fixes());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_json_shape() {
        let diagnostic = Diagnostic::new("style/x", Severity::Error, "msg", location())
            .with_category(DiagnosticCategory::Style);
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["rule_id"], "style/x");
        assert_eq!(json["severity"], "Error");
        assert_eq!(json["location"]["line"], 1);
        assert_eq!(json["category"], "Style");
    }
}
