//! Syntax errors surfaced as diagnostics
//!
//! Parse errors never stop linting. They are reported next to rule
//! diagnostics so a file with a typo still gets its other findings.

use unchain_core::cst::SourceCode;
use unchain_core::{Diagnostic, DiagnosticCategory, Severity};

/// Rule ID for syntax errors
pub const PARSE_ERROR: &str = "correctness/parse-error";

/// One diagnostic per recorded parse error
pub fn check_parse_errors(source: &SourceCode) -> Vec<Diagnostic> {
    source
        .errors()
        .iter()
        .map(|error| {
            Diagnostic::new(
                PARSE_ERROR,
                Severity::Error,
                error.message.clone(),
                source.location(error.span.clone()),
            )
            .with_category(DiagnosticCategory::Correctness)
            .with_source("parser")
        })
        .collect()
}
