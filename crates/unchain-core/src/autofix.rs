//! Autofix engine for automatic code corrections
//!
//! This module provides:
//! - Safe-by-default fix selection (`Applicability::Always`)
//! - Unsafe fixes behind an explicit opt-in (`Applicability::MaybeIncorrect`)
//! - Conflict resolution for overlapping edits within one pass
//! - A bounded fix-and-relint loop that validates every pass by re-parsing
//! - Unified diff rendering for dry-run previews
//!
//! A single pass never applies two edits that touch the same bytes. Edits that
//! overlap an accepted one are dropped and rediscovered by the next lint pass,
//! which is how nested rewrites (for example one chain link per pass) settle.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, warn};

use crate::cst::parse_program;
use crate::{Applicability, CodeSuggestion, Diagnostic, Location, Result, UnchainError};

/// Default cap on fix passes for [`fix_until_stable`]
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Represents a fix that can be applied to source code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// Identifier built from the rule and the fix position
    pub id: String,
    /// Description of what this fix does
    pub description: String,
    /// Location of the replaced range
    pub location: Location,
    /// The replacement text
    pub replacement: String,
    /// Applicability level (Always = safe, MaybeIncorrect = unsafe)
    pub applicability: Applicability,
    /// Rule ID that generated this fix
    pub rule_id: String,
    /// Priority for conflict resolution (higher wins on equal start offsets)
    pub priority: u32,
}

impl Fix {
    /// Create a fix from a diagnostic's code suggestion
    pub fn from_code_suggestion(suggestion: &CodeSuggestion, diagnostic: &Diagnostic) -> Self {
        Self {
            id: format!("{}@{}", diagnostic.rule_id, suggestion.location.offset),
            description: suggestion.message.clone(),
            location: suggestion.location.clone(),
            replacement: suggestion.replacement.clone(),
            applicability: suggestion.applicability,
            rule_id: diagnostic.rule_id.clone(),
            priority: match suggestion.applicability {
                Applicability::Always => 10,
                Applicability::MaybeIncorrect => 5,
            },
        }
    }

    /// Check if this fix is safe to apply automatically
    pub fn is_safe(&self) -> bool {
        matches!(self.applicability, Applicability::Always)
    }

    /// Byte range replaced by this fix
    pub fn range(&self) -> Range<usize> {
        self.location.range()
    }

    /// Check if this fix overlaps another one
    ///
    /// Two empty insertions at the same offset also conflict, since their
    /// relative order would be arbitrary.
    pub fn conflicts_with(&self, other: &Fix) -> bool {
        if self.location.file != other.location.file {
            return false;
        }

        let a = self.range();
        let b = other.range();
        if a.start == b.start {
            return true;
        }
        a.start < b.end && b.start < a.end
    }
}

/// Configuration for fix application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixConfig {
    /// Whether to apply unsafe fixes (requires --unsafe flag)
    pub apply_unsafe: bool,
    /// Whether to run in dry-run mode (don't modify files)
    pub dry_run: bool,
    /// Maximum number of fix passes before giving up
    pub max_passes: usize,
    /// Whether to re-parse and reject passes that introduce syntax errors
    pub validate_syntax: bool,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            apply_unsafe: false,
            dry_run: false,
            max_passes: DEFAULT_MAX_PASSES,
            validate_syntax: true,
        }
    }
}

impl FixConfig {
    /// Create a config that only applies safe fixes
    pub fn safe_only() -> Self {
        Self::default()
    }

    /// Create a config that applies all fixes (safe and unsafe)
    pub fn with_unsafe() -> Self {
        Self {
            apply_unsafe: true,
            ..Default::default()
        }
    }

    /// Create a config for dry-run preview
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Default::default()
        }
    }

    /// Whether a fix with this applicability may be applied
    pub fn allows(&self, applicability: Applicability) -> bool {
        self.apply_unsafe || applicability == Applicability::Always
    }
}

/// Collect one applicable fix per diagnostic
pub fn collect_fixes(diagnostics: &[Diagnostic], config: &FixConfig) -> Vec<Fix> {
    diagnostics
        .iter()
        .filter_map(|diagnostic| {
            diagnostic
                .suggestions
                .iter()
                .find(|s| config.allows(s.applicability))
                .map(|s| Fix::from_code_suggestion(s, diagnostic))
        })
        .collect()
}

/// Pick the fixes that can be applied together in one pass
///
/// Fixes are ordered by start offset (higher priority first on ties) and
/// every fix overlapping an already accepted one is deferred.
pub fn select_non_conflicting(mut fixes: Vec<Fix>) -> Vec<Fix> {
    fixes.sort_by(|a, b| {
        a.location
            .offset
            .cmp(&b.location.offset)
            .then_with(|| b.priority.cmp(&a.priority))
    });

    let mut accepted: Vec<Fix> = Vec::with_capacity(fixes.len());
    for fix in fixes {
        if let Some(blocking) = accepted.iter().find(|a| a.conflicts_with(&fix)) {
            debug!("Deferring fix {} (overlaps {})", fix.id, blocking.id);
            continue;
        }
        accepted.push(fix);
    }
    accepted
}

/// Apply a set of non-overlapping fixes to `source`
///
/// Fixes are applied back to front so earlier offsets stay valid.
pub fn apply_fixes_to_source(source: &str, fixes: &[Fix]) -> Result<String> {
    let mut ordered: Vec<&Fix> = fixes.iter().collect();
    ordered.sort_by(|a, b| b.location.offset.cmp(&a.location.offset));

    let mut output = source.to_string();
    let mut upper_bound = source.len();

    for fix in ordered {
        let range = fix.range();
        if range.end > upper_bound {
            return Err(UnchainError::autofix_error(format!(
                "Fix {} spans {}..{}, beyond the end of the text or into another fix",
                fix.id, range.start, range.end
            )));
        }
        if !source.is_char_boundary(range.start) || !source.is_char_boundary(range.end) {
            return Err(UnchainError::autofix_error(format!(
                "Fix {} does not start and end on character boundaries",
                fix.id
            )));
        }

        output.replace_range(range.clone(), &fix.replacement);
        upper_bound = range.start;
        debug!("Applied fix {} at {}..{}", fix.id, range.start, range.end);
    }

    Ok(output)
}

/// Outcome of [`fix_until_stable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvergenceReport {
    /// Text after the last accepted pass
    pub output: String,
    /// Number of passes whose edits were applied
    pub passes: usize,
    /// Total number of edits applied across all passes
    pub fixes_applied: usize,
    /// Diagnostics reported for `output`
    pub remaining: Vec<Diagnostic>,
    /// Whether no applicable fix was left when the loop stopped
    pub converged: bool,
    /// Why the last attempted pass was rejected, if it was
    pub validation_failure: Option<String>,
}

impl ConvergenceReport {
    /// Whether any edit was applied
    pub fn changed(&self) -> bool {
        self.fixes_applied > 0
    }
}

/// Lint, fix and re-lint until no applicable fix is left
///
/// `lint` is called on the current text at the start of every pass. The loop
/// stops when a pass finds nothing to apply, when `max_passes` passes have
/// been applied, or when a pass would introduce syntax errors (with
/// `validate_syntax`). In the latter two cases the report is not converged
/// and `output` holds the text of the last accepted pass.
pub fn fix_until_stable<F>(
    source: &str,
    config: &FixConfig,
    mut lint: F,
) -> Result<ConvergenceReport>
where
    F: FnMut(&str) -> Result<Vec<Diagnostic>>,
{
    let baseline_errors = if config.validate_syntax {
        parse_program(source).errors.len()
    } else {
        0
    };

    let mut current = source.to_string();
    let mut passes = 0;
    let mut fixes_applied = 0;

    loop {
        let diagnostics = lint(&current)?;
        let fixes = collect_fixes(&diagnostics, config);

        if fixes.is_empty() {
            debug!("Converged after {} pass(es)", passes);
            return Ok(ConvergenceReport {
                output: current,
                passes,
                fixes_applied,
                remaining: diagnostics,
                converged: true,
                validation_failure: None,
            });
        }

        if passes >= config.max_passes {
            warn!(
                "Fixes did not converge after {} pass(es); {} fix(es) still pending",
                passes,
                fixes.len()
            );
            return Ok(ConvergenceReport {
                output: current,
                passes,
                fixes_applied,
                remaining: diagnostics,
                converged: false,
                validation_failure: None,
            });
        }

        let selected = select_non_conflicting(fixes);
        let candidate = apply_fixes_to_source(&current, &selected)?;

        if config.validate_syntax {
            let errors = parse_program(&candidate).errors;
            if errors.len() > baseline_errors {
                let reason = format!(
                    "pass {} introduced a syntax error: {}",
                    passes + 1,
                    errors[0].message
                );
                warn!("Rejecting fix pass: {}", reason);
                return Ok(ConvergenceReport {
                    output: current,
                    passes,
                    fixes_applied,
                    remaining: diagnostics,
                    converged: false,
                    validation_failure: Some(reason),
                });
            }
        }

        passes += 1;
        fixes_applied += selected.len();
        debug!("Pass {} applied {} fix(es)", passes, selected.len());
        current = candidate;
    }
}

/// Generate a unified diff between original and modified content with colors
pub fn generate_unified_diff(original: &str, modified: &str, file_path: &Path) -> String {
    generate_unified_diff_plain(original, modified, file_path)
        .lines()
        .map(|line| {
            if line.starts_with("---") || line.starts_with("+++") {
                format!("\x1b[1m{line}\x1b[0m")
            } else if line.starts_with("@@") {
                format!("\x1b[36m{line}\x1b[0m")
            } else if line.starts_with('-') {
                format!("\x1b[31m{line}\x1b[0m")
            } else if line.starts_with('+') {
                format!("\x1b[32m{line}\x1b[0m")
            } else {
                line.to_string()
            }
        })
        .map(|line| line + "\n")
        .collect()
}

/// Generate a unified diff without colors (for file output)
pub fn generate_unified_diff_plain(original: &str, modified: &str, file_path: &Path) -> String {
    let display = file_path.display().to_string();
    similar::TextDiff::from_lines(original, modified)
        .unified_diff()
        .context_radius(3)
        .header(&display, &format!("{display} (fixed)"))
        .to_string()
}
