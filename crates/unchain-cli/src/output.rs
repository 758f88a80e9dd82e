//! Output formatting and reporting
//!
//! Human output renders each diagnostic with a code frame taken from the
//! text it was reported against, so frames stay correct after `--write`.

use colored::*;
use std::path::PathBuf;
use unchain_core::{Applicability, Diagnostic, Result, Severity, UnchainError};

use crate::OutputFormat;

/// Summary statistics for linting results
#[derive(Debug, Clone, Default)]
pub struct LintSummary {
    pub files_checked: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub hints: usize,
    /// Diagnostics `--write` could fix
    pub fixable: usize,
    pub fixes_applied: usize,
}

impl LintSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one diagnostic by severity
    pub fn record(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.info += 1,
            Severity::Hint => self.hints += 1,
        }
        if diagnostic.has_safe_fixes() {
            self.fixable += 1;
        }
    }

    pub fn total_issues(&self) -> usize {
        self.errors + self.warnings + self.info + self.hints
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn has_issues(&self) -> bool {
        self.total_issues() > 0
    }
}

/// Diagnostics of one file together with the text they point into
#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Unified diff of the fixes a dry run would apply
    pub diff: Option<String>,
}

/// Output formatter for different formats
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, use_colors: bool) -> Self {
        Self { format, use_colors }
    }

    /// Format and print linting results
    pub fn print_results(&self, results: &[FileResult], summary: &LintSummary) -> Result<()> {
        let rendered = match self.format {
            OutputFormat::Human => self.render_human(results, summary),
            OutputFormat::Json => self.render_json(results, summary)?,
            OutputFormat::Compact => self.render_compact(results, summary),
        };
        print!("{rendered}");
        Ok(())
    }

    fn render_human(&self, results: &[FileResult], summary: &LintSummary) -> String {
        let mut output = String::new();

        for diff in results.iter().filter_map(|result| result.diff.as_deref()) {
            output.push_str(diff);
            if !diff.ends_with('\n') {
                output.push('\n');
            }
            output.push('\n');
        }

        for result in results {
            for diagnostic in &result.diagnostics {
                output.push_str(&self.render_diagnostic(diagnostic, &result.source));
                output.push('\n');
            }
        }

        if !summary.has_issues() {
            output.push_str(&format!("{} No issues found\n", "✓".green()));
        }
        output.push_str(&self.render_summary(summary));
        output
    }

    fn render_summary(&self, summary: &LintSummary) -> String {
        let mut output = format!("\n{}\n", "Summary:".bold());
        output.push_str(&format!("  Files checked: {}\n", summary.files_checked));

        if summary.has_issues() {
            output.push_str("  Issues found:\n");
            if summary.errors > 0 {
                output.push_str(&format!("    Errors: {}\n", summary.errors.to_string().red()));
            }
            if summary.warnings > 0 {
                output.push_str(&format!(
                    "    Warnings: {}\n",
                    summary.warnings.to_string().yellow()
                ));
            }
            if summary.info > 0 {
                output.push_str(&format!("    Info: {}\n", summary.info.to_string().blue()));
            }
            if summary.hints > 0 {
                output.push_str(&format!("    Hints: {}\n", summary.hints.to_string().cyan()));
            }
        }

        if summary.fixable > 0 {
            output.push_str(&format!(
                "  Fixable: {} (run with --write)\n",
                summary.fixable.to_string().green()
            ));
        }
        if summary.fixes_applied > 0 {
            output.push_str(&format!(
                "  Fixes applied: {}\n",
                summary.fixes_applied.to_string().green()
            ));
        }
        output
    }

    /// `severity[rule]: message`, a code frame, then any suggestions
    fn render_diagnostic(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let mut output = format!(
            "{}{}: {}\n",
            self.paint(&diagnostic.severity.to_string(), diagnostic.severity),
            format!("[{}]", diagnostic.rule_id).dimmed(),
            diagnostic.message.bold()
        );

        output.push_str(&self.render_code_frame(diagnostic, source));

        for suggestion in &diagnostic.suggestions {
            let label = match suggestion.applicability {
                Applicability::Always => "Safe fix".green(),
                Applicability::MaybeIncorrect => "Unsafe fix".yellow(),
            };
            output.push_str(&format!(
                "  {} {}: {}\n",
                "i".blue(),
                label,
                suggestion.message
            ));
        }
        output
    }

    /// Code frame with two lines of context around the reported line
    fn render_code_frame(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let location = &diagnostic.location;
        let lines: Vec<&str> = source.lines().collect();

        let mut frame = format!("\n  {}─[{}]\n", "┌".blue(), location);
        frame.push_str(&format!("  {}\n", "│".blue()));

        let Some(line_text) = lines.get(location.line.saturating_sub(1)) else {
            return frame;
        };

        let start_line = location.line.saturating_sub(2).max(1);
        let end_line = (location.line + 2).min(lines.len());
        let gutter_width = end_line.to_string().len();

        for line_num in start_line..=end_line {
            let content = lines[line_num - 1];
            let marker = if line_num == location.line {
                self.paint(">", diagnostic.severity)
            } else {
                " ".normal()
            };
            frame.push_str(&format!(
                "{} {}{}{}\n",
                marker,
                format!("{line_num:>gutter_width$}").dimmed(),
                " │ ".dimmed(),
                content
            ));

            if line_num == location.line {
                let width = caret_width(location, line_text);
                frame.push_str(&format!(
                    "  {}{}{}{}\n",
                    " ".repeat(gutter_width),
                    " │ ".dimmed(),
                    " ".repeat(location.column.saturating_sub(1)),
                    self.paint(&"^".repeat(width), diagnostic.severity)
                ));
            }
        }
        frame
    }

    fn paint(&self, text: &str, severity: Severity) -> ColoredString {
        if !self.use_colors {
            return text.normal();
        }
        match severity {
            Severity::Error => text.red(),
            Severity::Warning => text.yellow(),
            Severity::Info => text.blue(),
            Severity::Hint => text.dimmed(),
        }
    }

    fn render_json(&self, results: &[FileResult], summary: &LintSummary) -> Result<String> {
        let diagnostics: Vec<&Diagnostic> = results
            .iter()
            .flat_map(|result| result.diagnostics.iter())
            .collect();

        let mut json = serde_json::json!({
            "files_checked": summary.files_checked,
            "issues": diagnostics,
            "summary": {
                "errors": summary.errors,
                "warnings": summary.warnings,
                "info": summary.info,
                "hints": summary.hints,
                "total": summary.total_issues(),
                "fixable": summary.fixable,
                "fixes_applied": summary.fixes_applied
            }
        });

        let diffs: Vec<serde_json::Value> = results
            .iter()
            .filter_map(|result| {
                result.diff.as_ref().map(|diff| {
                    serde_json::json!({ "file": result.path.display().to_string(), "diff": diff })
                })
            })
            .collect();
        if !diffs.is_empty() {
            json["diffs"] = serde_json::Value::Array(diffs);
        }

        let mut rendered = serde_json::to_string_pretty(&json).map_err(|e| {
            UnchainError::internal_error(format!("Failed to serialize JSON: {e}"))
        })?;
        rendered.push('\n');
        Ok(rendered)
    }

    fn render_compact(&self, results: &[FileResult], summary: &LintSummary) -> String {
        let mut output = String::new();

        for result in results {
            for diagnostic in &result.diagnostics {
                output.push_str(&format!(
                    "{}: {} {} [{}]\n",
                    diagnostic.location,
                    diagnostic.severity,
                    diagnostic.message,
                    diagnostic.rule_id
                ));
            }
        }

        if summary.has_issues() {
            output.push_str(&format!(
                "unchain: {} files, {} issues ({} errors, {} warnings)\n",
                summary.files_checked,
                summary.total_issues(),
                summary.errors,
                summary.warnings
            ));
        } else {
            output.push_str(&format!(
                "unchain: {} files checked, no issues\n",
                summary.files_checked
            ));
        }

        if summary.fixes_applied > 0 {
            output.push_str(&format!("unchain: {} fixes applied\n", summary.fixes_applied));
        }
        output
    }
}

/// Caret count under the reported line, clipped to the end of that line
fn caret_width(location: &unchain_core::Location, line_text: &str) -> usize {
    let line_chars = line_text.chars().count();
    let end_column = match (location.end_line, location.end_column) {
        (Some(end_line), Some(end_column)) if end_line == location.line => end_column,
        _ => line_chars + 1,
    };
    end_column
        .min(line_chars + 1)
        .saturating_sub(location.column)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unchain_core::SourceCode;
    use unchain_rules::RuleEngine;

    fn lint(text: &str) -> FileResult {
        let diagnostics = RuleEngine::new()
            .lint_source(std::path::Path::new("a.js"), text)
            .unwrap();
        FileResult {
            path: PathBuf::from("a.js"),
            source: text.to_string(),
            diagnostics,
            diff: None,
        }
    }

    fn summary_of(results: &[FileResult]) -> LintSummary {
        let mut summary = LintSummary::new();
        summary.files_checked = results.len();
        for diagnostic in results.iter().flat_map(|r| r.diagnostics.iter()) {
            summary.record(diagnostic);
        }
        summary
    }

    #[test]
    fn test_summary_counts() {
        let results = vec![lint("var = 1;\na = b = c;\n")];
        let summary = summary_of(&results);
        assert!(summary.errors >= 1);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.total_issues(), summary.errors + 1);
        assert!(summary.has_errors());
    }

    #[test]
    fn test_code_frame_points_at_link() {
        colored::control::set_override(false);
        let results = vec![lint("x = 1;\nvar a = b = c;\ny = 2;\n")];
        let formatter = OutputFormatter::new(OutputFormat::Human, false);
        let rendered = formatter.render_human(&results, &summary_of(&results));

        assert!(rendered.contains("warning[style/no-chained-assignments]: chained assignment"));
        assert!(rendered.contains("┌─[a.js:2:9]"));
        assert!(rendered.contains("> 2 │ var a = b = c;"));
        assert!(rendered.contains("    │         ^^^^^\n"));
        assert!(rendered.contains("Safe fix: Split the chained assignment"));
        assert!(rendered.contains("Files checked: 1"));
        assert!(rendered.contains("Fixable: 1 (run with --write)"));
    }

    #[test]
    fn test_caret_width_clips_multiline_ranges() {
        let source = SourceCode::parse("a.js", "a = b = [\n  1,\n];\n");
        let location = source.location(4..source.text().len() - 2);
        assert_eq!(location.line, 1);
        assert_eq!(caret_width(&location, "a = b = ["), 5);
    }

    #[test]
    fn test_json_shape() {
        let results = vec![lint("a = b = c;\n")];
        let formatter = OutputFormatter::new(OutputFormat::Json, false);
        let rendered = formatter
            .render_json(&results, &summary_of(&results))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["files_checked"], 1);
        assert_eq!(json["summary"]["warnings"], 1);
        assert_eq!(json["summary"]["fixable"], 1);
        assert_eq!(json["issues"][0]["rule_id"], "style/no-chained-assignments");
        assert_eq!(json["issues"][0]["location"]["column"], 5);
        assert!(json.get("diffs").is_none());
    }

    #[test]
    fn test_compact_lines() {
        let results = vec![lint("a = b = c;\n")];
        let formatter = OutputFormatter::new(OutputFormat::Compact, false);
        let rendered = formatter.render_compact(&results, &summary_of(&results));
        assert!(rendered.starts_with(
            "a.js:1:5: warning chained assignment detected [style/no-chained-assignments]\n"
        ));
        assert!(rendered.contains("unchain: 1 files, 1 issues (0 errors, 1 warnings)"));
    }
}
