//! CLI command implementations

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use unchain_core::{
    ConfigLoader, FixConfig, Result, UnchainConfig, UnchainError, generate_unified_diff,
    generate_unified_diff_plain, resolve_lint_targets,
};
use unchain_rules::{BuiltinRules, RuleEngine};

use crate::output::{FileResult, LintSummary, OutputFormatter};
use crate::{ConfigFormat, OutputFormat};

/// Options of `unchain lint`
#[derive(Debug, Clone)]
pub struct LintOptions {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub write: bool,
    pub dry_run: bool,
    pub apply_unsafe: bool,
    pub max_passes: Option<usize>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub error_on_warnings: bool,
    pub use_colors: bool,
}

impl LintOptions {
    fn fix_mode(&self) -> FixMode {
        if self.write {
            FixMode::Write
        } else if self.dry_run {
            FixMode::DryRun
        } else {
            FixMode::Off
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FixMode {
    Off,
    Write,
    DryRun,
}

/// What `unchain lint` found, used for the exit code
#[derive(Debug, Clone)]
pub struct LintOutcome {
    pub summary: LintSummary,
    /// Files whose fix loop stopped before reaching a fixed point
    pub unconverged: usize,
    error_on_warnings: bool,
}

impl LintOutcome {
    pub fn should_fail(&self) -> bool {
        self.summary.has_errors()
            || (self.error_on_warnings && self.summary.warnings > 0)
            || self.unconverged > 0
    }
}

/// Result of processing one file
struct ProcessedFile {
    result: FileResult,
    fixes_applied: usize,
    converged: bool,
}

/// Load the explicit config, or discover one next to the first path
fn load_config(paths: &[PathBuf], config_path: Option<&Path>) -> Result<UnchainConfig> {
    if let Some(path) = config_path {
        return ConfigLoader::load(Some(path), None);
    }

    let start_path = match paths.first() {
        Some(first) if first.is_file() => match first.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        },
        Some(first) if first.is_dir() => first.as_path(),
        _ => Path::new("."),
    };

    ConfigLoader::load(None, Some(start_path))
}

/// Lint command implementation
pub fn lint_command(options: &LintOptions, config_path: Option<&Path>) -> Result<LintOutcome> {
    debug!("Running lint command on paths: {:?}", options.paths);
    let start_time = Instant::now();

    let mut config = load_config(&options.paths, config_path)?;

    // CLI patterns replace the configured ones
    if !options.include.is_empty() {
        config.files.get_or_insert_with(Default::default).include = Some(options.include.clone());
    }
    if !options.exclude.is_empty() {
        config.files.get_or_insert_with(Default::default).exclude = Some(options.exclude.clone());
    }

    let cwd = std::env::current_dir()?;
    let files = resolve_lint_targets(&options.paths, &cwd, &config)?;
    info!("Found {} JavaScript file(s) to lint", files.len());

    let mut outcome = LintOutcome {
        summary: LintSummary::new(),
        unconverged: 0,
        error_on_warnings: options.error_on_warnings,
    };

    if files.is_empty() {
        println!("No JavaScript files found to lint");
        return Ok(outcome);
    }

    let engine = RuleEngine::from_config(&config);
    let mut fix_config = config.fix_config();
    fix_config.apply_unsafe |= options.apply_unsafe;
    fix_config.dry_run = options.dry_run;
    if let Some(max_passes) = options.max_passes {
        fix_config.max_passes = max_passes;
    }
    let mode = options.fix_mode();

    let processed: Vec<(PathBuf, Result<ProcessedFile>)> = files
        .par_iter()
        .map(|path| {
            let processed = process_file(&engine, path, mode, &fix_config, options.use_colors);
            (path.clone(), processed)
        })
        .collect();

    let mut results = Vec::with_capacity(processed.len());
    outcome.summary.files_checked = processed.len();
    for (path, processed) in processed {
        match processed {
            Ok(file) => {
                outcome.summary.fixes_applied += file.fixes_applied;
                if !file.converged {
                    outcome.unconverged += 1;
                }
                for diagnostic in &file.result.diagnostics {
                    outcome.summary.record(diagnostic);
                }
                results.push(file.result);
            }
            Err(e) => {
                error!("Error processing {}: {}", path.display(), e);
                outcome.summary.errors += 1;
            }
        }
    }

    let formatter = OutputFormatter::new(options.format, options.use_colors);
    formatter.print_results(&results, &outcome.summary)?;

    if outcome.unconverged > 0 {
        warn!(
            "{} file(s) still have fixable chained assignments; rerun or raise --max-passes",
            outcome.unconverged
        );
    }
    debug!("Completed in {:?}", start_time.elapsed());

    Ok(outcome)
}

/// Lint one file, fixing it first when a fix mode is active
fn process_file(
    engine: &RuleEngine,
    path: &Path,
    mode: FixMode,
    fix_config: &FixConfig,
    use_colors: bool,
) -> Result<ProcessedFile> {
    let original = fs::read_to_string(path).map_err(|e| UnchainError::io_error(path, e))?;

    if mode == FixMode::Off {
        let diagnostics = engine.lint_source(path, &original)?;
        return Ok(ProcessedFile {
            result: FileResult {
                path: path.to_path_buf(),
                source: original,
                diagnostics,
                diff: None,
            },
            fixes_applied: 0,
            converged: true,
        });
    }

    let report = engine.fix_source(path, &original, fix_config)?;
    if let Some(reason) = &report.validation_failure {
        warn!("{}: {}", path.display(), reason);
    }

    let result = match mode {
        FixMode::Write => {
            if report.changed() {
                fs::write(path, &report.output).map_err(|e| UnchainError::io_error(path, e))?;
                info!(
                    "Fixed {} ({} fix(es) in {} pass(es))",
                    path.display(),
                    report.fixes_applied,
                    report.passes
                );
            }
            FileResult {
                path: path.to_path_buf(),
                source: report.output,
                diagnostics: report.remaining,
                diff: None,
            }
        }
        // The file is untouched, so report against what is on disk
        _ => {
            let diff = report.changed().then(|| {
                if use_colors {
                    generate_unified_diff(&original, &report.output, path)
                } else {
                    generate_unified_diff_plain(&original, &report.output, path)
                }
            });
            let diagnostics = engine.lint_source(path, &original)?;
            FileResult {
                path: path.to_path_buf(),
                source: original,
                diagnostics,
                diff,
            }
        }
    };

    Ok(ProcessedFile {
        result,
        fixes_applied: report.fixes_applied,
        converged: report.converged,
    })
}

/// Rules list command implementation
pub fn rules_list_command(
    detailed: bool,
    category: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    debug!("Listing available rules");

    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => UnchainConfig::default(),
    };

    println!("Available Rules:");
    println!("================");

    let mut count = 0;
    for rule in BuiltinRules::all_rules() {
        let rule_category = rule.metadata.category.slug();
        if let Some(filter) = &category
            && rule_category != filter.as_str()
        {
            continue;
        }

        count += 1;

        if detailed {
            println!("\n{}", rule.id);
            println!("  Description: {}", rule.description);
            println!("  Category: {rule_category}");
            println!("  Default severity: {}", rule.severity);
            let status = match config.rule_severity(&rule.id) {
                Some(level) => format!("configured ({})", format!("{level:?}").to_lowercase()),
                None => "default".to_string(),
            };
            println!("  Status: {status}");
            if rule.fixable {
                println!("  Autofix: available");
            }
        } else {
            println!("  {} - {}", rule.id, rule.description);
        }
    }

    if count == 0 {
        println!("\nNo rules found matching the specified filters.");
    } else {
        println!("\nTotal: {count} rules");
    }

    Ok(())
}

/// Rules explain command implementation
pub fn rules_explain_command(rule_id: &str) -> Result<()> {
    debug!("Explaining rule: {}", rule_id);

    let Some(rule) = BuiltinRules::find(rule_id) else {
        return Err(UnchainError::rule_error(
            rule_id,
            "Unknown rule. Use 'unchain rules' to list all available rules.",
        ));
    };

    println!("Rule: {}", rule.id);
    println!("{}", "=".repeat(rule.id.len() + 6));
    println!();
    println!("Name: {}", rule.metadata.name);
    println!("Category: {}", rule.metadata.category);
    println!("Default severity: {}", rule.severity);
    println!("Tags: {}", rule.metadata.tags.join(", "));
    println!();
    println!("{}", rule.metadata.description);
    if rule.fixable {
        println!();
        println!("Autofix available: safe, applied with `unchain lint --write`");
    }

    Ok(())
}

/// Config init command implementation
pub fn config_init_command(format: ConfigFormat, force: bool) -> Result<()> {
    debug!("Initializing configuration file with format: {:?}", format);

    let filename = match format {
        ConfigFormat::Json => ".unchainrc.json",
        ConfigFormat::Toml => ".unchainrc.toml",
    };
    let config_path = PathBuf::from(filename);

    if config_path.exists() && !force {
        return Err(UnchainError::config_error(format!(
            "Configuration file '{filename}' already exists. Use --force to overwrite."
        )));
    }

    let config = UnchainConfig::recommended();
    let content = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(&config)
            .map_err(|e| UnchainError::config_error(format!("Failed to serialize JSON: {e}")))?,
        ConfigFormat::Toml => toml::to_string_pretty(&config)
            .map_err(|e| UnchainError::config_error(format!("Failed to serialize TOML: {e}")))?,
    };

    fs::write(&config_path, content).map_err(|e| UnchainError::io_error(&config_path, e))?;

    println!("Created configuration file: {filename}");
    println!("   Edit the file to customize your linting rules.");

    Ok(())
}

/// Config validate command implementation
pub fn config_validate_command(path: Option<&Path>) -> Result<()> {
    debug!("Validating configuration file: {:?}", path);

    let config = ConfigLoader::load(path, None)?;
    for id in config.linter_config().rules.unwrap_or_default().keys() {
        if BuiltinRules::find(id).is_none() {
            return Err(UnchainError::config_error(format!("Unknown rule '{id}'")));
        }
    }

    println!("Configuration is valid");
    println!("   Linter enabled: {}", config.is_linter_enabled());
    println!("   Max fix passes: {}", config.fix_config().max_passes);
    Ok(())
}

/// Config show command implementation
pub fn config_show_command(resolved: bool, config_path: Option<&Path>) -> Result<()> {
    debug!("Showing configuration (resolved: {})", resolved);

    let mut config = ConfigLoader::load(config_path, None)?;
    if resolved {
        config = config.resolved();
        println!("Resolved Configuration:");
        println!("=======================");
    } else {
        println!("Configuration:");
        println!("==============");
    }

    let json = serde_json::to_string_pretty(&config)
        .map_err(|e| UnchainError::config_error(format!("Failed to serialize config: {e}")))?;
    println!("{json}");

    Ok(())
}

/// Config schema command implementation
pub fn config_schema_command() -> Result<()> {
    let schema = serde_json::to_string_pretty(&UnchainConfig::json_schema())
        .map_err(|e| UnchainError::internal_error(format!("Failed to serialize schema: {e}")))?;
    println!("{schema}");
    Ok(())
}
