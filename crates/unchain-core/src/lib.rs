//! Unchain Core
//!
//! Core engine for the `unchain` JavaScript linter: a lossless Rowan-based CST
//! with ESTree-style accessors, diagnostics, the autofix convergence loop,
//! configuration and file discovery.

pub mod autofix;
pub mod config;
pub mod cst; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod result;

pub use autofix::{
    ConvergenceReport, DEFAULT_MAX_PASSES, Fix, FixConfig, apply_fixes_to_source, collect_fixes,
    fix_until_stable, generate_unified_diff, generate_unified_diff_plain, select_non_conflicting,
};
// Configuration system
pub use config::{
    AutofixConfiguration, CONFIG_FILE_NAMES, ConfigLoader, FilesConfiguration,
    LinterConfiguration, RuleSeverity, UnchainConfig,
};
pub use cst::SourceCode;
pub use diagnostics::{
    Applicability, CodeSuggestion, Diagnostic, DiagnosticCategory, Location, Severity, SourceMap,
};
pub use discovery::{DefaultFileDiscovery, FileDiscovery, resolve_lint_targets};
pub use error::UnchainError;
pub use result::Result;

/// Initialize the tracing subscriber for logging
///
/// `RUST_LOG` wins over the default directive `unchain=info`.
pub fn init_tracing() {
    init_tracing_with("unchain=info");
}

/// Initialize tracing with an explicit default filter directive
///
/// Logs go to stderr so machine-readable output on stdout stays clean.
/// Calling this more than once is harmless.
pub fn init_tracing_with(default_directive: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
