//! unchain CLI
//!
//! Command-line interface for the unchain JavaScript linter

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing::error;
use unchain_core::{Result, init_tracing_with};

#[derive(Parser)]
#[command(name = "unchain")]
#[command(about = "unchain: find and split chained assignments in JavaScript")]
#[command(version = unchain_core::VERSION)]
#[command(
    long_about = "unchain reports chained assignments such as `a = b = c` in JavaScript \
sources and rewrites them into one assignment per statement.\n\
\n\
Examples:\n  \
unchain lint                    # Lint current directory\n  \
unchain lint --write src/       # Lint and fix files in src/\n  \
unchain lint --dry-run app.js   # Show the fixes as a diff\n  \
unchain rules                   # List all available rules\n  \
unchain config init             # Initialize configuration file"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Explicit config file; skips discovery
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (.unchainrc.json/.unchainrc.toml)"
    )]
    config: Option<PathBuf>,

    /// Log level: -v warn, -vv info, -vvv debug, -vvvv trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Plain output without ANSI colors (also `NO_COLOR`)
    #[arg(long, global = true)]
    no_color: bool,

    /// Size of the rayon pool that lints files in parallel
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of worker threads (default: one per CPU core)"
    )]
    threads: Option<usize>,

    /// Print a completion script and exit
    #[arg(
        long,
        value_enum,
        help = "Print a shell completion script for the given shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint JavaScript files for chained assignments
    #[command(alias = "check")]
    Lint {
        /// Files, directories or glob patterns to lint
        #[arg(help = "Files or directories to process (default: current directory)")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(
            short,
            long,
            default_value = "human",
            help = "Output format for diagnostics"
        )]
        format: OutputFormat,

        /// Apply fixes in place, one chain link per pass until stable
        #[arg(long, help = "Split chained assignments in place")]
        write: bool,

        /// Print the fixes as a unified diff instead of writing them
        #[arg(
            long,
            help = "Show proposed fixes as a diff without applying them (dry run)",
            conflicts_with = "write"
        )]
        dry_run: bool,

        /// Also apply fixes marked unsafe
        #[arg(long, help = "Also apply fixes marked unsafe (with --write or --dry-run)")]
        r#unsafe: bool,

        /// Maximum number of fix passes per file
        #[arg(long, help = "Maximum fix-and-relint passes per file (default: 10)")]
        max_passes: Option<usize>,

        /// Include patterns (glob syntax), replacing `files.include`
        #[arg(
            long,
            help = "Include files matching pattern (can be used multiple times)"
        )]
        include: Vec<String>,

        /// Exclude patterns (glob syntax), replacing `files.exclude`
        #[arg(
            long,
            help = "Exclude files matching pattern (can be used multiple times)"
        )]
        exclude: Vec<String>,

        /// Exit with non-zero code on warnings too
        #[arg(long, help = "Exit with non-zero code when warnings are reported")]
        error_on_warnings: bool,
    },

    /// List the builtin rules or explain one
    Rules {
        #[command(subcommand)]
        action: Option<RulesAction>,

        /// Print severity, status and fixability too
        #[arg(long, help = "Show detailed information for each rule")]
        detailed: bool,

        /// Filter rules by category
        #[arg(long, help = "Filter rules by category (correctness, style)")]
        category: Option<String>,
    },

    /// Create, check and print configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print the unchain version
    #[command(alias = "ver")]
    Version {
        /// Include target and rule count
        #[arg(long, help = "Show version with build details")]
        detailed: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the recommended config to the current directory
    Init {
        /// Output format of the new file
        #[arg(long, default_value = "json", help = "Format of the new config file")]
        format: ConfigFormat,

        /// Replace a config file that already exists
        #[arg(long, help = "Replace an existing config file")]
        force: bool,
    },

    /// Load a config file and check its rule IDs
    Validate {
        /// File to check
        #[arg(help = "Path to configuration file (default: search for .unchainrc)")]
        path: Option<PathBuf>,
    },

    /// Print the effective configuration as JSON
    Show {
        /// Show resolved configuration with every default filled in
        #[arg(long, help = "Show resolved configuration with defaults applied")]
        resolved: bool,
    },

    /// Print the JSON Schema for configuration files
    Schema,
}

#[derive(Subcommand)]
enum RulesAction {
    /// One line per rule
    List,

    /// Long description of one rule
    Explain {
        /// Rule ID to explain
        #[arg(help = "Rule ID, e.g. style/no-chained-assignments")]
        rule_id: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Code frames with context lines
    Human,
    /// One JSON document with issues and summary
    Json,
    /// One line per issue
    Compact,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConfigFormat {
    /// `.unchainrc.json`
    Json,
    /// `.unchainrc.toml`
    Toml,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    let use_colors = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    colored::control::set_override(use_colors);

    // Errors only by default, more with each -v
    let log_level = match cli.verbose {
        0 => "unchain=error",
        1 => "unchain=warn",
        2 => "unchain=info",
        3 => "unchain=debug",
        _ => "unchain=trace",
    };
    init_tracing_with(log_level);

    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run_command(cli, use_colors) {
        error!("unchain failed: {}", e);
        std::process::exit(1);
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli, use_colors: bool) -> Result<()> {
    match cli.command {
        Some(Commands::Lint {
            paths,
            format,
            write,
            dry_run,
            r#unsafe,
            max_passes,
            include,
            exclude,
            error_on_warnings,
        }) => {
            let options = commands::LintOptions {
                paths,
                format,
                write,
                dry_run,
                apply_unsafe: r#unsafe,
                max_passes,
                include,
                exclude,
                error_on_warnings,
                use_colors,
            };
            let outcome = commands::lint_command(&options, cli.config.as_deref())?;
            if outcome.should_fail() {
                std::process::exit(1);
            }
            Ok(())
        }

        Some(Commands::Rules {
            action,
            detailed,
            category,
        }) => match action {
            Some(RulesAction::List) | None => {
                commands::rules_list_command(detailed, category, cli.config.as_deref())
            }
            Some(RulesAction::Explain { rule_id }) => commands::rules_explain_command(&rule_id),
        },

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { format, force } => commands::config_init_command(format, force),
            ConfigAction::Validate { path } => {
                commands::config_validate_command(path.or(cli.config).as_deref())
            }
            ConfigAction::Show { resolved } => {
                commands::config_show_command(resolved, cli.config.as_deref())
            }
            ConfigAction::Schema => commands::config_schema_command(),
        },

        Some(Commands::Version { detailed }) => {
            if detailed {
                println!("unchain {}", unchain_core::VERSION);
                println!("Build information:");
                println!("  Target: {}", std::env::consts::ARCH);
                println!("  OS: {}", std::env::consts::OS);
                println!("  Rules: {}", unchain_rules::BuiltinRules::all_rules().len());
            } else {
                println!("{}", unchain_core::VERSION);
            }
            Ok(())
        }

        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
