#![forbid(unsafe_code)]

mod cmd;
mod output;

use chrono::{DateTime, ParseError, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use flowstate_core::config;
use flowstate_core::error::ErrorCode;
use output::{CliError, OutputMode, fail, flag_format};
use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "flow: workflow state dashboard over issue and code-review activity",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output (same as `--format json`).
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Defaults to pretty on a terminal and text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Activity dataset to read instead of `[dashboard] dataset`.
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Reference instant for relative times and stall detection.
    #[arg(long, global = true, value_name = "RFC3339")]
    now: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Read",
        about = "List workflows for one state tab",
        long_about = "List workflows with their inferred state, reason, priority and last activity.",
        after_help = "EXAMPLES:\n    # Workflows waiting on you (default tab)\n    flow list\n\n    # Everything created in the last week\n    flow list --state all --range last-7d\n\n    # Emit machine-readable output\n    flow list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one workflow",
        long_about = "Show derived attributes and the full event timeline for a single workflow.",
        after_help = "EXAMPLES:\n    # Show a workflow\n    flow show WF-BOT-5001\n\n    # Emit machine-readable output\n    flow show WF-BOT-5001 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "Count workflows by state",
        long_about = "Count workflows in each state for a creation-date range.",
        after_help = "EXAMPLES:\n    # Counts across all time\n    flow status\n\n    # Counts for the last 24 hours\n    flow status --range last-24h"
    )]
    Status(cmd::status::StatusArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    flow completions bash\n\n    # Generate zsh completions\n    flow completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("FLOWSTATE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "flowstate=debug,flow=debug,info"
        } else {
            "flowstate=info,warn"
        })
    });

    let format = env::var("FLOWSTATE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(raw.trim()).map(|t| t.with_timezone(&Utc))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;
    let is_tty = io::stdout().is_terminal();
    let format = flag_format(cli.format, cli.json);

    let effective = match config::resolve_config(&project_root, format, is_tty) {
        Ok(effective) => effective,
        Err(err) => {
            let env_format = env::var("FORMAT").ok();
            let output = OutputMode::from_resolved(config::resolve_output(
                format,
                env_format.as_deref(),
                None,
                is_tty,
            ));
            return Err(fail(
                output,
                &CliError::coded(format!("{err:#}"), ErrorCode::ConfigParseError),
            ));
        }
    };
    let output = OutputMode::from_resolved(&effective.resolved_output);

    let now = match cli.now.as_deref() {
        None => Utc::now(),
        Some(raw) => parse_instant(raw).map_err(|err| {
            fail(
                output,
                &CliError::coded(
                    format!("invalid --now value '{raw}': {err}"),
                    ErrorCode::InvalidTimestamp,
                ),
            )
        })?,
    };

    let ctx = cmd::Context {
        output,
        config: effective.project,
        dataset_path: cli.data.unwrap_or(effective.dataset_path),
        now,
    };
    debug!(
        output = output.as_str(),
        dataset = %ctx.dataset_path.display(),
        now = %ctx.now,
        "resolved configuration"
    );

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, &ctx),
        Commands::Show(ref args) => cmd::show::run_show(args, &ctx),
        Commands::Status(ref args) => cmd::status::run_status(args, &ctx),
        Commands::Completions(_) => Ok(()),
    }
}
