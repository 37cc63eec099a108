//! # Commands
//!
//! - `sift scan` - Match files against user-defined regular expressions
//! - `sift check` - Compile the configured patterns and list them

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod binary;
mod commands;
mod files;
mod setup;
mod ui;

use std::path::PathBuf;

use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use console::style;
pub use sift_core::CONFIG_FILENAME;

use crate::ui::colors;

const REPO_URL: &str = "https://github.com/sift-rs/sift";

#[derive(Debug, Parser)]
#[command(
    name = "sift",
    version,
    styles = ui::clap_styles(),
    arg_required_else_help = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    #[command(visible_alias = "c")]
    Check(CheckArgs),
}

/// Output format for scan and check results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Pattern sources shared by every command. Flags override `.sift.toml`.
#[derive(Debug, Args)]
pub struct PatternArgs {
    /// A single regular expression to match.
    #[arg(short = 'p', long = "pattern", value_name = "REGEX")]
    pub pattern: Option<String>,

    /// File with one regular expression per line.
    #[arg(short = 'P', long = "pattern-file", value_name = "PATH")]
    pub pattern_file: Option<PathBuf>,

    /// Path to `.sift.toml` configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `sift scan` command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Paths to scan.
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    #[allow(missing_docs, reason = "flattened clap args are documented on PatternArgs")]
    #[command(flatten)]
    pub patterns: PatternArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increase output verbosity (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Always exit with code 0, even when patterns match.
    #[arg(long)]
    pub exit_zero: bool,

    /// Glob patterns to exclude from scanning.
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Skip `.gitignore` rules when collecting files.
    #[arg(long)]
    pub skip_gitignore: bool,

    /// Skip files larger than this size in bytes.
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Number of parallel scanning threads.
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Arguments for the `sift check` command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[allow(missing_docs, reason = "flattened clap args are documented on PatternArgs")]
    #[command(flatten)]
    pub patterns: PatternArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

fn main() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let cli = parse_cli();

    if let Err(e) = run(cli.command) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(ui::exit::ERROR);
    }
}

fn parse_cli() -> Cli {
    let cmd = Cli::command().about(build_about()).after_help(build_after_help());

    let matches = cmd.get_matches();

    #[expect(clippy::expect_used, reason = "clap already validated args; this cannot fail")]
    Cli::from_arg_matches(&matches).expect("failed to parse arguments")
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Scan(args) => commands::scan::run(&args),
        Command::Check(args) => commands::check::run(&args),
    }
}

fn build_about() -> String {
    format!(
        r"
  {} matches files against your own regular expressions.

  Every expression that matches becomes one finding, listing
  each file it matched in.",
        colors::accent().apply_to("sift").bold()
    )
}

fn build_after_help() -> String {
    format!(
        r"
  {}
    sift scan . -p 'api[_-]?key'       Scan current directory
    sift scan src/ -P regexes.txt      Patterns from a file
    sift scan . --format json          Output as JSON
    sift check -P regexes.txt          Validate patterns

  Learn more: {}",
        style("Examples:").bold(),
        colors::accent().apply_to(REPO_URL).underlined()
    )
}
