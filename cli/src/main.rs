//! CLI for govanity.
//!
//! This tool scans GitHub repositories for Go packages with vanity import
//! comments and writes static pages with `go-import` and `go-source` meta
//! tags for them.

use clap::builder::FalseyValueParser;
use clap::Parser;
use govanity::{ConfigError, RunSummary, Runner, RunnerError, VanityConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const AFTER_HELP: &str = r#"Searching usernames/organizations requires multiple GitHub API calls. Rate limiting is likely to occur
without providing an API token.

Example:

> govanity --prefix=pack.ag --search="vcabbage/go-tftp,packag" --out "$HOME/src/packag.github.io" --cname

This will search the repository vcabbage/go-tftp and all repositories in the packag organization for Go packages
with an import comment beginning with "pack.ag" (ie, 'package tftp // import "pack.ag/tftp"'). Appropriate
HTML with <go-import> and <go-source> tags will be written to $HOME/src/packag.github.io."#;

/// govanity - Generate static vanity import pages for Go packages hosted on GitHub.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
struct Args {
    /// Vanity URL prefix to match in import comments.
    #[arg(long, env = "GOVANITY_PREFIX")]
    prefix: String,

    /// Comma separated list of GitHub usernames/orgs/repos to search.
    #[arg(long, env = "GOVANITY_SEARCH")]
    search: String,

    /// Base directory to write generated files to.
    #[arg(long, env = "GOVANITY_OUT")]
    out: PathBuf,

    /// Write CNAME file for GitHub Pages.
    #[arg(long, env = "GOVANITY_CNAME", value_parser = FalseyValueParser::new())]
    cname: bool,

    /// GitHub API token to avoid rate limiting.
    #[arg(long, env = "GOVANITY_GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Report matching packages without writing any files.
    #[arg(long, env = "GOVANITY_DRY_RUN", value_parser = FalseyValueParser::new())]
    dry_run: bool,

    /// Maximum number of repositories processed at once.
    #[arg(long, env = "GOVANITY_CONCURRENCY", default_value_t = 1)]
    concurrency: usize,
}

/// Exit code used when the run is interrupted.
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    // Run the main logic
    match run(args, &cancel).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(RunnerError::Cancelled) => {
            warn!("Interrupted");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::FAILURE
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output) on stderr
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        // Keep stdout for the summary
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        // Falls back to "info" level if RUST_LOG is not set or invalid
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Cancels `cancel` on Ctrl-C so in-flight clones and API calls stop.
fn cancel_on_interrupt(cancel: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for interrupt signal");
            return;
        }
        warn!("Received interrupt, stopping");
        cancel.cancel();
    });
}

/// Validates the arguments into a run configuration.
fn build_config(args: Args) -> Result<VanityConfig, ConfigError> {
    VanityConfig::new(&args.prefix, &args.search, args.out)?
        .with_token(args.token)
        .with_cname(args.cname)
        .with_dry_run(args.dry_run)
        .with_concurrency(args.concurrency)
}

/// Main execution logic.
async fn run(args: Args, cancel: &CancellationToken) -> Result<RunSummary, RunnerError> {
    let config = build_config(args)?;
    let runner = Runner::new(config)?;
    runner.run(cancel).await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!(
        "  Repositories discovered: {}",
        summary.repositories_discovered
    );
    println!(
        "  Repositories extracted: {}",
        summary.repositories_extracted
    );
    println!("  Repositories failed: {}", summary.repositories_failed);
    println!("  Packages matched: {}", summary.packages_matched);

    if !summary.dry_run {
        println!("  Pages written: {}", summary.pages_written);
        println!("  Pages failed: {}", summary.pages_failed);
        println!(
            "  CNAME written: {}",
            if summary.cname_written { "yes" } else { "no" }
        );
    }
}
