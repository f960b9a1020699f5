//! rustjair - Journal issue PDF harvester
//!
//! Walks a range of issue ids, scrapes each listing page for article PDF
//! links, resolves viewer pages and downloads every file.
//!
//! ## Usage
//!
//! ```bash
//! rustjair download --output ./papers --end-issue 5
//! rustjair -output ./papers -endIssue 5
//! rustjair list 1085
//! ```
//!
//! Without a subcommand the download options apply directly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustjair::download::FilenamePolicy;
use rustjair::http::{build_http_client, HttpOptions, DEFAULT_TIMEOUT_SECS};
use rustjair::issue::{
    IssueRange, IssueReference, DEFAULT_BASE_URL, DEFAULT_ISSUE_COUNT, DEFAULT_ORIGIN,
    DEFAULT_START_ISSUE,
};
use rustjair::pipeline::{Pipeline, PipelineConfig};
use rustjair::report::TracingReporter;
use rustjair::resolver::ResolverKind;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Journal issue PDF harvester
#[derive(Parser)]
#[command(name = "rustjair")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    download: DownloadArgs,
}

/// Options shared by every command that talks to the site
#[derive(clap::Args)]
struct SiteArgs {
    /// Listing URL prefix; the issue id is appended
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Origin used to resolve relative links
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    origin: String,

    /// Connect and idle-read timeout in seconds (0 disables it)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Proxy URL (e.g., http://127.0.0.1:7890)
    #[arg(long)]
    proxy: Option<String>,
}

#[derive(clap::Args)]
struct DownloadArgs {
    /// Directory to save downloaded PDFs
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Number of issues to include, counting from the start issue
    #[arg(long, alias = "endIssue", default_value_t = DEFAULT_ISSUE_COUNT)]
    end_issue: u32,

    /// First issue id
    #[arg(long, default_value_t = DEFAULT_START_ISSUE)]
    start_issue: u32,

    /// How listing links are turned into file URLs
    #[arg(long, default_value = "viewer", value_parser = ["viewer", "direct"])]
    resolver: String,

    /// Articles downloaded at the same time within an issue
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Keep spaces in file names instead of replacing them with underscores
    #[arg(long)]
    keep_spaces: bool,

    /// Do not download articles whose file already exists
    #[arg(long)]
    skip_existing: bool,

    /// Write a CSV manifest of every article outcome
    #[arg(long)]
    manifest: Option<PathBuf>,

    #[command(flatten)]
    site: SiteArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Download every article PDF of a range of issues (the default)
    Download(DownloadArgs),

    /// Print the articles of one issue as JSON
    List {
        /// Issue id
        issue: u32,

        #[command(flatten)]
        site: SiteArgs,
    },
}

/// Long options also accepted with a single dash, e.g. `-endIssue 3`
const SINGLE_DASH_LONGS: &[&str] = &["output", "endIssue"];

/// Rewrite `-output`/`-endIssue` (and their `=value` forms) to double-dash
/// spellings. Clap would otherwise read them as bundled short flags.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut after_terminator = false;
    args.into_iter()
        .map(|arg| {
            if after_terminator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                after_terminator = true;
                return arg;
            }
            let single_dash_long = text
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-'))
                .is_some_and(|rest| {
                    SINGLE_DASH_LONGS.iter().any(|name| {
                        rest.strip_prefix(name)
                            .is_some_and(|tail| tail.is_empty() || tail.starts_with('='))
                    })
                });
            if single_dash_long {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if cli.json_logs {
        fmt().json().with_env_filter(filter).with_target(true).init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .init();
    }

    match cli.command.unwrap_or(Commands::Download(cli.download)) {
        Commands::Download(args) => {
            let config = download_config(&args)?;
            run_download(config, &args.site).await
        }
        Commands::List { issue, site } => run_list(issue.into(), &site).await,
    }
}

// ============================================================================
// Commands
// ============================================================================

fn download_config(args: &DownloadArgs) -> Result<PipelineConfig> {
    Ok(PipelineConfig {
        output_dir: args.output.clone(),
        issues: IssueRange::new(args.start_issue, args.end_issue),
        base_url: args.site.base_url.clone(),
        origin: args.site.origin.clone(),
        resolver: args.resolver.parse::<ResolverKind>()?,
        concurrency: args.concurrency,
        filename_policy: FilenamePolicy {
            underscore_whitespace: !args.keep_spaces,
        },
        skip_existing: args.skip_existing,
        manifest: args.manifest.clone(),
    })
}

fn http_options(site: &SiteArgs) -> HttpOptions {
    HttpOptions {
        proxy: site.proxy.clone(),
        ..Default::default()
    }
    .with_timeout_secs(site.timeout)
}

async fn run_download(config: PipelineConfig, site: &SiteArgs) -> Result<()> {
    let client = build_http_client(&http_options(site)).context("Failed to set up HTTP client")?;
    let pipeline = Pipeline::new(config, client, Arc::new(TracingReporter))
        .context("Invalid configuration")?;

    let summary = pipeline
        .run()
        .await
        .context("Failed to create output directory or write manifest")?;

    println!(
        "\n✓ Harvest complete: {} saved, {} skipped, {} failed ({} of {} issues failed). Files in: {}",
        summary.saved,
        summary.skipped,
        summary.failed,
        summary.issues_failed,
        summary.issues_processed,
        pipeline.config().output_dir.display()
    );
    Ok(())
}

async fn run_list(issue: IssueReference, site: &SiteArgs) -> Result<()> {
    let config = PipelineConfig {
        base_url: site.base_url.clone(),
        origin: site.origin.clone(),
        ..Default::default()
    };
    let client = build_http_client(&http_options(site)).context("Failed to set up HTTP client")?;
    let pipeline = Pipeline::new(config, client, Arc::new(TracingReporter))
        .context("Invalid configuration")?;

    let entries = pipeline
        .list_issue(issue)
        .await
        .with_context(|| format!("Failed to list issue {}", issue))?;

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
