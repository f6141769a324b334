//! cpcode - commit-pinned code links
//!
//! Usage:
//!   cpcode copy src/lib.rs --start 10 --end 14   # Copy link + snippet to the clipboard
//!   cpcode copy src/lib.rs -s 10 --force-refresh # Ignore the cached base URL
//!   cpcode copy src/lib.rs -s 10 --print         # Print instead of copying
//!   cpcode clear-cache                           # Drop cached base URLs
//!   cpcode serve                                 # JSON-lines session for editors

mod actions;
mod clipboard;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cpcode_core::commands::{Clipboard, CopyLinkOptions};
use cpcode_core::config::{ConfigStore, CpcodeConfig};
use cpcode_core::context::AppContext;

use crate::clipboard::{NoClipboard, SystemClipboard};
use crate::session::Session;

#[derive(Parser)]
#[command(name = "cpcode")]
#[command(about = "Copy commit-pinned code links with snippets", long_about = None)]
struct Cli {
    /// Path to cpcode.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Lookup service endpoint (empty string uses the local git remote)
    #[arg(long, global = true)]
    api_endpoint: Option<String>,

    /// Seconds a resolved base URL stays cached
    #[arg(long, global = true, allow_negative_numbers = true)]
    cache_timeout: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a link and snippet for a range of lines
    Copy(CopyArgs),

    /// Clear all cached base URLs
    ClearCache,

    /// Serve JSON-line requests from an editor on stdin
    Serve {
        /// Return artifacts without writing to the clipboard
        #[arg(long)]
        no_clipboard: bool,
    },
}

#[derive(Args)]
struct CopyArgs {
    /// File containing the selection
    file: PathBuf,

    /// First selected line (1-based)
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    start: u32,

    /// Last selected line (1-based, defaults to --start)
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    end: Option<u32>,

    /// Directory to run git from (defaults to the file's directory)
    #[arg(long, short)]
    workspace: Option<PathBuf>,

    /// Ignore any cached base URL
    #[arg(long, short)]
    force_refresh: bool,

    /// Print the artifact to stdout instead of copying it
    #[arg(long, short)]
    print: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize tracing; stdout is reserved for artifacts and responses
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cpcode=info,cpcode_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Copy(args) => run_copy(&ctx, args),
        Commands::ClearCache => {
            ctx.clear_cache_command().execute();
            print_success(actions::CACHE_CLEARED_MESSAGE);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Serve { no_clipboard } => run_serve(&ctx, no_clipboard),
    }
}

/// Load the config file and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<CpcodeConfig> {
    let store = match &cli.config {
        Some(path) => ConfigStore::from_path(path.clone()),
        None => ConfigStore::from_default_location()?,
    };
    let mut config = store.load()?;
    tracing::debug!("Loaded config from {}", store.config_path().display());

    if let Some(endpoint) = &cli.api_endpoint {
        config = config.with_api_endpoint(endpoint.clone());
    }
    if let Some(timeout) = cli.cache_timeout {
        config = config.with_cache_timeout(timeout);
    }
    Ok(config)
}

fn run_copy(ctx: &AppContext, args: CopyArgs) -> Result<ExitCode> {
    let end = args.end.unwrap_or(args.start);
    if end < args.start {
        anyhow::bail!("--end ({}) must not be before --start ({})", end, args.start);
    }

    let file = actions::absolute_file(&args.file)?;
    let selection = actions::selection_from_file(&file, args.start - 1, end - 1)?;
    let mut options = CopyLinkOptions::new().with_force_refresh(args.force_refresh);
    if let Some(workspace) = args.workspace {
        options = options.with_workspace_root(workspace);
    }

    let mut clipboard: Box<dyn Clipboard> = if args.print {
        Box::new(NoClipboard)
    } else {
        Box::new(SystemClipboard::new())
    };

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let command = ctx.copy_link_command();
    let result = runtime.block_on(command.execute(Some(&selection), &options, clipboard.as_mut()));

    match result {
        Ok(report) => {
            if args.print {
                println!("{}", report.artifact.text());
            } else {
                print_success(&actions::copied_message(&report));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_error(&err.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_serve(ctx: &AppContext, no_clipboard: bool) -> Result<ExitCode> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let mut clipboard: Box<dyn Clipboard> = if no_clipboard {
        Box::new(NoClipboard)
    } else {
        Box::new(SystemClipboard::new())
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(ctx, &runtime, clipboard.as_mut()).run(stdin.lock(), stdout.lock())?;
    Ok(ExitCode::SUCCESS)
}

fn print_success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

fn print_error(message: &str) {
    eprintln!("{} {}", style("error:").red().bold(), message);
}
