use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sprintboard::{config, export, tui};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "sprintboard")]
#[command(about = "Sprint overview report for an issue tracker")]
#[command(version)]
struct Args {
    /// Initialize configuration
    #[arg(long)]
    init: bool,

    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Project id to open on startup
    #[arg(long, short)]
    project: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a project's current sprint and write the report page without a terminal
    Export {
        /// Project id
        #[arg(long, short)]
        project: String,

        /// Only show this assignee's row
        #[arg(long, short)]
        assignee: Option<String>,

        /// Output file (defaults to export.path from the config)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn env_filter() -> Result<tracing_subscriber::EnvFilter> {
    Ok(tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("sprintboard=info".parse()?))
}

/// Log to stderr; used when no terminal UI owns the screen
fn init_stderr_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Log to a file in the config dir so output does not corrupt the TUI
fn init_file_logging() -> Result<PathBuf> {
    let dir = config::config_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join("sprintboard.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.init {
        init_stderr_logging()?;
        config::init_wizard().await?;
        return Ok(());
    }

    if let Some(Command::Export {
        project,
        assignee,
        output,
    }) = args.command
    {
        init_stderr_logging()?;
        let config = config::load(args.config.as_deref())?;
        let path = export::run_headless(&config, &project, assignee, output).await?;
        println!("{}", path.display());
        return Ok(());
    }

    let log_path = init_file_logging()?;
    tracing::debug!("Logging to {}", log_path.display());

    let config = config::load(args.config.as_deref())?;

    // Run TUI
    tui::run(config, args.project).await
}
