mod cmd;
mod config;
mod console;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod prompt;
mod services;
mod update_check;
mod workflow;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::issues::{self, IssuesArgs};
use crate::config::config_file_path;
use crate::console::{Tone, paint};
use crate::error::AppResult;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(
    name = "jcommit",
    author,
    about = "Commit staged changes against a new or existing Jira ticket",
    disable_version_flag = true
)]
struct Cli {
    /// Use a custom configuration file path.
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show the current version and check for updates.
    #[arg(short = 'v', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive setup wizard (Jira credentials and branch rules).
    Setup,
    /// List open Jira issues assigned to you.
    Issues(IssuesArgs),
    /// Inspect the stored configuration.
    Config(ConfigArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();

    if let Err(error) = run().await {
        eprintln!("{}", paint(Tone::Error, &format!("Error: {error}")));
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    println!("{}", paint(Tone::Success, "~ jcommit ~"));
    if cli.version {
        println!("{}", paint(Tone::Info, &format!("jcommit v{VERSION}")));
        report_update().await;
        return Ok(());
    }
    if std::env::var_os(update_check::SKIP_ENV).is_none() {
        report_update().await;
    }
    println!();

    let config_path = config_file_path(cli.config.as_deref())?;
    match cli.command {
        Some(Commands::Setup) => cmd::setup::run(&config_path),
        Some(Commands::Issues(args)) => issues::run(&config_path, args).await,
        Some(Commands::Config(args)) => config_cmd::run(args.command, &config_path),
        None => cmd::commit::run(&config_path).await,
    }
}

async fn report_update() {
    if let Some(latest) = update_check::available_update(VERSION).await {
        println!(
            "{}",
            paint(
                Tone::Warning,
                &format!(
                    "Update available: v{VERSION} -> v{latest}. Run `cargo install jcommit` to update."
                )
            )
        );
    }
}
