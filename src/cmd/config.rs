use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::Configuration;
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the stored configuration (token masked).
    Show,
    /// Print the resolved configuration file path.
    Path,
}

pub fn run(command: ConfigCommand, config_path: &Path) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(config_path),
        ConfigCommand::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

fn run_show(config_path: &Path) -> AppResult<()> {
    println!("Configuration file: {}", config_path.display());
    let Some(cfg) = Configuration::load(config_path)? else {
        println!("No configuration stored yet. Run `jcommit setup` to create one.");
        return Ok(());
    };

    for line in describe(&cfg) {
        println!("{line}");
    }
    Ok(())
}

fn describe(cfg: &Configuration) -> Vec<String> {
    vec![
        format!("Jira domain: {}", display_value(&cfg.jira_domain)),
        format!("Jira email: {}", display_value(&cfg.jira_email)),
        format!("Jira API token: {}", mask_secret(&cfg.jira_api_token)),
        format!(
            "Default assignee: {}",
            display_value(cfg.assignee_id().unwrap_or_default())
        ),
        format!("Project ID: {}", display_value(&cfg.jira_project_id)),
        format!("Issue type ID: {}", display_value(&cfg.jira_issue_type_id)),
        format!(
            "Protected branches: {}",
            cfg.protected_branches().join(", ")
        ),
    ]
}

fn display_value(value: &str) -> String {
    if value.trim().is_empty() {
        "<not set>".to_string()
    } else {
        value.to_string()
    }
}

fn mask_secret(value: &str) -> String {
    match value.chars().count() {
        0 => "<not set>".to_string(),
        len if len > 6 => {
            let prefix: String = value.chars().take(3).collect();
            let suffix: String = value.chars().skip(len - 3).collect();
            format!("{prefix}***{suffix}")
        }
        _ => "***".to_string(),
    }
}
