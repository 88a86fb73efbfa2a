use std::path::Path;

use clap::Args;

use crate::cmd::load_complete_config;
use crate::config::Configuration;
use crate::domain::issue::Issue;
use crate::error::AppResult;
use crate::infra::jira::{JiraClient, JiraCredentials};
use crate::services::IssueTrackerService;

#[derive(Args, Debug, Clone)]
pub struct IssuesArgs {
    /// Account ID or email to list issues for; defaults to the configured assignee, then email.
    #[arg(short, long)]
    pub assignee: Option<String>,
}

pub async fn run(config_path: &Path, args: IssuesArgs) -> AppResult<()> {
    let config = load_complete_config(config_path)?;
    let assignee = resolve_assignee(&config, args.assignee.as_deref());
    let client = JiraClient::new(JiraCredentials::from_config(&config))?;

    let issues = client.open_issues(&assignee).await?;
    if issues.is_empty() {
        println!("No open issues assigned to {assignee}.");
        return Ok(());
    }
    for issue in &issues {
        println!("{}", format_issue(issue));
    }
    Ok(())
}

fn resolve_assignee(config: &Configuration, explicit: Option<&str>) -> String {
    explicit
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| config.assignee_id())
        .unwrap_or(config.jira_email.trim())
        .to_string()
}

fn format_issue(issue: &Issue) -> String {
    format!("{:<12} [{}] {}", issue.key, issue.status, issue.summary)
}
