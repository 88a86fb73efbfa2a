use std::path::Path;
use std::sync::Arc;

use crate::cmd::load_complete_config;
use crate::console::Tone;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::jira::{JiraClient, JiraCredentials};
use crate::prompt::Prompter;
use crate::workflow::commit::commit_staged_changes;

pub async fn run(config_path: &Path) -> AppResult<()> {
    let config = load_complete_config(config_path)?;
    let cwd = std::env::current_dir()?;

    let git = Arc::new(GitCli::new(cwd));
    let issue_tracker = Arc::new(JiraClient::new(JiraCredentials::from_config(&config))?);
    let context = AppContext::new(config, git, issue_tracker);

    let mut prompter = Prompter::stdio();
    let outcome = commit_staged_changes(&context, &mut prompter).await?;

    let closing = if outcome.pushed {
        format!("Committed '{}' and pushed '{}'.", outcome.message, outcome.branch)
    } else {
        format!("Committed '{}'.", outcome.message)
    };
    prompter.notify(Tone::Success, &closing)?;
    Ok(())
}
