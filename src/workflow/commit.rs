use std::io::{BufRead, Write};

use tracing::debug;

use crate::console::Tone;
use crate::context::AppContext;
use crate::domain::branch::BranchAction;
use crate::domain::commit::CommitMessage;
use crate::domain::issue::TicketKey;
use crate::error::{AppError, AppResult};
use crate::prompt::{Prompter, TextOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub message: CommitMessage,
    pub branch: String,
    pub pushed: bool,
}

/// Commits the staged changes against a new or existing Jira issue and
/// optionally pushes the branch.
pub async fn commit_staged_changes<R: BufRead, W: Write>(
    ctx: &AppContext,
    prompter: &mut Prompter<R, W>,
) -> AppResult<CommitOutcome> {
    prompter.notify(Tone::Info, "Committing changes to git")?;

    if !ctx.version_control.is_repository().await? {
        return Err(AppError::Precondition("Not in a git repository!".to_string()));
    }
    let mut branch = ctx.version_control.current_branch().await?;
    if branch.is_empty() {
        return Err(AppError::Precondition(
            "Failed to get current branch".to_string(),
        ));
    }
    prompter.notify(Tone::Info, &format!("You are on branch '{branch}'"))?;

    branch = select_branch(ctx, prompter, branch).await?;

    if !ctx.version_control.has_staged_changes().await? {
        return Err(AppError::Precondition(
            "No staged changes found. Please stage your changes before committing.".to_string(),
        ));
    }

    if ctx.config.is_protected(&branch) {
        return Err(AppError::Precondition(format!(
            "Operation cancelled. '{branch}' is protected."
        )));
    }

    let message = compose_message(ctx, prompter).await?;

    prompter.notify(Tone::Info, "Committing...")?;
    ctx.version_control.commit(&message).await?;
    prompter.notify(
        Tone::Success,
        &format!("Git commit successful with message: {message}"),
    )?;

    let pushed = if prompter.ask_yes_no("Push changes to the remote repository now?")? {
        branch = ctx.version_control.current_branch().await?;
        prompter.notify(Tone::Info, "Pushing to remote...")?;
        ctx.version_control.push(&branch).await?;
        prompter.notify(Tone::Success, "Git push successful")?;
        true
    } else {
        prompter.notify(Tone::Info, "Commit was not pushed to remote.")?;
        false
    };

    Ok(CommitOutcome {
        message,
        branch,
        pushed,
    })
}

/// Returns the branch the commit will land on.
async fn select_branch<R: BufRead, W: Write>(
    ctx: &AppContext,
    prompter: &mut Prompter<R, W>,
    current: String,
) -> AppResult<String> {
    let action = loop {
        let answer = prompter.ask_text(
            "Select branch action: [c]reate new branch from a base branch, [s]witch branch, [u]se current branch",
            TextOptions::required(),
        )?;
        match BranchAction::from_str(&answer) {
            Some(action) => break action,
            None => prompter.notify(
                Tone::Warning,
                "Invalid branch action. Use create, switch, or use current.",
            )?,
        }
    };
    debug!(?action, "branch action selected");

    match action {
        BranchAction::Create => {
            prompter.notify(Tone::Info, "Available base branches:")?;
            for name in ctx.version_control.remote_branches().await? {
                prompter.line(&format!("  - {name}"))?;
            }
            let base = prompter.ask_text("Name of the source/base branch", TextOptions::required())?;
            let new_branch = prompter.ask_text("Name for the new branch", TextOptions::required())?;

            ctx.version_control
                .create_branch_from_base(&base, &new_branch)
                .await?;
            ctx.version_control.checkout(&new_branch).await?;
            prompter.notify(
                Tone::Success,
                &format!("Created and switched to branch '{new_branch}' from '{base}'"),
            )?;
            Ok(new_branch)
        }
        BranchAction::Switch => {
            prompter.notify(Tone::Info, "Available local branches:")?;
            for name in ctx.version_control.local_branches().await? {
                prompter.line(&format!("  - {name}"))?;
            }
            let target = prompter.ask_text(
                "Name of the local branch to checkout",
                TextOptions::required(),
            )?;

            ctx.version_control.checkout(&target).await?;
            prompter.notify(Tone::Success, &format!("Switched to branch '{target}'"))?;
            let resolved = ctx.version_control.current_branch().await?;
            Ok(if resolved.is_empty() { target } else { resolved })
        }
        BranchAction::UseCurrent => Ok(current),
    }
}

async fn compose_message<R: BufRead, W: Write>(
    ctx: &AppContext,
    prompter: &mut Prompter<R, W>,
) -> AppResult<CommitMessage> {
    let input = prompter.ask_text(
        "Enter a summary to create a new Jira ticket, or an existing ticket key (e.g. PROJ-1234) to reuse it",
        TextOptions::required(),
    )?;

    if let Some(key) = TicketKey::parse(&input) {
        if let Some(message) = message_for_existing(ctx, prompter, &key).await? {
            return Ok(message);
        }
    }

    let summary = input;
    let description = prompter.ask_text(
        "Provide a detailed description (or 'n' to skip and use the summary)",
        TextOptions::optional(),
    )?;
    let description = if description.is_empty() || description.eq_ignore_ascii_case("n") {
        summary.clone()
    } else {
        description
    };

    prompter.notify(Tone::Info, "Creating Jira work item...")?;
    let key = ctx
        .issue_tracker
        .create_issue(&summary, &description)
        .await?;
    prompter.notify(Tone::Success, &format!("Created Jira work item: {key}"))?;
    Ok(CommitMessage::for_created_issue(&key, &summary))
}

/// `None` means the ticket could not be used and a new issue should be
/// created from the input instead.
async fn message_for_existing<R: BufRead, W: Write>(
    ctx: &AppContext,
    prompter: &mut Prompter<R, W>,
    key: &TicketKey,
) -> AppResult<Option<CommitMessage>> {
    prompter.notify(Tone::Info, "Fetching Jira work item details...")?;
    let issue = match ctx.issue_tracker.get_issue(key.as_str()).await {
        Ok(issue) => issue,
        Err(err) => {
            debug!(%key, %err, "ticket lookup failed");
            prompter.notify(
                Tone::Error,
                "Failed to fetch Jira issue. Continuing with manual commit message...",
            )?;
            return Ok(None);
        }
    };
    if !issue.is_complete() {
        prompter.notify(
            Tone::Warning,
            "Failed to parse Jira issue details. Continuing with manual commit message...",
        )?;
        return Ok(None);
    }

    prompter.line("")?;
    prompter.notify(Tone::Info, "Found Jira work item:")?;
    prompter.line(&format!("Ticket: {key}"))?;
    prompter.line(&format!("Status: {}", issue.status))?;
    prompter.line(&format!("Summary: {}", issue.summary))?;
    prompter.line("")?;

    if prompter.ask_yes_no("Use this ticket's summary for the commit message? Answer n to enter a custom one")? {
        return Ok(Some(CommitMessage::for_fetched_issue(
            key.as_str(),
            &issue.summary,
        )));
    }
    let custom = prompter.ask_text("Enter custom commit message", TextOptions::required())?;
    Ok(Some(CommitMessage::with_custom_text(key.as_str(), &custom)))
}
