use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::branch::{parse_local_branches, parse_remote_branches};
use crate::domain::commit::CommitMessage;
use crate::error::{AppError, AppResult};
use crate::infra::process::{self, CommandOutput};
use crate::services::VersionControlService;
use crate::services::version_control::REMOTE;

const GIT: &str = "git";

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn git(&self, args: &[&str]) -> AppResult<CommandOutput> {
        let root = self.workspace_root.to_string_lossy();
        process::run(GIT, &rooted_args(&root, args)).await
    }

    async fn git_attached(&self, args: &[&str]) -> AppResult<i32> {
        let root = self.workspace_root.to_string_lossy();
        process::run_attached(GIT, &rooted_args(&root, args)).await
    }

    async fn git_checked(&self, args: &[&str], action: &str) -> AppResult<CommandOutput> {
        let output = self.git(args).await?;
        if !output.success() {
            return Err(AppError::VersionControl(format!(
                "failed to {action}: {}",
                output.error_text()
            )));
        }
        Ok(output)
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn is_repository(&self) -> AppResult<bool> {
        Ok(self.git(&["rev-parse", "--git-dir"]).await?.success())
    }

    async fn current_branch(&self) -> AppResult<String> {
        let output = self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        if !output.success() {
            debug!(stderr = %output.stderr.trim(), "could not resolve current branch");
            return Ok(String::new());
        }
        Ok(output.stdout.trim().to_string())
    }

    async fn local_branches(&self) -> AppResult<Vec<String>> {
        let output = self.git_checked(&["branch"], "list branches").await?;
        Ok(parse_local_branches(&output.stdout))
    }

    async fn remote_branches(&self) -> AppResult<Vec<String>> {
        let output = self
            .git_checked(&["branch", "-r"], "list remote branches")
            .await?;
        Ok(parse_remote_branches(output.stdout.lines()))
    }

    async fn checkout(&self, branch: &str) -> AppResult<()> {
        let code = self.git_attached(&["checkout", branch]).await?;
        if code != 0 {
            return Err(AppError::VersionControl(format!(
                "failed to switch to branch '{branch}' (exit status {code})"
            )));
        }
        Ok(())
    }

    async fn create_branch_from_base(&self, base: &str, new_branch: &str) -> AppResult<()> {
        let code = self.git_attached(&["fetch", REMOTE, base]).await?;
        if code != 0 {
            return Err(AppError::VersionControl(format!(
                "failed to fetch '{base}' from {REMOTE} (exit status {code})"
            )));
        }

        let remote_ref = format!("{REMOTE}/{base}");
        if self
            .git_attached(&["branch", new_branch, remote_ref.as_str()])
            .await?
            == 0
        {
            return Ok(());
        }

        debug!(%remote_ref, "remote base unavailable, branching from local ref");
        let code = self.git_attached(&["branch", new_branch, base]).await?;
        if code != 0 {
            return Err(AppError::VersionControl(format!(
                "failed to create branch '{new_branch}' from '{base}' (exit status {code})"
            )));
        }
        Ok(())
    }

    async fn has_staged_changes(&self) -> AppResult<bool> {
        let output = self.git(&["diff", "--cached", "--quiet"]).await?;
        match output.exit_code {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(AppError::VersionControl(format!(
                "failed to inspect staged changes: {}",
                output.error_text()
            ))),
        }
    }

    async fn commit(&self, message: &CommitMessage) -> AppResult<()> {
        let code = self
            .git_attached(&["commit", "-m", message.as_str()])
            .await?;
        if code != 0 {
            return Err(AppError::VersionControl(format!(
                "git commit failed (exit status {code})"
            )));
        }
        Ok(())
    }

    async fn push(&self, branch: &str) -> AppResult<()> {
        let code = self
            .git_attached(&["push", "--set-upstream", REMOTE, branch])
            .await?;
        if code != 0 {
            return Err(AppError::VersionControl(format!(
                "git push failed (exit status {code})"
            )));
        }
        Ok(())
    }
}

fn rooted_args<'a>(root: &'a str, args: &[&'a str]) -> Vec<&'a str> {
    let mut full = Vec::with_capacity(args.len() + 2);
    full.extend(["-C", root]);
    full.extend_from_slice(args);
    full
}
