use async_trait::async_trait;

use crate::domain::commit::CommitMessage;
use crate::error::AppResult;

pub const REMOTE: &str = "origin";

#[async_trait]
pub trait VersionControlService: Send + Sync {
    async fn is_repository(&self) -> AppResult<bool>;
    /// Empty when the branch cannot be determined.
    async fn current_branch(&self) -> AppResult<String>;
    async fn local_branches(&self) -> AppResult<Vec<String>>;
    async fn remote_branches(&self) -> AppResult<Vec<String>>;
    async fn checkout(&self, branch: &str) -> AppResult<()>;
    /// Fetches `base` and branches `new_branch` off the remote-tracking ref,
    /// or off the local `base` when the remote ref is unavailable.
    async fn create_branch_from_base(&self, base: &str, new_branch: &str) -> AppResult<()>;
    async fn has_staged_changes(&self) -> AppResult<bool>;
    async fn commit(&self, message: &CommitMessage) -> AppResult<()>;
    /// Pushes `branch` to the remote and sets it as upstream.
    async fn push(&self, branch: &str) -> AppResult<()>;
}
