use async_trait::async_trait;

use crate::domain::issue::Issue;
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    /// Creates an issue and returns its key.
    async fn create_issue(&self, summary: &str, description: &str) -> AppResult<String>;
    async fn get_issue(&self, key: &str) -> AppResult<Issue>;
    /// Unresolved issues assigned to `assignee`, oldest first.
    async fn open_issues(&self, assignee: &str) -> AppResult<Vec<Issue>>;
}
