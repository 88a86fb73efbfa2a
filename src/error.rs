use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{0}")]
    Precondition(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error("issue tracker error: {0}")]
    IssueTracker(#[from] TrackerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failures reported by the Jira client. Carries the raw response body when
/// the server sent one.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("failed to create Jira issue ({status}): {body}")]
    CreateFailed { status: u16, body: String },
    #[error("failed to fetch Jira issue ({status}): {body}")]
    FetchFailed { status: u16, body: String },
    #[error("failed to search Jira issues ({status}): {body}")]
    SearchFailed { status: u16, body: String },
    #[error("failed to call Jira: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type AppResult<T> = Result<T, AppError>;
