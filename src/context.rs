use std::sync::Arc;

use crate::config::Configuration;
use crate::services::{IssueTrackerService, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: Configuration,
    pub version_control: Arc<dyn VersionControlService>,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
}

impl AppContext {
    pub fn new(
        config: Configuration,
        version_control: Arc<dyn VersionControlService>,
        issue_tracker: Arc<dyn IssueTrackerService>,
    ) -> Self {
        Self {
            config,
            version_control,
            issue_tracker,
        }
    }
}
