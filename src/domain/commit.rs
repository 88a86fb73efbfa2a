use std::fmt;

/// The three commit message shapes jcommit produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    /// Reuses the summary of a fetched ticket.
    pub fn for_fetched_issue(key: &str, summary: &str) -> Self {
        Self(format!("{key} | Fix: {summary}"))
    }

    /// Existing ticket, text typed by the user.
    pub fn with_custom_text(key: &str, text: &str) -> Self {
        Self(format!("{key} | {text}"))
    }

    pub fn for_created_issue(key: &str, summary: &str) -> Self {
        Self(format!("{key} | {summary}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fetched_issue_message() {
        let message = CommitMessage::for_fetched_issue("ORG-4821", "Fix login bug");
        assert_eq!(message.as_str(), "ORG-4821 | Fix: Fix login bug");
    }

    #[test]
    fn formats_created_issue_message() {
        let message = CommitMessage::for_created_issue("PROJ-9", "Add retry logic");
        assert_eq!(message.as_str(), "PROJ-9 | Add retry logic");
    }

    #[test]
    fn formats_custom_text_message() {
        let message = CommitMessage::with_custom_text("ORG-4821", "tidy session handling");
        assert_eq!(message.to_string(), "ORG-4821 | tidy session handling");
    }

    #[test]
    fn keeps_fetched_summary_verbatim() {
        let message = CommitMessage::for_fetched_issue("ORG-4821", "  Fix login bug ");
        assert_eq!(message.as_str(), "ORG-4821 | Fix:   Fix login bug ");
    }
}
