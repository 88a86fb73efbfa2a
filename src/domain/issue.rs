use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static TICKET_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+-[0-9]+$").expect("ticket key pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub key: String,
    pub summary: String,
    pub status: String,
}

impl Issue {
    /// A fetched issue is only usable for a commit when both fields came back.
    pub fn is_complete(&self) -> bool {
        !self.summary.trim().is_empty() && !self.status.trim().is_empty()
    }
}

/// An existing ticket reference such as `PROJ-1234`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketKey(String);

impl TicketKey {
    pub fn parse(input: &str) -> Option<Self> {
        let candidate = input.trim();
        TICKET_KEY
            .is_match(candidate)
            .then(|| Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
