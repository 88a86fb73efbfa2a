use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::{Configuration, default_protected_branches};
use crate::console::Tone;
use crate::error::{AppError, AppResult};
use crate::prompt::{Prompter, SecretOptions, TextOptions};

/// Interactive wizard that creates or updates the config file at `path`.
pub fn configure<R: BufRead, W: Write>(
    path: &Path,
    prompter: &mut Prompter<R, W>,
) -> AppResult<Configuration> {
    let existing = Configuration::load(path)?.unwrap_or_default();
    let previous = |value: &str| Some(value.to_string()).filter(|v| !v.is_empty());

    prompter.notify(Tone::Info, "=== jcommit configuration setup ===")?;
    prompter.line("Leave fields blank to keep existing values.")?;
    prompter.line(&format!(
        "You can also edit the config file by hand at {}.",
        path.display()
    ))?;
    prompter.line("")?;

    let domain_default = previous(&existing.jira_domain);
    let jira_domain = prompter.ask_text(
        "Jira domain (e.g. company.atlassian.net)",
        TextOptions::required().with_default(domain_default.as_deref()),
    )?;
    let email_default = previous(&existing.jira_email);
    let jira_email = prompter.ask_text(
        "Email (e.g. user@company.com)",
        TextOptions::required().with_default(email_default.as_deref()),
    )?;
    let token = prompter.ask_secret(
        "Jira API token (create one at https://id.atlassian.com/manage-profile/security/api-tokens)",
        SecretOptions {
            allow_empty: true,
            has_existing: !existing.jira_api_token.is_empty(),
        },
    )?;
    let assignee = prompter.ask_text(
        "Default Jira assignee account ID (press enter to leave unassigned)",
        TextOptions::optional().with_default(existing.assignee_id()),
    )?;
    let project_default = previous(&existing.jira_project_id);
    let jira_project_id = prompter.ask_text(
        "Jira project ID (e.g. 11203)",
        TextOptions::required().with_default(project_default.as_deref()),
    )?;
    let issue_type_default = previous(&existing.jira_issue_type_id);
    let jira_issue_type_id = prompter.ask_text(
        "Jira issue type ID (e.g. 3)",
        TextOptions::required().with_default(issue_type_default.as_deref()),
    )?;
    let protected_default = existing
        .protected_branches
        .clone()
        .unwrap_or_else(default_protected_branches)
        .join(",");
    let protected_raw = prompter.ask_text(
        "Protected branches (comma separated)",
        TextOptions::optional().with_default(Some(protected_default.as_str())),
    )?;

    let updated = Configuration {
        jira_domain,
        jira_email,
        jira_api_token: if token.is_empty() {
            existing.jira_api_token.clone()
        } else {
            token
        },
        jira_assignee_id: previous(&assignee),
        jira_project_id,
        jira_issue_type_id,
        protected_branches: Some(split_branches(&protected_raw)),
    };

    let missing = updated.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Precondition(format!(
            "Missing required config values: {}",
            missing.join(", ")
        )));
    }

    updated.save(path)?;
    prompter.notify(
        Tone::Success,
        "Config saved. You can now use the jcommit command.",
    )?;
    Ok(updated)
}

pub fn split_branches(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|branch| !branch.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run(path: &Path, input: &str) -> (AppResult<Configuration>, String) {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let result = configure(path, &mut prompter);
        (result, String::from_utf8(prompter.into_output()).unwrap())
    }

    #[test]
    fn splits_and_trims_branch_list() {
        assert_eq!(
            split_branches(" master, release ,, develop,"),
            vec!["master", "release", "develop"]
        );
        assert!(split_branches(" , ").is_empty());
    }

    #[test]
    fn first_run_writes_complete_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jcommit.json");

        let input = "acme.atlassian.net\ndev@acme.test\ntok-123\n\n11203\n3\n\n";
        let (result, output) = run(&path, input);
        let config = result.unwrap();

        assert_eq!(config.jira_api_token, "tok-123");
        assert_eq!(config.jira_assignee_id, None);
        assert_eq!(config.protected_branches, Some(vec!["master".to_string()]));
        assert_eq!(Configuration::load(&path).unwrap(), Some(config));
        assert!(output.contains("Config saved."));
    }

    #[test]
    fn rerun_keeps_existing_values_and_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jcommit.json");
        let existing = Configuration {
            jira_domain: "acme.atlassian.net".to_string(),
            jira_email: "dev@acme.test".to_string(),
            jira_api_token: "old-token".to_string(),
            jira_assignee_id: Some("acc-1".to_string()),
            jira_project_id: "11203".to_string(),
            jira_issue_type_id: "3".to_string(),
            protected_branches: Some(vec!["main".to_string(), "release".to_string()]),
        };
        existing.save(&path).unwrap();

        let (result, output) = run(&path, "\n\n\n\n\n10004\nmain, release , hotfix\n");
        let config = result.unwrap();

        assert_eq!(config.jira_api_token, "old-token");
        assert_eq!(config.jira_assignee_id.as_deref(), Some("acc-1"));
        assert_eq!(config.jira_issue_type_id, "10004");
        assert_eq!(
            config.protected_branches,
            Some(vec![
                "main".to_string(),
                "release".to_string(),
                "hotfix".to_string()
            ])
        );
        assert!(output.contains("(main,release)"));
        assert!(output.contains("leave blank to keep current"));
    }

    #[test]
    fn missing_token_fails_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jcommit.json");

        let input = "acme.atlassian.net\ndev@acme.test\n\n\n11203\n3\n\n";
        let (result, _) = run(&path, input);

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
        assert!(err.to_string().contains("jiraApiToken"));
        assert!(!path.exists());
    }
}
