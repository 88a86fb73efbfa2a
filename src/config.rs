use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};

pub const CONFIG_ENV: &str = "JCOMMIT_CONFIG";
const CONFIG_FILE_NAME: &str = ".jcommit.json";
pub const DEFAULT_PROTECTED_BRANCH: &str = "master";

/// Fields the commit workflow cannot run without, in reporting order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "jiraDomain",
    "jiraEmail",
    "jiraApiToken",
    "jiraProjectId",
    "jiraIssueTypeId",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    pub jira_domain: String,
    pub jira_email: String,
    pub jira_api_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_assignee_id: Option<String>,
    pub jira_project_id: String,
    pub jira_issue_type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected_branches: Option<Vec<String>>,
}

impl Configuration {
    /// Returns `None` when nothing has been written at `path` yet.
    pub fn load(path: &Path) -> AppResult<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AppError::Io(err)),
        };
        let config = serde_json::from_str(&contents).map_err(|err| {
            AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
        })?;
        Ok(Some(config))
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut data = serde_json::to_string_pretty(self)?;
        data.push('\n');

        let mut file = open_private(path)?;
        file.write_all(data.as_bytes())?;
        restrict_permissions(path);
        Ok(())
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.jira_domain,
            &self.jira_email,
            &self.jira_api_token,
            &self.jira_project_id,
            &self.jira_issue_type_id,
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn assignee_id(&self) -> Option<&str> {
        self.jira_assignee_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn protected_branches(&self) -> Vec<String> {
        match &self.protected_branches {
            Some(branches) if !branches.is_empty() => branches.clone(),
            _ => default_protected_branches(),
        }
    }

    pub fn is_protected(&self, branch: &str) -> bool {
        self.protected_branches().iter().any(|name| name == branch)
    }
}

pub fn default_protected_branches() -> Vec<String> {
    vec![DEFAULT_PROTECTED_BRANCH.to_string()]
}

/// Resolves the config location: explicit override, then `JCOMMIT_CONFIG`,
/// then `~/.jcommit.json`.
pub fn config_file_path(explicit: Option<&Path>) -> AppResult<PathBuf> {
    let from_env = env::var_os(CONFIG_ENV).map(PathBuf::from);
    resolve_config_path(explicit, from_env, dirs::home_dir())
}

fn resolve_config_path(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    home: Option<PathBuf>,
) -> AppResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(absolute(path));
    }
    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(absolute(&path));
    }
    home.map(|dir| dir.join(CONFIG_FILE_NAME)).ok_or_else(|| {
        AppError::Configuration("unable to determine the home directory".to_string())
    })
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::File::create(path)
}

// A pre-existing file keeps its old mode on open, so tighten it explicitly.
#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(err) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        debug!(path = %path.display(), %err, "could not restrict config permissions");
    }
}

#[cfg(not(unix))]
fn restrict_permissions(path: &Path) {
    debug!(path = %path.display(), "permission bits not supported on this platform");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Configuration {
        Configuration {
            jira_domain: "acme.atlassian.net".to_string(),
            jira_email: "dev@acme.test".to_string(),
            jira_api_token: "secret-token".to_string(),
            jira_assignee_id: Some("5b10ac8d82e05b22cc7d4ef5".to_string()),
            jira_project_id: "11203".to_string(),
            jira_issue_type_id: "3".to_string(),
            protected_branches: Some(vec!["master".to_string(), "release".to_string()]),
        }
    }

    #[test]
    fn complete_config_has_no_missing_fields() {
        assert!(complete().missing_fields().is_empty());
    }

    #[test]
    fn reports_missing_fields_in_canonical_order() {
        let mut config = complete();
        config.jira_issue_type_id.clear();
        config.jira_email = "   ".to_string();
        config.jira_domain.clear();
        config.jira_assignee_id = None;
        assert_eq!(
            config.missing_fields(),
            vec!["jiraDomain", "jiraEmail", "jiraIssueTypeId"]
        );

        assert_eq!(
            Configuration::default().missing_fields(),
            REQUIRED_FIELDS.to_vec()
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("jcommit.json");
        let config = complete();

        config.save(&path).unwrap();
        let loaded = Configuration::load(&path).unwrap();

        assert_eq!(loaded, Some(config));
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"jiraApiToken\": \"secret-token\""));
        assert!(raw.ends_with('\n'));
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jcommit.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        complete().save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Configuration::load(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Configuration::load(&path),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn partial_file_loads_with_blank_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{"jiraDomain": "acme.atlassian.net"}"#).unwrap();

        let config = Configuration::load(&path).unwrap().unwrap();
        assert_eq!(config.jira_domain, "acme.atlassian.net");
        assert_eq!(config.missing_fields().len(), 4);
    }

    #[test]
    fn protected_branches_fall_back_to_master() {
        let mut config = complete();
        assert!(config.is_protected("release"));
        assert!(!config.is_protected("feature/x"));

        config.protected_branches = Some(Vec::new());
        assert_eq!(config.protected_branches(), vec!["master".to_string()]);

        config.protected_branches = None;
        assert!(config.is_protected("master"));
        assert!(!config.is_protected("release"));
    }

    #[test]
    fn blank_assignee_is_treated_as_unset() {
        let mut config = complete();
        config.jira_assignee_id = Some("  ".to_string());
        assert_eq!(config.assignee_id(), None);
    }

    #[test]
    fn config_path_prefers_explicit_then_env_then_home() {
        let explicit = PathBuf::from("/tmp/explicit.json");
        let env_path = PathBuf::from("/tmp/from-env.json");
        let home = PathBuf::from("/home/dev");

        let resolved =
            resolve_config_path(Some(&explicit), Some(env_path.clone()), Some(home.clone()))
                .unwrap();
        assert_eq!(resolved, explicit);

        let resolved = resolve_config_path(None, Some(env_path.clone()), Some(home.clone())).unwrap();
        assert_eq!(resolved, env_path);

        let resolved = resolve_config_path(None, None, Some(home)).unwrap();
        assert_eq!(resolved, PathBuf::from("/home/dev/.jcommit.json"));

        assert!(resolve_config_path(None, None, None).is_err());
    }
}
