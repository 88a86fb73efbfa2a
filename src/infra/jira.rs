use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Configuration;
use crate::domain::issue::Issue;
use crate::error::{AppResult, TrackerError};
use crate::services::IssueTrackerService;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const SEARCH_LIMIT: u32 = 100;

/// Everything a request needs from the configuration.
#[derive(Debug, Clone)]
pub struct JiraCredentials {
    pub base_url: String,
    pub email: String,
    pub token: String,
    pub project_id: String,
    pub issue_type_id: String,
    pub assignee_id: Option<String>,
}

impl JiraCredentials {
    pub fn from_config(config: &Configuration) -> Self {
        Self {
            base_url: base_url(&config.jira_domain),
            email: config.jira_email.trim().to_string(),
            token: config.jira_api_token.trim().to_string(),
            project_id: config.jira_project_id.trim().to_string(),
            issue_type_id: config.jira_issue_type_id.trim().to_string(),
            assignee_id: config.assignee_id().map(str::to_string),
        }
    }
}

pub struct JiraClient {
    http: Client,
    credentials: JiraCredentials,
}

impl JiraClient {
    pub fn new(credentials: JiraCredentials) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TrackerError::from)?;
        Ok(Self { http, credentials })
    }

    fn auth(&self) -> String {
        auth_header(&self.credentials.email, &self.credentials.token)
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn create_issue(&self, summary: &str, description: &str) -> AppResult<String> {
        let url = issue_endpoint(&self.credentials.base_url);
        let body = CreateIssueRequest::new(&self.credentials, summary, description);
        debug!(%url, "creating Jira issue");

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.auth())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(TrackerError::from)?;

        let (status, text) = read_body(response).await?;
        let create_failed = |body: String| TrackerError::CreateFailed {
            status: status.as_u16(),
            body,
        };
        if !status.is_success() {
            return Err(create_failed(or_placeholder(text, "failed to create Jira issue")).into());
        }

        let key = serde_json::from_str::<CreateIssueResponse>(&text)
            .ok()
            .and_then(|payload| payload.key)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                create_failed(format!("response did not contain an issue key: {text}"))
            })?;
        Ok(key)
    }

    async fn get_issue(&self, key: &str) -> AppResult<Issue> {
        let url = issue_url(&self.credentials.base_url, key);
        debug!(%url, "fetching Jira issue");

        let response = self
            .http
            .get(url)
            .query(&[("fields", "summary,status")])
            .header(AUTHORIZATION, self.auth())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(TrackerError::from)?;

        let (status, text) = read_body(response).await?;
        let fetch_failed = |body: String| TrackerError::FetchFailed {
            status: status.as_u16(),
            body,
        };
        if !status.is_success() {
            return Err(fetch_failed(or_placeholder(text, "failed to fetch Jira issue")).into());
        }

        let payload: IssueResponse =
            serde_json::from_str(&text).map_err(|err| fetch_failed(format!("{err}: {text}")))?;
        Ok(payload.into_issue(key))
    }

    async fn open_issues(&self, assignee: &str) -> AppResult<Vec<Issue>> {
        let url = search_endpoint(&self.credentials.base_url);
        let body = SearchRequest::open_issues_for(assignee);
        debug!(%url, jql = %body.jql, "searching Jira issues");

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.auth())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(TrackerError::from)?;

        let (status, text) = read_body(response).await?;
        let search_failed = |body: String| TrackerError::SearchFailed {
            status: status.as_u16(),
            body,
        };
        if !status.is_success() {
            return Err(search_failed(or_placeholder(text, "failed to search Jira issues")).into());
        }

        let payload: SearchResponse =
            serde_json::from_str(&text).map_err(|err| search_failed(format!("{err}: {text}")))?;
        Ok(payload
            .issues
            .into_iter()
            .map(|issue| issue.into_issue(""))
            .collect())
    }
}

async fn read_body(response: reqwest::Response) -> Result<(StatusCode, String), TrackerError> {
    let status = response.status();
    let text = response.text().await?;
    debug!(%status, "Jira responded");
    Ok((status, text))
}

fn or_placeholder(body: String, placeholder: &str) -> String {
    if body.trim().is_empty() {
        placeholder.to_string()
    } else {
        body
    }
}

/// The configured domain is a bare host; a full URL is accepted as well.
pub fn base_url(domain: &str) -> String {
    let domain = domain.trim().trim_end_matches('/');
    if domain.starts_with("https://") || domain.starts_with("http://") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    }
}

pub fn auth_header(email: &str, token: &str) -> String {
    let credentials = format!("{email}:{token}");
    let encoded = BASE64_STANDARD.encode(credentials);
    format!("Basic {encoded}")
}

fn issue_endpoint(base_url: &str) -> String {
    format!("{base_url}/rest/api/3/issue")
}

fn issue_url(base_url: &str, key: &str) -> String {
    format!("{base_url}/rest/api/3/issue/{}", key.trim())
}

fn search_endpoint(base_url: &str) -> String {
    format!("{base_url}/rest/api/3/search/jql")
}

pub fn open_issues_jql(assignee: &str) -> String {
    let escaped = assignee.trim().replace('\\', "\\\\").replace('"', "\\\"");
    format!("assignee = \"{escaped}\" AND statusCategory != Done ORDER BY created ASC")
}

#[derive(Serialize)]
struct CreateIssueRequest {
    fields: CreateIssueFields,
    update: serde_json::Map<String, serde_json::Value>,
}

impl CreateIssueRequest {
    fn new(credentials: &JiraCredentials, summary: &str, description: &str) -> Self {
        Self {
            fields: CreateIssueFields {
                description: JiraDescription::single_paragraph(description),
                issuetype: IdRef {
                    id: credentials.issue_type_id.clone(),
                },
                project: IdRef {
                    id: credentials.project_id.clone(),
                },
                summary: summary.to_string(),
                assignee: credentials.assignee_id.clone().map(|account_id| Assignee {
                    account_id,
                }),
            },
            update: serde_json::Map::new(),
        }
    }
}

#[derive(Serialize)]
struct CreateIssueFields {
    description: JiraDescription,
    issuetype: IdRef,
    project: IdRef,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<Assignee>,
}

#[derive(Serialize)]
struct IdRef {
    id: String,
}

#[derive(Serialize)]
struct Assignee {
    #[serde(rename = "accountId")]
    account_id: String,
}

/// Atlassian Document Format root node.
#[derive(Serialize)]
struct JiraDescription {
    #[serde(rename = "type")]
    doc_type: &'static str,
    version: u8,
    content: Vec<JiraDocNode>,
}

impl JiraDescription {
    fn single_paragraph(text: &str) -> Self {
        Self {
            doc_type: "doc",
            version: 1,
            content: vec![JiraDocNode::paragraph(text.to_string())],
        }
    }
}

#[derive(Serialize)]
struct JiraDocNode {
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<JiraDocText>,
}

impl JiraDocNode {
    fn paragraph(text: String) -> Self {
        Self {
            node_type: "paragraph",
            content: vec![JiraDocText::text(text)],
        }
    }
}

#[derive(Serialize)]
struct JiraDocText {
    #[serde(rename = "type")]
    text_type: &'static str,
    text: String,
}

impl JiraDocText {
    fn text(text: String) -> Self {
        Self {
            text_type: "text",
            text,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest {
    jql: String,
    fields: [&'static str; 2],
    max_results: u32,
}

impl SearchRequest {
    fn open_issues_for(assignee: &str) -> Self {
        Self {
            jql: open_issues_jql(assignee),
            fields: ["summary", "status"],
            max_results: SEARCH_LIMIT,
        }
    }
}

#[derive(Deserialize)]
struct CreateIssueResponse {
    key: Option<String>,
}

#[derive(Deserialize)]
struct IssueResponse {
    key: Option<String>,
    #[serde(default)]
    fields: IssueFields,
}

impl IssueResponse {
    fn into_issue(self, requested_key: &str) -> Issue {
        Issue {
            key: self
                .key
                .filter(|key| !key.is_empty())
                .unwrap_or_else(|| requested_key.trim().to_string()),
            summary: self.fields.summary.unwrap_or_default(),
            status: self.fields.status.and_then(|s| s.name).unwrap_or_default(),
        }
    }
}

#[derive(Deserialize, Default)]
struct IssueFields {
    summary: Option<String>,
    status: Option<IssueStatus>,
}

#[derive(Deserialize)]
struct IssueStatus {
    name: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<IssueResponse>,
}
