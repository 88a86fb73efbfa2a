//! Best-effort lookup of a newer published release. Every failure, including
//! a timeout, is reported as "no update".

use std::cmp::Ordering;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

const REGISTRY_URL: &str = "https://crates.io/api/v1/crates";
const CHECK_TIMEOUT: Duration = Duration::from_secs(3);
pub const SKIP_ENV: &str = "JCOMMIT_SKIP_UPDATE_CHECK";

#[derive(Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Deserialize)]
struct CrateInfo {
    max_stable_version: Option<String>,
    newest_version: Option<String>,
}

/// Returns the newer version when one has been published.
pub async fn available_update(current: &str) -> Option<String> {
    newer_release(REGISTRY_URL, env!("CARGO_PKG_NAME"), current).await
}

async fn newer_release(registry: &str, name: &str, current: &str) -> Option<String> {
    let latest = latest_version(registry, name).await?;
    (compare_versions(&latest, current) == Ordering::Greater).then_some(latest)
}

async fn latest_version(registry: &str, name: &str) -> Option<String> {
    let client = Client::builder().timeout(CHECK_TIMEOUT).build().ok()?;
    let response = client
        .get(format!("{}/{name}", registry.trim_end_matches('/')))
        .header(USER_AGENT, concat!("jcommit/", env!("CARGO_PKG_VERSION")))
        .send()
        .await
        .map_err(|err| debug!(%err, "update check failed"))
        .ok()?;
    if !response.status().is_success() {
        debug!(status = %response.status(), "update check rejected");
        return None;
    }
    let payload: CrateResponse = response.json().await.ok()?;
    payload
        .krate
        .max_stable_version
        .or(payload.krate.newest_version)
}

/// Dotted numeric comparison; a leading `v` is ignored and missing or
/// non-numeric parts count as zero.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let parse = |version: &str| -> Vec<u64> {
        version
            .trim()
            .trim_start_matches('v')
            .split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    };
    let (left, right) = (parse(left), parse(right));
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn compares_dotted_versions() {
        assert_eq!(compare_versions("0.2.0", "0.1.9"), Ordering::Greater);
        assert_eq!(compare_versions("v1.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.0.0", "1.0.10"), Ordering::Less);
        assert_eq!(compare_versions("1.x.1", "1.0.1"), Ordering::Equal);
    }

    #[tokio::test]
    async fn reports_newer_release() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/jcommit")
            .with_status(200)
            .with_body(r#"{"crate":{"max_stable_version":"9.1.0","newest_version":"9.2.0-rc.1"}}"#)
            .create_async()
            .await;

        let latest = newer_release(&server.url(), "jcommit", "0.1.0").await;
        assert_eq!(latest.as_deref(), Some("9.1.0"));
    }

    #[tokio::test]
    async fn same_version_is_not_an_update() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/jcommit")
            .with_status(200)
            .with_body(r#"{"crate":{"max_stable_version":"0.1.0"}}"#)
            .create_async()
            .await;

        assert!(newer_release(&server.url(), "jcommit", "0.1.0").await.is_none());
    }

    #[tokio::test]
    async fn registry_errors_are_silent() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/jcommit")
            .with_status(503)
            .create_async()
            .await;

        assert!(newer_release(&server.url(), "jcommit", "0.1.0").await.is_none());
    }
}
