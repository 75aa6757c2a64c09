//! Notification payload and webhook dispatch.
//!
//! The access tokens travel inside the payload body rather than as request
//! headers. That is the wire contract the receiving service expects; see
//! DESIGN.md for the security note.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::{ActionError, Result};
use crate::github::Repository;

/// Fixed endpoint of the Qontract webhook service.
pub const WEBHOOK_URL: &str = "https://api.qontract.org/integrations/github-actions/webhook";

#[derive(Debug, Serialize)]
pub struct RepositoryInfo {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct HeadCommit {
    pub modified: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GithubActionsContext {
    pub access_token: String,
    pub qontract_access_token: String,
    pub source_branch: String,
}

/// The notification body, built exactly once per successful run.
#[derive(Debug, Serialize)]
pub struct NotificationPayload {
    pub repository: RepositoryInfo,
    pub base_branch: String,
    pub head_commit: HeadCommit,
    pub github_actions: GithubActionsContext,
    pub base_language_key: String,
}

impl NotificationPayload {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        repo: &Repository,
        base_branch_ref: String,
        modified: Vec<String>,
        github_token: String,
        qontract_token: String,
        source_branch: String,
        base_language_key: String,
    ) -> Self {
        Self {
            repository: RepositoryInfo {
                id: repo.id.to_string(),
                name: repo.name.clone(),
                url: repo.html_url.clone(),
            },
            base_branch: base_branch_ref,
            head_commit: HeadCommit { modified },
            github_actions: GithubActionsContext {
                access_token: github_token,
                qontract_access_token: qontract_token,
                source_branch,
            },
            base_language_key,
        }
    }

    /// A loggable rendition of the payload with both tokens redacted.
    pub fn redacted(&self) -> serde_json::Value {
        let mut value = serde_json::json!(self);
        value["github_actions"]["access_token"] = "***".into();
        value["github_actions"]["qontract_access_token"] = "***".into();
        value
    }
}

/// Submits a notification payload to the webhook service.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(&self, payload: &NotificationPayload) -> Result<()>;
}

/// `Dispatcher` implementation posting to the fixed Qontract endpoint.
pub struct QontractDispatcher {
    http: Client,
    url: String,
}

impl QontractDispatcher {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            url: WEBHOOK_URL.to_string(),
        }
    }
}

impl Default for QontractDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Dispatcher for QontractDispatcher {
    async fn dispatch(&self, payload: &NotificationPayload) -> Result<()> {
        debug!("Dispatching payload: {}", payload.redacted());

        let response = self
            .http
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("X-GitHub-Event", "github-actions")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ActionError::WebhookRejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> NotificationPayload {
        let repo = Repository {
            id: 1234,
            name: "demo".to_string(),
            html_url: "https://github.com/acme/demo".to_string(),
        };
        NotificationPayload::new(
            &repo,
            "refs/heads/main".to_string(),
            vec!["a.txt".to_string(), "qconfig.json".to_string()],
            "gh-secret".to_string(),
            "qc-secret".to_string(),
            "refs/heads/feature".to_string(),
            "en".to_string(),
        )
    }

    #[test]
    fn serializes_to_wire_shape() {
        let body = serde_json::json!(sample_payload());

        assert_eq!(body["repository"]["id"], "1234");
        assert_eq!(body["repository"]["name"], "demo");
        assert_eq!(body["repository"]["url"], "https://github.com/acme/demo");
        assert_eq!(body["base_branch"], "refs/heads/main");
        assert_eq!(
            body["head_commit"]["modified"],
            serde_json::json!(["a.txt", "qconfig.json"])
        );
        assert_eq!(body["github_actions"]["access_token"], "gh-secret");
        assert_eq!(body["github_actions"]["qontract_access_token"], "qc-secret");
        assert_eq!(body["github_actions"]["source_branch"], "refs/heads/feature");
        assert_eq!(body["base_language_key"], "en");
    }

    #[test]
    fn repository_id_is_stringified() {
        let body = serde_json::json!(sample_payload());
        assert!(body["repository"]["id"].is_string());
    }

    #[test]
    fn redacted_payload_hides_tokens_but_keeps_structure() {
        let redacted = sample_payload().redacted();
        assert_eq!(redacted["github_actions"]["access_token"], "***");
        assert_eq!(redacted["github_actions"]["qontract_access_token"], "***");
        assert_eq!(redacted["base_language_key"], "en");
        assert_eq!(redacted["github_actions"]["source_branch"], "refs/heads/feature");
    }
}
