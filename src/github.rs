//! GitHub API client for the read-only calls the action makes.
//!
//! The orchestrator talks to the hosting API through the [`SourceControl`]
//! trait so the decision logic can be exercised without a live network.
//! `file_contents` and `branch_ref` swallow their failures and return
//! `None`; the caller decides whether absence is fatal.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::error::Result;

const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("qontract-webhook-action/", env!("CARGO_PKG_VERSION"));

/// Repository metadata as returned by `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub html_url: String,
}

/// A file fetched through the contents API. `content` is base64 with
/// embedded newlines.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoFile {
    pub content: String,
}

/// One entry of a commit's file list, annotated with its change status
/// ("added", "modified", "removed", "renamed", ...).
#[derive(Debug, Clone, Deserialize)]
pub struct CommitFile {
    pub filename: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    #[serde(default)]
    files: Vec<CommitFile>,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    #[serde(rename = "ref")]
    ref_field: String,
}

/// The four read-only operations the action needs from the hosting API.
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// Fetch metadata for the repository the action runs in.
    async fn repository(&self) -> Result<Repository>;

    /// Fetch a file as it exists at `git_ref`. Any failure (missing file,
    /// network or API error) is reported as `None`.
    async fn file_contents(&self, path: &str, git_ref: &str) -> Option<RepoFile>;

    /// Fetch the full list of files touched by a commit.
    async fn commit_files(&self, sha: &str) -> Result<Vec<CommitFile>>;

    /// Resolve a branch name to its current ref string. Any failure is
    /// reported as `None`.
    async fn branch_ref(&self, branch: &str) -> Option<String>;
}

/// `SourceControl` implementation over the GitHub REST API.
pub struct GithubClient {
    http: Client,
    api_url: String,
    token: String,
    owner: String,
    repo: String,
}

impl GithubClient {
    pub fn new(token: String, owner: String, repo: String, api_url: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token,
            owner,
            repo,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}/repos/{}/{}{}", self.api_url, self.owner, self.repo, path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("User-Agent", USER_AGENT)
    }
}

#[async_trait]
impl SourceControl for GithubClient {
    async fn repository(&self) -> Result<Repository> {
        let repo = self
            .get("")
            .send()
            .await?
            .error_for_status()?
            .json::<Repository>()
            .await?;
        Ok(repo)
    }

    async fn file_contents(&self, path: &str, git_ref: &str) -> Option<RepoFile> {
        let response = self
            .get(&format!("/contents/{}", path))
            .query(&[("ref", git_ref)])
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<RepoFile>().await {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("Could not decode contents response for '{}': {}", path, e);
                    None
                }
            },
            Ok(resp) => {
                warn!(
                    "Contents request for '{}' at ref '{}' returned {}",
                    path,
                    git_ref,
                    resp.status()
                );
                None
            }
            Err(e) => {
                warn!("Contents request for '{}' failed: {}", path, e);
                None
            }
        }
    }

    async fn commit_files(&self, sha: &str) -> Result<Vec<CommitFile>> {
        let commit = self
            .get(&format!("/commits/{}", sha))
            .send()
            .await?
            .error_for_status()?
            .json::<CommitDetail>()
            .await?;
        Ok(commit.files)
    }

    async fn branch_ref(&self, branch: &str) -> Option<String> {
        let response = self
            .get(&format!("/git/ref/heads/{}", branch))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<GitRef>().await {
                Ok(git_ref) => Some(git_ref.ref_field),
                Err(e) => {
                    warn!("Could not decode ref response for branch '{}': {}", branch, e);
                    None
                }
            },
            Ok(resp) => {
                warn!("Ref request for branch '{}' returned {}", branch, resp.status());
                None
            }
            Err(e) => {
                warn!("Ref request for branch '{}' failed: {}", branch, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_commit_detail_with_files() {
        let body = serde_json::json!({
            "sha": "abc123",
            "files": [
                {"filename": "a.txt", "status": "modified", "additions": 1},
                {"filename": "b.txt", "status": "added"}
            ]
        });
        let commit: CommitDetail = serde_json::from_value(body).unwrap();
        assert_eq!(commit.files.len(), 2);
        assert_eq!(commit.files[0].filename, "a.txt");
        assert_eq!(commit.files[0].status, "modified");
    }

    #[test]
    fn deserializes_commit_detail_without_files() {
        let commit: CommitDetail = serde_json::from_value(serde_json::json!({"sha": "x"})).unwrap();
        assert!(commit.files.is_empty());
    }

    #[test]
    fn deserializes_git_ref() {
        let git_ref: GitRef =
            serde_json::from_value(serde_json::json!({"ref": "refs/heads/main", "node_id": "n"}))
                .unwrap();
        assert_eq!(git_ref.ref_field, "refs/heads/main");
    }

    #[test]
    fn deserializes_repository() {
        let repo: Repository = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "demo",
            "html_url": "https://github.com/acme/demo",
            "private": false
        }))
        .unwrap();
        assert_eq!(repo.id, 42);
        assert_eq!(repo.name, "demo");
    }
}
