pub mod detect;
pub mod error;
pub mod github;
pub mod lang;
pub mod notify;
pub mod qconfig;
pub mod runner;

use error::{ActionError, Result};

/// Inputs supplied to the action step, read from `INPUT_*` environment
/// variables the way the Actions runner passes them.
#[derive(Debug, Clone)]
pub struct ActionInputs {
    pub github_token: String,
    pub qontract_token: String,
    pub base_branch: String,
    pub base_language_key: String,
}

impl ActionInputs {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            github_token: required_var("INPUT_GITHUB_ACCESS_TOKEN")?,
            qontract_token: required_var("INPUT_QONTRACT_ACCESS_TOKEN")?,
            base_branch: required_var("INPUT_BASE_BRANCH")?,
            base_language_key: required_var("INPUT_BASE_LANGUAGE_KEY")?,
        })
    }
}

/// Ambient context of the triggering workflow run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    /// The evaluated commit.
    pub sha: String,
    /// The trigger ref, forwarded as `source_branch`.
    pub trigger_ref: String,
    pub api_url: Option<String>,
}

impl RunContext {
    pub fn from_env() -> Result<Self> {
        let repository = required_var("GITHUB_REPOSITORY")?;
        let (owner, repo) = repository.split_once('/').ok_or_else(|| {
            ActionError::ConfigError(format!(
                "GITHUB_REPOSITORY must be 'owner/repo', got '{}'",
                repository
            ))
        })?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            sha: required_var("GITHUB_SHA")?,
            trigger_ref: required_var("GITHUB_REF")?,
            api_url: std::env::var("GITHUB_API_URL").ok(),
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| ActionError::ConfigError(format!("Missing required input '{}'", name)))
}
