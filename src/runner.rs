//! The sequential run: validate, fetch, decide, dispatch.

use tracing::{error, info};

use crate::error::{ActionError, Result};
use crate::github::SourceControl;
use crate::notify::{Dispatcher, NotificationPayload};
use crate::qconfig::{self, CONFIG_PATH};
use crate::{ActionInputs, RunContext, detect, lang};

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The watched file was not modified; nothing was sent.
    Skipped,
    /// The payload was submitted (delivery failure is non-fatal).
    Dispatched,
}

/// Executes one run of the action. Every remote call is awaited to
/// completion before the next begins; there are no retries.
pub async fn run(
    inputs: &ActionInputs,
    ctx: &RunContext,
    client: &dyn SourceControl,
    dispatcher: &dyn Dispatcher,
) -> Result<RunOutcome> {
    lang::ensure_valid_key(&inputs.base_language_key)?;

    let repo = client.repository().await?;

    let config_file = client
        .file_contents(CONFIG_PATH, &inputs.base_branch)
        .await
        .ok_or_else(|| {
            ActionError::MissingResource(format!(
                "Failed to get config file from {} branch",
                inputs.base_branch
            ))
        })?;

    let config = qconfig::parse_config(&config_file.content)?;
    let watched_file = config.watched_file()?;

    let commit_files = client.commit_files(&ctx.sha).await?;
    let modified = detect::modified_filenames(&commit_files);

    if !detect::watched_file_modified(&modified, watched_file) {
        info!("No modified files or watched file not modified. Skipping webhook call.");
        return Ok(RunOutcome::Skipped);
    }

    let base_branch_ref = client.branch_ref(&inputs.base_branch).await.ok_or_else(|| {
        ActionError::MissingResource(format!(
            "Failed to get base branch ref for {}. Make sure the branch exists on the remote repository.",
            inputs.base_branch
        ))
    })?;

    let payload = NotificationPayload::new(
        &repo,
        base_branch_ref,
        modified,
        inputs.github_token.clone(),
        inputs.qontract_token.clone(),
        ctx.trigger_ref.clone(),
        inputs.base_language_key.clone(),
    );

    // Delivery failure never fails the run; the triggering workflow must
    // not block on notification delivery.
    if let Err(e) = dispatcher.dispatch(&payload).await {
        error!("Webhook dispatch failed: {}", e);
    } else {
        info!("Webhook dispatched for repository '{}'", repo.name);
    }

    Ok(RunOutcome::Dispatched)
}
