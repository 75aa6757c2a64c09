use qontract_webhook_action::github::GithubClient;
use qontract_webhook_action::notify::QontractDispatcher;
use qontract_webhook_action::runner::{self, RunOutcome};
use qontract_webhook_action::{ActionInputs, RunContext};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let inputs = match ActionInputs::from_env() {
        Ok(inputs) => inputs,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let ctx = match RunContext::from_env() {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let client = GithubClient::new(
        inputs.github_token.clone(),
        ctx.owner.clone(),
        ctx.repo.clone(),
        ctx.api_url.clone(),
    );
    let dispatcher = QontractDispatcher::new();

    match runner::run(&inputs, &ctx, &client, &dispatcher).await {
        Ok(RunOutcome::Dispatched) => {
            info!("Run finished: notification dispatched.");
        }
        Ok(RunOutcome::Skipped) => {
            info!("Run finished: nothing to do.");
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
