/// Custom error type for qontract-webhook-action operations
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid base language key: {key}. Valid keys are: {valid}")]
    InvalidLanguageKey { key: String, valid: String },

    #[error("{0}")]
    MissingResource(String),

    #[error("Webhook rejected with status {status}: {body}")]
    WebhookRejected { status: u16, body: String },

    #[error("GitHub API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Base64 decoding error: {0}")]
    DecodeError(#[from] base64::DecodeError),
}

/// Helper type for Results that use ActionError
pub type Result<T> = std::result::Result<T, ActionError>;
