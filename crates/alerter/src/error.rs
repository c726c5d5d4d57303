use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlerterError {
    #[error("Webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook returned an error: {0}")]
    ApiError(String),

    #[error("Channel notifications are not configured. Missing webhook URL.")]
    NotConfigured,
}
