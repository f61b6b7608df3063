//! Error types for the digest pipeline

use thiserror::Error;

/// Errors raised while collecting data for, building, or delivering a digest
#[derive(Debug, Error)]
pub enum DigestError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// News API returned an error payload or status
    #[error("News API error ({code}): {message}")]
    NewsApiError { code: String, message: String },

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Price data exists but cannot be summarized
    #[error("No usable price data for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Language model call failed
    #[error("LLM error: {0}")]
    LlmError(#[from] digest_llm::LLMError),

    /// Prompt template failed to render
    #[error("Prompt rendering error: {0}")]
    PromptError(#[from] minijinja::Error),

    /// Sender or recipient address could not be parsed
    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Message could not be assembled (e.g. no recipients)
    #[error("Failed to build email: {0}")]
    MessageBuildError(#[from] lettre::error::Error),

    /// SMTP server rejected the credentials
    #[error("SMTP authentication failed: {0}")]
    MailAuthentication(String),

    /// Any other SMTP transport failure
    #[error("Failed to send email: {0}")]
    MailTransport(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for digest operations
pub type Result<T> = std::result::Result<T, DigestError>;

impl From<digest_utils::EnvError> for DigestError {
    fn from(err: digest_utils::EnvError) -> Self {
        DigestError::ConfigError(err.to_string())
    }
}
