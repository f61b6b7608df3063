//! Configuration for a digest run
//!
//! Everything a run needs (credentials, the query and ticker lists, SMTP relay)
//! lives in one [`DigestConfig`] that is handed to each pipeline component.

use crate::error::{DigestError, Result};
use digest_utils::{env_list, env_or, parse_env, require_env};
use std::fmt;
use tracing::warn;

/// Sector queries searched before the portfolio tickers
pub const DEFAULT_SECTORS: &[&str] = &[
    "biotechnology",
    "bioelectronic medicine",
    "energy production",
    "technology",
];

/// Portfolio tracked by the snapshot and the narrative
pub const DEFAULT_TICKERS: &[&str] = &["AAPL", "NVDA", "AVGO", "SMR", "VOO"];

pub const DEFAULT_NEWS_API_BASE: &str = "https://newsapi.org/v2";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SUBJECT: &str = "📬 Daily Stock Report";

/// Articles requested per news query
pub const NEWS_PAGE_SIZE: u32 = 3;

/// News API settings
#[derive(Clone)]
pub struct NewsSettings {
    /// News API key
    pub api_key: String,
    /// Base URL of the v2 API
    pub api_base: String,
    /// Articles per query
    pub page_size: u32,
    /// Article language filter
    pub language: String,
    /// Client-side pacing of requests
    pub requests_per_minute: u32,
}

/// Language model settings
#[derive(Clone)]
pub struct LlmSettings {
    /// Model provider API key
    pub api_key: String,
    /// Base URL of the chat completions API
    pub api_base: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
}

/// Outbound mail settings
#[derive(Clone)]
pub struct MailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// From address, also used as the SMTP username
    pub sender: String,
    /// SMTP password or app token
    pub password: String,
    pub recipients: Vec<String>,
    pub subject: String,
}

/// Complete configuration for one run
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Topic queries searched before the tickers
    pub sectors: Vec<String>,
    /// Portfolio tickers
    pub tickers: Vec<String>,
    pub news: NewsSettings,
    pub llm: LlmSettings,
    pub mail: MailSettings,
}

impl DigestConfig {
    /// Create a new configuration builder
    pub fn builder() -> DigestConfigBuilder {
        DigestConfigBuilder::default()
    }

    /// Load the configuration from the process environment
    ///
    /// Required: `OPENAI_API_KEY`, `NEWS_API_KEY`, `EMAIL_ADDRESS`,
    /// `EMAIL_PASSWORD`. Everything else has a default.
    pub fn from_env() -> Result<Self> {
        Self::env_builder()?.build()
    }

    /// A builder pre-filled from the process environment, not yet validated
    ///
    /// Lets callers layer overrides (e.g. CLI flags) before `build()`.
    pub fn env_builder() -> Result<DigestConfigBuilder> {
        let mut builder = Self::builder()
            .openai_api_key(require_env("OPENAI_API_KEY")?)
            .news_api_key(require_env("NEWS_API_KEY")?)
            .sender(require_env("EMAIL_ADDRESS")?)
            .password(require_env("EMAIL_PASSWORD")?)
            .recipients(env_list("EMAIL_RECIPIENTS").unwrap_or_default())
            .openai_api_base(env_or("OPENAI_API_BASE", DEFAULT_OPENAI_API_BASE))
            .model(env_or("OPENAI_MODEL", DEFAULT_MODEL))
            .smtp_host(env_or("SMTP_HOST", DEFAULT_SMTP_HOST));

        if let Some(port) = parse_env::<u16>("SMTP_PORT")? {
            builder = builder.smtp_port(port);
        }
        if let Some(sectors) = env_list("DIGEST_SECTORS") {
            builder = builder.sectors(sectors);
        }
        if let Some(tickers) = env_list("DIGEST_TICKERS") {
            builder = builder.tickers(tickers);
        }

        Ok(builder)
    }

    /// Queries for the news collector: sectors first, then tickers
    pub fn news_queries(&self) -> Vec<String> {
        self.sectors.iter().chain(&self.tickers).cloned().collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("news API key", &self.news.api_key),
            ("model API key", &self.llm.api_key),
            ("sender address", &self.mail.sender),
            ("sender password", &self.mail.password),
            ("model", &self.llm.model),
            ("SMTP host", &self.mail.smtp_host),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(DigestError::ConfigError(format!("{name} must not be empty")));
            }
        }

        if self.tickers.is_empty() {
            return Err(DigestError::ConfigError(
                "at least one portfolio ticker is required".to_string(),
            ));
        }

        if !(1..=100).contains(&self.news.page_size) {
            return Err(DigestError::ConfigError(format!(
                "news page size must be between 1 and 100, got {}",
                self.news.page_size
            )));
        }

        if self.news.requests_per_minute == 0 {
            return Err(DigestError::ConfigError(
                "requests_per_minute must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(DigestError::ConfigError(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        // Not fatal here: the mailer refuses a message without addressees.
        if self.mail.recipients.is_empty() {
            warn!("No email recipients configured; sending will fail");
        }

        Ok(())
    }
}

impl fmt::Debug for NewsSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsSettings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("page_size", &self.page_size)
            .field("language", &self.language)
            .field("requests_per_minute", &self.requests_per_minute)
            .finish()
    }
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .field("recipients", &self.recipients)
            .field("subject", &self.subject)
            .finish()
    }
}

/// Builder for DigestConfig
#[derive(Debug, Default)]
pub struct DigestConfigBuilder {
    sectors: Option<Vec<String>>,
    tickers: Option<Vec<String>>,
    news_api_key: Option<String>,
    news_api_base: Option<String>,
    requests_per_minute: Option<u32>,
    openai_api_key: Option<String>,
    openai_api_base: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    sender: Option<String>,
    password: Option<String>,
    recipients: Option<Vec<String>>,
    subject: Option<String>,
}

impl DigestConfigBuilder {
    /// Set the sector queries
    pub fn sectors(mut self, sectors: Vec<String>) -> Self {
        self.sectors = Some(sectors);
        self
    }

    /// Set the portfolio tickers
    pub fn tickers(mut self, tickers: Vec<String>) -> Self {
        self.tickers = Some(tickers);
        self
    }

    pub fn news_api_key(mut self, key: impl Into<String>) -> Self {
        self.news_api_key = Some(key.into());
        self
    }

    pub fn news_api_base(mut self, base: impl Into<String>) -> Self {
        self.news_api_base = Some(base.into());
        self
    }

    /// Set client-side pacing for news requests
    pub fn requests_per_minute(mut self, rpm: u32) -> Self {
        self.requests_per_minute = Some(rpm);
        self
    }

    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn openai_api_base(mut self, base: impl Into<String>) -> Self {
        self.openai_api_base = Some(base.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn smtp_host(mut self, host: impl Into<String>) -> Self {
        self.smtp_host = Some(host.into());
        self
    }

    pub fn smtp_port(mut self, port: u16) -> Self {
        self.smtp_port = Some(port);
        self
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn recipients(mut self, recipients: Vec<String>) -> Self {
        self.recipients = Some(recipients);
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DigestConfig> {
        let owned = |list: &[&str]| list.iter().map(ToString::to_string).collect::<Vec<_>>();

        let config = DigestConfig {
            sectors: self.sectors.unwrap_or_else(|| owned(DEFAULT_SECTORS)),
            tickers: self.tickers.unwrap_or_else(|| owned(DEFAULT_TICKERS)),
            news: NewsSettings {
                api_key: self.news_api_key.unwrap_or_default(),
                api_base: self
                    .news_api_base
                    .unwrap_or_else(|| DEFAULT_NEWS_API_BASE.to_string()),
                page_size: NEWS_PAGE_SIZE,
                language: "en".to_string(),
                requests_per_minute: self.requests_per_minute.unwrap_or(60),
            },
            llm: LlmSettings {
                api_key: self.openai_api_key.unwrap_or_default(),
                api_base: self
                    .openai_api_base
                    .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
                model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            },
            mail: MailSettings {
                smtp_host: self
                    .smtp_host
                    .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                smtp_port: self.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
                sender: self.sender.unwrap_or_default(),
                password: self.password.unwrap_or_default(),
                recipients: self.recipients.unwrap_or_default(),
                subject: self.subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            },
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builder pre-filled with the credentials every valid config needs
    pub(crate) fn test_builder() -> DigestConfigBuilder {
        DigestConfig::builder()
            .news_api_key("news-key")
            .openai_api_key("openai-key")
            .sender("digest@example.com")
            .password("app-token")
            .recipients(vec!["reader@example.com".to_string()])
    }

    #[test]
    fn test_defaults() {
        let config = test_builder().build().unwrap();

        assert_eq!(config.sectors.len(), 4);
        assert_eq!(config.tickers, vec!["AAPL", "NVDA", "AVGO", "SMR", "VOO"]);
        assert_eq!(config.news.page_size, 3);
        assert_eq!(config.news.language, "en");
        assert_eq!(config.llm.model, "gpt-4o");
        assert!((config.llm.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(config.mail.smtp_port, 587);
    }

    #[test]
    fn test_news_queries_order() {
        let config = test_builder()
            .sectors(vec!["biotechnology".to_string()])
            .tickers(vec!["AAPL".to_string(), "VOO".to_string()])
            .build()
            .unwrap();

        assert_eq!(config.news_queries(), vec!["biotechnology", "AAPL", "VOO"]);
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let result = DigestConfig::builder()
            .openai_api_key("openai-key")
            .sender("digest@example.com")
            .password("app-token")
            .build();

        match result {
            Err(DigestError::ConfigError(msg)) => assert!(msg.contains("news API key")),
            other => panic!("Expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_tickers_rejected() {
        assert!(test_builder().tickers(Vec::new()).build().is_err());
    }

    #[test]
    fn test_empty_recipients_allowed() {
        let config = test_builder().recipients(Vec::new()).build().unwrap();
        assert!(config.mail.recipients.is_empty());
    }

    #[test]
    fn test_invalid_temperature_and_rate() {
        assert!(test_builder().temperature(3.5).build().is_err());
        assert!(test_builder().requests_per_minute(0).build().is_err());
    }

    #[test]
    fn test_bad_port_is_config_error() {
        let err: DigestError = digest_utils::parse_value::<u16>("SMTP_PORT", "smtp")
            .unwrap_err()
            .into();
        match err {
            DigestError::ConfigError(msg) => assert!(msg.contains("SMTP_PORT has invalid value 'smtp'")),
            other => panic!("Expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = test_builder().build().unwrap();
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("app-token"));
        assert!(!rendered.contains("openai-key"));
        assert!(!rendered.contains("news-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
