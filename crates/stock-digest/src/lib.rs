//! Daily stock digest
//!
//! Collects sector and ticker headlines, has a language model turn them into
//! an analyst-style narrative, adds a six-month price snapshot of the
//! portfolio, and emails the resulting plaintext report.
//!
//! # Architecture
//!
//! A [`DigestPipeline`] runs five stages in order:
//! - [`NewsCollector`]: one NewsAPI search per sector and ticker
//! - [`NarrativeAnalyzer`]: a single chat completion over the headlines
//! - [`PortfolioSnapshot`]: Yahoo Finance history per ticker
//! - [`report`]: date header plus the two sections
//! - [`ReportSender`]: SMTP delivery (or stdout in dry-run mode)
//!
//! External services sit behind the [`NewsSource`], [`PriceHistorySource`],
//! [`digest_llm::LLMProvider`] and [`ReportSender`] traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_digest::{DigestConfig, DigestPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DigestConfig::from_env()?;
//!     let pipeline = DigestPipeline::live(config, false)?;
//!     pipeline.run_logged().await;
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod mailer;
pub mod news;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod snapshot;

// Re-export main types for convenience
pub use analyzer::NarrativeAnalyzer;
pub use api::{Article, NewsSource, PriceHistorySource, PriceSeries};
pub use config::DigestConfig;
pub use error::{DigestError, Result};
pub use mailer::{ConsoleSender, ReportSender, SmtpMailer};
pub use news::NewsCollector;
pub use pipeline::{DigestPipeline, RunSummary};
pub use snapshot::PortfolioSnapshot;
