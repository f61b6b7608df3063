//! One end-to-end digest run
//!
//! News → narrative → snapshot → report → mail, strictly in that order. News
//! queries and ticker lookups fail in isolation; a model or mail failure ends
//! the run without sending anything.

use crate::analyzer::NarrativeAnalyzer;
use crate::api::{NewsApiClient, NewsSource, PriceHistorySource, YahooFinanceClient};
use crate::config::DigestConfig;
use crate::error::{DigestError, Result};
use crate::mailer::{ConsoleSender, ReportSender, SmtpMailer};
use crate::news::NewsCollector;
use crate::report;
use crate::snapshot::PortfolioSnapshot;
use chrono::NaiveDate;
use digest_llm::LLMProvider;
use digest_llm::providers::{OpenAIConfig, OpenAIProvider};
use std::sync::Arc;
use tracing::{error, info};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub date: NaiveDate,
    pub articles: usize,
    pub narrative_chars: usize,
    pub recipients: usize,
}

/// The full digest pipeline with its collaborators
pub struct DigestPipeline {
    config: DigestConfig,
    collector: NewsCollector,
    analyzer: NarrativeAnalyzer,
    snapshot: PortfolioSnapshot,
    sender: Arc<dyn ReportSender>,
}

impl DigestPipeline {
    pub fn new(
        config: DigestConfig,
        news: Arc<dyn NewsSource>,
        llm: Arc<dyn LLMProvider>,
        prices: Arc<dyn PriceHistorySource>,
        sender: Arc<dyn ReportSender>,
    ) -> Self {
        let analyzer = NarrativeAnalyzer::new(llm, &config.llm);
        Self {
            collector: NewsCollector::new(news),
            snapshot: PortfolioSnapshot::new(prices),
            analyzer,
            sender,
            config,
        }
    }

    /// Wire the live NewsAPI, OpenAI, Yahoo and SMTP clients
    ///
    /// With `dry_run` the report is printed instead of mailed.
    pub fn live(config: DigestConfig, dry_run: bool) -> Result<Self> {
        let news = Arc::new(NewsApiClient::new(&config.news)?);
        let llm = Arc::new(OpenAIProvider::with_config(
            OpenAIConfig::new(config.llm.api_key.clone()).with_api_base(&config.llm.api_base),
        )?);
        let prices = Arc::new(YahooFinanceClient::new());
        let sender: Arc<dyn ReportSender> = if dry_run {
            Arc::new(ConsoleSender)
        } else {
            Arc::new(SmtpMailer::new(&config.mail)?)
        };

        Ok(Self::new(config, news, llm, prices, sender))
    }

    pub fn config(&self) -> &DigestConfig {
        &self.config
    }

    /// Run every stage; the first unisolated failure is returned
    pub async fn run(&self) -> Result<RunSummary> {
        self.run_on(report::today()).await
    }

    /// Run every stage with an explicit report date
    pub async fn run_on(&self, date: NaiveDate) -> Result<RunSummary> {
        let tickers = &self.config.tickers;

        info!("📡 Fetching news...");
        let articles = self.collector.collect(&self.config.news_queries()).await;

        info!("🧠 Analyzing news + portfolio...");
        let narrative = self.analyzer.analyze(&articles, tickers).await?;

        info!("📊 Analyzing raw stock performance...");
        let snapshot = self.snapshot.build(tickers).await;

        let body = report::assemble(date, &narrative, &snapshot);

        info!("📧 Sending report...");
        let recipients = &self.config.mail.recipients;
        self.sender
            .send(&self.config.mail.subject, &body, recipients)
            .await?;

        Ok(RunSummary {
            date,
            articles: articles.len(),
            narrative_chars: narrative.chars().count(),
            recipients: recipients.len(),
        })
    }

    /// Run with the outer catch-all: any failure is logged, never returned
    ///
    /// No notification is sent when a run fails.
    pub async fn run_logged(&self) -> Option<RunSummary> {
        match self.run().await {
            Ok(summary) => {
                info!(
                    date = %summary.date,
                    articles = summary.articles,
                    narrative_chars = summary.narrative_chars,
                    recipients = summary.recipients,
                    "Digest run complete"
                );
                Some(summary)
            }
            Err(e) => {
                log_failure(&e);
                None
            }
        }
    }
}

/// Headline for a failed run; SMTP authentication is told apart from
/// other delivery failures and from everything else
fn failure_headline(err: &DigestError) -> &'static str {
    match err {
        DigestError::MailAuthentication(_) => "❌ SMTP Authentication Error",
        DigestError::MailTransport(_)
        | DigestError::MessageBuildError(_)
        | DigestError::InvalidAddress { .. } => "❌ Failed to send email",
        _ => "❌ Error generating or sending report",
    }
}

/// Log a run failure under its headline
pub fn log_failure(err: &DigestError) {
    error!("{}: {err}", failure_headline(err));
}
