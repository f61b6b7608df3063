//! Portfolio price snapshot

use crate::api::{PriceHistorySource, PriceSeries};
use std::sync::Arc;
use tracing::{info, warn};

/// Calendar days of history behind the "6mo" figures
pub const LOOKBACK_DAYS: i64 = 180;

/// Render one snapshot line for a fetched series
pub fn summarize(symbol: &str, series: &PriceSeries) -> String {
    let Some(last) = series.last_close() else {
        return no_data_line(symbol);
    };

    match series.percent_change() {
        Ok(change) => format!("{symbol} – 6mo Change: {change:.2}% | Current Price: ${last:.2}\n"),
        Err(e) => error_line(symbol, e),
    }
}

fn no_data_line(symbol: &str) -> String {
    format!("{symbol} - No recent data available.\n")
}

fn error_line(symbol: &str, error: impl std::fmt::Display) -> String {
    format!("{symbol} – Error retrieving data: {error}\n")
}

/// Six-month change and latest price for each portfolio ticker
///
/// Each ticker is isolated: a failure becomes an inline error line.
pub struct PortfolioSnapshot {
    source: Arc<dyn PriceHistorySource>,
}

impl PortfolioSnapshot {
    pub fn new(source: Arc<dyn PriceHistorySource>) -> Self {
        Self { source }
    }

    pub async fn build(&self, tickers: &[String]) -> String {
        let mut snapshot = String::new();

        for ticker in tickers {
            match self.source.daily_closes(ticker, LOOKBACK_DAYS).await {
                Ok(series) => {
                    if series.is_empty() {
                        warn!(ticker = %ticker, "No price history returned");
                    }
                    snapshot.push_str(&summarize(ticker, &series));
                }
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "Price history lookup failed");
                    snapshot.push_str(&error_line(ticker, &e));
                }
            }
        }

        info!(tickers = tickers.len(), "Portfolio snapshot built");
        snapshot
    }
}
