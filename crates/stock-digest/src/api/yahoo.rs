//! Yahoo Finance API client

use crate::api::source::{PriceHistorySource, PricePoint, PriceSeries};
use crate::error::{DigestError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

/// Yahoo Finance API client
#[derive(Debug, Clone, Default)]
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    /// Get daily closes for a symbol between two instants
    pub async fn get_historical_closes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceSeries> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| DigestError::YahooFinanceError(e.to_string()))?;

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp()).map_err(|e| {
            DigestError::YahooFinanceError(format!("Invalid start timestamp: {e}"))
        })?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DigestError::YahooFinanceError(format!("Invalid end timestamp: {e}")))?;

        let quotes = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .and_then(|response| response.quotes());

        series_from_quotes(symbol, quotes)
    }
}

/// Turn a Yahoo quote lookup into a date-ordered series
///
/// Yahoo reports a range with no quotes as an error; that becomes an empty
/// series so the snapshot can print its no-data line.
fn series_from_quotes(
    symbol: &str,
    quotes: std::result::Result<Vec<yahoo::Quote>, yahoo::YahooError>,
) -> Result<PriceSeries> {
    let quotes = match quotes {
        Ok(quotes) => quotes,
        Err(yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) => Vec::new(),
        Err(e) => return Err(DigestError::YahooFinanceError(e.to_string())),
    };

    let mut points: Vec<PricePoint> = quotes
        .iter()
        .filter(|q| q.close.is_finite())
        .filter_map(|q| {
            let timestamp = i64::try_from(q.timestamp).ok()?;
            DateTime::from_timestamp(timestamp, 0).map(|ts| PricePoint {
                date: ts.date_naive(),
                close: q.close,
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);

    Ok(PriceSeries::new(symbol, points))
}

#[async_trait]
impl PriceHistorySource for YahooFinanceClient {
    async fn daily_closes(&self, symbol: &str, days: i64) -> Result<PriceSeries> {
        let end = Utc::now();
        let start = end - Duration::days(days);
        self.get_historical_closes(symbol, start, end).await
    }
}
