//! Data source seams used by the pipeline

use crate::api::news_api::Article;
use crate::error::{DigestError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

/// A news search backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Search for recent articles matching `query`, newest first
    async fn search(&self, query: &str) -> Result<Vec<Article>>;
}

/// A daily price history backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Daily closes for `symbol` over the last `days` calendar days, oldest first
    async fn daily_closes(&self, symbol: &str, days: i64) -> Result<PriceSeries>;
}

/// One daily close
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Ordered daily closes for one ticker
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_close(&self) -> Option<f64> {
        self.points.first().map(|p| p.close)
    }

    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// Percentage change from the first to the last close
    ///
    /// Fails for an empty series or a zero first close.
    pub fn percent_change(&self) -> Result<f64> {
        let (Some(first), Some(last)) = (self.first_close(), self.last_close()) else {
            return Err(self.unavailable("no closes in range"));
        };
        if first == 0.0 {
            return Err(self.unavailable("first close is zero"));
        }
        Ok((last - first) / first * 100.0)
    }

    fn unavailable(&self, reason: &str) -> DigestError {
        DigestError::DataUnavailable {
            symbol: self.symbol.clone(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let points = closes
            .iter()
            .zip(start.iter_days())
            .map(|(&close, date)| PricePoint { date, close })
            .collect();
        PriceSeries::new("TEST", points)
    }

    #[test]
    fn test_percent_change() {
        let s = series(&[100.0, 95.0, 110.0]);
        assert_eq!(s.first_close(), Some(100.0));
        assert_eq!(s.last_close(), Some(110.0));
        assert!((s.percent_change().unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample_is_flat() {
        let s = series(&[42.5]);
        assert!(s.percent_change().unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_decline() {
        let s = series(&[200.0, 150.0]);
        assert!((s.percent_change().unwrap() + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_zero_base() {
        assert!(series(&[]).is_empty());
        assert!(matches!(
            series(&[]).percent_change(),
            Err(DigestError::DataUnavailable { reason, .. }) if reason == "no closes in range"
        ));
        assert!(matches!(
            series(&[0.0, 5.0]).percent_change(),
            Err(DigestError::DataUnavailable { symbol, reason }) if symbol == "TEST" && reason == "first close is zero"
        ));
    }
}
