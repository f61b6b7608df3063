//! API clients for news and market data providers

pub mod news_api;
pub mod source;
pub mod yahoo;

pub use news_api::{Article, ArticleSource, NewsApiClient};
pub use source::{NewsSource, PriceHistorySource, PricePoint, PriceSeries};
pub use yahoo::YahooFinanceClient;
