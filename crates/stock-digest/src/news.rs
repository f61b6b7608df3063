//! News collection across sector and ticker queries

use crate::api::{Article, NewsSource};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs every configured query against a news source
///
/// A failing query is logged and skipped; the remaining queries still run.
pub struct NewsCollector {
    source: Arc<dyn NewsSource>,
}

impl NewsCollector {
    pub fn new(source: Arc<dyn NewsSource>) -> Self {
        Self { source }
    }

    /// Collect articles for each query in order
    ///
    /// Result order is query order, then the order the source returned.
    pub async fn collect(&self, queries: &[String]) -> Vec<Article> {
        let mut articles = Vec::new();
        let mut failed = 0usize;

        for query in queries {
            match self.source.search(query).await {
                Ok(batch) => articles.extend(batch),
                Err(e) => {
                    failed += 1;
                    warn!(query = %query, error = %e, "❌ Error fetching news");
                }
            }
        }

        info!(
            queries = queries.len(),
            failed,
            articles = articles.len(),
            "News collection finished"
        );
        articles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::source::MockNewsSource;
    use crate::error::DigestError;

    fn article(title: &str) -> Article {
        Article {
            title: Some(title.to_string()),
            description: Some(format!("{title} description")),
            ..Default::default()
        }
    }

    fn queries(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_failed_query_does_not_stop_batch() {
        let mut source = MockNewsSource::new();
        source.expect_search().times(3).returning(|query| match query {
            "biotechnology" => Ok(vec![article("bio-1"), article("bio-2")]),
            "technology" => Err(DigestError::NewsApiError {
                code: "rateLimited".to_string(),
                message: "Too many requests".to_string(),
            }),
            other => Ok(vec![article(&format!("{other}-1"))]),
        });

        let collector = NewsCollector::new(Arc::new(source));
        let articles = collector
            .collect(&queries(&["biotechnology", "technology", "AAPL"]))
            .await;

        let titles: Vec<_> = articles.iter().filter_map(|a| a.title.as_deref()).collect();
        assert_eq!(titles, vec!["bio-1", "bio-2", "AAPL-1"]);
    }

    #[tokio::test]
    async fn test_all_queries_fail() {
        let mut source = MockNewsSource::new();
        source
            .expect_search()
            .times(2)
            .returning(|_| Err(DigestError::ConfigError("offline".to_string())));

        let collector = NewsCollector::new(Arc::new(source));
        let articles = collector.collect(&queries(&["energy production", "SMR"])).await;

        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_no_queries() {
        let mut source = MockNewsSource::new();
        source.expect_search().never();

        let collector = NewsCollector::new(Arc::new(source));
        assert!(collector.collect(&[]).await.is_empty());
    }
}
