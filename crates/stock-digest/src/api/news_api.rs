//! NewsAPI client for sector and ticker headlines
//!
//! Uses the `/v2/everything` endpoint. See: https://newsapi.org/docs/endpoints/everything

use crate::api::source::NewsSource;
use crate::config::NewsSettings;
use crate::error::{DigestError, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, warn};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Publisher of an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// News article as returned by NewsAPI
///
/// Any field may be null or missing in the upstream payload. The timestamp is
/// kept as the raw string; only title and description feed the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Article {
    /// Title and description, when both are present and non-empty
    pub fn headline(&self) -> Option<(&str, &str)> {
        let title = self.title.as_deref().filter(|t| !t.is_empty())?;
        let description = self.description.as_deref().filter(|d| !d.is_empty())?;
        Some((title, description))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EverythingResponse {
    status: String,
    #[serde(default, deserialize_with = "lenient_articles")]
    articles: Vec<Article>,
    code: Option<String>,
    message: Option<String>,
}

/// Keep every article that parses; a malformed entry is dropped on its own
fn lenient_articles<'de, D>(deserializer: D) -> std::result::Result<Vec<Article>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = raw.len();

    let articles: Vec<Article> = raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if articles.len() < total {
        warn!(
            dropped = total - articles.len(),
            "Skipped malformed NewsAPI articles"
        );
    }
    Ok(articles)
}

/// NewsAPI client with client-side rate limiting
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    api_base: String,
    page_size: u32,
    language: String,
    rate_limiter: SharedRateLimiter,
}

impl NewsApiClient {
    /// Create a new client from the news settings
    pub fn new(settings: &NewsSettings) -> Result<Self> {
        let quota = Quota::per_minute(
            NonZeroU32::new(settings.requests_per_minute).unwrap_or(NonZeroU32::MIN),
        );

        // NewsAPI rejects requests without a User-Agent
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            page_size: settings.page_size,
            language: settings.language.clone(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Search everything for `query`, newest first
    pub async fn everything(&self, query: &str) -> Result<Vec<Article>> {
        self.rate_limiter.until_ready().await;

        let page_size = self.page_size.to_string();
        let response = self
            .client
            .get(format!("{}/everything", self.api_base))
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", query),
                ("language", self.language.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let articles = parse_everything(status, &body)?;

        debug!(query, count = articles.len(), "NewsAPI search complete");
        Ok(articles)
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Article>> {
        self.everything(query).await
    }
}

/// Interpret an `/everything` response body
fn parse_everything(status: u16, body: &str) -> Result<Vec<Article>> {
    let parsed: std::result::Result<EverythingResponse, _> = serde_json::from_str(body);

    match parsed {
        Ok(resp) if (200..300).contains(&status) && resp.status == "ok" => Ok(resp.articles),
        Ok(resp) => Err(DigestError::NewsApiError {
            code: resp.code.unwrap_or_else(|| format!("HTTP {status}")),
            message: resp.message.unwrap_or_else(|| "unknown error".to_string()),
        }),
        Err(_) if !(200..300).contains(&status) => Err(DigestError::NewsApiError {
            code: format!("HTTP {status}"),
            message: body.chars().take(200).collect(),
        }),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> NewsSettings {
        NewsSettings {
            api_key: "test_key".to_string(),
            api_base: "https://newsapi.org/v2/".to_string(),
            page_size: 3,
            language: "en".to_string(),
            requests_per_minute: 60,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = NewsApiClient::new(&settings()).unwrap();
        assert_eq!(client.api_key, "test_key");
        assert_eq!(client.api_base, "https://newsapi.org/v2");
        assert_eq!(client.page_size, 3);
    }

    #[test]
    fn test_parse_ok_response() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": "reuters", "name": "Reuters"},
                    "author": "Jane Doe",
                    "title": "Chipmaker wins contract",
                    "description": "A large order was announced.",
                    "url": "https://example.com/a",
                    "urlToImage": null,
                    "publishedAt": "2025-08-14T10:00:00Z",
                    "content": "..."
                },
                {
                    "source": {"id": null, "name": "Blog"},
                    "author": null,
                    "title": "Untitled",
                    "description": null,
                    "url": "https://example.com/b",
                    "publishedAt": "2025-08-14T09:00:00Z"
                }
            ]
        }"#;

        let articles = parse_everything(200, body).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(
            articles[0].source.as_ref().and_then(|s| s.name.as_deref()),
            Some("Reuters")
        );
        assert_eq!(
            articles[0].headline(),
            Some(("Chipmaker wins contract", "A large order was announced."))
        );
        assert_eq!(
            articles[0].published_at.as_deref(),
            Some("2025-08-14T10:00:00Z")
        );
        assert_eq!(articles[1].headline(), None);
    }

    #[test]
    fn test_parse_tolerates_odd_articles() {
        let body = r#"{
            "status": "ok",
            "articles": [
                {
                    "source": {"id": null, "name": "Reuters"},
                    "title": "Chipmaker wins contract",
                    "description": "A large order was announced.",
                    "publishedAt": "2025-08-14T10:00:00Z"
                },
                {
                    "source": null,
                    "title": "Reactor approved",
                    "description": "Regulator signs off.",
                    "publishedAt": ""
                },
                {
                    "title": 42,
                    "description": "Not a real title"
                },
                {
                    "title": "Rates on hold",
                    "description": "Central bank pauses."
                }
            ]
        }"#;

        let articles = parse_everything(200, body).unwrap();
        let headlines: Vec<_> = articles.iter().filter_map(Article::headline).collect();
        assert_eq!(
            headlines,
            vec![
                ("Chipmaker wins contract", "A large order was announced."),
                ("Reactor approved", "Regulator signs off."),
                ("Rates on hold", "Central bank pauses."),
            ]
        );
        assert_eq!(articles[1].source, None);
        assert_eq!(articles[1].published_at.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_null_articles() {
        let articles = parse_everything(200, r#"{"status":"ok","articles":null}"#).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;

        match parse_everything(401, body) {
            Err(DigestError::NewsApiError { code, message }) => {
                assert_eq!(code, "apiKeyInvalid");
                assert_eq!(message, "Your API key is invalid.");
            }
            other => panic!("Expected NewsApiError, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_non_json_failure() {
        match parse_everything(502, "<html>Bad Gateway</html>") {
            Err(DigestError::NewsApiError { code, .. }) => assert_eq!(code, "HTTP 502"),
            other => panic!("Expected NewsApiError, got {other:?}"),
        }
    }

    #[test]
    fn test_headline_requires_non_empty_fields() {
        let article = Article {
            title: Some(String::new()),
            description: Some("desc".to_string()),
            ..Default::default()
        };
        assert_eq!(article.headline(), None);
    }

    #[tokio::test]
    #[ignore] // Requires network access and NEWS_API_KEY
    async fn test_live_search() {
        let key = std::env::var("NEWS_API_KEY").unwrap();
        let client = NewsApiClient::new(&NewsSettings {
            api_key: key,
            ..settings()
        })
        .unwrap();

        let articles = client.search("technology").await.unwrap();
        assert!(articles.len() <= 3);
    }
}
