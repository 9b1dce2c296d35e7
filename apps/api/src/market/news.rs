use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{check_status, MarketError};

const NEWS_API_BASE: &str = "https://newsapi.org/v2";

/// A news article as returned by NewsAPI. Unknown fields are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub source: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

/// NewsAPI client.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    api_key: Option<String>,
}

impl NewsClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    /// Articles matching `query`, newest relevance first, at most `limit`.
    pub async fn everything(&self, query: &str, limit: usize) -> Result<Vec<Article>, MarketError> {
        self.fetch("everything", &[("q", query)], limit).await
    }

    /// Top English technology headlines, at most `limit`.
    pub async fn tech_headlines(&self, limit: usize) -> Result<Vec<Article>, MarketError> {
        self.fetch(
            "top-headlines",
            &[("category", "technology"), ("language", "en")],
            limit,
        )
        .await
    }

    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        limit: usize,
    ) -> Result<Vec<Article>, MarketError> {
        let api_key = self.api_key.as_deref().ok_or(MarketError::NotConfigured)?;

        let response = self
            .client
            .get(format!("{NEWS_API_BASE}/{endpoint}"))
            .query(params)
            .query(&[("apiKey", api_key)])
            .send()
            .await?;
        check_status(&response)?;

        let body: NewsResponse = response.json().await?;
        Ok(body.articles.into_iter().take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_payload_parses_with_missing_fields() {
        let json = r#"{"status": "ok", "articles": [{"title": "Rust 2.0", "source": {"name": "X"}}]}"#;
        let parsed: NewsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.articles[0].title.as_deref(), Some("Rust 2.0"));
        assert!(parsed.articles[0].url.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_news() {
        let news = NewsClient::new(Client::new(), None);
        assert!(matches!(news.tech_headlines(3).await, Err(MarketError::NotConfigured)));
    }
}
