use reqwest::{header::AUTHORIZATION, Client};
use serde::Deserialize;

use super::{check_status, MarketError};

const PEXELS_SEARCH_URL: &str = "https://api.pexels.com/v1/search";

#[derive(Debug, Deserialize)]
struct PhotoResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    medium: String,
}

/// Pexels stock-photo search. Returns medium-size image URLs.
#[derive(Clone)]
pub struct PhotoSearch {
    client: Client,
    api_key: Option<String>,
}

impl PhotoSearch {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub async fn search(&self, query: &str, per_page: u32) -> Result<Vec<String>, MarketError> {
        let api_key = self.api_key.as_deref().ok_or(MarketError::NotConfigured)?;
        let per_page = per_page.to_string();

        let response = self
            .client
            .get(PEXELS_SEARCH_URL)
            .header(AUTHORIZATION, api_key)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await?;
        check_status(&response)?;

        let body: PhotoResponse = response.json().await?;
        Ok(body.photos.into_iter().map(|p| p.src.medium).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_payload_yields_medium_urls() {
        let json = r#"{"photos": [{"src": {"medium": "https://p/1.jpg", "large": "x"}}]}"#;
        let parsed: PhotoResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.photos[0].src.medium, "https://p/1.jpg");
    }

    #[tokio::test]
    async fn test_unconfigured_photo_search() {
        let photos = PhotoSearch::new(Client::new(), None);
        assert!(matches!(photos.search("code", 1).await, Err(MarketError::NotConfigured)));
    }
}
