use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use super::{check_status, MarketError};

const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub channel: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// YouTube Data API video search.
#[derive(Clone)]
pub struct VideoSearch {
    client: Client,
    api_key: Option<String>,
}

impl VideoSearch {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>, MarketError> {
        let api_key = self.api_key.as_deref().ok_or(MarketError::NotConfigured)?;
        let max_results = max_results.to_string();
        let q = format!("{query} tutorial");

        let response = self
            .client
            .get(YOUTUBE_SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("q", q.as_str()),
                ("key", api_key),
                ("maxResults", max_results.as_str()),
                ("type", "video"),
            ])
            .send()
            .await?;
        check_status(&response)?;

        let body: SearchResponse = response.json().await?;
        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let thumbnail = item
                    .snippet
                    .thumbnails
                    .medium
                    .or(item.snippet.thumbnails.default)
                    .map(|t| t.url)
                    .unwrap_or_default();
                Some(Video {
                    title: item.snippet.title,
                    url: format!("https://www.youtube.com/watch?v={video_id}"),
                    thumbnail,
                    channel: item.snippet.channel_title,
                })
            })
            .collect())
    }
}

/// Link to a YouTube results page, used when no API key is configured.
pub fn search_results_link(query: &str) -> Video {
    let url = Url::parse_with_params(
        "https://www.youtube.com/results",
        &[("search_query", query)],
    )
    .map(|u| u.to_string())
    .unwrap_or_else(|_| "https://www.youtube.com/results".to_string());

    Video {
        title: format!("Tutorial for {query}"),
        url,
        thumbnail: "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg".to_string(),
        channel: "YouTube Search".to_string(),
    }
}
