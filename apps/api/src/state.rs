use std::sync::Arc;

use reqwest::Client;

use crate::auth::jwt::TokenService;
use crate::config::Config;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::market::cache::JobCache;
use crate::market::exchange::ExchangeClient;
use crate::market::jobs::{JSearchClient, JobSearch};
use crate::market::news::NewsClient;
use crate::market::photos::PhotoSearch;
use crate::market::videos::VideoSearch;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no database is configured; handlers fall back to mock paths.
    pub store: Option<Arc<dyn Store>>,
    pub llm: Arc<dyn TextGenerator>,
    pub tokens: TokenService,
    pub config: Config,
    pub videos: VideoSearch,
    pub photos: PhotoSearch,
    pub news: NewsClient,
    pub exchange: ExchangeClient,
    /// Job search with its one-hour response cache.
    pub jobs: Arc<JobSearch>,
}

impl AppState {
    /// Production wiring: Gemini for text generation and the public REST APIs
    /// for market data, all sharing one HTTP client.
    pub fn new(config: Config, store: Option<Arc<dyn Store>>, http: Client) -> Self {
        let llm: Arc<dyn TextGenerator> =
            Arc::new(GeminiClient::new(http.clone(), config.gemini_api_key.clone()));
        let jobs = JobSearch::new(
            Arc::new(JSearchClient::new(http.clone(), config.jsearch_api_key.clone())),
            JobCache::default(),
        );

        Self {
            store,
            llm,
            tokens: TokenService::new(&config),
            videos: VideoSearch::new(http.clone(), config.youtube_api_key.clone()),
            photos: PhotoSearch::new(http.clone(), config.pexels_api_key.clone()),
            news: NewsClient::new(http.clone(), config.news_api_key.clone()),
            exchange: ExchangeClient::new(http, config.exchange_api_key.clone()),
            jobs: Arc::new(jobs),
            config,
        }
    }
}
