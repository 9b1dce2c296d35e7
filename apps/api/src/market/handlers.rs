use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::market::cache::JobQuery;
use crate::market::jobs::{fallback_message, format_jobs, sample_jobs, JobListing};
use crate::market::news::Article;
use crate::market::MarketError;
use crate::state::AppState;

const NEWS_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct JobSearchParams {
    pub query: String,
    #[serde(default = "default_location")]
    pub location: String,
    pub employment_type: Option<String>,
    #[serde(default = "default_date_posted")]
    pub date_posted: String,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_location() -> String {
    "India".to_string()
}

fn default_date_posted() -> String {
    "all".to_string()
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub success: bool,
    pub jobs: Vec<JobListing>,
    pub total: usize,
    pub page: u32,
    pub message: String,
}

/// GET /jobs/search
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobSearchParams>,
) -> Json<JobSearchResponse> {
    let employment_type = params.employment_type.filter(|t| !t.trim().is_empty());
    let query = JobQuery {
        query: params.query.clone(),
        location: params.location.clone(),
        employment_type: employment_type.clone(),
        date_posted: params.date_posted,
        page: params.page,
    };

    match state.jobs.search(query).await {
        Ok(payload) => {
            let jobs = format_jobs(&payload);
            let total = jobs.len();
            Json(JobSearchResponse {
                success: true,
                jobs,
                total,
                page: params.page,
                message: format!("Found {total} jobs"),
            })
        }
        Err(e) => {
            warn!("Job search failed, serving sample listings: {e}");
            let jobs = sample_jobs(&params.query, &params.location, employment_type.as_deref());
            let total = jobs.len();
            Json(JobSearchResponse {
                success: false,
                jobs,
                total,
                page: params.page,
                message: fallback_message(&e),
            })
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    #[serde(default = "default_news_query")]
    pub query: String,
}

fn default_news_query() -> String {
    "technology".to_string()
}

/// GET /jobs/news
pub async fn handle_market_news(
    State(state): State<AppState>,
    Query(params): Query<NewsParams>,
) -> Json<Value> {
    match state.news.everything(&params.query, NEWS_LIMIT).await {
        Ok(articles) => Json(json!(articles)),
        Err(MarketError::NotConfigured) => Json(json!({ "error": "News API not configured" })),
        Err(e) => {
            warn!("News lookup failed: {e}");
            Json(json!(Vec::<Article>::new()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExchangeParams {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
}

fn default_base_currency() -> String {
    "USD".to_string()
}

/// GET /jobs/exchange-rates
pub async fn handle_exchange_rates(
    State(state): State<AppState>,
    Query(params): Query<ExchangeParams>,
) -> Json<Value> {
    match state.exchange.latest(&params.base_currency).await {
        Ok(rates) => Json(json!(rates)),
        Err(MarketError::NotConfigured) => Json(json!({ "error": "Exchange API not configured" })),
        Err(e) => {
            warn!("Exchange rate lookup failed: {e}");
            Json(json!(BTreeMap::<String, f64>::new()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListingsParams {
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct StaticListing {
    pub title: String,
    pub company: &'static str,
    pub location: &'static str,
}

/// GET /jobs/listings
pub async fn handle_job_listings(Query(params): Query<ListingsParams>) -> Json<Vec<StaticListing>> {
    Json(vec![
        StaticListing {
            title: format!("Senior {}", params.role),
            company: "Tech Corp",
            location: "Remote",
        },
        StaticListing {
            title: format!("Junior {}", params.role),
            company: "StartUp Inc",
            location: "Bangalore",
        },
    ])
}
