use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::market::news::Article;
use crate::market::MarketError;
use crate::models::activity::{InterviewRow, QuizRow};
use crate::progress::stats::{compute_stats, ProgressStats};
use crate::state::AppState;

const HEADLINE_LIMIT: usize = 3;
const MARKET_BASE: &str = "USD";
const MARKET_QUOTE: &str = "INR";

#[derive(Debug, Serialize)]
pub struct Insights {
    pub news: Vec<Article>,
    /// `{base, rates: {INR}}`, or `{}` when rates are unavailable.
    pub market: Value,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub user_id: Uuid,
    pub stats: ProgressStats,
    pub quiz_history: Vec<QuizRow>,
    pub interview_history: Vec<InterviewRow>,
    pub insights: Insights,
}

async fn insights(state: &AppState) -> Insights {
    let news = match state.news.tech_headlines(HEADLINE_LIMIT).await {
        Ok(articles) => articles,
        Err(MarketError::NotConfigured) => vec![],
        Err(e) => {
            warn!("News API error: {e}");
            vec![]
        }
    };

    let market = match state.exchange.latest(MARKET_BASE).await {
        Ok(rates) => {
            let quote: BTreeMap<&str, Option<f64>> =
                BTreeMap::from([(MARKET_QUOTE, rates.get(MARKET_QUOTE).copied())]);
            json!({ "base": MARKET_BASE, "rates": quote })
        }
        Err(MarketError::NotConfigured) => json!({}),
        Err(e) => {
            warn!("Exchange API error: {e}");
            json!({})
        }
    };

    Insights { news, market }
}

/// GET /progress/:user_id
pub async fn handle_get_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let Some(store) = state.store.as_ref() else {
        return Ok(Json(json!({ "error": "Database not connected" })));
    };
    let Ok(user_id) = Uuid::parse_str(user_id.trim()) else {
        return Ok(Json(json!({ "error": "Invalid user id" })));
    };

    let latest_plan = store.latest_plan(user_id).await?;
    let quizzes = store.quizzes_for_user(user_id).await?;
    let interviews = store.interviews_for_user(user_id).await?;
    let badges = store.user_badges(user_id).await?.unwrap_or_default();

    let response = ProgressResponse {
        user_id,
        stats: compute_stats(latest_plan.as_ref(), &quizzes, interviews.len(), badges),
        quiz_history: quizzes,
        interview_history: interviews,
        insights: insights(&state).await,
    };
    Ok(Json(serde_json::to_value(response).map_err(anyhow::Error::from)?))
}
