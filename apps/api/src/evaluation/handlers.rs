use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::evaluation::skills::evaluate_skills;
use crate::models::activity::NewSkillEvaluation;
use crate::models::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub job_description: String,
    #[serde(default = "default_job_role")]
    pub job_role: String,
    pub personal_info: Option<Value>,
}

fn default_job_role() -> String {
    "General".to_string()
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub score: f64,
    pub match_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// The missing skills again, as the topics for the learning plan.
    pub top_topics: Vec<String>,
    pub personal_info: Option<Value>,
    pub job_role: String,
}

/// POST /evaluate
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<EvaluationRequest>,
) -> Json<EvaluationResponse> {
    let result = evaluate_skills(
        state.llm.as_ref(),
        &request.resume_skills,
        &request.job_description,
        &request.job_role,
    )
    .await;

    if let (Some(store), Some(user_id)) = (state.store.as_ref(), params.user_uuid()) {
        let evaluation = NewSkillEvaluation {
            user_id,
            job_role: request.job_role.clone(),
            match_score: result.score as i32,
            strengths: result.matched_skills.clone(),
            gaps: result.missing_skills.clone(),
        };
        match store.insert_evaluation(evaluation).await {
            Ok(()) => info!("Saved skill evaluation for user {user_id}"),
            Err(e) => warn!("Error saving evaluation: {e}"),
        }
    }

    Json(EvaluationResponse {
        score: result.score,
        match_score: result.score,
        top_topics: result.missing_skills.clone(),
        matched_skills: result.matched_skills,
        missing_skills: result.missing_skills,
        personal_info: request.personal_info,
        job_role: request.job_role,
    })
}
