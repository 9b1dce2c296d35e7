use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::interview::coach::{evaluate_session, turn_feedback, InterviewReport, TranscriptTurn};
use crate::models::activity::NewInterview;
use crate::models::UserIdQuery;
use crate::state::AppState;

const TEXT_MODE: &str = "Text";

#[derive(Debug, Deserialize)]
pub struct InterviewTurnRequest {
    pub role: String,
    pub response: String,
    pub previous_question: String,
}

async fn save_interview(state: &AppState, interview: NewInterview) {
    let Some(store) = state.store.as_ref() else {
        return;
    };
    match store.insert_interview(interview).await {
        Ok(row) => info!("Saved interview {} for user {}", row.id, row.user_id),
        Err(e) => warn!("Error saving interview: {e}"),
    }
}

/// POST /interview
pub async fn handle_interview_turn(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<InterviewTurnRequest>,
) -> Json<Value> {
    let result = turn_feedback(
        state.llm.as_ref(),
        &request.role,
        &request.previous_question,
        &request.response,
    )
    .await;

    let turn = match result {
        Ok(turn) => turn,
        Err(e) => {
            warn!("Interview feedback failed: {e}");
            return Json(json!({ "error": e.to_string() }));
        }
    };

    if let Some(user_id) = params.user_uuid() {
        let interview = NewInterview {
            user_id,
            job_role: request.role.clone(),
            mode: TEXT_MODE.to_string(),
            score: 0,
            feedback: turn.response.clone(),
            metadata: None,
        };
        save_interview(&state, interview).await;
    }

    Json(json!(turn))
}

#[derive(Debug, Deserialize)]
pub struct SessionEvaluationRequest {
    pub role: String,
    #[serde(default = "default_round")]
    pub round: String,
    #[serde(default)]
    pub transcript: Vec<TranscriptTurn>,
}

fn default_round() -> String {
    "Technical".to_string()
}

/// POST /interview/evaluate
pub async fn handle_evaluate_interview(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<SessionEvaluationRequest>,
) -> Json<InterviewReport> {
    let report = evaluate_session(
        state.llm.as_ref(),
        &request.role,
        &request.round,
        &request.transcript,
    )
    .await;

    if let Some(user_id) = params.user_uuid() {
        let interview = NewInterview {
            user_id,
            job_role: request.role.clone(),
            mode: request.round.clone(),
            score: report.score as i32,
            feedback: report.feedback.clone(),
            metadata: Some(json!({
                "round": request.round,
                "turns": request.transcript.len(),
                "suggestions": report.suggestions,
            })),
        };
        save_interview(&state, interview).await;
    }

    Json(report)
}
