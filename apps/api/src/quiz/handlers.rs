use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::activity::{NewQuiz, QuizRow};
use crate::quiz::generator::{generate_questions, Question, DEFAULT_DIFFICULTY, DEFAULT_QUESTION_COUNT};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub topic: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

fn default_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /quiz
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<QuizRequest>,
) -> Json<QuizResponse> {
    let result = generate_questions(
        state.llm.as_ref(),
        &request.topic,
        &request.difficulty,
        request.count,
    )
    .await;

    Json(match result {
        Ok(questions) => QuizResponse {
            questions,
            error: None,
        },
        Err(e) => QuizResponse {
            questions: vec![],
            error: Some(format!("Could not generate a quiz right now: {e}")),
        },
    })
}

/// POST /quiz/submit
pub async fn handle_submit_quiz(
    State(state): State<AppState>,
    Json(quiz): Json<NewQuiz>,
) -> Result<Json<QuizRow>, AppError> {
    let store = state.store.as_ref().ok_or(AppError::DatabaseUnavailable)?;
    let row = store.insert_quiz(quiz).await?;
    info!("Saved quiz {} for user {}", row.id, row.user_id);
    Ok(Json(row))
}
