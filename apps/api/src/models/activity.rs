use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewResume {
    pub user_id: Uuid,
    pub file_name: String,
    pub parsed_content: Value,
    pub score: i32,
}

#[derive(Debug, Clone)]
pub struct NewSkillEvaluation {
    pub user_id: Uuid,
    pub job_role: String,
    pub match_score: i32,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub domain: String,
    pub difficulty: String,
    pub score: i32,
    pub total_questions: i32,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /quiz/submit`, inserted as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuiz {
    pub user_id: Uuid,
    pub domain: String,
    pub difficulty: String,
    pub score: i32,
    pub total_questions: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_role: String,
    pub mode: String,
    pub score: i32,
    pub feedback: String,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInterview {
    pub user_id: Uuid,
    pub job_role: String,
    pub mode: String,
    pub score: i32,
    pub feedback: String,
    pub metadata: Option<Value>,
}
