//! Persistence seam. Handlers talk to `dyn Store`; the hosted Postgres
//! database sits behind `PgStore`, and tests use an in-memory store.
//!
//! The store is optional in `AppState`. When no database is configured every
//! handler falls back to its mock path instead of failing.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::activity::{
    InterviewRow, NewInterview, NewQuiz, NewResume, NewSkillEvaluation, QuizRow,
};
use crate::models::plan::{LearningPlanRow, NewLearningPlan};
use crate::models::user::{NewUser, UserRow};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Table-level operations used by the handlers.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, StoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRow>, StoreError>;
    async fn insert_user(&self, user: NewUser) -> Result<UserRow, StoreError>;
    /// `None` when the user does not exist.
    async fn user_badges(&self, user_id: Uuid) -> Result<Option<Vec<String>>, StoreError>;
    /// Adds `badge` to the user's set in one conditional write.
    /// Returns `true` only when this call added it.
    async fn award_badge(&self, user_id: Uuid, badge: &str) -> Result<bool, StoreError>;

    async fn insert_resume(&self, resume: NewResume) -> Result<(), StoreError>;
    async fn insert_evaluation(&self, evaluation: NewSkillEvaluation) -> Result<(), StoreError>;

    async fn insert_plan(&self, plan: NewLearningPlan) -> Result<LearningPlanRow, StoreError>;
    async fn latest_plan(&self, user_id: Uuid) -> Result<Option<LearningPlanRow>, StoreError>;
    /// Sets `completed = true` on the week whose `week` number matches, in one
    /// conditional write. `None` when no plan with this id belongs to the user.
    async fn complete_plan_week(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        week: u32,
    ) -> Result<Option<LearningPlanRow>, StoreError>;

    async fn insert_quiz(&self, quiz: NewQuiz) -> Result<QuizRow, StoreError>;
    async fn quizzes_for_user(&self, user_id: Uuid) -> Result<Vec<QuizRow>, StoreError>;

    async fn insert_interview(&self, interview: NewInterview) -> Result<InterviewRow, StoreError>;
    async fn interviews_for_user(&self, user_id: Uuid) -> Result<Vec<InterviewRow>, StoreError>;
}

/// Builds the database handle if a URL is configured and reachable.
/// Any failure is logged and yields `None` so the service still starts.
pub async fn connect_store(database_url: Option<&str>) -> Option<Arc<dyn Store>> {
    let Some(url) = database_url else {
        warn!("DATABASE_URL not set. Database features will be disabled.");
        return None;
    };

    match PgStore::connect(url).await {
        Ok(store) => {
            info!("PostgreSQL store ready");
            Some(Arc::new(store))
        }
        Err(e) => {
            warn!("Could not connect to database, continuing without it: {e}");
            None
        }
    }
}
