use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::activity::{
    InterviewRow, NewInterview, NewQuiz, NewResume, NewSkillEvaluation, QuizRow,
};
use crate::models::plan::{LearningPlanRow, NewLearningPlan};
use crate::models::user::{NewUser, UserRow};

const USER_COLUMNS: &str =
    "id, email, username, full_name, password_hash, COALESCE(badges, '{}') AS badges, created_at";

/// `Store` backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates the connection pool.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

fn map_insert_error(e: sqlx::Error, what: &str) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::Duplicate(what.to_string())
        }
        _ => StoreError::Database(e),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, StoreError> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRow>, StoreError> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 LIMIT 1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRow, StoreError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, username, full_name, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.full_name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, "email or username already registered"))
    }

    async fn user_badges(&self, user_id: Uuid) -> Result<Option<Vec<String>>, StoreError> {
        let badges: Option<Vec<String>> =
            sqlx::query_scalar("SELECT COALESCE(badges, '{}') FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(badges)
    }

    async fn award_badge(&self, user_id: Uuid, badge: &str) -> Result<bool, StoreError> {
        // Set-union in a single statement: concurrent awards cannot duplicate the badge.
        let result = sqlx::query(
            r#"
            UPDATE users
            SET badges = array_append(COALESCE(badges, '{}'), $2)
            WHERE id = $1 AND NOT ($2 = ANY(COALESCE(badges, '{}')))
            "#,
        )
        .bind(user_id)
        .bind(badge)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_resume(&self, resume: NewResume) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO resumes (user_id, file_name, parsed_content, score) VALUES ($1, $2, $3, $4)",
        )
        .bind(resume.user_id)
        .bind(&resume.file_name)
        .bind(&resume.parsed_content)
        .bind(resume.score)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_evaluation(&self, evaluation: NewSkillEvaluation) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO skill_evaluations (user_id, job_role, match_score, strengths, gaps)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(evaluation.user_id)
        .bind(&evaluation.job_role)
        .bind(evaluation.match_score)
        .bind(&evaluation.strengths)
        .bind(&evaluation.gaps)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_plan(&self, plan: NewLearningPlan) -> Result<LearningPlanRow, StoreError> {
        let row = sqlx::query_as::<_, LearningPlanRow>(
            r#"
            INSERT INTO learning_plans (user_id, plan_data, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, plan_data, status, created_at
            "#,
        )
        .bind(plan.user_id)
        .bind(&plan.plan_data)
        .bind(&plan.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn latest_plan(&self, user_id: Uuid) -> Result<Option<LearningPlanRow>, StoreError> {
        let row = sqlx::query_as::<_, LearningPlanRow>(
            r#"
            SELECT id, user_id, plan_data, status, created_at
            FROM learning_plans
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn complete_plan_week(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        week: u32,
    ) -> Result<Option<LearningPlanRow>, StoreError> {
        // Rewrites the weeks array server-side so the flag flip is a single
        // conditional UPDATE instead of a read-modify-write round trip.
        // Week numbers match as JSON numbers, never as text.
        let row = sqlx::query_as::<_, LearningPlanRow>(
            r#"
            UPDATE learning_plans
            SET plan_data = jsonb_set(
                plan_data,
                '{weeks}',
                (
                    SELECT COALESCE(
                        jsonb_agg(
                            CASE WHEN w->'week' = to_jsonb($3::bigint) THEN w || '{"completed": true}'::jsonb ELSE w END
                            ORDER BY ord
                        ),
                        '[]'::jsonb
                    )
                    FROM jsonb_array_elements(COALESCE(plan_data->'weeks', '[]'::jsonb))
                        WITH ORDINALITY AS t(w, ord)
                )
            )
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, plan_data, status, created_at
            "#,
        )
        .bind(plan_id)
        .bind(user_id)
        .bind(i64::from(week))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_quiz(&self, quiz: NewQuiz) -> Result<QuizRow, StoreError> {
        let row = sqlx::query_as::<_, QuizRow>(
            r#"
            INSERT INTO quizzes (user_id, domain, difficulty, score, total_questions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, domain, difficulty, score, total_questions, created_at
            "#,
        )
        .bind(quiz.user_id)
        .bind(&quiz.domain)
        .bind(&quiz.difficulty)
        .bind(quiz.score)
        .bind(quiz.total_questions)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn quizzes_for_user(&self, user_id: Uuid) -> Result<Vec<QuizRow>, StoreError> {
        let rows = sqlx::query_as::<_, QuizRow>(
            r#"
            SELECT id, user_id, domain, difficulty, score, total_questions, created_at
            FROM quizzes WHERE user_id = $1 ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_interview(&self, interview: NewInterview) -> Result<InterviewRow, StoreError> {
        let row = sqlx::query_as::<_, InterviewRow>(
            r#"
            INSERT INTO interviews (user_id, job_role, mode, score, feedback, metadata)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, job_role, mode, score, feedback, metadata, created_at
            "#,
        )
        .bind(interview.user_id)
        .bind(&interview.job_role)
        .bind(&interview.mode)
        .bind(interview.score)
        .bind(&interview.feedback)
        .bind(&interview.metadata)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn interviews_for_user(&self, user_id: Uuid) -> Result<Vec<InterviewRow>, StoreError> {
        let rows = sqlx::query_as::<_, InterviewRow>(
            r#"
            SELECT id, user_id, job_role, mode, score, feedback, metadata, created_at
            FROM interviews WHERE user_id = $1 ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
