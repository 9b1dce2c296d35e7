use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::activity::{
    InterviewRow, NewInterview, NewQuiz, NewResume, NewSkillEvaluation, QuizRow,
};
use crate::models::plan::{LearningPlanRow, NewLearningPlan};
use crate::models::user::{NewUser, UserRow};

/// In-process `Store` for tests. Each operation holds the lock for its whole
/// duration, matching the single-statement semantics of `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    pub users: Mutex<Vec<UserRow>>,
    pub resumes: Mutex<Vec<NewResume>>,
    pub evaluations: Mutex<Vec<NewSkillEvaluation>>,
    pub plans: Mutex<Vec<LearningPlanRow>>,
    pub quizzes: Mutex<Vec<QuizRow>>,
    pub interviews: Mutex<Vec<InterviewRow>>,
}

impl MemoryStore {
    pub fn with_user(self, email: &str, username: &str) -> (Self, Uuid) {
        let id = Uuid::new_v4();
        self.users.lock().unwrap().push(UserRow {
            id,
            email: email.to_string(),
            username: Some(username.to_string()),
            full_name: Some("Test User".to_string()),
            password_hash: None,
            badges: vec![],
            created_at: Utc::now(),
        });
        (self, id)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRow>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRow, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email == user.email || u.username.as_deref() == Some(&user.username))
        {
            return Err(StoreError::Duplicate(
                "email or username already registered".to_string(),
            ));
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            email: user.email,
            username: Some(user.username),
            full_name: Some(user.full_name),
            password_hash: Some(user.password_hash),
            badges: vec![],
            created_at: Utc::now(),
        };
        users.push(row.clone());
        Ok(row)
    }

    async fn user_badges(&self, user_id: Uuid) -> Result<Option<Vec<String>>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == user_id).map(|u| u.badges.clone()))
    }

    async fn award_badge(&self, user_id: Uuid, badge: &str) -> Result<bool, StoreError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user_id) {
            Some(user) if !user.badges.iter().any(|b| b == badge) => {
                user.badges.push(badge.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn insert_resume(&self, resume: NewResume) -> Result<(), StoreError> {
        self.resumes.lock().unwrap().push(resume);
        Ok(())
    }

    async fn insert_evaluation(&self, evaluation: NewSkillEvaluation) -> Result<(), StoreError> {
        self.evaluations.lock().unwrap().push(evaluation);
        Ok(())
    }

    async fn insert_plan(&self, plan: NewLearningPlan) -> Result<LearningPlanRow, StoreError> {
        let row = LearningPlanRow {
            id: Uuid::new_v4(),
            user_id: plan.user_id,
            plan_data: plan.plan_data,
            status: plan.status,
            created_at: Utc::now(),
        };
        self.plans.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn latest_plan(&self, user_id: Uuid) -> Result<Option<LearningPlanRow>, StoreError> {
        let plans = self.plans.lock().unwrap();
        Ok(plans.iter().rev().find(|p| p.user_id == user_id).cloned())
    }

    async fn complete_plan_week(
        &self,
        plan_id: Uuid,
        user_id: Uuid,
        week: u32,
    ) -> Result<Option<LearningPlanRow>, StoreError> {
        let mut plans = self.plans.lock().unwrap();
        let Some(plan) = plans
            .iter_mut()
            .find(|p| p.id == plan_id && p.user_id == user_id)
        else {
            return Ok(None);
        };
        if let Some(weeks) = plan.plan_data.get_mut("weeks").and_then(Value::as_array_mut) {
            for entry in weeks.iter_mut() {
                let matches = entry.get("week").and_then(Value::as_u64) == Some(u64::from(week));
                if let (true, Some(obj)) = (matches, entry.as_object_mut()) {
                    obj.insert("completed".to_string(), Value::Bool(true));
                }
            }
        }
        Ok(Some(plan.clone()))
    }

    async fn insert_quiz(&self, quiz: NewQuiz) -> Result<QuizRow, StoreError> {
        let row = QuizRow {
            id: Uuid::new_v4(),
            user_id: quiz.user_id,
            domain: quiz.domain,
            difficulty: quiz.difficulty,
            score: quiz.score,
            total_questions: quiz.total_questions,
            created_at: Utc::now(),
        };
        self.quizzes.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn quizzes_for_user(&self, user_id: Uuid) -> Result<Vec<QuizRow>, StoreError> {
        let quizzes = self.quizzes.lock().unwrap();
        Ok(quizzes.iter().filter(|q| q.user_id == user_id).cloned().collect())
    }

    async fn insert_interview(&self, interview: NewInterview) -> Result<InterviewRow, StoreError> {
        let row = InterviewRow {
            id: Uuid::new_v4(),
            user_id: interview.user_id,
            job_role: interview.job_role,
            mode: interview.mode,
            score: interview.score,
            feedback: interview.feedback,
            metadata: interview.metadata,
            created_at: Utc::now(),
        };
        self.interviews.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn interviews_for_user(&self, user_id: Uuid) -> Result<Vec<InterviewRow>, StoreError> {
        let interviews = self.interviews.lock().unwrap();
        Ok(interviews
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }
}
