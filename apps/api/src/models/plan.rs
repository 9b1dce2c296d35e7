use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Status written for every freshly generated plan.
pub const PLAN_STATUS_IN_PROGRESS: &str = "in-progress";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LearningPlanRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// `{"weeks": [...]}` as produced by the plan service.
    pub plan_data: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl LearningPlanRow {
    /// Number of weeks whose `completed` flag is set.
    pub fn completed_weeks(&self) -> usize {
        self.plan_data
            .get("weeks")
            .and_then(|w| w.as_array())
            .map(|weeks| {
                weeks
                    .iter()
                    .filter(|w| w.get("completed").and_then(|c| c.as_bool()).unwrap_or(false))
                    .count()
            })
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct NewLearningPlan {
    pub user_id: Uuid,
    pub plan_data: Value,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(plan_data: Value) -> LearningPlanRow {
        LearningPlanRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_data,
            status: PLAN_STATUS_IN_PROGRESS.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_completed_weeks_counts_true_flags_only() {
        let plan = row(json!({"weeks": [
            {"week": 1, "completed": true},
            {"week": 2, "completed": false},
            {"week": 3},
            {"week": 4, "completed": true}
        ]}));
        assert_eq!(plan.completed_weeks(), 2);
    }

    #[test]
    fn test_completed_weeks_tolerates_missing_weeks_key() {
        assert_eq!(row(json!({})).completed_weeks(), 0);
    }
}
