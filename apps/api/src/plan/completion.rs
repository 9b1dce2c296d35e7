//! Week completion and the completion badge.
//!
//! Both mutations are single conditional writes in the store, so concurrent
//! completions for the same user cannot lose a flag or duplicate the badge.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::plan::roadmap::PLAN_WEEKS;
use crate::store::{Store, StoreError};

/// Awarded once every week of a plan is completed.
pub const COMPLETION_BADGE: &str = "Course Crusader";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekCompletion {
    pub success: bool,
    pub completed_weeks: usize,
    pub quiz_ready: bool,
    pub badge_awarded: bool,
    pub message: String,
}

impl WeekCompletion {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            completed_weeks: 0,
            quiz_ready: false,
            badge_awarded: false,
            message: message.into(),
        }
    }
}

/// Marks `week` of the plan complete and awards the badge when all weeks are
/// done. `None` when the plan does not exist or belongs to someone else.
pub async fn complete_week(
    store: &dyn Store,
    plan_id: Uuid,
    user_id: Uuid,
    week: u32,
    topic: Option<&str>,
) -> Result<Option<WeekCompletion>, StoreError> {
    let Some(plan) = store.complete_plan_week(plan_id, user_id, week).await? else {
        return Ok(None);
    };
    let completed_weeks = plan.completed_weeks();
    info!("Plan {plan_id}: week {week} completed ({completed_weeks}/{PLAN_WEEKS})");

    let badge_awarded = if completed_weeks >= PLAN_WEEKS {
        let awarded = store.award_badge(user_id, COMPLETION_BADGE).await?;
        if awarded {
            info!("Awarded {COMPLETION_BADGE:?} to user {user_id}");
        }
        awarded
    } else {
        false
    };

    let mut message = match topic {
        Some(topic) => format!("Week {week} completed! Take the {topic} quiz to check your progress."),
        None => format!("Week {week} completed!"),
    };
    if badge_awarded {
        message.push_str(&format!(" You earned the {COMPLETION_BADGE} badge."));
    }

    Ok(Some(WeekCompletion {
        success: true,
        completed_weeks,
        quiz_ready: true,
        badge_awarded,
        message,
    }))
}
