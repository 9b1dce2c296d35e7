use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::{NewLearningPlan, PLAN_STATUS_IN_PROGRESS};
use crate::models::UserIdQuery;
use crate::plan::completion::{complete_week, WeekCompletion};
use crate::plan::roadmap::{draft_roadmap, enrich, PlanWeek, PLAN_WEEKS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub role: String,
    #[serde(default)]
    pub skills_found: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub weeks: Vec<PlanWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<Uuid>,
}

/// POST /plan
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    let mut roadmap = draft_roadmap(
        state.llm.as_ref(),
        &request.role,
        &request.skills_found,
        &request.missing_skills,
    )
    .await;
    enrich(&mut roadmap, &state.videos, &state.photos).await;

    let mut plan_id = None;
    if let (Some(store), Some(user_id)) = (state.store.as_ref(), params.user_uuid()) {
        let plan_data = serde_json::to_value(&roadmap).map_err(anyhow::Error::from)?;
        let plan = NewLearningPlan {
            user_id,
            plan_data,
            status: PLAN_STATUS_IN_PROGRESS.to_string(),
        };
        match store.insert_plan(plan).await {
            Ok(row) => {
                info!("Saved learning plan {} for user {user_id}", row.id);
                plan_id = Some(row.id);
            }
            Err(e) => warn!("DB error saving plan: {e}"),
        }
    }

    Ok(Json(PlanResponse {
        weeks: roadmap.weeks,
        plan_id,
    }))
}

fn check_week(week: u32) -> Result<(), AppError> {
    if (1..=PLAN_WEEKS as u32).contains(&week) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "week must be between 1 and {PLAN_WEEKS}"
        )))
    }
}

#[derive(Debug, Deserialize)]
pub struct CompleteWeekRequest {
    pub week_number: u32,
    pub topic: Option<String>,
}

/// POST /plan/complete-week
///
/// Completes a week of the user's most recent plan.
pub async fn handle_complete_week(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<CompleteWeekRequest>,
) -> Result<Json<WeekCompletion>, AppError> {
    check_week(request.week_number)?;

    let Some(store) = state.store.as_ref() else {
        return Ok(Json(WeekCompletion::failed("Database not connected")));
    };
    let Some(user_id) = params.user_uuid() else {
        return Ok(Json(WeekCompletion::failed("A valid user_id is required")));
    };
    let Some(plan) = store.latest_plan(user_id).await? else {
        return Ok(Json(WeekCompletion::failed("No learning plan found")));
    };

    let outcome = complete_week(
        store.as_ref(),
        plan.id,
        user_id,
        request.week_number,
        request.topic.as_deref(),
    )
    .await?;
    Ok(Json(
        outcome.unwrap_or_else(|| WeekCompletion::failed("Plan not found")),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CompleteModuleParams {
    pub week_num: u32,
    pub user_id: Uuid,
}

/// PATCH /plan/complete/:plan_id
pub async fn handle_complete_module(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    Query(params): Query<CompleteModuleParams>,
) -> Result<Json<WeekCompletion>, AppError> {
    check_week(params.week_num)?;

    let Some(store) = state.store.as_ref() else {
        return Ok(Json(WeekCompletion::failed("Database not connected")));
    };

    let outcome = complete_week(store.as_ref(), plan_id, params.user_id, params.week_num, None).await?;
    Ok(Json(
        outcome.unwrap_or_else(|| WeekCompletion::failed("Plan not found")),
    ))
}
