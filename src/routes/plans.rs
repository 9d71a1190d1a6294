// ABOUTME: Plan generation and retrieval route handlers
// ABOUTME: POST generates and persists a plan; GET lists and fetches persisted plans

//! Plan routes
//!
//! `POST /api/plans/{workout|nutrition}` normalizes the request body,
//! produces a plan through the engine (which never fails), persists it,
//! and returns the plan with its stable identifier and provenance flags.
//!
//! Generation and persistence failures are deliberately distinct: the
//! engine always yields a plan, so the only error a generation request
//! can surface is a save failure — reported with `DATABASE_ERROR` so
//! clients know the plan existed and saving can be retried.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::models::{
    NutritionPlan, NutritionPlanSummary, PlanRequest, PlanRequestPayload, StoredNutritionPlan,
    StoredWorkoutPlan, WorkoutPlan, WorkoutPlanSummary,
};
use crate::server::ServerResources;

// ============================================================================
// Response Types
// ============================================================================

/// Response for a successful plan generation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanGenerationResponse<T> {
    /// The generated plan
    pub plan: T,
    /// Stable identifier of the persisted plan
    #[serde(rename = "planId")]
    pub plan_id: Uuid,
    /// Whether the model-backed strategy produced the plan
    #[serde(rename = "isAIGenerated")]
    pub is_ai_generated: bool,
    /// Why the fallback ran, when it did
    #[serde(rename = "fallbackReason", skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Response for plan list endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanListResponse<T> {
    /// Plan summaries, newest first
    pub plans: Vec<T>,
    /// Total count
    pub total: usize,
}

// ============================================================================
// Plan Routes
// ============================================================================

/// Plan routes handler
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/plans/workout", post(Self::generate_workout))
            .route("/api/plans/workout", get(Self::list_workout_plans))
            .route("/api/plans/workout/:plan_id", get(Self::get_workout_plan))
            .route("/api/plans/nutrition", post(Self::generate_nutrition))
            .route("/api/plans/nutrition", get(Self::list_nutrition_plans))
            .route(
                "/api/plans/nutrition/:plan_id",
                get(Self::get_nutrition_plan),
            )
            .with_state(resources)
    }

    /// Generate, persist, and return a workout plan
    async fn generate_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<PlanRequestPayload>,
    ) -> Result<Json<PlanGenerationResponse<WorkoutPlan>>, AppError> {
        let user_id = super::require_user_id(&headers)?;
        let request = PlanRequest::normalize(&payload);

        let plan = resources.engine.produce_workout(&request).await;

        let plan_id = resources
            .database
            .create_workout_plan(user_id, &plan)
            .await
            .map_err(|e| {
                AppError::database(format!("workout plan generated but could not be saved: {e}"))
                    .with_user_id(user_id)
            })?;

        info!(%user_id, %plan_id, fallback = plan.fallback_reason.is_some(), "Workout plan saved");

        Ok(Json(PlanGenerationResponse {
            plan_id,
            is_ai_generated: plan.is_ai_generated,
            fallback_reason: plan.fallback_reason.clone(),
            plan,
        }))
    }

    /// List the requesting user's workout plans, newest first
    async fn list_workout_plans(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<PlanListResponse<WorkoutPlanSummary>>, AppError> {
        let user_id = super::require_user_id(&headers)?;

        let plans = resources
            .database
            .get_workout_plans(user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(user_id))?;

        let total = plans.len();
        Ok(Json(PlanListResponse { plans, total }))
    }

    /// Fetch one workout plan with full nested content
    async fn get_workout_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(plan_id): Path<Uuid>,
    ) -> Result<Json<StoredWorkoutPlan>, AppError> {
        let user_id = super::require_user_id(&headers)?;

        let stored = resources
            .database
            .get_workout_plan(user_id, plan_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(user_id))?
            .ok_or_else(|| {
                AppError::not_found("workout plan").with_resource_id(plan_id.to_string())
            })?;

        Ok(Json(stored))
    }

    /// Generate, persist, and return a nutrition plan
    async fn generate_nutrition(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(payload): Json<PlanRequestPayload>,
    ) -> Result<Json<PlanGenerationResponse<NutritionPlan>>, AppError> {
        let user_id = super::require_user_id(&headers)?;
        let request = PlanRequest::normalize(&payload);

        let plan = resources.engine.produce_nutrition(&request).await;

        let plan_id = resources
            .database
            .create_nutrition_plan(user_id, &plan)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "nutrition plan generated but could not be saved: {e}"
                ))
                .with_user_id(user_id)
            })?;

        info!(%user_id, %plan_id, fallback = plan.fallback_reason.is_some(), "Nutrition plan saved");

        Ok(Json(PlanGenerationResponse {
            plan_id,
            is_ai_generated: plan.is_ai_generated,
            fallback_reason: plan.fallback_reason.clone(),
            plan,
        }))
    }

    /// List the requesting user's nutrition plans, newest first
    async fn list_nutrition_plans(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Json<PlanListResponse<NutritionPlanSummary>>, AppError> {
        let user_id = super::require_user_id(&headers)?;

        let plans = resources
            .database
            .get_nutrition_plans(user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(user_id))?;

        let total = plans.len();
        Ok(Json(PlanListResponse { plans, total }))
    }

    /// Fetch one nutrition plan with full nested content
    async fn get_nutrition_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(plan_id): Path<Uuid>,
    ) -> Result<Json<StoredNutritionPlan>, AppError> {
        let user_id = super::require_user_id(&headers)?;

        let stored = resources
            .database
            .get_nutrition_plan(user_id, plan_id)
            .await
            .map_err(|e| AppError::database(e.to_string()).with_user_id(user_id))?
            .ok_or_else(|| {
                AppError::not_found("nutrition plan").with_resource_id(plan_id.to_string())
            })?;

        Ok(Json(stored))
    }
}
