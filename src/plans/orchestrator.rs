// ABOUTME: Plan engine orchestrating the primary LLM strategy and the deterministic fallback
// ABOUTME: Infallible by contract; primary failures degrade to template plans, never to errors

//! # Plan Orchestrator
//!
//! [`PlanEngine`] is the single entry point for plan production. It owns
//! the injected provider and configuration — there is no process-wide
//! client or hidden mutable state — and enforces the one hard
//! error-handling rule of the core: **no primary-strategy failure ever
//! propagates to the caller**. A failed or slow remote call is abandoned
//! after one attempt (no retries against a possibly overloaded dependency)
//! and replaced by the cheap, synchronous, always-successful fallback.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::nutrition::NutritionConfig;
use crate::intelligence::resolve_targets;
use crate::llm::LlmProvider;
use crate::models::{NutritionPlan, NutritionTargets, PlanRequest, WorkoutPlan};
use crate::plans::fallback::{fallback_nutrition_plan, fallback_workout_plan};
use crate::plans::generator::{
    generate_nutrition_plan, generate_workout_plan, GenerationParams,
};

/// Orchestrates plan production across both strategies
pub struct PlanEngine {
    provider: Arc<dyn LlmProvider>,
    nutrition: NutritionConfig,
    params: GenerationParams,
}

impl PlanEngine {
    /// Create an engine with default nutrition config and sampling parameters
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            nutrition: NutritionConfig::default(),
            params: GenerationParams::default(),
        }
    }

    /// Override the nutrition configuration
    #[must_use]
    pub fn with_nutrition_config(mut self, nutrition: NutritionConfig) -> Self {
        self.nutrition = nutrition;
        self
    }

    /// Override the generation sampling parameters
    #[must_use]
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Resolve daily calorie and macro targets for a request
    #[must_use]
    pub fn resolve_targets(&self, request: &PlanRequest) -> NutritionTargets {
        resolve_targets(request, &self.nutrition)
    }

    /// Produce a workout plan
    ///
    /// Attempts the primary strategy; on any qualifying failure returns
    /// the deterministic fallback with `fallback_reason` populated.
    /// Never fails.
    pub async fn produce_workout(&self, request: &PlanRequest) -> WorkoutPlan {
        match generate_workout_plan(self.provider.as_ref(), request, &self.params).await {
            Ok(plan) => {
                info!(
                    provider = self.provider.name(),
                    plan_name = %plan.plan_name,
                    "Workout plan generated"
                );
                plan
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Primary workout generation failed, using fallback"
                );
                fallback_workout_plan(request, e.to_string())
            }
        }
    }

    /// Produce a nutrition plan
    ///
    /// Targets are resolved before generation so that both strategies work
    /// from the same calorie figure. Never fails.
    pub async fn produce_nutrition(&self, request: &PlanRequest) -> NutritionPlan {
        let targets = self.resolve_targets(request);

        match generate_nutrition_plan(self.provider.as_ref(), request, &targets, &self.params)
            .await
        {
            Ok(plan) => {
                info!(
                    provider = self.provider.name(),
                    plan_name = %plan.plan_name,
                    days = plan.days.len(),
                    "Nutrition plan generated"
                );
                plan
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Primary nutrition generation failed, using fallback"
                );
                fallback_nutrition_plan(request, &targets, &self.nutrition.meal_proportions, e.to_string())
            }
        }
    }
}
