// ABOUTME: Database abstraction layer for the FitForge server
// ABOUTME: Plugin architecture for persistence with a SQLite backend

//! Database abstraction layer with plugin support
//!
//! The plan-generation core's only contract with storage is small:
//! accept a generated plan and return a stable identifier, and list a
//! user's plans newest-first. Plans are flattened into normalized rows
//! (plan → days → exercises/meals) inside a single transaction per plan,
//! so a partially persisted plan is never visible.

use crate::models::{
    NutritionPlan, NutritionPlanSummary, StoredNutritionPlan, StoredWorkoutPlan, WorkoutPlan,
    WorkoutPlanSummary,
};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub mod factory;
pub mod sqlite;

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide
/// a consistent interface for the application layer.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Create a new database connection
    async fn new(database_url: &str) -> Result<Self>
    where
        Self: Sized;

    /// Run database migrations to set up schema
    async fn migrate(&self) -> Result<()>;

    // ================================
    // Workout Plans
    // ================================

    /// Persist a workout plan for a user, returning its stable identifier
    ///
    /// The insert is all-or-nothing; saving the same plan twice creates
    /// two distinct records.
    async fn create_workout_plan(&self, user_id: Uuid, plan: &WorkoutPlan) -> Result<Uuid>;

    /// List a user's workout plans, newest first
    async fn get_workout_plans(&self, user_id: Uuid) -> Result<Vec<WorkoutPlanSummary>>;

    /// Fetch one workout plan with its full nested content
    ///
    /// Returns `None` when the plan does not exist or belongs to a
    /// different user.
    async fn get_workout_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Option<StoredWorkoutPlan>>;

    // ================================
    // Nutrition Plans
    // ================================

    /// Persist a nutrition plan for a user, returning its stable identifier
    async fn create_nutrition_plan(&self, user_id: Uuid, plan: &NutritionPlan) -> Result<Uuid>;

    /// List a user's nutrition plans, newest first
    async fn get_nutrition_plans(&self, user_id: Uuid) -> Result<Vec<NutritionPlanSummary>>;

    /// Fetch one nutrition plan with its full nested content
    async fn get_nutrition_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Option<StoredNutritionPlan>>;
}
