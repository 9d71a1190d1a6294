// ABOUTME: Database factory selecting a backend implementation from the connection URL
// ABOUTME: Currently wraps the SQLite backend; the enum keeps call sites backend-agnostic

//! Database factory
//!
//! Wraps concrete backends behind a single enum so the application layer
//! never names a backend directly. URL scheme selects the implementation.

use anyhow::{bail, Result};
use async_trait::async_trait;
use uuid::Uuid;

use super::sqlite::SqliteDatabase;
use super::DatabaseProvider;
use crate::models::{
    NutritionPlan, NutritionPlanSummary, StoredNutritionPlan, StoredWorkoutPlan, WorkoutPlan,
    WorkoutPlanSummary,
};

/// Database abstraction enum for runtime backend selection
#[derive(Clone)]
pub enum Database {
    /// SQLite backend (file-based or in-memory)
    Sqlite(SqliteDatabase),
}

impl Database {
    /// Name of the active backend, for logging
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
        }
    }
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn new(database_url: &str) -> Result<Self> {
        if database_url.starts_with("sqlite:") {
            Ok(Self::Sqlite(SqliteDatabase::new(database_url).await?))
        } else {
            bail!("unsupported database URL: {database_url}")
        }
    }

    async fn migrate(&self) -> Result<()> {
        match self {
            Self::Sqlite(db) => db.migrate().await,
        }
    }

    async fn create_workout_plan(&self, user_id: Uuid, plan: &WorkoutPlan) -> Result<Uuid> {
        match self {
            Self::Sqlite(db) => db.create_workout_plan(user_id, plan).await,
        }
    }

    async fn get_workout_plans(&self, user_id: Uuid) -> Result<Vec<WorkoutPlanSummary>> {
        match self {
            Self::Sqlite(db) => db.get_workout_plans(user_id).await,
        }
    }

    async fn get_workout_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Option<StoredWorkoutPlan>> {
        match self {
            Self::Sqlite(db) => db.get_workout_plan(user_id, plan_id).await,
        }
    }

    async fn create_nutrition_plan(&self, user_id: Uuid, plan: &NutritionPlan) -> Result<Uuid> {
        match self {
            Self::Sqlite(db) => db.create_nutrition_plan(user_id, plan).await,
        }
    }

    async fn get_nutrition_plans(&self, user_id: Uuid) -> Result<Vec<NutritionPlanSummary>> {
        match self {
            Self::Sqlite(db) => db.get_nutrition_plans(user_id).await,
        }
    }

    async fn get_nutrition_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Option<StoredNutritionPlan>> {
        match self {
            Self::Sqlite(db) => db.get_nutrition_plan(user_id, plan_id).await,
        }
    }
}
