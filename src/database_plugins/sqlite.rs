// ABOUTME: SQLite persistence backend for workout and nutrition plans
// ABOUTME: Transactional plan flattening into plan/day/exercise/meal rows via sqlx

//! SQLite database implementation
//!
//! Plans are flattened into normalized rows inside one transaction per
//! plan: either every day and entry row lands, or none do. Listing is
//! newest-first; `rowid` breaks creation-time ties so repeated saves of
//! the same plan list in insertion order.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

use super::DatabaseProvider;
use crate::models::{
    Exercise, Goal, Meal, NutritionDay, NutritionPlan, NutritionPlanSummary, NutritionTargets,
    StoredNutritionPlan, StoredWorkoutPlan, WorkoutDay, WorkoutPlan, WorkoutPlanSummary,
    WorkoutWeek,
};

/// Convert an i64 column to u32, clamping negatives to zero
fn column_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

/// Parse a TEXT uuid column
fn column_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).context("invalid uuid column")
}

/// SQLite-backed database
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Access the underlying pool (test support)
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .context("invalid sqlite connection string")?
            .create_if_missing(true);

        // An in-memory database exists per connection; a larger pool would
        // hand out empty databases
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("failed to open sqlite database")?;

        Ok(Self { pool })
    }

    async fn migrate(&self) -> Result<()> {
        self.create_workout_tables().await?;
        self.create_nutrition_tables().await?;
        self.create_indexes().await?;
        Ok(())
    }

    async fn create_workout_plan(&self, user_id: Uuid, plan: &WorkoutPlan) -> Result<Uuid> {
        let plan_id = Uuid::new_v4();
        let created_at: DateTime<Utc> = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO workout_plans (
                id, user_id, name, description, notes, duration_weeks,
                is_ai_generated, fallback_reason, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(plan_id.to_string())
        .bind(user_id.to_string())
        .bind(&plan.plan_name)
        .bind(&plan.plan_description)
        .bind(&plan.notes)
        .bind(i64::from(plan.weeks.len() as u32))
        .bind(plan.is_ai_generated)
        .bind(&plan.fallback_reason)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        for week in &plan.weeks {
            for day in &week.days {
                let day_id = Uuid::new_v4();
                sqlx::query(
                    r"
                    INSERT INTO workout_plan_days (
                        id, workout_plan_id, week_number, day_number, name
                    ) VALUES (?, ?, ?, ?, ?)
                    ",
                )
                .bind(day_id.to_string())
                .bind(plan_id.to_string())
                .bind(i64::from(week.week_number))
                .bind(i64::from(day.day_number))
                .bind(&day.name)
                .execute(&mut *tx)
                .await?;

                for (position, exercise) in day.exercises.iter().enumerate() {
                    sqlx::query(
                        r"
                        INSERT INTO exercises (
                            id, workout_plan_day_id, name, sets, reps, rest,
                            instructions, position
                        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                        ",
                    )
                    .bind(Uuid::new_v4().to_string())
                    .bind(day_id.to_string())
                    .bind(&exercise.name)
                    .bind(i64::from(exercise.sets))
                    .bind(&exercise.reps)
                    .bind(&exercise.rest)
                    .bind(&exercise.instructions)
                    .bind(position as i64)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        Ok(plan_id)
    }

    async fn get_workout_plans(&self, user_id: Uuid) -> Result<Vec<WorkoutPlanSummary>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, description, duration_weeks, is_ai_generated,
                   fallback_reason, created_at
            FROM workout_plans
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(WorkoutPlanSummary {
                    id: column_uuid(row.try_get("id")?)?,
                    name: row.try_get("name")?,
                    description: row.try_get("description")?,
                    duration_weeks: column_u32(row.try_get("duration_weeks")?),
                    is_ai_generated: row.try_get("is_ai_generated")?,
                    fallback_reason: row.try_get("fallback_reason")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    async fn get_workout_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Option<StoredWorkoutPlan>> {
        let Some(plan_row) = sqlx::query(
            r"
            SELECT id, user_id, name, description, notes, is_ai_generated,
                   fallback_reason, created_at
            FROM workout_plans
            WHERE id = ? AND user_id = ?
            ",
        )
        .bind(plan_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let exercise_rows = sqlx::query(
            r"
            SELECT d.week_number, d.day_number, d.name AS day_name,
                   e.name, e.sets, e.reps, e.rest, e.instructions
            FROM workout_plan_days d
            JOIN exercises e ON e.workout_plan_day_id = d.id
            WHERE d.workout_plan_id = ?
            ORDER BY d.week_number, d.day_number, e.position
            ",
        )
        .bind(plan_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        // Group rows back into the nested week/day structure
        let mut weeks: BTreeMap<u32, BTreeMap<u32, WorkoutDay>> = BTreeMap::new();
        for row in &exercise_rows {
            let week_number = column_u32(row.try_get("week_number")?);
            let day_number = column_u32(row.try_get("day_number")?);
            let day = weeks
                .entry(week_number)
                .or_default()
                .entry(day_number)
                .or_insert_with(|| WorkoutDay {
                    day_number,
                    name: row.try_get("day_name").unwrap_or_default(),
                    exercises: Vec::new(),
                });
            day.exercises.push(Exercise {
                name: row.try_get("name")?,
                sets: column_u32(row.try_get("sets")?),
                reps: row.try_get("reps")?,
                rest: row.try_get("rest")?,
                instructions: row.try_get("instructions")?,
            });
        }

        let plan = WorkoutPlan {
            plan_name: plan_row.try_get("name")?,
            plan_description: plan_row.try_get("description")?,
            weeks: weeks
                .into_iter()
                .map(|(week_number, days)| WorkoutWeek {
                    week_number,
                    days: days.into_values().collect(),
                })
                .collect(),
            notes: plan_row.try_get("notes")?,
            is_ai_generated: plan_row.try_get("is_ai_generated")?,
            fallback_reason: plan_row.try_get("fallback_reason")?,
        };

        Ok(Some(StoredWorkoutPlan {
            id: plan_id,
            user_id,
            created_at: plan_row.try_get("created_at")?,
            plan,
        }))
    }

    async fn create_nutrition_plan(&self, user_id: Uuid, plan: &NutritionPlan) -> Result<Uuid> {
        let plan_id = Uuid::new_v4();
        let created_at: DateTime<Utc> = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO nutrition_plans (
                id, user_id, name, description, goal, daily_calories,
                protein_target, carbs_target, fat_target,
                is_ai_generated, fallback_reason, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(plan_id.to_string())
        .bind(user_id.to_string())
        .bind(&plan.plan_name)
        .bind(&plan.plan_description)
        .bind(plan.goal.as_str())
        .bind(i64::from(plan.targets.daily_calories))
        .bind(i64::from(plan.targets.protein_g))
        .bind(i64::from(plan.targets.carbs_g))
        .bind(i64::from(plan.targets.fat_g))
        .bind(plan.is_ai_generated)
        .bind(&plan.fallback_reason)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        for day in &plan.days {
            let day_id = Uuid::new_v4();
            sqlx::query(
                r"
                INSERT INTO nutrition_plan_days (id, nutrition_plan_id, day_number)
                VALUES (?, ?, ?)
                ",
            )
            .bind(day_id.to_string())
            .bind(plan_id.to_string())
            .bind(i64::from(day.day_number))
            .execute(&mut *tx)
            .await?;

            for (position, meal) in day.meals.iter().enumerate() {
                sqlx::query(
                    r"
                    INSERT INTO nutrition_meals (
                        id, nutrition_plan_day_id, name, meal_time, calories,
                        protein, carbs, fat, description, instructions, position
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    ",
                )
                .bind(Uuid::new_v4().to_string())
                .bind(day_id.to_string())
                .bind(&meal.name)
                .bind(&meal.meal_time)
                .bind(i64::from(meal.calories))
                .bind(i64::from(meal.protein))
                .bind(i64::from(meal.carbs))
                .bind(i64::from(meal.fat))
                .bind(&meal.description)
                .bind(&meal.instructions)
                .bind(position as i64)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(plan_id)
    }

    async fn get_nutrition_plans(&self, user_id: Uuid) -> Result<Vec<NutritionPlanSummary>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, goal, daily_calories, protein_target, carbs_target,
                   fat_target, is_ai_generated, fallback_reason, created_at
            FROM nutrition_plans
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(NutritionPlanSummary {
                    id: column_uuid(row.try_get("id")?)?,
                    name: row.try_get("name")?,
                    goal: Goal::parse(row.try_get("goal")?),
                    targets: NutritionTargets {
                        daily_calories: column_u32(row.try_get("daily_calories")?),
                        protein_g: column_u32(row.try_get("protein_target")?),
                        carbs_g: column_u32(row.try_get("carbs_target")?),
                        fat_g: column_u32(row.try_get("fat_target")?),
                    },
                    is_ai_generated: row.try_get("is_ai_generated")?,
                    fallback_reason: row.try_get("fallback_reason")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    async fn get_nutrition_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<Option<StoredNutritionPlan>> {
        let Some(plan_row) = sqlx::query(
            r"
            SELECT id, name, description, goal, daily_calories, protein_target,
                   carbs_target, fat_target, is_ai_generated, fallback_reason,
                   created_at
            FROM nutrition_plans
            WHERE id = ? AND user_id = ?
            ",
        )
        .bind(plan_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let meal_rows = sqlx::query(
            r"
            SELECT d.day_number, m.name, m.meal_time, m.calories, m.protein,
                   m.carbs, m.fat, m.description, m.instructions
            FROM nutrition_plan_days d
            JOIN nutrition_meals m ON m.nutrition_plan_day_id = d.id
            WHERE d.nutrition_plan_id = ?
            ORDER BY d.day_number, m.position
            ",
        )
        .bind(plan_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        let mut days: BTreeMap<u32, NutritionDay> = BTreeMap::new();
        for row in &meal_rows {
            let day_number = column_u32(row.try_get("day_number")?);
            let day = days.entry(day_number).or_insert_with(|| NutritionDay {
                day_number,
                meals: Vec::new(),
            });
            day.meals.push(Meal {
                name: row.try_get("name")?,
                meal_time: row.try_get("meal_time")?,
                calories: column_u32(row.try_get("calories")?),
                protein: column_u32(row.try_get("protein")?),
                carbs: column_u32(row.try_get("carbs")?),
                fat: column_u32(row.try_get("fat")?),
                description: row.try_get("description")?,
                instructions: row.try_get("instructions")?,
            });
        }

        let plan = NutritionPlan {
            plan_name: plan_row.try_get("name")?,
            plan_description: plan_row.try_get("description")?,
            goal: Goal::parse(plan_row.try_get("goal")?),
            targets: NutritionTargets {
                daily_calories: column_u32(plan_row.try_get("daily_calories")?),
                protein_g: column_u32(plan_row.try_get("protein_target")?),
                carbs_g: column_u32(plan_row.try_get("carbs_target")?),
                fat_g: column_u32(plan_row.try_get("fat_target")?),
            },
            days: days.into_values().collect(),
            is_ai_generated: plan_row.try_get("is_ai_generated")?,
            fallback_reason: plan_row.try_get("fallback_reason")?,
        };

        Ok(Some(StoredNutritionPlan {
            id: plan_id,
            user_id,
            created_at: plan_row.try_get("created_at")?,
            plan,
        }))
    }
}

impl SqliteDatabase {
    /// Create workout plan tables
    async fn create_workout_tables(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                notes TEXT NOT NULL DEFAULT '',
                duration_weeks INTEGER NOT NULL,
                is_ai_generated BOOLEAN NOT NULL DEFAULT 1,
                fallback_reason TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_plan_days (
                id TEXT PRIMARY KEY,
                workout_plan_id TEXT NOT NULL,
                week_number INTEGER NOT NULL,
                day_number INTEGER NOT NULL,
                name TEXT NOT NULL,
                FOREIGN KEY (workout_plan_id) REFERENCES workout_plans(id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                workout_plan_day_id TEXT NOT NULL,
                name TEXT NOT NULL,
                sets INTEGER NOT NULL,
                reps TEXT NOT NULL,
                rest TEXT NOT NULL DEFAULT '',
                instructions TEXT NOT NULL DEFAULT '',
                position INTEGER NOT NULL,
                FOREIGN KEY (workout_plan_day_id) REFERENCES workout_plan_days(id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create nutrition plan tables
    async fn create_nutrition_tables(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS nutrition_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                goal TEXT NOT NULL,
                daily_calories INTEGER NOT NULL,
                protein_target INTEGER NOT NULL,
                carbs_target INTEGER NOT NULL,
                fat_target INTEGER NOT NULL,
                is_ai_generated BOOLEAN NOT NULL DEFAULT 1,
                fallback_reason TEXT,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS nutrition_plan_days (
                id TEXT PRIMARY KEY,
                nutrition_plan_id TEXT NOT NULL,
                day_number INTEGER NOT NULL,
                FOREIGN KEY (nutrition_plan_id) REFERENCES nutrition_plans(id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS nutrition_meals (
                id TEXT PRIMARY KEY,
                nutrition_plan_day_id TEXT NOT NULL,
                name TEXT NOT NULL,
                meal_time TEXT NOT NULL,
                calories INTEGER NOT NULL,
                protein INTEGER NOT NULL,
                carbs INTEGER NOT NULL,
                fat INTEGER NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                instructions TEXT NOT NULL DEFAULT '',
                position INTEGER NOT NULL,
                FOREIGN KEY (nutrition_plan_day_id) REFERENCES nutrition_plan_days(id) ON DELETE CASCADE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create lookup indexes
    async fn create_indexes(&self) -> Result<()> {
        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_workout_plans_user ON workout_plans(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_workout_plan_days_plan ON workout_plan_days(workout_plan_id)",
            "CREATE INDEX IF NOT EXISTS idx_exercises_day ON exercises(workout_plan_day_id)",
            "CREATE INDEX IF NOT EXISTS idx_nutrition_plans_user ON nutrition_plans(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_nutrition_plan_days_plan ON nutrition_plan_days(nutrition_plan_id)",
            "CREATE INDEX IF NOT EXISTS idx_nutrition_meals_day ON nutrition_meals(nutrition_plan_day_id)",
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}
