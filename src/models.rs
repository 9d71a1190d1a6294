// ABOUTME: Common data models for plan generation requests and generated plans
// ABOUTME: Wire payloads, canonical request normalization, plan shapes, and schema validation

//! # Data Models
//!
//! Core data structures of the plan-generation engine:
//!
//! - **Request side**: [`PlanRequestPayload`] is the permissive wire shape;
//!   [`PlanRequest`] is the canonical form every strategy consumes. The
//!   normalizer substitutes documented population-average defaults for
//!   absent or implausible values instead of rejecting them, which keeps
//!   the fallback guarantee total.
//! - **Plan side**: [`WorkoutPlan`] and [`NutritionPlan`] with their nested
//!   week/day/exercise/meal structure, plus structural validation used to
//!   decide whether a model-generated plan is acceptable (parse, don't trust).
//!
//! Generated plans are immutable once produced; re-generation creates a
//! new plan rather than mutating an existing one.

use crate::constants::{defaults, limits};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Enumerations
// ============================================================================

/// Training goal driving plan selection and calorie adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    /// Caloric deficit, cardio-supplemented training
    WeightLoss,
    /// Caloric surplus, hypertrophy-focused training
    MuscleGain,
    /// Hold current weight and fitness
    Maintenance,
    /// General health improvement
    Health,
    /// Performance / general fitness improvement
    Performance,
}

impl Goal {
    /// All goal variants, for exhaustive iteration in tests and prompts
    pub const ALL: [Self; 5] = [
        Self::WeightLoss,
        Self::MuscleGain,
        Self::Maintenance,
        Self::Health,
        Self::Performance,
    ];

    /// Parse from a free-form label
    ///
    /// Unrecognized labels map to [`Goal::Performance`] (the general-fitness
    /// goal) so that a request never fails on an unknown goal string.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "weight-loss" | "weight loss" | "lose-weight" => Self::WeightLoss,
            "muscle-gain" | "muscle gain" | "build-muscle" => Self::MuscleGain,
            "maintenance" | "maintain" => Self::Maintenance,
            "health" => Self::Health,
            _ => Self::Performance,
        }
    }

    /// Canonical kebab-case label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight-loss",
            Self::MuscleGain => "muscle-gain",
            Self::Maintenance => "maintenance",
            Self::Health => "health",
            Self::Performance => "performance",
        }
    }

    /// Human-readable name used in plan titles
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::WeightLoss => "Weight Loss",
            Self::MuscleGain => "Muscle Gain",
            Self::Maintenance => "Maintenance",
            Self::Health => "Health",
            Self::Performance => "Performance",
        }
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Biological gender used by the BMR formula
///
/// Only two formula paths exist; any other or unspecified value uses the
/// male constant. This is a documented simplification pending product
/// guidance, not silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male BMR constant (+5)
    Male,
    /// Female BMR constant (-161)
    Female,
}

impl Gender {
    /// Default when unspecified
    pub const DEFAULT: Self = Self::Male;

    /// Parse from a free-form label; anything but "female" uses the male formula
    #[must_use]
    pub fn parse(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("female") {
            Self::Female
        } else {
            Self::Male
        }
    }

    /// Canonical lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Self-reported activity level scaling BMR into TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 days/week
    Light,
    /// Exercise 3-5 days/week
    Moderate,
    /// Exercise 6-7 days/week
    Active,
    /// Hard training, physically demanding lifestyle
    VeryActive,
}

impl ActivityLevel {
    /// All activity levels, for exhaustive iteration in tests
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Active,
        Self::VeryActive,
    ];

    /// Default substituted when the request omits an activity level
    pub const DEFAULT: Self = Self::Moderate;

    /// Parse from a free-form label
    ///
    /// Unmatched labels map to [`ActivityLevel::Sedentary`], matching the
    /// multiplier table's conservative default.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "light" | "lightly active" | "lightly-active" => Self::Light,
            "moderate" | "moderately active" | "moderately-active" => Self::Moderate,
            "active" => Self::Active,
            "very active" | "very-active" | "extra active" => Self::VeryActive,
            _ => Self::Sedentary,
        }
    }

    /// Canonical kebab-case label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very-active",
        }
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preferred weekly workout frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutFrequency {
    /// 3-4 sessions per week (3 training days)
    #[serde(rename = "3-4")]
    ThreeToFour,
    /// 4-5 sessions per week (4 training days)
    #[serde(rename = "4-5")]
    FourToFive,
    /// 6 or more sessions per week (5 training days)
    #[serde(rename = "6+")]
    SixPlus,
}

impl WorkoutFrequency {
    /// All frequency variants, for exhaustive iteration in tests
    pub const ALL: [Self; 3] = [Self::ThreeToFour, Self::FourToFive, Self::SixPlus];

    /// Default when unspecified
    pub const DEFAULT: Self = Self::ThreeToFour;

    /// Parse from a free-form label; unmatched labels use the default
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "4-5" => Self::FourToFive,
            "6+" => Self::SixPlus,
            _ => Self::ThreeToFour,
        }
    }

    /// Training days generated per week for this frequency
    #[must_use]
    pub const fn days_per_week(&self) -> u32 {
        match self {
            Self::ThreeToFour => 3,
            Self::FourToFive => 4,
            Self::SixPlus => 5,
        }
    }

    /// Canonical label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ThreeToFour => "3-4",
            Self::FourToFive => "4-5",
            Self::SixPlus => "6+",
        }
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Permissive wire payload for plan generation requests
///
/// Every field is optional; normalization substitutes documented defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanRequestPayload {
    /// Training goal label (free-form)
    pub goal: Option<String>,
    /// Body weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Age in years
    pub age: Option<u32>,
    /// Gender label (free-form)
    pub gender: Option<String>,
    /// Activity level label (free-form)
    pub activity_level: Option<String>,
    /// Workout environment preference (home, gym, outdoor, ...)
    pub workout_environment: Option<String>,
    /// Preferred session duration label (e.g. "30-45")
    pub workout_duration: Option<String>,
    /// Preferred weekly frequency label (e.g. "4-5")
    pub workout_frequency: Option<String>,
    /// Preferred foods / dietary styles
    pub dietary_preferences: Vec<String>,
    /// Foods or ingredients to avoid
    pub dietary_restrictions: Vec<String>,
    /// Client-supplied daily calorie target; calculated when absent
    pub daily_calories: Option<u32>,
    /// Nutrition plan horizon in days
    pub days: Option<u32>,
}

/// Normalized biometrics with defaults applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Biometrics {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age: u32,
    /// Gender for the BMR formula
    pub gender: Gender,
}

impl Default for Biometrics {
    fn default() -> Self {
        Self {
            weight_kg: defaults::WEIGHT_KG,
            height_cm: defaults::HEIGHT_CM,
            age: defaults::AGE_YEARS,
            gender: Gender::DEFAULT,
        }
    }
}

/// Normalized workout and dietary preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Workout environment (home, gym, ...)
    pub environment: String,
    /// Session duration label
    pub duration: String,
    /// Weekly workout frequency
    pub frequency: WorkoutFrequency,
    /// Preferred foods / dietary styles
    pub dietary_preferences: Vec<String>,
    /// Foods or ingredients to avoid
    pub dietary_restrictions: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            environment: defaults::WORKOUT_ENVIRONMENT.into(),
            duration: defaults::WORKOUT_DURATION.into(),
            frequency: WorkoutFrequency::DEFAULT,
            dietary_preferences: Vec::new(),
            dietary_restrictions: Vec::new(),
        }
    }
}

/// Canonical plan generation request
///
/// Constructed per generation attempt and discarded after use. Both
/// generation strategies consume this shape; neither ever sees the raw
/// wire payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Training goal
    pub goal: Goal,
    /// Biometrics with defaults applied
    pub biometrics: Biometrics,
    /// Activity level
    pub activity: ActivityLevel,
    /// Workout and dietary preferences
    pub preferences: Preferences,
    /// Nutrition plan horizon in days
    pub days: u32,
    /// Client-supplied daily calorie target, if any
    pub daily_calories: Option<u32>,
}

impl PlanRequest {
    /// Normalize a wire payload into a canonical request
    ///
    /// Absent fields take population-average defaults; biometrics outside
    /// plausible human ranges are replaced by the same defaults (silent
    /// clamping policy — generation must always be able to proceed).
    #[must_use]
    pub fn normalize(payload: &PlanRequestPayload) -> Self {
        let weight_kg = payload
            .weight
            .filter(|w| (limits::MIN_WEIGHT_KG..=limits::MAX_WEIGHT_KG).contains(w))
            .unwrap_or(defaults::WEIGHT_KG);
        let height_cm = payload
            .height
            .filter(|h| (limits::MIN_HEIGHT_CM..=limits::MAX_HEIGHT_CM).contains(h))
            .unwrap_or(defaults::HEIGHT_CM);
        let age = payload
            .age
            .filter(|a| (limits::MIN_AGE_YEARS..=limits::MAX_AGE_YEARS).contains(a))
            .unwrap_or(defaults::AGE_YEARS);
        let gender = payload
            .gender
            .as_deref()
            .map_or(Gender::DEFAULT, Gender::parse);

        let activity = payload
            .activity_level
            .as_deref()
            .map_or(ActivityLevel::DEFAULT, ActivityLevel::parse);

        let preferences = Preferences {
            environment: payload
                .workout_environment
                .clone()
                .unwrap_or_else(|| defaults::WORKOUT_ENVIRONMENT.into()),
            duration: payload
                .workout_duration
                .clone()
                .unwrap_or_else(|| defaults::WORKOUT_DURATION.into()),
            frequency: payload
                .workout_frequency
                .as_deref()
                .map_or(WorkoutFrequency::DEFAULT, WorkoutFrequency::parse),
            dietary_preferences: payload.dietary_preferences.clone(),
            dietary_restrictions: payload.dietary_restrictions.clone(),
        };

        let days = payload
            .days
            .filter(|d| (1..=limits::MAX_NUTRITION_PLAN_DAYS).contains(d))
            .unwrap_or(defaults::NUTRITION_PLAN_DAYS);

        let daily_calories = payload.daily_calories.filter(|c| *c > 0);

        Self {
            goal: payload.goal.as_deref().map_or(Goal::Performance, Goal::parse),
            biometrics: Biometrics {
                weight_kg,
                height_cm,
                age,
                gender,
            },
            activity,
            preferences,
            days,
            daily_calories,
        }
    }
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self::normalize(&PlanRequestPayload::default())
    }
}

// ============================================================================
// Nutrition Targets
// ============================================================================

/// Daily calorie and macronutrient targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Daily calorie target
    pub daily_calories: u32,
    /// Daily protein target in grams
    pub protein_g: u32,
    /// Daily carbohydrate target in grams
    pub carbs_g: u32,
    /// Daily fat target in grams
    pub fat_g: u32,
}

// ============================================================================
// Workout Plan Shapes
// ============================================================================

/// A single exercise prescription within a workout day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetition prescription; may be a range ("10-15") or a duration ("30 sec hold")
    pub reps: String,
    /// Rest interval between sets
    pub rest: String,
    /// How to perform the exercise
    pub instructions: String,
}

/// One training day within a workout week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutDay {
    /// 1-based day number, unique and contiguous within its week
    pub day_number: u32,
    /// Focus area name (e.g. "Upper Body")
    pub name: String,
    /// Exercises for this day
    pub exercises: Vec<Exercise>,
}

/// One week of a workout plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutWeek {
    /// 1-based week number
    pub week_number: u32,
    /// Training days in this week
    pub days: Vec<WorkoutDay>,
}

/// A complete generated workout plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Plan title
    pub plan_name: String,
    /// Short overview of the plan
    pub plan_description: String,
    /// The weekly schedule
    pub weeks: Vec<WorkoutWeek>,
    /// General advice and notes
    #[serde(default)]
    pub notes: String,
    /// Whether the primary (model-backed) strategy produced this plan
    #[serde(rename = "isAIGenerated", default)]
    pub is_ai_generated: bool,
    /// Why the fallback strategy ran; set only on fallback-produced plans.
    /// This is the sole signal distinguishing primary from secondary
    /// generation and must propagate to persistence and display layers.
    #[serde(rename = "fallbackReason", default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

// ============================================================================
// Nutrition Plan Shapes
// ============================================================================

/// A single meal within a nutrition day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Meal name
    pub name: String,
    /// Time-of-day label (e.g. "8:00 AM")
    #[serde(alias = "mealTime")]
    pub meal_time: String,
    /// Calories for this meal
    pub calories: u32,
    /// Protein in grams
    pub protein: u32,
    /// Carbohydrates in grams
    pub carbs: u32,
    /// Fat in grams
    pub fat: u32,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Preparation instructions
    #[serde(default)]
    pub instructions: String,
}

/// One day of a nutrition plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionDay {
    /// 1-based day number, unique and contiguous within the plan
    #[serde(alias = "day")]
    pub day_number: u32,
    /// Meals for this day
    pub meals: Vec<Meal>,
}

/// A complete generated nutrition plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionPlan {
    /// Plan title
    pub plan_name: String,
    /// Short overview of the plan
    pub plan_description: String,
    /// The goal this plan targets
    pub goal: Goal,
    /// Daily calorie and macro targets
    pub targets: NutritionTargets,
    /// The daily meal schedule
    pub days: Vec<NutritionDay>,
    /// Whether the primary (model-backed) strategy produced this plan
    #[serde(rename = "isAIGenerated", default)]
    pub is_ai_generated: bool,
    /// Why the fallback strategy ran; set only on fallback-produced plans
    #[serde(rename = "fallbackReason", default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

// ============================================================================
// Schema Validation
// ============================================================================

/// Structural violations that disqualify a generated plan
///
/// A validation failure from a model-generated plan is not fatal: the
/// orchestrator treats it as "primary strategy unavailable" and falls back.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanSchemaError {
    /// The plan contains no weeks or days at all
    #[error("plan contains no content")]
    EmptyPlan,
    /// A week has no training days
    #[error("week {week_number} contains no days")]
    EmptyWeek {
        /// Offending week number
        week_number: u32,
    },
    /// Week numbers are not contiguous from 1
    #[error("expected week number {expected}, found {found}")]
    WeekNumbering {
        /// Expected 1-based position
        expected: u32,
        /// Actual value found
        found: u32,
    },
    /// Day numbers are not contiguous from 1 within their parent
    #[error("expected day number {expected}, found {found}")]
    DayNumbering {
        /// Expected 1-based position
        expected: u32,
        /// Actual value found
        found: u32,
    },
    /// A day has no exercises or meals
    #[error("day {day_number} has no entries")]
    EmptyDay {
        /// Offending day number
        day_number: u32,
    },
    /// A required text field is empty
    #[error("day {day_number}: empty {field}")]
    EmptyField {
        /// Offending day number
        day_number: u32,
        /// Field name
        field: &'static str,
    },
    /// A numeric field has an invalid value
    #[error("day {day_number}: {field} must be positive")]
    NonPositive {
        /// Offending day number
        day_number: u32,
        /// Field name
        field: &'static str,
    },
}

impl WorkoutPlan {
    /// Validate the structural invariants of a workout plan
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanSchemaError`] encountered.
    pub fn validate(&self) -> Result<(), PlanSchemaError> {
        if self.weeks.is_empty() {
            return Err(PlanSchemaError::EmptyPlan);
        }
        for (week_idx, week) in self.weeks.iter().enumerate() {
            let expected_week = week_idx as u32 + 1;
            if week.week_number != expected_week {
                return Err(PlanSchemaError::WeekNumbering {
                    expected: expected_week,
                    found: week.week_number,
                });
            }
            if week.days.is_empty() {
                return Err(PlanSchemaError::EmptyWeek {
                    week_number: week.week_number,
                });
            }
            for (day_idx, day) in week.days.iter().enumerate() {
                let expected_day = day_idx as u32 + 1;
                if day.day_number != expected_day {
                    return Err(PlanSchemaError::DayNumbering {
                        expected: expected_day,
                        found: day.day_number,
                    });
                }
                if day.name.trim().is_empty() {
                    return Err(PlanSchemaError::EmptyField {
                        day_number: day.day_number,
                        field: "name",
                    });
                }
                if day.exercises.is_empty() {
                    return Err(PlanSchemaError::EmptyDay {
                        day_number: day.day_number,
                    });
                }
                for exercise in &day.exercises {
                    if exercise.name.trim().is_empty() {
                        return Err(PlanSchemaError::EmptyField {
                            day_number: day.day_number,
                            field: "exercise name",
                        });
                    }
                    if exercise.sets == 0 {
                        return Err(PlanSchemaError::NonPositive {
                            day_number: day.day_number,
                            field: "sets",
                        });
                    }
                    if exercise.reps.trim().is_empty() {
                        return Err(PlanSchemaError::EmptyField {
                            day_number: day.day_number,
                            field: "reps",
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl NutritionPlan {
    /// Validate the structural invariants of a nutrition plan
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanSchemaError`] encountered.
    pub fn validate(&self) -> Result<(), PlanSchemaError> {
        if self.days.is_empty() {
            return Err(PlanSchemaError::EmptyPlan);
        }
        for (day_idx, day) in self.days.iter().enumerate() {
            let expected_day = day_idx as u32 + 1;
            if day.day_number != expected_day {
                return Err(PlanSchemaError::DayNumbering {
                    expected: expected_day,
                    found: day.day_number,
                });
            }
            if day.meals.is_empty() {
                return Err(PlanSchemaError::EmptyDay {
                    day_number: day.day_number,
                });
            }
            for meal in &day.meals {
                if meal.name.trim().is_empty() {
                    return Err(PlanSchemaError::EmptyField {
                        day_number: day.day_number,
                        field: "meal name",
                    });
                }
                if meal.meal_time.trim().is_empty() {
                    return Err(PlanSchemaError::EmptyField {
                        day_number: day.day_number,
                        field: "meal time",
                    });
                }
                if meal.calories == 0 {
                    return Err(PlanSchemaError::NonPositive {
                        day_number: day.day_number,
                        field: "calories",
                    });
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Stored Plan Types (persistence reads)
// ============================================================================

/// Summary of a persisted workout plan, for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanSummary {
    /// Stable plan identifier
    pub id: Uuid,
    /// Plan title
    pub name: String,
    /// Plan overview
    pub description: String,
    /// Plan length in weeks
    pub duration_weeks: u32,
    /// Whether the model-backed strategy produced it
    pub is_ai_generated: bool,
    /// Fallback reason when applicable
    pub fallback_reason: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A persisted workout plan with its full nested content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredWorkoutPlan {
    /// Stable plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// The plan content
    pub plan: WorkoutPlan,
}

/// Summary of a persisted nutrition plan, for list views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionPlanSummary {
    /// Stable plan identifier
    pub id: Uuid,
    /// Plan title
    pub name: String,
    /// Goal this plan targets
    pub goal: Goal,
    /// Daily calorie and macro targets
    pub targets: NutritionTargets,
    /// Whether the model-backed strategy produced it
    pub is_ai_generated: bool,
    /// Fallback reason when applicable
    pub fallback_reason: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A persisted nutrition plan with its full nested content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredNutritionPlan {
    /// Stable plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// The plan content
    pub plan: NutritionPlan,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_normalize_empty_payload_uses_defaults() {
        let request = PlanRequest::normalize(&PlanRequestPayload::default());

        assert_eq!(request.goal, Goal::Performance);
        assert!((request.biometrics.weight_kg - defaults::WEIGHT_KG).abs() < f64::EPSILON);
        assert!((request.biometrics.height_cm - defaults::HEIGHT_CM).abs() < f64::EPSILON);
        assert_eq!(request.biometrics.age, defaults::AGE_YEARS);
        assert_eq!(request.biometrics.gender, Gender::Male);
        assert_eq!(request.activity, ActivityLevel::Moderate);
        assert_eq!(request.preferences.frequency, WorkoutFrequency::ThreeToFour);
        assert_eq!(request.days, defaults::NUTRITION_PLAN_DAYS);
        assert_eq!(request.daily_calories, None);
    }

    #[test]
    fn test_normalize_replaces_implausible_biometrics() {
        let payload = PlanRequestPayload {
            weight: Some(1200.0),
            height: Some(20.0),
            age: Some(7),
            ..PlanRequestPayload::default()
        };
        let request = PlanRequest::normalize(&payload);

        assert!((request.biometrics.weight_kg - defaults::WEIGHT_KG).abs() < f64::EPSILON);
        assert!((request.biometrics.height_cm - defaults::HEIGHT_CM).abs() < f64::EPSILON);
        assert_eq!(request.biometrics.age, defaults::AGE_YEARS);
    }

    #[test]
    fn test_normalize_keeps_plausible_biometrics() {
        let payload = PlanRequestPayload {
            weight: Some(82.5),
            height: Some(184.0),
            age: Some(41),
            gender: Some("female".into()),
            ..PlanRequestPayload::default()
        };
        let request = PlanRequest::normalize(&payload);

        assert!((request.biometrics.weight_kg - 82.5).abs() < f64::EPSILON);
        assert!((request.biometrics.height_cm - 184.0).abs() < f64::EPSILON);
        assert_eq!(request.biometrics.age, 41);
        assert_eq!(request.biometrics.gender, Gender::Female);
    }

    #[test]
    fn test_goal_parsing_defaults_to_performance() {
        assert_eq!(Goal::parse("weight-loss"), Goal::WeightLoss);
        assert_eq!(Goal::parse("Muscle Gain"), Goal::MuscleGain);
        assert_eq!(Goal::parse("something-else"), Goal::Performance);
    }

    #[test]
    fn test_activity_parsing_defaults_to_sedentary() {
        assert_eq!(ActivityLevel::parse("very active"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::parse("couch potato"), ActivityLevel::Sedentary);
    }

    #[test]
    fn test_frequency_days_per_week() {
        assert_eq!(WorkoutFrequency::parse("4-5").days_per_week(), 4);
        assert_eq!(WorkoutFrequency::parse("6+").days_per_week(), 5);
        assert_eq!(WorkoutFrequency::parse("1-2").days_per_week(), 3);
    }

    #[test]
    fn test_workout_plan_validation_rejects_bad_day_numbering() {
        let plan = WorkoutPlan {
            plan_name: "Test".into(),
            plan_description: "Test".into(),
            weeks: vec![WorkoutWeek {
                week_number: 1,
                days: vec![WorkoutDay {
                    day_number: 2,
                    name: "Upper Body".into(),
                    exercises: vec![Exercise {
                        name: "Push-ups".into(),
                        sets: 3,
                        reps: "10-15".into(),
                        rest: "60 sec".into(),
                        instructions: "Keep your body straight.".into(),
                    }],
                }],
            }],
            notes: String::new(),
            is_ai_generated: true,
            fallback_reason: None,
        };

        assert_eq!(
            plan.validate(),
            Err(PlanSchemaError::DayNumbering {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_nutrition_plan_validation_rejects_empty_days() {
        let plan = NutritionPlan {
            plan_name: "Test".into(),
            plan_description: "Test".into(),
            goal: Goal::Maintenance,
            targets: NutritionTargets {
                daily_calories: 2000,
                protein_g: 150,
                carbs_g: 225,
                fat_g: 56,
            },
            days: vec![],
            is_ai_generated: false,
            fallback_reason: Some("timeout".into()),
        };

        assert_eq!(plan.validate(), Err(PlanSchemaError::EmptyPlan));
    }

    #[test]
    fn test_meal_accepts_camel_case_meal_time() {
        let json = r#"{
            "name": "Breakfast",
            "mealTime": "8:00 AM",
            "calories": 500,
            "protein": 38,
            "carbs": 56,
            "fat": 14,
            "description": "Protein-rich breakfast",
            "instructions": "Prepare quickly"
        }"#;
        let meal: Meal = serde_json::from_str(json).unwrap();
        assert_eq!(meal.meal_time, "8:00 AM");
    }
}
