// ABOUTME: Deterministic fallback plan synthesis from fixed templates
// ABOUTME: Pure, total, and clock-free; identical inputs always produce identical plans

//! # Fallback Generation Strategy
//!
//! Synthesizes a structurally valid plan from fixed templates when the
//! primary strategy is unavailable. Pure given its inputs: no I/O, no
//! randomness, no clock. Identical requests always yield identical plans,
//! which makes the whole engine deterministically testable.
//!
//! The workout template rotates day focus by `day_number` within each
//! week, so all four weeks carry identical content. The source design
//! works this way (a cycle keyed on the day, not a running index across
//! weeks); it is preserved for compatibility and called out in DESIGN.md
//! as a candidate improvement rather than silently changed.

use crate::constants::defaults;
use crate::models::{
    Exercise, Goal, Meal, NutritionDay, NutritionPlan, NutritionTargets, PlanRequest, WorkoutDay,
    WorkoutPlan, WorkoutWeek,
};
use crate::config::nutrition::MealProportionsConfig;

// ============================================================================
// Workout Template
// ============================================================================

/// Focus category for a template training day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayFocus {
    UpperBody,
    LowerBody,
    ChestAndArms,
    BackAndShoulders,
    PushFocus,
    PullFocus,
    CoreFocus,
}

impl DayFocus {
    /// Pick the focus for a day
    ///
    /// Split routine for 4+ days per week, full-body rotation otherwise.
    /// Keyed by `day_number` only, so week 1 day 1 and week 3 day 1 always
    /// match.
    const fn select(days_per_week: u32, day_number: u32) -> Self {
        if days_per_week >= 4 {
            match day_number % 4 {
                1 => Self::UpperBody,
                2 => Self::LowerBody,
                3 => Self::ChestAndArms,
                _ => Self::BackAndShoulders,
            }
        } else {
            match day_number % 3 {
                1 => Self::PushFocus,
                2 => Self::PullFocus,
                _ => Self::CoreFocus,
            }
        }
    }

    /// Display name used as the day name
    const fn label(self) -> &'static str {
        match self {
            Self::UpperBody => "Upper Body",
            Self::LowerBody => "Lower Body",
            Self::ChestAndArms => "Chest and Arms",
            Self::BackAndShoulders => "Back and Shoulders",
            Self::PushFocus => "Full Body - Push Focus",
            Self::PullFocus => "Full Body - Pull Focus",
            Self::CoreFocus => "Full Body - Core Focus",
        }
    }
}

/// Build a preset exercise entry
fn exercise(name: &str, sets: u32, reps: &str, rest: &str, instructions: &str) -> Exercise {
    Exercise {
        name: name.into(),
        sets,
        reps: reps.into(),
        rest: rest.into(),
        instructions: instructions.into(),
    }
}

/// Fixed exercise list for a focus category
fn exercises_for_focus(focus: DayFocus) -> Vec<Exercise> {
    match focus {
        DayFocus::UpperBody => vec![
            exercise(
                "Push-ups",
                3,
                "10-15",
                "60 sec",
                "Keep your body straight, lower until your chest nearly touches the floor.",
            ),
            exercise(
                "Dumbbell Rows",
                3,
                "10-12 each side",
                "60 sec",
                "Bend at hips, keep back flat, pull dumbbell to hip.",
            ),
            exercise(
                "Overhead Press",
                3,
                "10-12",
                "60 sec",
                "Press weights directly overhead, keeping core tight.",
            ),
        ],
        DayFocus::LowerBody => vec![
            exercise(
                "Bodyweight Squats",
                3,
                "15-20",
                "60 sec",
                "Keep weight in heels, go as low as comfortable, keep knees in line with toes.",
            ),
            exercise(
                "Lunges",
                3,
                "10-12 each leg",
                "60 sec",
                "Step forward, lower body until both knees are at 90 degrees.",
            ),
            exercise(
                "Glute Bridges",
                3,
                "15-20",
                "60 sec",
                "Lie on back, feet flat, raise hips to create straight line from knees to shoulders.",
            ),
        ],
        DayFocus::ChestAndArms => vec![
            exercise(
                "Incline Push-ups",
                3,
                "12-15",
                "60 sec",
                "Hands on elevated surface, perform push-up with straight body.",
            ),
            exercise(
                "Tricep Dips",
                3,
                "10-15",
                "60 sec",
                "Use chair or bench, lower body until arms at 90 degrees.",
            ),
            exercise(
                "Bicep Curls",
                3,
                "12-15",
                "60 sec",
                "Keep elbows at sides, curl weights toward shoulders.",
            ),
        ],
        DayFocus::BackAndShoulders => vec![
            exercise(
                "Superman Holds",
                3,
                "30 sec hold",
                "45 sec",
                "Lie face down, extend arms and legs, lift limbs off ground.",
            ),
            exercise(
                "Lateral Raises",
                3,
                "12-15",
                "60 sec",
                "Raise arms to sides until parallel with floor, slight bend in elbows.",
            ),
            exercise(
                "Face Pulls",
                3,
                "15-20",
                "60 sec",
                "With resistance band, pull toward face with elbows high.",
            ),
        ],
        DayFocus::PushFocus => vec![
            exercise(
                "Push-ups",
                3,
                "10-15",
                "60 sec",
                "Keep your body straight, lower until your chest nearly touches the floor.",
            ),
            exercise(
                "Bodyweight Squats",
                3,
                "15-20",
                "60 sec",
                "Keep weight in heels, go as low as comfortable, keep knees in line with toes.",
            ),
            exercise(
                "Shoulder Taps",
                3,
                "10-12 each side",
                "60 sec",
                "Start in push-up position, tap opposite shoulder while maintaining stability.",
            ),
        ],
        DayFocus::PullFocus => vec![
            exercise(
                "Bodyweight Rows",
                3,
                "10-15",
                "60 sec",
                "Using table or bar at waist height, pull chest toward bar with straight body.",
            ),
            exercise(
                "Glute Bridges",
                3,
                "15-20",
                "60 sec",
                "Lie on back, feet flat, raise hips to create straight line from knees to shoulders.",
            ),
            exercise(
                "Superman Holds",
                3,
                "30 sec hold",
                "45 sec",
                "Lie face down, extend arms and legs, lift limbs off ground.",
            ),
        ],
        DayFocus::CoreFocus => vec![
            exercise(
                "Plank",
                3,
                "30-45 sec hold",
                "45 sec",
                "Forearms on ground, maintain straight line from head to heels.",
            ),
            exercise(
                "Mountain Climbers",
                3,
                "30-45 sec",
                "45 sec",
                "Start in push-up position, alternate bringing knees to chest.",
            ),
            exercise(
                "Russian Twists",
                3,
                "10-15 each side",
                "60 sec",
                "Sit with knees bent, lean back slightly, twist torso side to side.",
            ),
        ],
    }
}

/// Fixed cardio finisher appended for weight-loss goals
fn cardio_finisher() -> Exercise {
    exercise(
        "Jumping Jacks",
        1,
        "3 minutes",
        "60 sec",
        "Jump while raising arms and spreading legs, then return to starting position.",
    )
}

/// Plan name lookup by goal
const fn plan_name_for_goal(goal: Goal) -> &'static str {
    match goal {
        Goal::WeightLoss => "Weight Loss Program",
        Goal::MuscleGain => "Muscle Building Program",
        Goal::Performance => "General Fitness Improvement",
        Goal::Maintenance | Goal::Health => "Basic Fitness Plan",
    }
}

/// Synthesize a deterministic workout plan
///
/// Always produces exactly four weeks; days per week derive from the
/// requested frequency. Never fails for a normalized request, and the
/// output always passes schema validation.
#[must_use]
pub fn fallback_workout_plan(request: &PlanRequest, reason: impl Into<String>) -> WorkoutPlan {
    let plan_name = plan_name_for_goal(request.goal);
    let days_per_week = request.preferences.frequency.days_per_week();

    let weeks = (1..=defaults::WORKOUT_PLAN_WEEKS)
        .map(|week_number| {
            let days = (1..=days_per_week)
                .map(|day_number| {
                    let focus = DayFocus::select(days_per_week, day_number);
                    let mut exercises = exercises_for_focus(focus);
                    if request.goal == Goal::WeightLoss {
                        exercises.push(cardio_finisher());
                    }
                    WorkoutDay {
                        day_number,
                        name: focus.label().into(),
                        exercises,
                    }
                })
                .collect();
            WorkoutWeek { week_number, days }
        })
        .collect();

    WorkoutPlan {
        plan_name: plan_name.into(),
        plan_description: format!(
            "A 4-week {} designed for {} workouts. This plan focuses on progressive \
             overload and balanced training to help you achieve your {} goal.",
            plan_name.to_lowercase(),
            request.preferences.environment,
            request.goal
        ),
        weeks,
        notes: "This is a starter plan. Adjust intensity as needed, ensuring proper form \
                on all exercises. Rest at least 1-2 days between workouts that target the \
                same muscle groups. Stay hydrated and listen to your body."
            .into(),
        is_ai_generated: false,
        fallback_reason: Some(reason.into()),
    }
}

// ============================================================================
// Nutrition Template
// ============================================================================

/// Fixed meal slot in the template nutrition day
struct MealSlot {
    name: &'static str,
    meal_time: &'static str,
    description: &'static str,
    instructions: &'static str,
    share: f64,
}

/// The four fixed meal slots and their calorie/macro shares
fn meal_slots(proportions: &MealProportionsConfig) -> [MealSlot; 4] {
    [
        MealSlot {
            name: "Breakfast",
            meal_time: "8:00 AM",
            description: "Protein-rich breakfast to start the day",
            instructions: "Prepare quickly for a nutritious start to your day",
            share: proportions.breakfast,
        },
        MealSlot {
            name: "Lunch",
            meal_time: "12:30 PM",
            description: "Balanced meal with lean protein and vegetables",
            instructions: "Can be prepared ahead of time for convenience",
            share: proportions.lunch,
        },
        MealSlot {
            name: "Snack",
            meal_time: "4:00 PM",
            description: "Quick energy boost",
            instructions: "Easy to pack and consume on-the-go",
            share: proportions.snack,
        },
        MealSlot {
            name: "Dinner",
            meal_time: "7:00 PM",
            description: "Nutritious evening meal",
            instructions: "Enjoy a satisfying dinner to end your day",
            share: proportions.dinner,
        },
    ]
}

/// Apply a meal share to a daily target figure
fn portion(total: u32, share: f64) -> u32 {
    (f64::from(total) * share).round() as u32
}

/// Synthesize a deterministic nutrition plan
///
/// Produces exactly `request.days` day entries with four fixed meals each.
/// The same share is applied independently to calories and each macro;
/// meal names carry the day number to stay distinguishable.
#[must_use]
pub fn fallback_nutrition_plan(
    request: &PlanRequest,
    targets: &NutritionTargets,
    proportions: &MealProportionsConfig,
    reason: impl Into<String>,
) -> NutritionPlan {
    let slots = meal_slots(proportions);

    let days = (1..=request.days)
        .map(|day_number| NutritionDay {
            day_number,
            meals: slots
                .iter()
                .map(|slot| Meal {
                    name: format!("Day {day_number} {}", slot.name),
                    meal_time: slot.meal_time.into(),
                    calories: portion(targets.daily_calories, slot.share),
                    protein: portion(targets.protein_g, slot.share),
                    carbs: portion(targets.carbs_g, slot.share),
                    fat: portion(targets.fat_g, slot.share),
                    description: slot.description.into(),
                    instructions: slot.instructions.into(),
                })
                .collect(),
        })
        .collect();

    NutritionPlan {
        plan_name: format!("{} Nutrition Plan", request.goal.display_name()),
        plan_description: format!(
            "A {}-day nutrition plan targeting {} calories per day.",
            request.days, targets.daily_calories
        ),
        goal: request.goal,
        targets: *targets,
        days,
        is_ai_generated: false,
        fallback_reason: Some(reason.into()),
    }
}
