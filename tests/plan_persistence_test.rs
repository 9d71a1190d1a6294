// ABOUTME: Persistence tests over in-memory and file-backed SQLite databases
// ABOUTME: Transactional plan flattening, newest-first listing, ownership scoping, count consistency

//! Persistence adapter tests
//!
//! Covers the storage contract: accept a plan and return a stable id,
//! list a user's plans newest-first, all-or-nothing flattening with
//! internally consistent day and entry counts, and no deduplication of
//! repeated saves.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use uuid::Uuid;

use fitforge_server::{
    config::NutritionConfig,
    database_plugins::{factory::Database, DatabaseProvider},
    intelligence::resolve_targets,
    models::{PlanRequest, PlanRequestPayload},
    plans::{fallback_nutrition_plan, fallback_workout_plan},
};

async fn memory_database() -> Database {
    let database = Database::new("sqlite::memory:").await.unwrap();
    database.migrate().await.unwrap();
    database
}

fn workout_request() -> PlanRequest {
    PlanRequest::normalize(&PlanRequestPayload {
        goal: Some("weight-loss".into()),
        workout_frequency: Some("4-5".into()),
        ..PlanRequestPayload::default()
    })
}

#[tokio::test]
async fn test_workout_plan_roundtrip() {
    let database = memory_database().await;
    let user_id = Uuid::new_v4();
    let plan = fallback_workout_plan(&workout_request(), "service down");

    let plan_id = database.create_workout_plan(user_id, &plan).await.unwrap();
    let stored = database
        .get_workout_plan(user_id, plan_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(stored.id, plan_id);
    assert_eq!(stored.user_id, user_id);
    assert_eq!(stored.plan.plan_name, plan.plan_name);
    assert_eq!(stored.plan.weeks.len(), 4);
    assert!(!stored.plan.is_ai_generated);
    assert_eq!(stored.plan.fallback_reason.as_deref(), Some("service down"));

    // Content survives flattening and reconstruction intact
    assert_eq!(stored.plan, plan);
}

#[tokio::test]
async fn test_workout_counts_are_internally_consistent() {
    let database = memory_database().await;
    let user_id = Uuid::new_v4();
    let plan = fallback_workout_plan(&workout_request(), "down");

    let plan_id = database.create_workout_plan(user_id, &plan).await.unwrap();
    let stored = database
        .get_workout_plan(user_id, plan_id)
        .await
        .unwrap()
        .unwrap();

    let expected_days: usize = plan.weeks.iter().map(|w| w.days.len()).sum();
    let stored_days: usize = stored.plan.weeks.iter().map(|w| w.days.len()).sum();
    assert_eq!(stored_days, expected_days);

    let expected_exercises: usize = plan
        .weeks
        .iter()
        .flat_map(|w| &w.days)
        .map(|d| d.exercises.len())
        .sum();
    let stored_exercises: usize = stored
        .plan
        .weeks
        .iter()
        .flat_map(|w| &w.days)
        .map(|d| d.exercises.len())
        .sum();
    assert_eq!(stored_exercises, expected_exercises);
}

#[tokio::test]
async fn test_double_save_creates_two_distinct_records() {
    let database = memory_database().await;
    let user_id = Uuid::new_v4();
    let plan = fallback_workout_plan(&workout_request(), "down");

    let first = database.create_workout_plan(user_id, &plan).await.unwrap();
    let second = database.create_workout_plan(user_id, &plan).await.unwrap();
    assert_ne!(first, second);

    let plans = database.get_workout_plans(user_id).await.unwrap();
    assert_eq!(plans.len(), 2);

    // Newest first: the second save lists before the first
    assert_eq!(plans[0].id, second);
    assert_eq!(plans[1].id, first);
}

#[tokio::test]
async fn test_listing_is_scoped_by_user() {
    let database = memory_database().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let plan = fallback_workout_plan(&workout_request(), "down");

    let alice_plan = database.create_workout_plan(alice, &plan).await.unwrap();
    database.create_workout_plan(bob, &plan).await.unwrap();

    let alice_plans = database.get_workout_plans(alice).await.unwrap();
    assert_eq!(alice_plans.len(), 1);
    assert_eq!(alice_plans[0].id, alice_plan);

    // Fetching another user's plan by id yields nothing
    assert!(database
        .get_workout_plan(bob, alice_plan)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_nutrition_plan_roundtrip() {
    let database = memory_database().await;
    let user_id = Uuid::new_v4();
    let config = NutritionConfig::default();

    let request = PlanRequest::normalize(&PlanRequestPayload {
        goal: Some("muscle-gain".into()),
        daily_calories: Some(2800),
        days: Some(5),
        ..PlanRequestPayload::default()
    });
    let targets = resolve_targets(&request, &config);
    let plan = fallback_nutrition_plan(&request, &targets, &config.meal_proportions, "down");

    let plan_id = database
        .create_nutrition_plan(user_id, &plan)
        .await
        .unwrap();
    let stored = database
        .get_nutrition_plan(user_id, plan_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(stored.plan.targets.daily_calories, 2800);
    assert_eq!(stored.plan.days.len(), 5);
    assert_eq!(stored.plan, plan);

    // Meal counts match across flattening
    let expected_meals: usize = plan.days.iter().map(|d| d.meals.len()).sum();
    let stored_meals: usize = stored.plan.days.iter().map(|d| d.meals.len()).sum();
    assert_eq!(stored_meals, expected_meals);
}

#[tokio::test]
async fn test_nutrition_summary_carries_targets_and_provenance() {
    let database = memory_database().await;
    let user_id = Uuid::new_v4();
    let config = NutritionConfig::default();

    let request = PlanRequest::normalize(&PlanRequestPayload {
        goal: Some("weight-loss".into()),
        daily_calories: Some(2000),
        ..PlanRequestPayload::default()
    });
    let targets = resolve_targets(&request, &config);
    let plan = fallback_nutrition_plan(&request, &targets, &config.meal_proportions, "llm down");

    database.create_nutrition_plan(user_id, &plan).await.unwrap();

    let summaries = database.get_nutrition_plans(user_id).await.unwrap();
    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.name, "Weight Loss Nutrition Plan");
    assert_eq!(summary.targets.daily_calories, 2000);
    assert_eq!(summary.targets.protein_g, 150);
    assert_eq!(summary.targets.carbs_g, 225);
    assert_eq!(summary.targets.fat_g, 56);
    assert!(!summary.is_ai_generated);
    assert_eq!(summary.fallback_reason.as_deref(), Some("llm down"));
}

#[tokio::test]
async fn test_missing_plan_returns_none() {
    let database = memory_database().await;
    let result = database
        .get_workout_plan(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_file_backed_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plans.db");
    let url = format!("sqlite:{}", path.display());

    let user_id = Uuid::new_v4();
    let plan_id = {
        let database = Database::new(&url).await.unwrap();
        database.migrate().await.unwrap();
        database
            .create_workout_plan(user_id, &fallback_workout_plan(&workout_request(), "down"))
            .await
            .unwrap()
    };

    // A fresh connection sees the committed plan
    let database = Database::new(&url).await.unwrap();
    let stored = database
        .get_workout_plan(user_id, plan_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, plan_id);
}
