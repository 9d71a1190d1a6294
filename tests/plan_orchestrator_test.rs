// ABOUTME: Orchestrator tests with a scripted LLM provider test double
// ABOUTME: Verifies fallback isolation: primary failures never surface, flags always propagate

//! Plan orchestrator property tests
//!
//! The orchestrator's contract: a schema-valid plan for every request.
//! When the scripted provider succeeds with valid JSON, the result is
//! AI-generated with no fallback reason; for every qualifying failure
//! (transport error, prose-only completion, malformed JSON, schema
//! violation) the result is the deterministic fallback, tagged with a
//! non-empty reason.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitforge_server::{
    models::{PlanRequest, PlanRequestPayload},
    plans::PlanEngine,
};

mod common;
use common::ScriptedProvider;

fn request() -> PlanRequest {
    PlanRequest::normalize(&PlanRequestPayload {
        goal: Some("weight-loss".into()),
        workout_frequency: Some("4-5".into()),
        days: Some(2),
        ..PlanRequestPayload::default()
    })
}

const VALID_WORKOUT_JSON: &str = r#"Here is your plan!

{
  "plan_name": "Custom Shred",
  "plan_description": "A four week fat loss program.",
  "weeks": [
    {
      "week_number": 1,
      "days": [
        {
          "day_number": 1,
          "name": "Full Body Burner",
          "exercises": [
            {
              "name": "Burpees",
              "sets": 3,
              "reps": "12",
              "rest": "45 sec",
              "instructions": "Explode up, land soft."
            }
          ]
        }
      ]
    }
  ],
  "notes": "Stay consistent."
}

Good luck!"#;

const VALID_NUTRITION_JSON: &str = r#"```json
[
  {
    "day": 1,
    "meals": [
      {
        "name": "Oatmeal Bowl",
        "mealTime": "8:00 AM",
        "description": "Oats with berries",
        "calories": 420,
        "protein": 24,
        "carbs": 60,
        "fat": 10,
        "instructions": "Simmer oats, top with berries."
      }
    ]
  },
  {
    "day": 2,
    "meals": [
      {
        "name": "Chicken Salad",
        "mealTime": "12:30 PM",
        "description": "Lean protein and greens",
        "calories": 550,
        "protein": 45,
        "carbs": 30,
        "fat": 22,
        "instructions": "Grill chicken, toss with greens."
      }
    ]
  }
]
```"#;

// Structurally broken: day numbering starts at 2
const SCHEMA_VIOLATION_JSON: &str = r#"{
  "plan_name": "Broken",
  "plan_description": "Bad numbering",
  "weeks": [
    {
      "week_number": 1,
      "days": [
        {
          "day_number": 2,
          "name": "Day",
          "exercises": [
            {"name": "X", "sets": 3, "reps": "10", "rest": "60 sec", "instructions": "Y"}
          ]
        }
      ]
    }
  ],
  "notes": ""
}"#;

// ============================================================================
// PRIMARY SUCCESS
// ============================================================================

#[tokio::test]
async fn test_valid_completion_yields_ai_plan() {
    let engine = PlanEngine::new(ScriptedProvider::replying(VALID_WORKOUT_JSON));
    let plan = engine.produce_workout(&request()).await;

    assert!(plan.is_ai_generated);
    assert_eq!(plan.fallback_reason, None);
    assert_eq!(plan.plan_name, "Custom Shred");
    assert!(plan.validate().is_ok());
}

#[tokio::test]
async fn test_valid_nutrition_completion_yields_ai_plan() {
    let engine = PlanEngine::new(ScriptedProvider::replying(VALID_NUTRITION_JSON));
    let plan = engine.produce_nutrition(&request()).await;

    assert!(plan.is_ai_generated);
    assert_eq!(plan.fallback_reason, None);
    assert_eq!(plan.days.len(), 2);
    // Day numbers come from array position regardless of model numbering
    assert_eq!(plan.days[1].day_number, 2);
    assert!(plan.validate().is_ok());
}

// ============================================================================
// QUALIFYING FAILURES ALWAYS FALL BACK
// ============================================================================

#[tokio::test]
async fn test_transport_failure_falls_back() {
    let engine = PlanEngine::new(ScriptedProvider::failing());
    let plan = engine.produce_workout(&request()).await;

    assert!(!plan.is_ai_generated);
    let reason = plan.fallback_reason.as_deref().unwrap();
    assert!(!reason.is_empty());
    assert!(reason.contains("timed out"));
    assert!(plan.validate().is_ok());
    assert_eq!(plan.plan_name, "Weight Loss Program");
}

#[tokio::test]
async fn test_prose_only_completion_falls_back() {
    let engine = PlanEngine::new(ScriptedProvider::replying(
        "I'm sorry, I cannot produce a plan right now.",
    ));
    let plan = engine.produce_workout(&request()).await;

    assert!(!plan.is_ai_generated);
    assert!(plan.fallback_reason.as_deref().unwrap().contains("no JSON"));
    assert!(plan.validate().is_ok());
}

#[tokio::test]
async fn test_malformed_json_falls_back() {
    let engine = PlanEngine::new(ScriptedProvider::replying(
        r#"{"plan_name": "Oops", "weeks": "not-an-array"}"#,
    ));
    let plan = engine.produce_workout(&request()).await;

    assert!(!plan.is_ai_generated);
    assert!(plan.fallback_reason.is_some());
    assert!(plan.validate().is_ok());
}

#[tokio::test]
async fn test_schema_violation_falls_back() {
    let engine = PlanEngine::new(ScriptedProvider::replying(SCHEMA_VIOLATION_JSON));
    let plan = engine.produce_workout(&request()).await;

    assert!(!plan.is_ai_generated);
    assert!(plan
        .fallback_reason
        .as_deref()
        .unwrap()
        .contains("validation"));
    assert!(plan.validate().is_ok());
}

#[tokio::test]
async fn test_nutrition_failure_falls_back_with_targets() {
    let engine = PlanEngine::new(ScriptedProvider::failing());
    let req = request();
    let plan = engine.produce_nutrition(&req).await;

    assert!(!plan.is_ai_generated);
    assert!(plan.fallback_reason.is_some());
    assert_eq!(plan.days.len(), 2);
    assert!(plan.validate().is_ok());

    // Fallback works from the same resolved targets as the primary path
    let targets = engine.resolve_targets(&req);
    assert_eq!(plan.targets, targets);
}

// ============================================================================
// DETERMINISM THROUGH THE ENGINE
// ============================================================================

#[tokio::test]
async fn test_fallback_through_engine_is_deterministic() {
    let engine = PlanEngine::new(ScriptedProvider::failing());
    let req = request();

    let a = engine.produce_workout(&req).await;
    let b = engine.produce_workout(&req).await;
    assert_eq!(a, b);
}
