// ABOUTME: Primary plan generation strategy backed by an external LLM provider
// ABOUTME: Builds prompts, extracts JSON from completions, and validates plan shape

//! # Primary Generation Strategy
//!
//! Builds a natural-language instruction pair embedding the normalized
//! request and a strict output-schema description, sends it to the
//! configured provider, and parses the completion into a plan.
//!
//! Every failure mode here — transport error, non-success status, no JSON
//! substring, parse error, schema mismatch — surfaces as an `Err` that the
//! orchestrator converts into a fallback run. Nothing in this module
//! persists or mutates state; its only side effect is the outbound call.

use tracing::debug;

use crate::errors::AppError;
use crate::llm::{prompts, ChatMessage, ChatRequest, LlmProvider};
use crate::models::{
    NutritionDay, NutritionPlan, NutritionTargets, PlanRequest, WorkoutPlan,
};
use crate::plans::extract::extract_json_block;

/// Sampling parameters for plan generation requests
#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// Sampling temperature
    pub temperature: f32,
    /// Optional completion token cap
    pub max_tokens: Option<u32>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// Build the user prompt describing the requester for workout generation
fn build_workout_user_prompt(request: &PlanRequest) -> String {
    let restrictions = if request.preferences.dietary_restrictions.is_empty() {
        "None".to_owned()
    } else {
        request.preferences.dietary_restrictions.join(", ")
    };

    format!(
        "User Profile:\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Height: {height} cm\n\
         - Weight: {weight} kg\n\
         - Activity level: {activity}\n\
         \n\
         Fitness Goals:\n\
         - Primary goal: {goal}\n\
         \n\
         Preferences:\n\
         - Workout environment: {environment}\n\
         - Preferred workout duration: {duration} minutes\n\
         - Preferred workout frequency: {frequency} days per week\n\
         - Dietary restrictions: {restrictions}\n\
         \n\
         Please create a personalized 4-week workout plan for this user.",
        age = request.biometrics.age,
        gender = request.biometrics.gender,
        height = request.biometrics.height_cm,
        weight = request.biometrics.weight_kg,
        activity = request.activity,
        goal = request.goal,
        environment = request.preferences.environment,
        duration = request.preferences.duration,
        frequency = request.preferences.frequency.as_str(),
        restrictions = restrictions,
    )
}

/// Build the user prompt for nutrition generation
fn build_nutrition_user_prompt(request: &PlanRequest, targets: &NutritionTargets) -> String {
    let preference_text = if request.preferences.dietary_preferences.is_empty() {
        String::new()
    } else {
        format!(
            " Food preferences: {}.",
            request.preferences.dietary_preferences.join(", ")
        )
    };
    let restriction_text = if request.preferences.dietary_restrictions.is_empty() {
        String::new()
    } else {
        format!(
            " Dietary restrictions: {}.",
            request.preferences.dietary_restrictions.join(", ")
        )
    };

    format!(
        "Create a {days}-day nutrition plan for a {goal} goal with approximately \
         {calories} calories per day (about {protein}g protein, {carbs}g carbs, \
         {fat}g fat).{preference_text}{restriction_text}",
        days = request.days,
        goal = request.goal,
        calories = targets.daily_calories,
        protein = targets.protein_g,
        carbs = targets.carbs_g,
        fat = targets.fat_g,
    )
}

/// Extract and deserialize a JSON block from a completion
fn parse_block<'a, T: serde::Deserialize<'a>>(
    provider_name: &str,
    content: &'a str,
) -> Result<T, AppError> {
    let block = extract_json_block(content).ok_or_else(|| {
        AppError::external_service(provider_name, "no JSON object found in completion")
    })?;

    serde_json::from_str(block).map_err(|e| {
        AppError::external_service(provider_name, format!("failed to parse plan JSON: {e}"))
    })
}

/// Generate a workout plan via the primary strategy
///
/// # Errors
///
/// Returns an error on any transport, status, extraction, parse, or
/// schema-validation failure; the orchestrator treats all of these as
/// "primary strategy unavailable".
pub async fn generate_workout_plan(
    provider: &dyn LlmProvider,
    request: &PlanRequest,
    params: &GenerationParams,
) -> Result<WorkoutPlan, AppError> {
    let chat = ChatRequest::new(vec![
        ChatMessage::system(prompts::workout_system_prompt()),
        ChatMessage::user(build_workout_user_prompt(request)),
    ])
    .with_temperature(params.temperature)
    .with_json_output();

    let chat = match params.max_tokens {
        Some(max) => chat.with_max_tokens(max),
        None => chat,
    };

    let response = provider.complete(&chat).await?;
    debug!(
        provider = provider.name(),
        content_len = response.content.len(),
        "Workout completion received"
    );

    let mut plan: WorkoutPlan = parse_block(provider.display_name(), &response.content)?;
    plan.is_ai_generated = true;
    plan.fallback_reason = None;

    plan.validate().map_err(|e| {
        AppError::external_service(
            provider.display_name(),
            format!("generated workout plan failed validation: {e}"),
        )
    })?;

    Ok(plan)
}

/// Generate a nutrition plan via the primary strategy
///
/// The model produces only the day/meal schedule; the plan title,
/// description, and targets are assembled deterministically so that
/// primary- and fallback-produced plans share an envelope.
///
/// # Errors
///
/// Returns an error on any transport, status, extraction, parse, or
/// schema-validation failure.
pub async fn generate_nutrition_plan(
    provider: &dyn LlmProvider,
    request: &PlanRequest,
    targets: &NutritionTargets,
    params: &GenerationParams,
) -> Result<NutritionPlan, AppError> {
    let chat = ChatRequest::new(vec![
        ChatMessage::system(prompts::nutrition_system_prompt()),
        ChatMessage::user(build_nutrition_user_prompt(request, targets)),
    ])
    .with_temperature(params.temperature)
    .with_json_output();

    let chat = match params.max_tokens {
        Some(max) => chat.with_max_tokens(max),
        None => chat,
    };

    let response = provider.complete(&chat).await?;
    debug!(
        provider = provider.name(),
        content_len = response.content.len(),
        "Nutrition completion received"
    );

    let mut days = parse_nutrition_days(provider.display_name(), &response.content)?;

    // Day numbers come from array position; the model's own numbering is
    // not trusted
    for (idx, day) in days.iter_mut().enumerate() {
        day.day_number = idx as u32 + 1;
    }

    let plan = NutritionPlan {
        plan_name: format!("{} Nutrition Plan", request.goal.display_name()),
        plan_description: format!(
            "A {}-day nutrition plan targeting {} calories per day.",
            days.len(),
            targets.daily_calories
        ),
        goal: request.goal,
        targets: *targets,
        days,
        is_ai_generated: true,
        fallback_reason: None,
    };

    plan.validate().map_err(|e| {
        AppError::external_service(
            provider.display_name(),
            format!("generated nutrition plan failed validation: {e}"),
        )
    })?;

    Ok(plan)
}

/// Parse the model's day array, accepting a bare single-day object too
fn parse_nutrition_days(
    provider_name: &str,
    content: &str,
) -> Result<Vec<NutritionDay>, AppError> {
    let block = extract_json_block(content).ok_or_else(|| {
        AppError::external_service(provider_name, "no JSON object found in completion")
    })?;

    if let Ok(days) = serde_json::from_str::<Vec<NutritionDay>>(block) {
        return Ok(days);
    }

    serde_json::from_str::<NutritionDay>(block)
        .map(|day| vec![day])
        .map_err(|e| {
            AppError::external_service(provider_name, format!("failed to parse plan JSON: {e}"))
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{Goal, PlanRequestPayload};

    fn request() -> PlanRequest {
        PlanRequest::normalize(&PlanRequestPayload {
            goal: Some("weight-loss".into()),
            dietary_restrictions: vec!["gluten".into()],
            ..PlanRequestPayload::default()
        })
    }

    #[test]
    fn test_workout_prompt_embeds_request() {
        let prompt = build_workout_user_prompt(&request());
        assert!(prompt.contains("weight-loss"));
        assert!(prompt.contains("170 cm"));
        assert!(prompt.contains("gluten"));
    }

    #[test]
    fn test_nutrition_prompt_embeds_targets() {
        let targets = NutritionTargets {
            daily_calories: 1291,
            protein_g: 97,
            carbs_g: 145,
            fat_g: 36,
        };
        let prompt = build_nutrition_user_prompt(&request(), &targets);
        assert!(prompt.contains("1291 calories"));
        assert!(prompt.contains("7-day"));
        assert!(prompt.contains("Dietary restrictions: gluten."));
    }

    #[test]
    fn test_parse_nutrition_days_wraps_single_object() {
        let content = r#"{"day": 1, "meals": [{"name": "Breakfast", "mealTime": "8:00 AM",
            "calories": 400, "protein": 30, "carbs": 40, "fat": 12,
            "description": "d", "instructions": "i"}]}"#;
        let days = parse_nutrition_days("test", content).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].meals[0].name, "Breakfast");
    }

    #[test]
    fn test_parse_block_rejects_prose() {
        let result: Result<WorkoutPlan, _> = parse_block("test", "Sorry, I can't help.");
        assert!(result.is_err());
    }

    #[test]
    fn test_request_goal_flows_into_prompts() {
        let req = request();
        assert_eq!(req.goal, Goal::WeightLoss);
    }
}
