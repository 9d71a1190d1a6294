// ABOUTME: Comprehensive algorithm tests for calorie and macro target calculations
// ABOUTME: Tests Mifflin-St Jeor BMR, TDEE activity factors, goal adjustments, and macro splits

//! Comprehensive algorithm tests for the nutrition calculator
//!
//! This test suite covers the full calorie pipeline:
//! - Mifflin-St Jeor BMR calculations (male/female, gender default)
//! - TDEE with all 5 activity levels
//! - Goal adjustments (deficit, surplus, unchanged)
//! - Stage-boundary rounding against reference outputs
//! - Macro split derivation and caloric identity tolerance

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitforge_server::{
    config::NutritionConfig,
    intelligence::{
        calculate_daily_calories, calculate_macro_targets, calculate_mifflin_st_jeor,
        calculate_tdee, resolve_targets,
    },
    models::{ActivityLevel, Biometrics, Gender, Goal, PlanRequest, PlanRequestPayload},
};

fn biometrics(weight: f64, height: f64, age: u32, gender: Gender) -> Biometrics {
    Biometrics {
        weight_kg: weight,
        height_cm: height,
        age,
        gender,
    }
}

// ============================================================================
// BMR CALCULATION TESTS - Mifflin-St Jeor Formula
// ============================================================================

#[test]
fn test_mifflin_st_jeor_male_typical() {
    let config = NutritionConfig::default();

    // 30-year-old male, 70kg, 170cm: 10*70 + 6.25*170 - 5*30 + 5 = 1667.5
    let bmr = calculate_mifflin_st_jeor(70.0, 170.0, 30, Gender::Male, &config.bmr);
    assert!((bmr - 1667.5).abs() < 1e-9);
}

#[test]
fn test_mifflin_st_jeor_female_typical() {
    let config = NutritionConfig::default();

    // 25-year-old female, 60kg, 165cm: 600 + 1031.25 - 125 - 161 = 1345.25
    let bmr = calculate_mifflin_st_jeor(60.0, 165.0, 25, Gender::Female, &config.bmr);
    assert!((bmr - 1345.25).abs() < 1e-9);
}

#[test]
fn test_mifflin_st_jeor_large_athlete() {
    let config = NutritionConfig::default();

    // 100kg, 195cm, age 25 male: 1000 + 1218.75 - 125 + 5 = 2098.75
    let bmr = calculate_mifflin_st_jeor(100.0, 195.0, 25, Gender::Male, &config.bmr);
    assert!((bmr - 2098.75).abs() < 1e-9);
}

#[test]
fn test_unspecified_gender_uses_male_formula() {
    // Any non-"female" label normalizes to Male and uses the +5 constant
    assert_eq!(Gender::parse("non-binary"), Gender::Male);
    assert_eq!(Gender::parse(""), Gender::Male);
    assert_eq!(Gender::parse("FEMALE"), Gender::Female);
}

// ============================================================================
// TDEE CALCULATION TESTS - Activity Level Multipliers
// ============================================================================

#[test]
fn test_tdee_all_activity_levels() {
    let config = NutritionConfig::default();
    let bmr = 1500.0;

    let expectations = [
        (ActivityLevel::Sedentary, 1800.0),
        (ActivityLevel::Light, 2062.5),
        (ActivityLevel::Moderate, 2325.0),
        (ActivityLevel::Active, 2587.5),
        (ActivityLevel::VeryActive, 2850.0),
    ];

    for (level, expected) in expectations {
        let tdee = calculate_tdee(bmr, level, &config);
        assert!(
            (tdee - expected).abs() < 1e-9,
            "TDEE for {level} should be {expected}, got {tdee}"
        );
    }
}

#[test]
fn test_unmatched_activity_label_defaults_to_sedentary() {
    assert_eq!(ActivityLevel::parse("weekend warrior"), ActivityLevel::Sedentary);
}

// ============================================================================
// FULL PIPELINE TESTS - Reference Vectors with Stage Rounding
// ============================================================================

#[test]
fn test_reference_maintenance_male_moderate() {
    let config = NutritionConfig::default();

    // BMR 1667.5 -> 1668; TDEE 1668 * 1.55 = 2585.4 -> 2585; maintenance unchanged
    let calories = calculate_daily_calories(
        &biometrics(70.0, 170.0, 30, Gender::Male),
        ActivityLevel::Moderate,
        Goal::Maintenance,
        &config,
    );
    assert_eq!(calories, 2585);
}

#[test]
fn test_reference_weight_loss_female_sedentary() {
    let config = NutritionConfig::default();

    // BMR 1345.25 -> 1345; TDEE 1345 * 1.2 = 1614; deficit 1614 * 0.8 = 1291.2 -> 1291
    let calories = calculate_daily_calories(
        &biometrics(60.0, 165.0, 25, Gender::Female),
        ActivityLevel::Sedentary,
        Goal::WeightLoss,
        &config,
    );
    assert_eq!(calories, 1291);
}

#[test]
fn test_surplus_goals_match() {
    let config = NutritionConfig::default();
    let bio = biometrics(70.0, 170.0, 30, Gender::Male);

    let muscle_gain =
        calculate_daily_calories(&bio, ActivityLevel::Moderate, Goal::MuscleGain, &config);
    let performance =
        calculate_daily_calories(&bio, ActivityLevel::Moderate, Goal::Performance, &config);

    // Both surplus goals apply the same 10% adjustment: 2585 * 1.1 = 2843.5 -> 2844
    assert_eq!(muscle_gain, 2844);
    assert_eq!(performance, 2844);
}

#[test]
fn test_neutral_goals_leave_tdee_unchanged() {
    let config = NutritionConfig::default();
    let bio = biometrics(70.0, 170.0, 30, Gender::Male);

    let maintenance =
        calculate_daily_calories(&bio, ActivityLevel::Moderate, Goal::Maintenance, &config);
    let health = calculate_daily_calories(&bio, ActivityLevel::Moderate, Goal::Health, &config);

    assert_eq!(maintenance, health);
}

// ============================================================================
// MACRO SPLIT TESTS
// ============================================================================

#[test]
fn test_macro_split_2000_reference() {
    let config = NutritionConfig::default();
    let targets = calculate_macro_targets(2000, &config.macro_split);

    // protein = round(2000*0.3/4) = 150; carbs = round(2000*0.45/4) = 225;
    // fat = round(2000*0.25/9) = 56
    assert_eq!(targets.daily_calories, 2000);
    assert_eq!(targets.protein_g, 150);
    assert_eq!(targets.carbs_g, 225);
    assert_eq!(targets.fat_g, 56);
}

#[test]
fn test_macro_caloric_identity_tolerance() {
    let config = NutritionConfig::default();

    for calories in (1200..=4000).step_by(137) {
        let t = calculate_macro_targets(calories, &config.macro_split);
        let reconstructed =
            i64::from(t.protein_g) * 4 + i64::from(t.carbs_g) * 4 + i64::from(t.fat_g) * 9;
        let drift = reconstructed - i64::from(calories);
        assert!(
            drift.abs() <= 12,
            "caloric identity drift {drift} too large at {calories}"
        );
    }
}

// ============================================================================
// TARGET RESOLUTION TESTS
// ============================================================================

#[test]
fn test_resolve_targets_prefers_client_calories() {
    let config = NutritionConfig::default();
    let request = PlanRequest::normalize(&PlanRequestPayload {
        daily_calories: Some(2200),
        ..PlanRequestPayload::default()
    });

    let targets = resolve_targets(&request, &config);
    assert_eq!(targets.daily_calories, 2200);
}

#[test]
fn test_resolve_targets_calculates_from_defaults() {
    let config = NutritionConfig::default();
    let request = PlanRequest::normalize(&PlanRequestPayload {
        goal: Some("maintenance".into()),
        ..PlanRequestPayload::default()
    });

    // Population defaults: 70kg/170cm/30y male moderate -> 2585 maintenance
    let targets = resolve_targets(&request, &config);
    assert_eq!(targets.daily_calories, 2585);
}

#[test]
fn test_calculator_is_total_over_normalized_inputs() {
    let config = NutritionConfig::default();

    // Absurd payloads normalize to defaults; the calculator never fails
    let request = PlanRequest::normalize(&PlanRequestPayload {
        weight: Some(-50.0),
        height: Some(9999.0),
        age: Some(0),
        gender: Some("robot".into()),
        activity_level: Some("hyperactive".into()),
        ..PlanRequestPayload::default()
    });

    let targets = resolve_targets(&request, &config);
    assert!(targets.daily_calories > 0);
    assert!(targets.protein_g > 0);
}
