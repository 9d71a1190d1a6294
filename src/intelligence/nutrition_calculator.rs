// ABOUTME: Calorie and macronutrient target calculation using Mifflin-St Jeor BMR
// ABOUTME: BMR -> TDEE -> goal-adjusted calories -> fixed-split macro targets, all deterministic

//! # Nutrition Calculator
//!
//! Computes daily calorie and macronutrient targets from normalized
//! biometrics:
//!
//! 1. **BMR** via Mifflin-St Jeor (male `10w + 6.25h - 5a + 5`, female
//!    `10w + 6.25h - 5a - 161`; non-binary inputs use the male constant).
//! 2. **TDEE** = BMR × activity multiplier.
//! 3. **Goal adjustment**: 20% deficit for weight loss, 10% surplus for
//!    muscle gain and performance goals, unchanged otherwise.
//! 4. **Macro targets** from the fixed 30/45/25 split and per-macro
//!    caloric densities.
//!
//! Rounding rule: round-half-away-from-zero (`f64::round`) applied at each
//! stage boundary (BMR, TDEE, goal-adjusted), so results match reference
//! outputs exactly. Macro grams round independently with no renormalization
//! pass; drift of a few kcal against the daily total is accepted.
//!
//! This function family never fails: inputs were defaulted during request
//! normalization, so every call returns a value.

use crate::config::nutrition::{BmrConfig, MacroSplitConfig, NutritionConfig};
use crate::models::{ActivityLevel, Biometrics, Gender, Goal, NutritionTargets, PlanRequest};

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Returns the unrounded BMR in kcal/day; callers round at the stage
/// boundary.
#[must_use]
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> f64 {
    let gender_constant = match gender {
        Gender::Male => config.male_constant,
        Gender::Female => config.female_constant,
    };
    config.weight_coef * weight_kg
        + config.height_coef * height_cm
        + config.age_coef * f64::from(age)
        + gender_constant
}

/// Scale a rounded BMR into Total Daily Energy Expenditure
///
/// Returns the unrounded TDEE; callers round at the stage boundary.
#[must_use]
pub fn calculate_tdee(bmr: f64, activity: ActivityLevel, config: &NutritionConfig) -> f64 {
    bmr * config.activity_factors.factor_for(activity)
}

/// Calculate the goal-adjusted daily calorie target
///
/// Rounds at each stage boundary: BMR, then TDEE, then the goal-adjusted
/// figure, matching the reference outputs deterministically.
#[must_use]
pub fn calculate_daily_calories(
    biometrics: &Biometrics,
    activity: ActivityLevel,
    goal: Goal,
    config: &NutritionConfig,
) -> u32 {
    let bmr = calculate_mifflin_st_jeor(
        biometrics.weight_kg,
        biometrics.height_cm,
        biometrics.age,
        biometrics.gender,
        &config.bmr,
    )
    .round();

    let tdee = calculate_tdee(bmr, activity, config).round();

    let adjusted = (tdee * config.goal_adjustments.factor_for(goal)).round();

    adjusted.max(0.0) as u32
}

/// Derive macronutrient gram targets from a daily calorie figure
///
/// Each gram figure rounds independently; the caloric identity
/// `protein*4 + carbs*4 + fat*9 ≈ calories` holds within rounding
/// tolerance only.
#[must_use]
pub fn calculate_macro_targets(daily_calories: u32, split: &MacroSplitConfig) -> NutritionTargets {
    let calories = f64::from(daily_calories);
    let protein_g = (calories * split.protein_share / split.protein_kcal_per_g).round() as u32;
    let carbs_g = (calories * split.carbs_share / split.carbs_kcal_per_g).round() as u32;
    let fat_g = (calories * split.fat_share / split.fat_kcal_per_g).round() as u32;

    NutritionTargets {
        daily_calories,
        protein_g,
        carbs_g,
        fat_g,
    }
}

/// Resolve the nutrition targets for a request
///
/// A client-supplied daily calorie figure wins; otherwise the calculator
/// runs on the normalized biometrics.
#[must_use]
pub fn resolve_targets(request: &PlanRequest, config: &NutritionConfig) -> NutritionTargets {
    let daily_calories = request.daily_calories.unwrap_or_else(|| {
        calculate_daily_calories(&request.biometrics, request.activity, request.goal, config)
    });
    calculate_macro_targets(daily_calories, &config.macro_split)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NutritionConfig {
        NutritionConfig::default()
    }

    fn biometrics(weight: f64, height: f64, age: u32, gender: Gender) -> Biometrics {
        Biometrics {
            weight_kg: weight,
            height_cm: height,
            age,
            gender,
        }
    }

    #[test]
    fn test_bmr_male_reference() {
        // 10*70 + 6.25*170 - 5*30 + 5 = 1667.5
        let bmr = calculate_mifflin_st_jeor(70.0, 170.0, 30, Gender::Male, &config().bmr);
        assert!((bmr - 1667.5).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_female_reference() {
        // 10*60 + 6.25*165 - 5*25 - 161 = 1345.25
        let bmr = calculate_mifflin_st_jeor(60.0, 165.0, 25, Gender::Female, &config().bmr);
        assert!((bmr - 1345.25).abs() < 1e-9);
    }

    #[test]
    fn test_maintenance_male_moderate() {
        // BMR 1667.5 -> 1668; TDEE 1668*1.55 = 2585.4 -> 2585; maintenance unchanged
        let calories = calculate_daily_calories(
            &biometrics(70.0, 170.0, 30, Gender::Male),
            ActivityLevel::Moderate,
            Goal::Maintenance,
            &config(),
        );
        assert_eq!(calories, 2585);
    }

    #[test]
    fn test_weight_loss_female_sedentary() {
        // BMR 1345.25 -> 1345; TDEE 1345*1.2 = 1614; deficit 1614*0.8 = 1291.2 -> 1291
        let calories = calculate_daily_calories(
            &biometrics(60.0, 165.0, 25, Gender::Female),
            ActivityLevel::Sedentary,
            Goal::WeightLoss,
            &config(),
        );
        assert_eq!(calories, 1291);
    }

    #[test]
    fn test_muscle_gain_surplus() {
        // BMR 1668; TDEE 2585; surplus 2585*1.1 = 2843.5 -> 2844
        let calories = calculate_daily_calories(
            &biometrics(70.0, 170.0, 30, Gender::Male),
            ActivityLevel::Moderate,
            Goal::MuscleGain,
            &config(),
        );
        assert_eq!(calories, 2844);
    }

    #[test]
    fn test_macro_split_reference() {
        let targets = calculate_macro_targets(2000, &config().macro_split);
        assert_eq!(targets.protein_g, 150);
        assert_eq!(targets.carbs_g, 225);
        assert_eq!(targets.fat_g, 56);
    }

    #[test]
    fn test_macro_caloric_identity_within_tolerance() {
        for calories in [1291, 1800, 2000, 2585, 3200] {
            let t = calculate_macro_targets(calories, &config().macro_split);
            let reconstructed = t.protein_g * 4 + t.carbs_g * 4 + t.fat_g * 9;
            let diff = i64::from(reconstructed) - i64::from(calories);
            assert!(
                diff.abs() <= 12,
                "identity drift too large for {calories}: {diff}"
            );
        }
    }

    #[test]
    fn test_client_supplied_calories_win() {
        let request = PlanRequest {
            daily_calories: Some(2000),
            ..PlanRequest::default()
        };
        let targets = resolve_targets(&request, &config());
        assert_eq!(targets.daily_calories, 2000);
        assert_eq!(targets.protein_g, 150);
    }

    #[test]
    fn test_calculated_when_absent() {
        let request = PlanRequest::default();
        // Defaults: 70kg/170cm/30y male, moderate activity, performance goal
        // BMR 1668; TDEE 2585; surplus 2585*1.1 = 2843.5 -> 2844
        let targets = resolve_targets(&request, &config());
        assert_eq!(targets.daily_calories, 2844);
    }
}
