// ABOUTME: Nutrition configuration for calorie targets and macro distribution
// ABOUTME: Configures BMR calculation, TDEE activity factors, goal adjustments, and meal splits

//! Nutrition Calculation Configuration
//!
//! Provides configuration for daily calorie and macronutrient target
//! calculation: BMR coefficients, activity factors, goal adjustments,
//! the fixed macro split, and the per-meal calorie distribution used by
//! the deterministic plan templates.
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010). Exercise Physiology

use crate::models::{ActivityLevel, Goal};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Nutrition calculation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Basal Metabolic Rate (BMR) calculation settings
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Goal-based calorie adjustments
    pub goal_adjustments: GoalAdjustmentsConfig,
    /// Fixed macronutrient split
    pub macro_split: MacroSplitConfig,
    /// Per-meal calorie distribution for template plans
    pub meal_proportions: MealProportionsConfig,
}

impl NutritionConfig {
    /// Validate all sub-configurations
    ///
    /// # Errors
    ///
    /// Returns an error if the macro split or meal proportions are inconsistent.
    pub fn validate(&self) -> Result<()> {
        self.macro_split.validate()?;
        self.meal_proportions.validate()?;
        Ok(())
    }
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for
/// resting energy expenditure. American Journal of Clinical Nutrition,
/// 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            weight_coef: 10.0,
            height_coef: 6.25,
            age_coef: -5.0,
            male_constant: 5.0,
            female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderately_active: f64,
    /// Active (6-7 days/week): 1.725
    pub active: f64,
    /// Very active (hard training 2x/day): 1.9
    pub very_active: f64,
}

impl ActivityFactorsConfig {
    /// Get the multiplier for an activity level
    #[must_use]
    pub const fn factor_for(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.lightly_active,
            ActivityLevel::Moderate => self.moderately_active,
            ActivityLevel::Active => self.active,
            ActivityLevel::VeryActive => self.very_active,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

/// Goal-based calorie adjustments applied after TDEE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalAdjustmentsConfig {
    /// Caloric deficit factor for weight loss (0.8 = 20% deficit)
    pub deficit_factor: f64,
    /// Caloric surplus factor for muscle gain and performance (1.1 = 10% surplus)
    pub surplus_factor: f64,
}

impl GoalAdjustmentsConfig {
    /// Get the adjustment factor for a goal
    ///
    /// Maintenance and general-health goals leave TDEE unchanged.
    #[must_use]
    pub const fn factor_for(&self, goal: Goal) -> f64 {
        match goal {
            Goal::WeightLoss => self.deficit_factor,
            Goal::MuscleGain | Goal::Performance => self.surplus_factor,
            Goal::Maintenance | Goal::Health => 1.0,
        }
    }
}

impl Default for GoalAdjustmentsConfig {
    fn default() -> Self {
        Self {
            deficit_factor: 0.8,
            surplus_factor: 1.1,
        }
    }
}

/// Fixed macronutrient split and caloric densities
///
/// Daily calories are allocated 30% protein / 45% carbs / 25% fat; grams
/// derive from the caloric density of each macro (protein and carbs
/// 4 kcal/g, fat 9 kcal/g). Each gram figure is rounded independently;
/// small rounding drift against the calorie total is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSplitConfig {
    /// Protein share of daily calories (0.0-1.0)
    pub protein_share: f64,
    /// Carbohydrate share of daily calories (0.0-1.0)
    pub carbs_share: f64,
    /// Fat share of daily calories (0.0-1.0)
    pub fat_share: f64,
    /// Protein caloric density (kcal per gram)
    pub protein_kcal_per_g: f64,
    /// Carbohydrate caloric density (kcal per gram)
    pub carbs_kcal_per_g: f64,
    /// Fat caloric density (kcal per gram)
    pub fat_kcal_per_g: f64,
}

impl MacroSplitConfig {
    /// Validate that the shares sum to 1.0
    ///
    /// # Errors
    ///
    /// Returns an error if the three shares do not sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        let sum = self.protein_share + self.carbs_share + self.fat_share;
        if (sum - 1.0).abs() > f64::EPSILON * 4.0 {
            bail!("macro shares must sum to 1.0, got {sum}");
        }
        Ok(())
    }
}

impl Default for MacroSplitConfig {
    fn default() -> Self {
        Self {
            protein_share: 0.30,
            carbs_share: 0.45,
            fat_share: 0.25,
            protein_kcal_per_g: 4.0,
            carbs_kcal_per_g: 4.0,
            fat_kcal_per_g: 9.0,
        }
    }
}

/// Per-meal share of daily calories and macros in template nutrition plans
///
/// The same share is applied independently to calories, protein, carbs,
/// and fat for each of the four fixed meals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealProportionsConfig {
    /// Breakfast share (0.25)
    pub breakfast: f64,
    /// Lunch share (0.35)
    pub lunch: f64,
    /// Snack share (0.10)
    pub snack: f64,
    /// Dinner share (0.30)
    pub dinner: f64,
}

impl MealProportionsConfig {
    /// Validate that the four shares sum to 1.0
    ///
    /// # Errors
    ///
    /// Returns an error if the shares do not sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        let sum = self.breakfast + self.lunch + self.snack + self.dinner;
        if (sum - 1.0).abs() > f64::EPSILON * 4.0 {
            bail!("meal proportions must sum to 1.0, got {sum}");
        }
        Ok(())
    }
}

impl Default for MealProportionsConfig {
    fn default() -> Self {
        Self {
            breakfast: 0.25,
            lunch: 0.35,
            snack: 0.10,
            dinner: 0.30,
        }
    }
}
