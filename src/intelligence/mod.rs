// ABOUTME: Deterministic fitness intelligence: calorie and macronutrient calculations
// ABOUTME: Pure functions over normalized biometrics, configured via config::nutrition

//! Deterministic calculation layer
//!
//! Pure, closed-form computations shared by both generation strategies.
//! Everything here is synchronous, total, and free of I/O.

pub mod nutrition_calculator;

pub use nutrition_calculator::{
    calculate_daily_calories, calculate_macro_targets, calculate_mifflin_st_jeor, calculate_tdee,
    resolve_targets,
};
