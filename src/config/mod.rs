// ABOUTME: Configuration management for the FitForge server
// ABOUTME: Environment-based server configuration plus nutrition calculation settings

//! Configuration management and persistence
//!
//! All deployment-specific settings come from environment variables
//! (`ServerConfig::from_env`). Scientific constants for the calorie and
//! macro calculations live in [`nutrition`] with documented defaults.

pub mod environment;
pub mod nutrition;

pub use environment::{DatabaseConfig, DatabaseUrl, LlmConfig, LogLevel, ServerConfig};
pub use nutrition::{
    ActivityFactorsConfig, BmrConfig, GoalAdjustmentsConfig, MacroSplitConfig,
    MealProportionsConfig, NutritionConfig,
};
