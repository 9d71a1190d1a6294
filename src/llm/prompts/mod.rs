// ABOUTME: System prompts for plan generation loaded at compile time
// ABOUTME: Provides the trainer and nutritionist system prompts with strict JSON output contracts

//! # System Prompts
//!
//! This module provides the system prompts for plan generation.
//! Prompts are loaded at compile time from markdown files for easy
//! maintenance; each embeds the strict JSON output schema the response
//! parser expects.

/// Workout plan generation system prompt
///
/// Instructs the model to act as a professional trainer and to return
/// only JSON matching the workout plan schema.
pub const WORKOUT_SYSTEM_PROMPT: &str = include_str!("workout_system.md");

/// Nutrition plan generation system prompt
///
/// Instructs the model to act as a nutritionist and to return only a
/// JSON array of days matching the nutrition plan schema.
pub const NUTRITION_SYSTEM_PROMPT: &str = include_str!("nutrition_system.md");

/// Get the workout generation system prompt
#[must_use]
pub const fn workout_system_prompt() -> &'static str {
    WORKOUT_SYSTEM_PROMPT
}

/// Get the nutrition generation system prompt
#[must_use]
pub const fn nutrition_system_prompt() -> &'static str {
    NUTRITION_SYSTEM_PROMPT
}
