// ABOUTME: Plan generation engine: primary LLM strategy, deterministic fallback, orchestration
// ABOUTME: The orchestrator guarantees a schema-valid plan for every normalized request

//! # Plan Generation Engine
//!
//! Two cooperating strategies produce workout and nutrition plans:
//!
//! - **Primary** ([`generator`]): prompts an external text-generation
//!   service and parses/validates its JSON output.
//! - **Fallback** ([`fallback`]): deterministically synthesizes a
//!   structurally valid plan from fixed templates.
//!
//! The [`orchestrator`] isolates the unreliable remote dependency behind
//! the guaranteed-successful local computation: any qualifying primary
//! failure — transport error, bad HTTP status, missing or malformed JSON,
//! schema violation — falls through to the fallback, and the result is
//! tagged with `fallback_reason` so clients can disclose degraded quality.
//! No failure of the primary strategy ever reaches a caller.

pub mod extract;
pub mod fallback;
pub mod generator;
pub mod orchestrator;

pub use extract::extract_json_block;
pub use fallback::{fallback_nutrition_plan, fallback_workout_plan};
pub use generator::GenerationParams;
pub use orchestrator::PlanEngine;
