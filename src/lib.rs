// ABOUTME: Main library entry point for the FitForge plan generation service
// ABOUTME: Provides REST API for AI-assisted workout and nutrition plan generation

#![deny(unsafe_code)]

//! # FitForge Server
//!
//! Backend service for a fitness-coaching product. Generates personalized
//! workout and nutrition plans by delegating to an external text-generation
//! service, with a deterministic rule-based fallback that guarantees every
//! request yields a structurally valid plan.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Models**: Request normalization and plan shapes with schema validation
//! - **Intelligence**: Deterministic calorie/macro calculations
//! - **LLM**: Provider abstraction over `OpenAI`-compatible endpoints
//! - **Plans**: Primary strategy, deterministic fallback, and the orchestrator
//! - **Database plugins**: Transactional plan persistence over SQLite
//! - **Routes**: Axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitforge_server::config::ServerConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! println!("FitForge server configured with port: HTTP={}", config.http_port);
//! # Ok(())
//! # }
//! ```

/// Configuration management and persistence
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Database abstraction layer with plugin support
pub mod database_plugins;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Deterministic calorie and macronutrient calculations
pub mod intelligence;

/// LLM provider abstraction for plan generation
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Common data models for plan requests and generated plans
pub mod models;

/// Plan generation engine: primary strategy, fallback, and orchestration
pub mod plans;

/// `HTTP` routes for plan generation and health checks
pub mod routes;

/// Server resource wiring and router assembly
pub mod server;
