// ABOUTME: System-wide constants and configuration values for the FitForge API
// ABOUTME: Contains request defaults, plausibility limits, and environment-based configuration

//! # Constants Module
//!
//! Application constants and environment-based configuration values.
//! This module provides both hardcoded constants and environment variable configuration.

/// Service identity constants
pub mod service {
    /// Service name used in logs and health responses
    pub const SERVICE_NAME: &str = "fitforge-server";

    /// Server version from Cargo.toml
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Default values substituted for absent request fields
///
/// Population-average defaults are a deliberate design decision: plan
/// generation must always succeed, so missing biometrics are replaced
/// rather than rejected.
pub mod defaults {
    /// Default body weight in kilograms
    pub const WEIGHT_KG: f64 = 70.0;

    /// Default height in centimeters
    pub const HEIGHT_CM: f64 = 170.0;

    /// Default age in years
    pub const AGE_YEARS: u32 = 30;

    /// Default workout environment preference
    pub const WORKOUT_ENVIRONMENT: &str = "home";

    /// Default workout session duration preference (minutes range label)
    pub const WORKOUT_DURATION: &str = "30-45";

    /// Default nutrition plan horizon in days
    pub const NUTRITION_PLAN_DAYS: u32 = 7;

    /// Workout plans always span this many weeks
    pub const WORKOUT_PLAN_WEEKS: u32 = 4;
}

/// Plausibility limits for user-supplied biometrics
///
/// Values outside these ranges are replaced by the population-average
/// defaults rather than rejected (silent clamping policy).
pub mod limits {
    /// Minimum plausible body weight (kg)
    pub const MIN_WEIGHT_KG: f64 = 30.0;
    /// Maximum plausible body weight (kg)
    pub const MAX_WEIGHT_KG: f64 = 300.0;

    /// Minimum plausible height (cm)
    pub const MIN_HEIGHT_CM: f64 = 120.0;
    /// Maximum plausible height (cm)
    pub const MAX_HEIGHT_CM: f64 = 250.0;

    /// Minimum plausible age (years)
    pub const MIN_AGE_YEARS: u32 = 13;
    /// Maximum plausible age (years)
    pub const MAX_AGE_YEARS: u32 = 100;

    /// Maximum nutrition plan horizon in days
    pub const MAX_NUTRITION_PLAN_DAYS: u32 = 31;
}

/// Environment-based configuration
pub mod env_config {
    use std::env;

    /// Default HTTP API port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;

    /// Default LLM request timeout in seconds
    pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 20;

    /// Get HTTP server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .unwrap_or_else(|_| DEFAULT_HTTP_PORT.to_string())
            .parse()
            .unwrap_or(DEFAULT_HTTP_PORT)
    }

    /// Get database URL from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./data/fitforge.db".into())
    }

    /// Get LLM endpoint base URL from environment or default
    #[must_use]
    pub fn llm_base_url() -> String {
        env::var("FITFORGE_LLM_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into())
    }

    /// Get LLM model name from environment or default
    #[must_use]
    pub fn llm_model() -> String {
        env::var("FITFORGE_LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into())
    }

    /// Get LLM API key from environment (optional, absent for local servers)
    #[must_use]
    pub fn llm_api_key() -> Option<String> {
        env::var("FITFORGE_LLM_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
    }

    /// Get LLM request timeout in seconds from environment or default
    #[must_use]
    pub fn llm_timeout_secs() -> u64 {
        env::var("FITFORGE_LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_LLM_TIMEOUT_SECS.to_string())
            .parse()
            .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS)
    }
}

/// HTTP header names used at the service boundary
pub mod headers {
    /// Header carrying the authenticated user id, injected by the upstream
    /// auth gateway. This service trusts it; auth mechanics are out of scope.
    pub const USER_ID_HEADER: &str = "x-user-id";

    /// Request ID header name for tracing correlation
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}
