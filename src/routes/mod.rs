// ABOUTME: HTTP route handlers for the FitForge API
// ABOUTME: Plan generation/listing routes plus health endpoints, with gateway-trust auth

//! HTTP routes
//!
//! Authentication mechanics are an upstream collaborator concern: the
//! gateway authenticates users and injects a trusted `x-user-id` header.
//! Handlers here only parse it; a missing or malformed header is treated
//! as an unauthenticated request.

pub mod health;
pub mod plans;

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::constants::headers::USER_ID_HEADER;
use crate::errors::AppError;

/// Extract the authenticated user id injected by the upstream gateway
///
/// # Errors
///
/// Returns an auth error when the header is absent or not a valid UUID.
pub fn require_user_id(headers: &HeaderMap) -> Result<Uuid, AppError> {
    let value = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    Uuid::parse_str(value)
        .map_err(|_| AppError::auth_invalid(format!("invalid {USER_ID_HEADER} header")))
}
