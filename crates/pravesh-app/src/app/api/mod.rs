mod auth;
mod healthcheck;
mod records;

use salvo::Router;
use serde::Serialize;

use pravesh_core::form::validate::Violations;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Field-level violations payload, keyed by wire field name
#[derive(Debug, Serialize)]
pub struct ViolationsResponse {
    pub errors: Violations,
}

/// ## Summary
/// Constructs the main router with all endpoint handlers.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(healthcheck::routes())
        .push(records::routes())
        .push(auth::routes())
}
