//! Authorization errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Why a request was not allowed.
///
/// Every internal deny condition surfaces as one of these with a
/// human-readable reason; cache or store faults never escape as an opaque
/// server error.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// No actor is attached to the request and the endpoint requires one.
    /// Distinct from [`Forbidden`]: the caller lacks identity at all.
    ///
    /// [`Forbidden`]: AuthzError::Forbidden
    #[error("User not authenticated")]
    Unauthenticated,

    /// The actor is present but no rule satisfies the request. The reason
    /// names the specific action/subject (or method/route, for the legacy
    /// path) that failed, and nothing about anyone else's access.
    #[error("{0}")]
    Forbidden(String),

    /// The actor's permissions could not be established because of a store
    /// fault. Fail-closed: treated as a deny, not an allow.
    #[error("Could not establish permissions: {0}")]
    PermissionResolution(String),
}

impl IntoResponse for AuthzError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthzError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthzError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthzError::PermissionResolution(_) => StatusCode::FORBIDDEN,
        };
        (status, self.to_string()).into_response()
    }
}
