//! Axum extractors for the request actor.
//!
//! The authentication layer inserts an [`Actor`] into request extensions
//! before authorization runs; these extractors read it back in handlers:
//!
//! - [`RequireActor`]: requires an actor, returns 401 if absent
//! - [`OptionalActor`]: returns `None` if absent, never fails

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use hirefly_types::Actor;

/// Extractor that requires an authenticated actor.
#[derive(Debug, Clone)]
pub struct RequireActor(pub Actor);

impl<S> FromRequestParts<S> for RequireActor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .cloned()
            .map(RequireActor)
            .ok_or_else(|| (StatusCode::UNAUTHORIZED, "User not authenticated").into_response())
    }
}

/// Extractor for an optional actor.
///
/// Useful for endpoints that serve both anonymous and authenticated
/// callers (public job listings, subscribe/unsubscribe).
#[derive(Debug, Clone)]
pub struct OptionalActor(pub Option<Actor>);

impl<S> FromRequestParts<S> for OptionalActor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts.extensions.get::<Actor>().cloned();
        Ok(OptionalActor(actor))
    }
}
