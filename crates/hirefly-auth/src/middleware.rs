//! Axum middleware adapting the guard to a request pipeline.
//!
//! The route layer is expected to have attached, by the time this runs:
//! - an [`Actor`] extension (authentication, absent for anonymous calls)
//! - an [`EndpointPolicy`] extension (absent means: no declared
//!   requirements, no skip)
//!
//! The matched route template is taken from [`MatchedPath`], falling back
//! to the raw URI path for requests outside a router.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use hirefly_types::Actor;

use crate::guard::Guard;
use crate::policy::{EndpointPolicy, RequestContext};

/// Authorize the request against its endpoint policy, then continue.
///
/// Deny decisions are rendered as 401/403 responses with the guard's
/// human-readable reason; the request never reaches business logic.
pub async fn authorization_middleware(
    State(guard): State<Arc<Guard>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let policy = request
        .extensions()
        .get::<EndpointPolicy>()
        .cloned()
        .unwrap_or_default();
    let actor = request.extensions().get::<Actor>().cloned();

    let route_template = request
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let context = RequestContext::new(request.method().as_str(), route_template);

    guard
        .authorize(&policy, actor.as_ref(), &context)
        .await
        .map_err(|err| err.into_response())?;

    Ok(next.run(request).await)
}
