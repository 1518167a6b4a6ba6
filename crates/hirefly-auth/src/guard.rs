//! The guard decision state machine.
//!
//! Terminal states are allow (`Ok`) and deny (`Err` with a reason). The
//! decision involves at most one store read (on a role-permission cache
//! miss) and is otherwise pure computation; it performs no writes.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use hirefly_core::{Ability, AbilityBuilder, ResourceAttributes};
use hirefly_types::{Action, Actor, SubjectType};

use crate::error::AuthzError;
use crate::policy::{EndpointPolicy, RequestContext, Requirement};

/// Request-time authorization enforcement.
pub struct Guard {
    builder: Arc<AbilityBuilder>,
    legacy_fallback: bool,
}

impl Guard {
    pub fn new(builder: Arc<AbilityBuilder>) -> Self {
        Self {
            builder,
            legacy_fallback: true,
        }
    }

    /// Control the legacy exact-path fallback for endpoints without
    /// declared requirements. Disabled, such endpoints deny authenticated
    /// actors outright.
    pub fn with_legacy_fallback(mut self, enabled: bool) -> Self {
        self.legacy_fallback = enabled;
        self
    }

    /// Decide whether this request may proceed.
    ///
    /// In order: the skip flag allows; an absent actor is allowed when the
    /// endpoint declares nothing and otherwise measured against the guest
    /// ability; the super-admin role allows unconditionally; endpoints
    /// without declared requirements fall back to the legacy exact
    /// (method, path) match over the actor's attached permissions; declared
    /// requirements are checked in declaration order against the actor's
    /// ability, short-circuiting on the first failure.
    #[instrument(skip_all, fields(method = %request.method, route = %request.route_template))]
    pub async fn authorize(
        &self,
        policy: &EndpointPolicy,
        actor: Option<&Actor>,
        request: &RequestContext,
    ) -> Result<(), AuthzError> {
        if policy.skip_permission_check {
            debug!("permission check skipped by endpoint policy");
            return Ok(());
        }

        let Some(actor) = actor else {
            if policy.required.is_empty() {
                return Ok(());
            }
            let guest = self.builder.for_guest();
            for requirement in &policy.required {
                if !guest.can(requirement.action, requirement.subject) {
                    warn!(
                        action = %requirement.action,
                        subject = %requirement.subject,
                        "anonymous request denied"
                    );
                    return Err(AuthzError::Unauthenticated);
                }
            }
            return Ok(());
        };

        if actor.is_super_admin() {
            return Ok(());
        }

        if policy.required.is_empty() {
            if !self.legacy_fallback {
                return Err(AuthzError::Forbidden(format!(
                    "You don't have permission to access endpoint: {} {}",
                    request.method, request.route_template
                )));
            }
            return legacy_permission_check(actor, request);
        }

        let ability = self
            .builder
            .for_actor(actor)
            .await
            .map_err(|err| AuthzError::PermissionResolution(err.to_string()))?;

        check_requirements(&ability, &policy.required)
    }

    /// Instance-level decision for call sites that have loaded the target
    /// resource (field constraints are evaluated, not just rule coverage).
    pub async fn authorize_resource(
        &self,
        actor: &Actor,
        action: Action,
        subject: SubjectType,
        target: &ResourceAttributes,
    ) -> Result<(), AuthzError> {
        if actor.is_super_admin() {
            return Ok(());
        }

        let ability = self
            .builder
            .for_actor(actor)
            .await
            .map_err(|err| AuthzError::PermissionResolution(err.to_string()))?;

        if ability.can_on(action, subject, target) {
            Ok(())
        } else {
            Err(AuthzError::Forbidden(forbidden_reason(action, subject)))
        }
    }
}

/// Check declared requirements in order, short-circuiting on the first
/// failure so deny reasons are deterministic and reproducible.
fn check_requirements(ability: &Ability, required: &[Requirement]) -> Result<(), AuthzError> {
    for requirement in required {
        if !ability.can(requirement.action, requirement.subject) {
            return Err(AuthzError::Forbidden(forbidden_reason(
                requirement.action,
                requirement.subject,
            )));
        }
    }
    Ok(())
}

fn forbidden_reason(action: Action, subject: SubjectType) -> String {
    format!("You don't have permission to {} {}", action, subject)
}

/// Legacy check for endpoints without declared requirements: an exact
/// (method, apiPath) match against the actor's attached permission list.
///
/// Exact string equality on the route template, by design: this mode and
/// the ability-based mode are independent and can disagree on routes whose
/// registered template differs from the stored apiPath pattern.
fn legacy_permission_check(actor: &Actor, request: &RequestContext) -> Result<(), AuthzError> {
    let matched = actor
        .permissions
        .iter()
        .any(|p| p.method == request.method && p.api_path == request.route_template);

    if matched {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(format!(
            "You don't have permission to access endpoint: {} {}",
            request.method, request.route_template
        )))
    }
}
