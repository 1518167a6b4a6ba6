//! The ability builder: one actor in, one immutable rule set out.
//!
//! Rules are derived dynamically from the role's stored permission records
//! (the DB-driven source of truth), not from a static per-role table. Each
//! permission maps its HTTP method to an action and its module tag to a
//! subject type; unmapped methods or modules are skipped, never rejected.

use std::sync::Arc;

use tracing::{debug, instrument};

use hirefly_cache::RolePermissionCache;
use hirefly_const::{HR_ROLE, USER_ROLE};
use hirefly_store::RoleStore;
use hirefly_types::{Action, Actor, Permission, SubjectType};

use crate::ability::{Ability, FieldConstraint, Rule};
use crate::resolver::{PermissionResolver, ResolveError};
use crate::route::has_id_segment;

/// Builds actor-specific abilities, reading the role-permission cache and
/// falling back to the authoritative role store.
pub struct AbilityBuilder {
    resolver: PermissionResolver,
}

impl AbilityBuilder {
    pub fn new(store: Arc<dyn RoleStore>, cache: Arc<RolePermissionCache>) -> Self {
        Self {
            resolver: PermissionResolver::new(store, cache),
        }
    }

    /// The cache/store wiring, exposed so role-mutating services can
    /// invalidate through the same component that reads.
    pub fn resolver(&self) -> &PermissionResolver {
        &self.resolver
    }

    /// Build the ability for an authenticated actor.
    ///
    /// Never fails for a legitimately-authenticated actor: an unknown role
    /// resolves to a deny-all ability. Only a store fault during permission
    /// resolution surfaces as an error, which callers treat as a deny.
    #[instrument(skip(self, actor), fields(actor = %actor.id, role = %actor.role.name))]
    pub async fn for_actor(&self, actor: &Actor) -> Result<Ability, ResolveError> {
        if actor.is_super_admin() {
            return Ok(Ability::super_admin());
        }

        // Permissions attached at authentication time win; otherwise go
        // through the cache/store path.
        let permissions = if actor.permissions.is_empty() {
            self.resolver.resolve(&actor.role).await?
        } else {
            actor.permissions.clone()
        };

        let mut rules = Vec::with_capacity(permissions.len());
        for permission in &permissions {
            let Some(action) = Action::from_method(&permission.method) else {
                continue;
            };
            let Some(subject) = SubjectType::from_module(&permission.module) else {
                continue;
            };

            rules.push(Rule {
                action,
                subject,
                constraint: ownership_narrowing(actor, subject, permission),
            });
        }

        debug!(rules = rules.len(), "ability built");
        Ok(Ability::new(rules))
    }

    /// The fixed, role-independent ability for anonymous callers: public
    /// reads plus subscribe/unsubscribe.
    pub fn for_guest(&self) -> Ability {
        Ability::new(vec![
            Rule::new(Action::Read, SubjectType::Company),
            Rule::new(Action::Read, SubjectType::Job),
            Rule::new(Action::Create, SubjectType::Subscriber),
            Rule::new(Action::Delete, SubjectType::Subscriber),
        ])
    }
}

/// The subject-specific ownership narrowing table.
///
/// Keyed on the raw HTTP method (PATCH narrows where PUT does not), it
/// restricts an otherwise-broad rule to the actor's own records or own
/// company. Combinations outside the table stay unconstrained; resume
/// updates in particular stay broad here because the status gate is
/// enforced by the checkers at the call site.
fn ownership_narrowing(
    actor: &Actor,
    subject: SubjectType,
    permission: &Permission,
) -> Option<FieldConstraint> {
    let method = permission.method.as_str();

    match subject {
        SubjectType::User if matches!(method, "PATCH" | "DELETE") => {
            if actor.role.name == USER_ROLE {
                Some(FieldConstraint::OwnerEquals(actor.id.clone()))
            } else {
                hr_company_constraint(actor)
            }
        }
        SubjectType::Job if matches!(method, "POST" | "PATCH" | "DELETE") => {
            hr_company_constraint(actor)
        }
        SubjectType::Company if matches!(method, "PATCH" | "DELETE") => {
            // Matched against the company record's own id.
            hr_company_constraint(actor)
        }
        SubjectType::File
            if method == "DELETE" || (method == "GET" && has_id_segment(&permission.api_path)) =>
        {
            if actor.role.name == USER_ROLE {
                Some(FieldConstraint::OwnerEquals(actor.id.clone()))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn hr_company_constraint(actor: &Actor) -> Option<FieldConstraint> {
    if actor.role.name != HR_ROLE {
        return None;
    }
    actor
        .company
        .as_ref()
        .map(|company| FieldConstraint::CompanyEquals(company.id.clone()))
}
