//! # Hirefly Core - Ability Construction
//!
//! Converts an actor's role, permission set and company/ownership context
//! into a set of allow-rules, and provides the pure ownership predicates
//! that business-logic call sites evaluate against loaded resources.

/// The materialized allow-rule set and its evaluation.
pub mod ability;
/// The ability builder: actor context in, rules out.
pub mod builder;
/// Pure ownership and status-gate predicates.
pub mod checks;
/// Cache/store wiring for role permission resolution.
pub mod resolver;
/// Route template matching helpers.
pub mod route;

pub use ability::{Ability, FieldConstraint, ResourceAttributes, Rule};
pub use builder::AbilityBuilder;
pub use resolver::{PermissionResolver, ResolveError};
pub use route::{has_id_segment, template_matches};
