//! Per-endpoint policy metadata.
//!
//! The route layer attaches an [`EndpointPolicy`] to each handler (falling
//! back to its containing group); the guard consults it read-only.

use hirefly_types::{Action, SubjectType};

/// One declared requirement: the caller must hold a rule satisfying this
/// action on this subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub action: Action,
    pub subject: SubjectType,
    /// Optional field path, carried verbatim into deny reasons. No rule in
    /// this model is field-scoped, so the field never changes the decision;
    /// the two authorization modes are kept independently testable rather
    /// than reconciled.
    pub field: Option<String>,
}

impl Requirement {
    pub fn new(action: Action, subject: SubjectType) -> Self {
        Self {
            action,
            subject,
            field: None,
        }
    }

    pub fn with_field(action: Action, subject: SubjectType, field: impl Into<String>) -> Self {
        Self {
            action,
            subject,
            field: Some(field.into()),
        }
    }
}

/// Authorization metadata for one endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointPolicy {
    /// Skip the permission check entirely (public endpoint).
    pub skip_permission_check: bool,
    /// Required (action, subject) pairs, checked in declaration order with
    /// short-circuit on first failure. Empty means: anonymous access for
    /// guests, legacy exact-path matching for authenticated actors.
    pub required: Vec<Requirement>,
}

impl EndpointPolicy {
    /// A policy that bypasses the guard.
    pub fn skip() -> Self {
        Self {
            skip_permission_check: true,
            required: Vec::new(),
        }
    }

    /// A policy with declared requirements.
    pub fn require(required: Vec<Requirement>) -> Self {
        Self {
            skip_permission_check: false,
            required,
        }
    }
}

/// What the guard needs to know about the request itself: the HTTP method
/// and the matched route template (not the concrete path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: String,
    pub route_template: String,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, route_template: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            route_template: route_template.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_open() {
        let policy = EndpointPolicy::default();
        assert!(!policy.skip_permission_check);
        assert!(policy.required.is_empty());
    }

    #[test]
    fn test_requirement_constructors() {
        let req = Requirement::new(Action::Read, SubjectType::Job);
        assert_eq!(req.field, None);

        let req = Requirement::with_field(Action::Update, SubjectType::User, "company._id");
        assert_eq!(req.field.as_deref(), Some("company._id"));
    }
}
