//! The ability model: an immutable list of tagged allow-rules.
//!
//! There are no deny rules: `can` is true iff any rule matches the queried
//! action and subject (and, for instance-level checks, the rule's field
//! constraint holds against the target). Rule order never affects the
//! outcome.

use hirefly_types::{Action, SubjectType};

use crate::checks::ids_equal;

/// Field-level attributes of a loaded target resource.
///
/// Call sites populate this from the resource they fetched: a user record's
/// owner is itself, a company record's company is itself, a job's company is
/// its `company._id`, a resume's or file's owner is its `userId`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceAttributes {
    pub owner_id: Option<String>,
    pub company_id: Option<String>,
}

impl ResourceAttributes {
    pub fn owned_by(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
            company_id: None,
        }
    }

    pub fn of_company(company_id: impl Into<String>) -> Self {
        Self {
            owner_id: None,
            company_id: Some(company_id.into()),
        }
    }

    pub fn with_company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }
}

/// Equality predicate over one field of the target resource.
///
/// A closed set of two shapes is all this model ever needs; a generic
/// path-based matcher would add surface without callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldConstraint {
    /// The resource's owning user id equals the value.
    OwnerEquals(String),
    /// The resource's owning company id equals the value.
    CompanyEquals(String),
}

impl FieldConstraint {
    /// Evaluate against a loaded resource. Absent target fields never match.
    pub fn matches(&self, target: &ResourceAttributes) -> bool {
        match self {
            FieldConstraint::OwnerEquals(value) => target
                .owner_id
                .as_deref()
                .is_some_and(|owner| ids_equal(owner, value)),
            FieldConstraint::CompanyEquals(value) => target
                .company_id
                .as_deref()
                .is_some_and(|company| ids_equal(company, value)),
        }
    }
}

/// One allow-rule: action on subject, optionally narrowed to a field match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub action: Action,
    pub subject: SubjectType,
    pub constraint: Option<FieldConstraint>,
}

impl Rule {
    pub fn new(action: Action, subject: SubjectType) -> Self {
        Self {
            action,
            subject,
            constraint: None,
        }
    }

    pub fn constrained(action: Action, subject: SubjectType, constraint: FieldConstraint) -> Self {
        Self {
            action,
            subject,
            constraint: Some(constraint),
        }
    }

    /// Whether this rule covers the queried action and subject, ignoring
    /// any field constraint.
    fn applies_to(&self, action: Action, subject: SubjectType) -> bool {
        let action_ok = self.action == Action::Manage || self.action == action;
        let subject_ok = self.subject == SubjectType::All || self.subject == subject;
        action_ok && subject_ok
    }
}

/// The materialized allow-rule set for one actor.
///
/// Valid for the lifetime of one authorization decision (or one cached
/// window); derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ability {
    rules: Vec<Rule>,
}

impl Ability {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The single manage/all rule set carried by the super-admin role.
    pub fn super_admin() -> Self {
        Self {
            rules: vec![Rule::new(Action::Manage, SubjectType::All)],
        }
    }

    /// The empty rule set: denies every query. The terminal state for
    /// unknown roles, not an error.
    pub fn deny_all() -> Self {
        Self { rules: Vec::new() }
    }

    /// Type-level check: is there any rule covering this action/subject?
    ///
    /// Constrained rules satisfy the type-level check; the constraint is
    /// only decidable once a target instance is loaded (see [`can_on`]).
    ///
    /// [`can_on`]: Ability::can_on
    pub fn can(&self, action: Action, subject: SubjectType) -> bool {
        self.rules.iter().any(|r| r.applies_to(action, subject))
    }

    /// Instance-level check against a loaded target resource.
    pub fn can_on(
        &self,
        action: Action,
        subject: SubjectType,
        target: &ResourceAttributes,
    ) -> bool {
        self.rules.iter().any(|r| {
            r.applies_to(action, subject)
                && r.constraint
                    .as_ref()
                    .map_or(true, |c| c.matches(target))
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_deny_all(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manage_all_matches_everything() {
        let ability = Ability::super_admin();

        for action in [
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
            Action::Manage,
        ] {
            for subject in [
                SubjectType::User,
                SubjectType::Company,
                SubjectType::Job,
                SubjectType::Resume,
                SubjectType::File,
                SubjectType::Subscriber,
                SubjectType::Role,
                SubjectType::Permission,
            ] {
                assert!(ability.can(action, subject));
                assert!(ability.can_on(action, subject, &ResourceAttributes::default()));
            }
        }
    }

    #[test]
    fn test_deny_all_denies_everything() {
        let ability = Ability::deny_all();
        assert!(ability.is_deny_all());
        assert!(!ability.can(Action::Read, SubjectType::Job));
        assert!(!ability.can_on(
            Action::Read,
            SubjectType::Job,
            &ResourceAttributes::default()
        ));
    }

    #[test]
    fn test_constrained_rule_passes_type_level_check() {
        let ability = Ability::new(vec![Rule::constrained(
            Action::Update,
            SubjectType::User,
            FieldConstraint::OwnerEquals("u1".into()),
        )]);

        assert!(ability.can(Action::Update, SubjectType::User));
        assert!(!ability.can(Action::Delete, SubjectType::User));
        assert!(!ability.can(Action::Update, SubjectType::Job));
    }

    #[test]
    fn test_owner_constraint_against_target() {
        let ability = Ability::new(vec![Rule::constrained(
            Action::Update,
            SubjectType::User,
            FieldConstraint::OwnerEquals("u1".into()),
        )]);

        assert!(ability.can_on(
            Action::Update,
            SubjectType::User,
            &ResourceAttributes::owned_by("u1")
        ));
        assert!(!ability.can_on(
            Action::Update,
            SubjectType::User,
            &ResourceAttributes::owned_by("u2")
        ));
        // Absent target field never matches a constrained rule.
        assert!(!ability.can_on(
            Action::Update,
            SubjectType::User,
            &ResourceAttributes::default()
        ));
    }

    #[test]
    fn test_company_constraint_against_target() {
        let ability = Ability::new(vec![Rule::constrained(
            Action::Delete,
            SubjectType::Job,
            FieldConstraint::CompanyEquals("c1".into()),
        )]);

        assert!(ability.can_on(
            Action::Delete,
            SubjectType::Job,
            &ResourceAttributes::of_company("c1")
        ));
        assert!(!ability.can_on(
            Action::Delete,
            SubjectType::Job,
            &ResourceAttributes::of_company("c2")
        ));
    }

    #[test]
    fn test_any_rule_matching_is_enough() {
        // Duplicates and overlaps are harmless; one match decides.
        let ability = Ability::new(vec![
            Rule::constrained(
                Action::Update,
                SubjectType::User,
                FieldConstraint::OwnerEquals("u1".into()),
            ),
            Rule::new(Action::Update, SubjectType::User),
            Rule::constrained(
                Action::Update,
                SubjectType::User,
                FieldConstraint::OwnerEquals("u1".into()),
            ),
        ]);

        assert!(ability.can_on(
            Action::Update,
            SubjectType::User,
            &ResourceAttributes::owned_by("someone-else")
        ));
    }

    #[test]
    fn test_constraint_normalizes_ids() {
        let constraint = FieldConstraint::OwnerEquals("u1".into());
        assert!(constraint.matches(&ResourceAttributes::owned_by(" u1 ")));
        assert!(!constraint.matches(&ResourceAttributes::owned_by("U1")));
    }
}
