//! Guard decision state machine integration tests
//!
//! These walk every terminal path of the per-request state machine:
//! skip flag, anonymous access, guest abilities, the super-admin bypass,
//! the legacy exact-path fallback, declared requirements, and fail-closed
//! behavior on store faults.

use std::sync::Arc;
use std::time::Duration;

use hirefly_auth::{AuthzError, EndpointPolicy, Guard, RequestContext, Requirement};
use hirefly_cache::RolePermissionCache;
use hirefly_core::{AbilityBuilder, ResourceAttributes};
use hirefly_store::{MemoryBackend, RoleStore};
use hirefly_test_fixtures::{
    hr_actor, permission, role, seeded_catalog, super_admin_actor, user_actor, FailingRoleStore,
};
use hirefly_types::{Action, SubjectType};

async fn seeded_guard() -> Guard {
    let backend = MemoryBackend::new();
    let catalog = seeded_catalog();
    backend
        .seed(
            catalog.clone(),
            vec![
                role("role-hr", "HR", &catalog),
                role("role-user", "USER", &catalog),
            ],
        )
        .await;
    guard_over(Arc::new(backend))
}

fn guard_over(store: Arc<dyn RoleStore>) -> Guard {
    let cache = Arc::new(RolePermissionCache::new(100, Duration::from_secs(300)));
    Guard::new(Arc::new(AbilityBuilder::new(store, cache)))
}

fn request(method: &str, route: &str) -> RequestContext {
    RequestContext::new(method, route)
}

#[tokio::test]
async fn test_skip_flag_allows_without_actor() {
    let guard = seeded_guard().await;

    let policy = EndpointPolicy::skip();
    guard
        .authorize(&policy, None, &request("DELETE", "/api/v1/jobs/:id"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_anonymous_allowed_when_nothing_declared() {
    let guard = seeded_guard().await;

    let policy = EndpointPolicy::default();
    guard
        .authorize(&policy, None, &request("GET", "/api/v1/jobs"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_anonymous_measured_against_guest_ability() {
    let guard = seeded_guard().await;

    // Guests may read jobs...
    let policy = EndpointPolicy::require(vec![Requirement::new(Action::Read, SubjectType::Job)]);
    guard
        .authorize(&policy, None, &request("GET", "/api/v1/jobs"))
        .await
        .unwrap();

    // ...and subscribe, but not create jobs.
    let policy = EndpointPolicy::require(vec![Requirement::new(
        Action::Create,
        SubjectType::Subscriber,
    )]);
    guard
        .authorize(&policy, None, &request("POST", "/api/v1/subscribers"))
        .await
        .unwrap();

    let policy = EndpointPolicy::require(vec![Requirement::new(Action::Create, SubjectType::Job)]);
    let err = guard
        .authorize(&policy, None, &request("POST", "/api/v1/jobs"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::Unauthenticated));
}

#[tokio::test]
async fn test_super_admin_bypasses_everything() {
    // Even a dead store cannot stop the super admin: the bypass runs first.
    let guard = guard_over(Arc::new(FailingRoleStore));
    let admin = super_admin_actor("admin1");

    let policy = EndpointPolicy::require(vec![
        Requirement::new(Action::Delete, SubjectType::Role),
        Requirement::new(Action::Manage, SubjectType::Permission),
    ]);
    guard
        .authorize(&policy, Some(&admin), &request("DELETE", "/api/v1/roles/:id"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_legacy_fallback_exact_match() {
    let guard = seeded_guard().await;

    let mut actor = user_actor("u1");
    actor.permissions = vec![permission("GET", "/jobs/:id", "JOBS")];

    // No declared requirements: the attached permission list decides.
    let policy = EndpointPolicy::default();
    guard
        .authorize(&policy, Some(&actor), &request("GET", "/jobs/:id"))
        .await
        .unwrap();

    let err = guard
        .authorize(&policy, Some(&actor), &request("DELETE", "/jobs/:id"))
        .await
        .unwrap_err();
    match err {
        AuthzError::Forbidden(reason) => {
            assert!(reason.contains("DELETE"));
            assert!(reason.contains("/jobs/:id"));
        }
        other => panic!("expected Forbidden, got {:?}", other),
    }
}

#[tokio::test]
async fn test_legacy_fallback_is_exact_not_pattern() {
    let guard = seeded_guard().await;

    let mut actor = user_actor("u1");
    actor.permissions = vec![permission("GET", "/jobs/:id", "JOBS")];

    // A concrete path does not match the stored template in legacy mode.
    let policy = EndpointPolicy::default();
    let err = guard
        .authorize(&policy, Some(&actor), &request("GET", "/jobs/123"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::Forbidden(_)));
}

#[tokio::test]
async fn test_legacy_fallback_can_be_disabled() {
    let backend = MemoryBackend::new();
    let cache = Arc::new(RolePermissionCache::new(100, Duration::from_secs(300)));
    let guard = Guard::new(Arc::new(AbilityBuilder::new(Arc::new(backend), cache)))
        .with_legacy_fallback(false);

    let mut actor = user_actor("u1");
    actor.permissions = vec![permission("GET", "/jobs/:id", "JOBS")];

    // The attached permission would match, but the fallback is off.
    let policy = EndpointPolicy::default();
    let err = guard
        .authorize(&policy, Some(&actor), &request("GET", "/jobs/:id"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::Forbidden(_)));

    // Anonymous access on undeclared endpoints is unaffected.
    guard
        .authorize(&policy, None, &request("GET", "/jobs/:id"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_declared_requirements_all_satisfied() {
    let guard = seeded_guard().await;
    let hr = hr_actor("hr1", "c1");

    let policy = EndpointPolicy::require(vec![
        Requirement::new(Action::Read, SubjectType::Job),
        Requirement::new(Action::Update, SubjectType::Job),
    ]);
    guard
        .authorize(&policy, Some(&hr), &request("PATCH", "/api/v1/jobs/:id"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_first_unsatisfied_requirement_names_the_deny() {
    let guard = seeded_guard().await;

    let mut actor = user_actor("u1");
    // Attached permissions cover jobs only; roles and permissions are out.
    actor.permissions = vec![permission("GET", "/api/v1/jobs", "JOBS")];

    let policy = EndpointPolicy::require(vec![
        Requirement::new(Action::Read, SubjectType::Job),
        Requirement::new(Action::Delete, SubjectType::Role),
        Requirement::new(Action::Delete, SubjectType::Permission),
    ]);

    let err = guard
        .authorize(&policy, Some(&actor), &request("DELETE", "/api/v1/roles/:id"))
        .await
        .unwrap_err();
    match err {
        // Declaration order: the Role requirement fails before the
        // Permission one and names the reason.
        AuthzError::Forbidden(reason) => {
            assert_eq!(reason, "You don't have permission to delete Role");
        }
        other => panic!("expected Forbidden, got {:?}", other),
    }
}

#[tokio::test]
async fn test_store_fault_denies_instead_of_allowing() {
    let guard = guard_over(Arc::new(FailingRoleStore));
    let hr = hr_actor("hr1", "c1");

    let policy = EndpointPolicy::require(vec![Requirement::new(Action::Read, SubjectType::Job)]);
    let err = guard
        .authorize(&policy, Some(&hr), &request("GET", "/api/v1/jobs"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::PermissionResolution(_)));
}

#[tokio::test]
async fn test_unknown_role_denies_with_reason() {
    let guard = seeded_guard().await;

    let mut ghost = user_actor("u1");
    ghost.role.name = "CONTRACTOR".to_string();
    ghost.role.id = "role-contractor".to_string();

    let policy = EndpointPolicy::require(vec![Requirement::new(Action::Read, SubjectType::Job)]);
    let err = guard
        .authorize(&policy, Some(&ghost), &request("GET", "/api/v1/jobs"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthzError::Forbidden(_)));
}

#[tokio::test]
async fn test_authorize_resource_checks_ownership() {
    let guard = seeded_guard().await;
    let user = user_actor("u1");

    guard
        .authorize_resource(
            &user,
            Action::Update,
            SubjectType::User,
            &ResourceAttributes::owned_by("u1"),
        )
        .await
        .unwrap();

    let err = guard
        .authorize_resource(
            &user,
            Action::Update,
            SubjectType::User,
            &ResourceAttributes::owned_by("u2"),
        )
        .await
        .unwrap_err();
    match err {
        AuthzError::Forbidden(reason) => {
            assert_eq!(reason, "You don't have permission to update User");
        }
        other => panic!("expected Forbidden, got {:?}", other),
    }
}

#[tokio::test]
async fn test_authorize_resource_company_scope() {
    let guard = seeded_guard().await;
    let hr = hr_actor("hr1", "c1");

    guard
        .authorize_resource(
            &hr,
            Action::Delete,
            SubjectType::Job,
            &ResourceAttributes::of_company("c1"),
        )
        .await
        .unwrap();

    assert!(guard
        .authorize_resource(
            &hr,
            Action::Delete,
            SubjectType::Job,
            &ResourceAttributes::of_company("c2"),
        )
        .await
        .is_err());
}
