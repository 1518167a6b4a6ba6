//! Test fixtures for Hirefly test suites
//!
//! This crate provides shared constructors for actors, permissions and
//! roles that are used across multiple test suites.

use async_trait::async_trait;

use hirefly_const::{HR_ROLE, SUPER_ADMIN_ROLE, USER_ROLE};
use hirefly_store::RoleStore;
use hirefly_types::{Actor, CompanyRef, Permission, PopulatedRole, Role, RoleRef, StoreError, StoreResult};

/// A permission record with a derived id and name.
pub fn permission(method: &str, api_path: &str, module: &str) -> Permission {
    Permission {
        id: format!("{}:{}", method, api_path),
        name: format!("{} {}", method, api_path),
        api_path: api_path.to_string(),
        method: method.to_string(),
        module: module.to_string(),
    }
}

/// A role referencing the given permissions by id.
pub fn role(id: &str, name: &str, permissions: &[Permission]) -> Role {
    Role {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} role", name),
        is_active: true,
        permissions: permissions.iter().map(|p| p.id.clone()).collect(),
    }
}

/// An actor with the given role name and no attached permissions.
pub fn actor(id: &str, role_id: &str, role_name: &str) -> Actor {
    Actor {
        id: id.to_string(),
        email: Some(format!("{}@example.com", id)),
        role: RoleRef {
            id: role_id.to_string(),
            name: role_name.to_string(),
        },
        company: None,
        permissions: vec![],
    }
}

/// A baseline applicant actor.
pub fn user_actor(id: &str) -> Actor {
    actor(id, "role-user", USER_ROLE)
}

/// An HR actor scoped to a company.
pub fn hr_actor(id: &str, company_id: &str) -> Actor {
    let mut actor = actor(id, "role-hr", HR_ROLE);
    actor.company = Some(CompanyRef {
        id: company_id.to_string(),
        name: Some("Test Co".to_string()),
    });
    actor
}

/// A super-admin actor.
pub fn super_admin_actor(id: &str) -> Actor {
    actor(id, "role-admin", SUPER_ADMIN_ROLE)
}

/// Role store whose every operation fails with a database fault, for
/// exercising fail-closed paths.
pub struct FailingRoleStore;

impl FailingRoleStore {
    fn fault<T>() -> StoreResult<T> {
        Err(StoreError::Database("connection reset".into()))
    }
}

#[async_trait]
impl RoleStore for FailingRoleStore {
    async fn find_by_name(&self, _name: &str) -> StoreResult<PopulatedRole> {
        Self::fault()
    }

    async fn find_by_id(&self, _id: &str) -> StoreResult<PopulatedRole> {
        Self::fault()
    }

    async fn create(&self, _role: Role) -> StoreResult<()> {
        Self::fault()
    }

    async fn set_permissions(&self, _role_id: &str, _ids: Vec<String>) -> StoreResult<()> {
        Self::fault()
    }

    async fn delete(&self, _id: &str) -> StoreResult<()> {
        Self::fault()
    }
}

/// The standard seeded catalog used by builder and guard tests: one
/// permission per (method, path) the recruitment API exposes per module.
pub fn seeded_catalog() -> Vec<Permission> {
    vec![
        permission("GET", "/api/v1/users/:id", "USERS"),
        permission("PATCH", "/api/v1/users/:id", "USERS"),
        permission("DELETE", "/api/v1/users/:id", "USERS"),
        permission("GET", "/api/v1/companies", "COMPANIES"),
        permission("PATCH", "/api/v1/companies/:id", "COMPANIES"),
        permission("GET", "/api/v1/jobs", "JOBS"),
        permission("POST", "/api/v1/jobs", "JOBS"),
        permission("PATCH", "/api/v1/jobs/:id", "JOBS"),
        permission("DELETE", "/api/v1/jobs/:id", "JOBS"),
        permission("GET", "/api/v1/resumes/:id", "RESUMES"),
        permission("POST", "/api/v1/resumes", "RESUMES"),
        permission("PATCH", "/api/v1/resumes/:id", "RESUMES"),
        permission("GET", "/api/v1/files/:id", "FILES"),
        permission("POST", "/api/v1/files", "FILES"),
        permission("DELETE", "/api/v1/files/:id", "FILES"),
        permission("POST", "/api/v1/subscribers", "SUBSCRIBERS"),
        permission("DELETE", "/api/v1/subscribers/:id", "SUBSCRIBERS"),
    ]
}
