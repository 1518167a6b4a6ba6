//! # Hirefly Store - Storage Abstraction Layer
//!
//! Abstract role and permission catalog operations, plus the in-memory
//! backend used for tests and development. Production deployments provide
//! their own document-store backends behind the same traits.

use async_trait::async_trait;

use hirefly_types::{Permission, PopulatedRole, Role, StoreError, StoreResult};

pub mod memory;

pub use memory::MemoryBackend;

type Result<T> = StoreResult<T>;

/// Partial update to a permission record.
///
/// Absent fields keep their current value; the conflict check runs against
/// the merged record.
#[derive(Debug, Clone, Default)]
pub struct PermissionPatch {
    pub name: Option<String>,
    pub api_path: Option<String>,
    pub method: Option<String>,
    pub module: Option<String>,
}

/// The permission catalog: the source of truth for what actions exist.
///
/// `(api_path, method)` pairs are unique across the catalog; creation and
/// update reject collisions with [`StoreError::Conflict`].
#[async_trait]
pub trait PermissionCatalog: Send + Sync {
    /// All permissions in the catalog.
    async fn list_all(&self) -> Result<Vec<Permission>>;

    /// Look up a permission by its `(api_path, method)` pair, optionally
    /// excluding one record id (the record being updated).
    async fn find_by_path_and_method(
        &self,
        api_path: &str,
        method: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<Permission>>;

    /// Insert a new permission. Rejects `(api_path, method)` collisions.
    async fn create(&self, permission: Permission) -> Result<()>;

    /// Apply a partial update. The merged record must not collide with any
    /// other record's `(api_path, method)` pair.
    async fn update(&self, id: &str, patch: PermissionPatch) -> Result<Permission>;

    /// Delete a permission. Rejected with [`StoreError::Protected`] while
    /// any role still references it.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// The authoritative role store.
///
/// Lookups return roles with their permission references populated to full
/// records, the way the ability builder consumes them.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Find a role by its unique name, with permissions populated.
    async fn find_by_name(&self, name: &str) -> Result<PopulatedRole>;

    /// Find a role by id, with permissions populated.
    async fn find_by_id(&self, id: &str) -> Result<PopulatedRole>;

    /// Insert a new role. Rejects duplicate names.
    async fn create(&self, role: Role) -> Result<()>;

    /// Replace a role's permission set.
    ///
    /// Callers that also hold a role-permission cache must invalidate the
    /// role's entry synchronously after this returns.
    async fn set_permissions(&self, role_id: &str, permission_ids: Vec<String>) -> Result<()>;

    /// Delete a role. The super-admin role is rejected with
    /// [`StoreError::Protected`].
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Shared helper for the catalog conflict message.
pub(crate) fn conflict_message(api_path: &str, method: &str) -> String {
    format!(
        "Permission with apiPath={}, method={} already exists",
        api_path, method
    )
}
