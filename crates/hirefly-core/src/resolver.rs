//! Cache/store wiring for role permission resolution.
//!
//! Authorization involves at most one store read per request: the cache is
//! consulted first, and on a miss the role is loaded by name from the
//! authoritative store (permissions populated) and the snapshot cached.
//! An explicit component with injected dependencies, created once at
//! process start.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument, warn};

use hirefly_cache::RolePermissionCache;
use hirefly_store::RoleStore;
use hirefly_types::{Permission, RoleRef, StoreError, StoreResult};

/// Failure to establish an actor's permissions.
///
/// A missing role is NOT one of these — "role was deleted after the token
/// was issued" is an expected runtime condition and resolves to an empty
/// permission set. This error marks genuine store faults, which the guard
/// converts into a deny (fail-closed).
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("could not establish permissions: {0}")]
    Store(#[from] StoreError),
}

/// Resolves a role's permission set, cache first, store second.
pub struct PermissionResolver {
    store: Arc<dyn RoleStore>,
    cache: Arc<RolePermissionCache>,
}

impl PermissionResolver {
    pub fn new(store: Arc<dyn RoleStore>, cache: Arc<RolePermissionCache>) -> Self {
        Self { store, cache }
    }

    /// The permission set for a role, from cache or the authoritative
    /// store. An unknown role name yields an empty set.
    #[instrument(skip(self), fields(role = %role.name))]
    pub async fn resolve(&self, role: &RoleRef) -> Result<Vec<Permission>, ResolveError> {
        if let Some(permissions) = self.cache.get(&role.id).await {
            debug!(count = permissions.len(), "role permissions from cache");
            return Ok(permissions);
        }

        match self.store.find_by_name(&role.name).await {
            Ok(populated) => {
                debug!(count = populated.permissions.len(), "role permissions from store");
                self.cache
                    .set(&role.id, populated.permissions.clone())
                    .await;
                Ok(populated.permissions)
            }
            Err(StoreError::NotFound) => {
                warn!("role not found; resolving to an empty permission set");
                Ok(Vec::new())
            }
            Err(err) => Err(ResolveError::Store(err)),
        }
    }

    /// Replace a role's permission set and synchronously drop its cache
    /// entry, so the writer's own next request observes the new set.
    pub async fn set_role_permissions(
        &self,
        role_id: &str,
        permission_ids: Vec<String>,
    ) -> StoreResult<()> {
        self.store.set_permissions(role_id, permission_ids).await?;
        self.cache.invalidate(Some(role_id)).await;
        Ok(())
    }

    /// Drop one role's cached snapshot, or all of them.
    pub async fn invalidate(&self, role_id: Option<&str>) {
        self.cache.invalidate(role_id).await;
    }
}
