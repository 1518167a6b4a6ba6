//! In-memory role and permission backend for testing and development

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use hirefly_const::SUPER_ADMIN_ROLE;
use hirefly_types::{Permission, PopulatedRole, Role, StoreError, StoreResult};

use crate::{conflict_message, PermissionCatalog, PermissionPatch, RoleStore};

/// In-memory implementation of [`PermissionCatalog`] and [`RoleStore`].
pub struct MemoryBackend {
    data: Arc<RwLock<MemoryStore>>,
}

struct MemoryStore {
    permissions: HashMap<String, Permission>,
    roles: HashMap<String, Role>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(MemoryStore {
                permissions: HashMap::new(),
                roles: HashMap::new(),
            })),
        }
    }

    /// Seed the backend with a set of permissions and roles, bypassing the
    /// uniqueness checks. Intended for test setup only.
    pub async fn seed(&self, permissions: Vec<Permission>, roles: Vec<Role>) {
        let mut store = self.data.write().await;
        for p in permissions {
            store.permissions.insert(p.id.clone(), p);
        }
        for r in roles {
            store.roles.insert(r.id.clone(), r);
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Resolve a role's permission references, skipping dangling ids the
    /// way a document-store populate does.
    fn populate(&self, role: &Role) -> PopulatedRole {
        let permissions = role
            .permissions
            .iter()
            .filter_map(|id| self.permissions.get(id).cloned())
            .collect();
        PopulatedRole {
            role: role.clone(),
            permissions,
        }
    }

    fn find_collision(
        &self,
        api_path: &str,
        method: &str,
        exclude_id: Option<&str>,
    ) -> Option<&Permission> {
        self.permissions.values().find(|p| {
            p.api_path == api_path && p.method == method && Some(p.id.as_str()) != exclude_id
        })
    }
}

#[async_trait]
impl PermissionCatalog for MemoryBackend {
    async fn list_all(&self) -> StoreResult<Vec<Permission>> {
        let store = self.data.read().await;
        Ok(store.permissions.values().cloned().collect())
    }

    async fn find_by_path_and_method(
        &self,
        api_path: &str,
        method: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Option<Permission>> {
        let store = self.data.read().await;
        Ok(store.find_collision(api_path, method, exclude_id).cloned())
    }

    async fn create(&self, permission: Permission) -> StoreResult<()> {
        let mut store = self.data.write().await;

        if store
            .find_collision(&permission.api_path, &permission.method, None)
            .is_some()
        {
            return Err(StoreError::Conflict(conflict_message(
                &permission.api_path,
                &permission.method,
            )));
        }
        if store.permissions.contains_key(&permission.id) {
            return Err(StoreError::Conflict(format!(
                "Permission id {} already exists",
                permission.id
            )));
        }

        store.permissions.insert(permission.id.clone(), permission);
        Ok(())
    }

    async fn update(&self, id: &str, patch: PermissionPatch) -> StoreResult<Permission> {
        let mut store = self.data.write().await;

        let existing = store.permissions.get(id).ok_or(StoreError::NotFound)?;

        // Merge the patch over the current record before the conflict check:
        // a partial update may change only one half of the unique pair.
        let merged = Permission {
            id: existing.id.clone(),
            name: patch.name.unwrap_or_else(|| existing.name.clone()),
            api_path: patch.api_path.unwrap_or_else(|| existing.api_path.clone()),
            method: patch.method.unwrap_or_else(|| existing.method.clone()),
            module: patch.module.unwrap_or_else(|| existing.module.clone()),
        };

        if store
            .find_collision(&merged.api_path, &merged.method, Some(id))
            .is_some()
        {
            return Err(StoreError::Conflict(conflict_message(
                &merged.api_path,
                &merged.method,
            )));
        }

        store.permissions.insert(id.to_string(), merged.clone());
        Ok(merged)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut store = self.data.write().await;

        if !store.permissions.contains_key(id) {
            return Err(StoreError::NotFound);
        }

        if let Some(role) = store
            .roles
            .values()
            .find(|r| r.permissions.iter().any(|p| p == id))
        {
            return Err(StoreError::Protected(format!(
                "Permission {} is still referenced by role {}",
                id, role.name
            )));
        }

        store.permissions.remove(id);
        Ok(())
    }
}

#[async_trait]
impl RoleStore for MemoryBackend {
    async fn find_by_name(&self, name: &str) -> StoreResult<PopulatedRole> {
        let store = self.data.read().await;
        store
            .roles
            .values()
            .find(|r| r.name == name)
            .map(|r| store.populate(r))
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<PopulatedRole> {
        let store = self.data.read().await;
        store
            .roles
            .get(id)
            .map(|r| store.populate(r))
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, role: Role) -> StoreResult<()> {
        let mut store = self.data.write().await;

        if store.roles.values().any(|r| r.name == role.name) {
            return Err(StoreError::Conflict(format!(
                "Role with name \"{}\" already exists",
                role.name
            )));
        }

        store.roles.insert(role.id.clone(), role);
        Ok(())
    }

    async fn set_permissions(&self, role_id: &str, permission_ids: Vec<String>) -> StoreResult<()> {
        let mut store = self.data.write().await;
        let role = store.roles.get_mut(role_id).ok_or(StoreError::NotFound)?;
        role.permissions = permission_ids;
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut store = self.data.write().await;

        let role = store.roles.get(id).ok_or(StoreError::NotFound)?;
        if role.name == SUPER_ADMIN_ROLE {
            return Err(StoreError::Protected(
                "can't delete the super-admin role".into(),
            ));
        }

        store.roles.remove(id);
        Ok(())
    }
}
