//! Role → permission-set lookup consumed by the [`Authorizer`](crate::Authorizer).
//!
//! Population and invalidation belong to whoever owns the cache; the authorizer
//! only ever reads.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::{Permission, Role};

/// Read-only permission lookup keyed by role.
///
/// `None` and an empty collection are treated identically by callers.
/// Implementations must tolerate concurrent `get` calls.
pub trait PermissionCache: Send + Sync {
    fn get(&self, role: &Role) -> Option<Vec<Permission>>;
}

impl<C: PermissionCache + ?Sized> PermissionCache for Arc<C> {
    fn get(&self, role: &Role) -> Option<Vec<Permission>> {
        (**self).get(role)
    }
}

impl PermissionCache for HashMap<Role, Vec<Permission>> {
    fn get(&self, role: &Role) -> Option<Vec<Permission>> {
        HashMap::get(self, role).cloned()
    }
}

#[derive(Debug, Error)]
pub enum CacheLoadError {
    #[error("invalid permission cache document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Thread-safe in-memory cache.
#[derive(Debug, Default)]
pub struct InMemoryPermissionCache {
    inner: RwLock<HashMap<Role, HashSet<Permission>>>,
}

impl InMemoryPermissionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from a JSON object of the form `{ "role": ["permission", ...] }`.
    pub fn from_json(document: &str) -> Result<Self, CacheLoadError> {
        let entries: HashMap<Role, HashSet<Permission>> = serde_json::from_str(document)?;
        Ok(Self {
            inner: RwLock::new(entries),
        })
    }

    /// Add permissions to a role, creating the entry if needed.
    pub fn grant<I>(&self, role: Role, permissions: I)
    where
        I: IntoIterator<Item = Permission>,
    {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.entry(role).or_default().extend(permissions);
    }

    /// Drop a role's entry. Returns whether the role was present.
    pub fn revoke_role(&self, role: &Role) -> bool {
        let mut map = self.inner.write().unwrap_or_else(|e| e.into_inner());
        map.remove(role).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PermissionCache for InMemoryPermissionCache {
    fn get(&self, role: &Role) -> Option<Vec<Permission>> {
        let map = self.inner.read().unwrap_or_else(|e| e.into_inner());
        map.get(role).map(|perms| perms.iter().cloned().collect())
    }
}
