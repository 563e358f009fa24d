use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

use crate::{
    AuthorizerSettings, Permission, PermissionCache, PermissionNameGetter, Role,
    kebab_permission_name,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The canonical permission is not granted by any of the caller's roles.
    ///
    /// Unknown roles, roles without permissions, and roles lacking this one
    /// permission all end up here.
    #[error("{message}")]
    AccessDenied { message: String },
}

impl AuthzError {
    /// Stable machine-readable code for boundary translation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccessDenied { .. } => "access_denied",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::AccessDenied { message } => message,
        }
    }
}

/// Role-based access check against an external [`PermissionCache`].
///
/// - No IO of its own (only cache reads)
/// - No mutable state after construction
/// - Cheap to clone and safe to share across threads
#[derive(Clone)]
pub struct Authorizer {
    roles: Vec<Role>,
    cache: Arc<dyn PermissionCache>,
    name_getter: Arc<dyn PermissionNameGetter>,
    development: bool,
}

impl core::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Authorizer")
            .field("roles", &self.roles)
            .field("development", &self.development)
            .finish_non_exhaustive()
    }
}

impl Authorizer {
    pub fn builder(cache: Arc<dyn PermissionCache>) -> AuthorizerBuilder {
        AuthorizerBuilder {
            cache,
            roles: Vec::new(),
            name_getter: None,
            development: false,
        }
    }

    /// Build an authorizer from loaded settings, using the default name deriver.
    pub fn from_settings(cache: Arc<dyn PermissionCache>, settings: AuthorizerSettings) -> Self {
        Self::builder(cache)
            .roles(settings.roles)
            .development(settings.is_development)
            .build()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn is_development(&self) -> bool {
        self.development
    }

    /// Union of every permission the cache holds for this authorizer's roles.
    ///
    /// Roles without a cache entry contribute nothing.
    pub fn effective_permissions(&self) -> BTreeSet<Permission> {
        let mut granted = BTreeSet::new();
        for role in &self.roles {
            match self.cache.get(role) {
                Some(perms) => granted.extend(perms),
                None => tracing::trace!(role = %role, "no cache entry for role"),
            }
        }
        granted
    }

    /// Check whether any of the roles grants `permission_type` on `resource`.
    ///
    /// Returns `AuthzError::AccessDenied` otherwise. Outside development mode the
    /// error message never names the derived permission or the granted set.
    pub fn check(&self, permission_type: &str, resource: &str) -> Result<(), AuthzError> {
        let granted = self.effective_permissions();
        let required = Permission::new(self.name_getter.permission_name(permission_type, resource));
        tracing::trace!(permission = %required, "derived permission name");

        if granted.contains(&required) {
            tracing::debug!(
                permission_type,
                resource,
                roles = self.roles.len(),
                granted = true,
                "access granted"
            );
            return Ok(());
        }

        tracing::debug!(
            permission_type,
            resource,
            roles = self.roles.len(),
            granted = false,
            "access denied"
        );

        Err(self.denied(permission_type, resource, &required, &granted))
    }

    /// Check whether any of the caller's roles is in `allowed`.
    ///
    /// Role names are compared as given. Outside development mode the error
    /// message never lists the allowed roles.
    pub fn check_roles(&self, allowed: &[Role]) -> Result<(), AuthzError> {
        if self.roles.iter().any(|role| allowed.contains(role)) {
            tracing::debug!(roles = self.roles.len(), granted = true, "role allowed");
            return Ok(());
        }

        tracing::debug!(roles = self.roles.len(), granted = false, "role not allowed");

        let mut message = self.summary("access resources");
        if self.development {
            let allowed: Vec<String> = allowed.iter().map(|r| r.as_str().to_lowercase()).collect();
            message.push_str(&format!("; only allowed for roles: [{}]", allowed.join(", ")));
        }

        Err(AuthzError::AccessDenied { message })
    }

    fn denied(
        &self,
        permission_type: &str,
        resource: &str,
        required: &Permission,
        granted: &BTreeSet<Permission>,
    ) -> AuthzError {
        let action = permission_type.to_lowercase();
        let mut message = self.summary(&format!("{action} the {resource} resource"));

        if self.development {
            let granted: Vec<&str> = granted.iter().map(Permission::as_str).collect();
            message.push_str(&format!(
                "; missing permission '{required}'; granted permissions: [{}]",
                granted.join(", ")
            ));
        }

        AuthzError::AccessDenied { message }
    }

    /// Denial summary naming the caller's roles (lowercased), never the permissions.
    fn summary(&self, target: &str) -> String {
        match self.roles.as_slice() {
            [] => format!("a user without a role is unauthorized to {target}"),
            [role] => format!(
                "the {} is unauthorized to {target}",
                role.as_str().to_lowercase()
            ),
            roles => {
                let names: Vec<String> = roles.iter().map(|r| r.as_str().to_lowercase()).collect();
                format!("the roles {} are unauthorized to {target}", names.join(", "))
            }
        }
    }
}

/// Construction options for [`Authorizer`].
pub struct AuthorizerBuilder {
    cache: Arc<dyn PermissionCache>,
    roles: Vec<Role>,
    name_getter: Option<Arc<dyn PermissionNameGetter>>,
    development: bool,
}

impl AuthorizerBuilder {
    /// Roles the check will consider. Omitting this means "no roles".
    pub fn roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the default [`kebab_permission_name`] deriver.
    pub fn permission_name_getter<G>(mut self, getter: G) -> Self
    where
        G: PermissionNameGetter + 'static,
    {
        let getter: Arc<dyn PermissionNameGetter> = Arc::new(getter);
        self.name_getter = Some(getter);
        self
    }

    /// Include the missing permission and the granted set in denial messages.
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    pub fn build(self) -> Authorizer {
        let name_getter = match self.name_getter {
            Some(getter) => getter,
            None => Arc::new(kebab_permission_name) as Arc<dyn PermissionNameGetter>,
        };

        Authorizer {
            roles: self.roles,
            cache: self.cache,
            name_getter,
            development: self.development,
        }
    }
}
