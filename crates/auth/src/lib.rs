//! `rolegate-auth` — in-process role-based authorization check.
//!
//! Roles are resolved to permissions through an external [`PermissionCache`];
//! the requested (permission-type, resource) pair is turned into a canonical
//! permission name and tested for membership. This crate is intentionally
//! decoupled from transport and storage.

pub mod authorize;
pub mod cache;
pub mod permissions;
pub mod roles;
pub mod settings;

pub use authorize::{Authorizer, AuthorizerBuilder, AuthzError};
pub use cache::{CacheLoadError, InMemoryPermissionCache, PermissionCache};
pub use permissions::{Permission, PermissionNameGetter, kebab_permission_name};
pub use roles::Role;
pub use settings::{AuthorizerSettings, SettingsError};
