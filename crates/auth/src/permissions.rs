use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque strings in canonical form (e.g. `"read-order-item"`),
/// as produced by [`kebab_permission_name`] or a custom [`PermissionNameGetter`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Strategy mapping a (permission-type, resource) pair to a canonical permission name.
///
/// Implemented for any `Fn(&str, &str) -> String`, so a closure can be passed
/// straight to [`AuthorizerBuilder::permission_name_getter`](crate::AuthorizerBuilder::permission_name_getter).
pub trait PermissionNameGetter: Send + Sync {
    fn permission_name(&self, permission_type: &str, resource: &str) -> String;
}

impl<F> PermissionNameGetter for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn permission_name(&self, permission_type: &str, resource: &str) -> String {
        self(permission_type, resource)
    }
}

/// Default deriver: `<permission-type lowercased>-<resource in kebab case>`.
///
/// A hyphen is inserted only where an ASCII lowercase letter is directly
/// followed by an ASCII uppercase letter, so acronyms stay joined:
///
/// ```
/// use rolegate_auth::kebab_permission_name;
///
/// assert_eq!(kebab_permission_name("Read", "OrderItem"), "read-order-item");
/// assert_eq!(kebab_permission_name("Read", "HTTPHeader"), "read-httpheader");
/// ```
pub fn kebab_permission_name(permission_type: &str, resource: &str) -> String {
    let mut name = String::with_capacity(permission_type.len() + resource.len() + 4);
    name.push_str(&permission_type.to_lowercase());
    name.push('-');

    let mut prev: Option<char> = None;
    for c in resource.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            name.push('-');
        }
        name.extend(c.to_lowercase());
        prev = Some(c);
    }

    name
}
