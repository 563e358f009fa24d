//! Construction-time configuration for an [`Authorizer`](crate::Authorizer).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Environment variable selecting the deployment mode.
pub const ENV_MODE_VAR: &str = "ROLEGATE_ENV";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid authorizer settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable authorizer options.
///
/// `roles` may be omitted (no roles); `isDevelopment` defaults to `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerSettings {
    #[serde(default)]
    pub roles: Vec<Role>,

    #[serde(default)]
    pub is_development: bool,
}

impl AuthorizerSettings {
    pub fn from_json(document: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Settings for `roles`, with the mode taken from `ROLEGATE_ENV`.
    ///
    /// Anything other than `development`/`dev` means production.
    pub fn from_env(roles: Vec<Role>) -> Self {
        let value = std::env::var(ENV_MODE_VAR).ok();
        Self {
            roles,
            is_development: development_mode(value.as_deref()),
        }
    }
}

fn development_mode(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None => {
            tracing::debug!("{ENV_MODE_VAR} not set; denial details disabled");
            false
        }
        Some(v) if v.eq_ignore_ascii_case("development") || v.eq_ignore_ascii_case("dev") => true,
        Some(v) if v.eq_ignore_ascii_case("production") || v.eq_ignore_ascii_case("prod") => false,
        Some(v) => {
            tracing::warn!(value = v, "unrecognised {ENV_MODE_VAR}; assuming production");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_no_roles_and_production() {
        let settings = AuthorizerSettings::from_json("{}").unwrap();
        assert_eq!(settings, AuthorizerSettings::default());
        assert!(settings.roles.is_empty());
        assert!(!settings.is_development);
    }

    #[test]
    fn parses_camel_case_document() {
        let settings =
            AuthorizerSettings::from_json(r#"{ "roles": ["Editor", "Viewer"], "isDevelopment": true }"#)
                .unwrap();
        assert_eq!(settings.roles, vec![Role::new("Editor"), Role::new("Viewer")]);
        assert!(settings.is_development);
    }

    #[test]
    fn rejects_wrong_types() {
        let err = AuthorizerSettings::from_json(r#"{ "isDevelopment": "yes" }"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid authorizer settings"));
    }

    #[test]
    fn from_env_reads_mode_and_keeps_roles() {
        // Only this test touches ROLEGATE_ENV.
        let roles = vec![Role::new("Editor"), Role::new("Viewer")];

        unsafe { std::env::set_var(ENV_MODE_VAR, "development") };
        let dev = AuthorizerSettings::from_env(roles.clone());
        assert!(dev.is_development);
        assert_eq!(dev.roles, roles);

        unsafe { std::env::set_var(ENV_MODE_VAR, "production") };
        assert!(!AuthorizerSettings::from_env(roles.clone()).is_development);

        unsafe { std::env::remove_var(ENV_MODE_VAR) };
        let unset = AuthorizerSettings::from_env(roles.clone());
        assert!(!unset.is_development);
        assert_eq!(unset.roles, roles);
    }

    #[test]
    fn mode_values() {
        assert!(development_mode(Some("development")));
        assert!(development_mode(Some(" DEV ")));
        assert!(!development_mode(Some("production")));
        assert!(!development_mode(Some("staging")));
        assert!(!development_mode(None));
    }
}
