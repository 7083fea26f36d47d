//! Role resolution with static-token override and directory lookup.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use deskhub_core::config::auth::AuthConfig;
use deskhub_core::result::AppResult;
use deskhub_core::traits::directory::EmployeeDirectory;
use deskhub_entity::EmployeeRole;

use super::identity::CallerIdentity;

/// What a request presents for role resolution.
#[derive(Debug, Clone, Default)]
pub struct RoleContext {
    /// Static role-token header value, if the request carried one.
    pub role_token: Option<String>,
    /// Identity aliases extracted from the request's claims.
    pub identity: CallerIdentity,
}

impl RoleContext {
    pub fn with_identity(identity: CallerIdentity) -> Self {
        Self {
            role_token: None,
            identity,
        }
    }
}

/// Resolves an effective role for a request.
///
/// Every request resolves to some role: the static-token override and the
/// admin allowlist short-circuit, the directory supplies persisted roles,
/// and anything unresolvable falls back to the least-privileged role.
/// Only directory I/O failures surface as errors.
#[derive(Clone)]
pub struct RoleResolver {
    directory: Arc<dyn EmployeeDirectory>,
    admin_token: Option<String>,
    secretary_token: Option<String>,
    employee_token: Option<String>,
    admin_allowlist: HashSet<String>,
}

impl RoleResolver {
    pub fn new(directory: Arc<dyn EmployeeDirectory>, config: &AuthConfig) -> Self {
        Self {
            directory,
            admin_token: config.admin_role_token.clone(),
            secretary_token: config.secretary_role_token.clone(),
            employee_token: config.employee_role_token.clone(),
            admin_allowlist: config.admin_allowlist(),
        }
    }

    /// Resolve the effective role for a request.
    pub async fn resolve_role(&self, context: &RoleContext) -> AppResult<EmployeeRole> {
        // Static tokens are an operational override for trusted internal
        // callers and must win before any database access.
        if let Some(role) = self.match_static_token(context.role_token.as_deref()) {
            debug!(role = %role, "Role resolved from static role token");
            return Ok(role);
        }

        if context.identity.is_empty() {
            return Ok(EmployeeRole::Employee);
        }

        if let Some(employee_id) = context.identity.employee_id.as_deref() {
            if self.admin_allowlist.contains(employee_id) {
                debug!(employee_id = %employee_id, "Role resolved from admin allowlist");
                return Ok(EmployeeRole::Admin);
            }
        }

        let stored = self
            .directory
            .find_role(
                context.identity.user_id.as_deref(),
                context.identity.profile_id.as_deref(),
                context.identity.employee_id.as_deref(),
            )
            .await?;

        match stored {
            Some(raw) => {
                let role = EmployeeRole::from(raw);
                if role.as_i32() != raw {
                    warn!(raw = raw, "Out-of-range stored role, using default");
                }
                Ok(role)
            }
            None => Ok(EmployeeRole::Employee),
        }
    }

    /// Match a presented role token against the configured secrets.
    /// Unconfigured (or empty) secrets never match anything.
    fn match_static_token(&self, presented: Option<&str>) -> Option<EmployeeRole> {
        let presented = presented?;
        if presented.is_empty() {
            return None;
        }
        let matches = |configured: &Option<String>| {
            configured
                .as_deref()
                .is_some_and(|secret| !secret.is_empty() && secret == presented)
        };
        if matches(&self.admin_token) {
            Some(EmployeeRole::Admin)
        } else if matches(&self.secretary_token) {
            Some(EmployeeRole::Secretary)
        } else if matches(&self.employee_token) {
            Some(EmployeeRole::Employee)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use deskhub_core::error::AppError;

    /// Directory fake with a fixed answer, counting calls.
    struct FixedDirectory {
        role: Option<i32>,
        calls: std::sync::atomic::AtomicUsize,
    }

    impl FixedDirectory {
        fn returning(role: Option<i32>) -> Self {
            Self {
                role,
                calls: std::sync::atomic::AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EmployeeDirectory for FixedDirectory {
        async fn find_role(
            &self,
            _user_id: Option<&str>,
            _profile_id: Option<&str>,
            _employee_id: Option<&str>,
        ) -> AppResult<Option<i32>> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(self.role)
        }
    }

    struct FailingDirectory;

    #[async_trait]
    impl EmployeeDirectory for FailingDirectory {
        async fn find_role(
            &self,
            _user_id: Option<&str>,
            _profile_id: Option<&str>,
            _employee_id: Option<&str>,
        ) -> AppResult<Option<i32>> {
            Err(AppError::database("connection refused"))
        }
    }

    fn config_with_tokens() -> AuthConfig {
        AuthConfig {
            admin_role_token: Some("admin-secret".to_string()),
            secretary_role_token: Some("secretary-secret".to_string()),
            employee_role_token: Some("employee-secret".to_string()),
            ..AuthConfig::default()
        }
    }

    #[tokio::test]
    async fn test_static_token_short_circuits_before_directory() {
        let directory = Arc::new(FixedDirectory::returning(Some(1)));
        let resolver = RoleResolver::new(directory.clone(), &config_with_tokens());

        let context = RoleContext {
            role_token: Some("admin-secret".to_string()),
            identity: CallerIdentity::from_employee_id("e-1"),
        };
        assert_eq!(
            resolver.resolve_role(&context).await.unwrap(),
            EmployeeRole::Admin
        );
        assert_eq!(directory.calls(), 0);
    }

    #[tokio::test]
    async fn test_each_static_token_maps_to_its_role() {
        let resolver = RoleResolver::new(
            Arc::new(FixedDirectory::returning(None)),
            &config_with_tokens(),
        );
        for (token, expected) in [
            ("admin-secret", EmployeeRole::Admin),
            ("secretary-secret", EmployeeRole::Secretary),
            ("employee-secret", EmployeeRole::Employee),
        ] {
            let context = RoleContext {
                role_token: Some(token.to_string()),
                ..RoleContext::default()
            };
            assert_eq!(resolver.resolve_role(&context).await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_unconfigured_secret_never_matches_empty_token() {
        // No secrets configured at all; an empty presented token must not
        // accidentally match an unset secret.
        let resolver = RoleResolver::new(
            Arc::new(FixedDirectory::returning(Some(3))),
            &AuthConfig::default(),
        );
        let context = RoleContext {
            role_token: Some(String::new()),
            identity: CallerIdentity::from_employee_id("e-1"),
        };
        // Falls through to the directory, which says admin.
        assert_eq!(
            resolver.resolve_role(&context).await.unwrap(),
            EmployeeRole::Admin
        );
    }

    #[tokio::test]
    async fn test_no_identity_defaults_to_employee() {
        let directory = Arc::new(FixedDirectory::returning(Some(3)));
        let resolver = RoleResolver::new(directory.clone(), &AuthConfig::default());

        let role = resolver.resolve_role(&RoleContext::default()).await.unwrap();
        assert_eq!(role, EmployeeRole::Employee);
        assert_eq!(directory.calls(), 0);
    }

    #[tokio::test]
    async fn test_admin_allowlist_short_circuits() {
        let directory = Arc::new(FixedDirectory::returning(Some(1)));
        let config = AuthConfig {
            admin_employee_ids: Some("12345, 67890".to_string()),
            ..AuthConfig::default()
        };
        let resolver = RoleResolver::new(directory.clone(), &config);

        let context = RoleContext::with_identity(CallerIdentity::from_employee_id("12345"));
        assert_eq!(
            resolver.resolve_role(&context).await.unwrap(),
            EmployeeRole::Admin
        );
        assert_eq!(directory.calls(), 0);
    }

    #[tokio::test]
    async fn test_stored_role_resolved_and_clamped() {
        let resolver = RoleResolver::new(
            Arc::new(FixedDirectory::returning(Some(2))),
            &AuthConfig::default(),
        );
        let context = RoleContext::with_identity(CallerIdentity::from_employee_id("e-1"));
        assert_eq!(
            resolver.resolve_role(&context).await.unwrap(),
            EmployeeRole::Secretary
        );

        // Out-of-range stored value clamps to the default role.
        let resolver = RoleResolver::new(
            Arc::new(FixedDirectory::returning(Some(99))),
            &AuthConfig::default(),
        );
        assert_eq!(
            resolver.resolve_role(&context).await.unwrap(),
            EmployeeRole::Employee
        );
    }

    #[tokio::test]
    async fn test_unknown_identity_defaults_to_employee() {
        let resolver = RoleResolver::new(
            Arc::new(FixedDirectory::returning(None)),
            &AuthConfig::default(),
        );
        let context = RoleContext::with_identity(CallerIdentity::from_employee_id("ghost"));
        assert_eq!(
            resolver.resolve_role(&context).await.unwrap(),
            EmployeeRole::Employee
        );
    }

    #[tokio::test]
    async fn test_directory_failure_propagates() {
        let resolver = RoleResolver::new(Arc::new(FailingDirectory), &AuthConfig::default());
        let context = RoleContext::with_identity(CallerIdentity::from_employee_id("e-1"));
        let err = resolver.resolve_role(&context).await.unwrap_err();
        assert_eq!(err.kind, deskhub_core::error::ErrorKind::Database);
    }
}
