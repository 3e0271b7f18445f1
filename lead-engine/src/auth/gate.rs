//! Session / access gate
//!
//! Two principal sources, checked in order:
//! 1. the configured administrator credential
//! 2. the employee directory (id + exact password)
//!
//! Credentials are compared in plaintext; there is no lockout.

use shared::error::{AppError, AppResult};
use shared::models::{Role, Session};

use super::CurrentUser;
use super::permissions::is_valid_permission;
use crate::core::AdminCredentials;
use crate::engine::{EngineError, EngineResult};
use crate::storage::{SessionStore, StorageResult};
use crate::store::EntityStore;

pub struct SessionGate {
    admin: AdminCredentials,
    store: Box<dyn SessionStore>,
    current: Option<Session>,
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("admin_id", &self.admin.id)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl SessionGate {
    pub fn new(admin: AdminCredentials, store: Box<dyn SessionStore>) -> Self {
        Self {
            admin,
            store,
            current: None,
        }
    }

    /// Authenticate and make the principal current
    ///
    /// A failed attempt leaves any existing session in place. A session that
    /// cannot be persisted is still returned; it just won't survive a restart.
    pub fn login(
        &mut self,
        directory: &EntityStore,
        identifier: &str,
        secret: &str,
    ) -> EngineResult<Session> {
        let Some(session) = self.authenticate(directory, identifier, secret) else {
            tracing::warn!(identifier = %identifier, "Login failed");
            return Err(EngineError::InvalidCredentials);
        };

        if let Err(e) = self.store.save(&session) {
            tracing::error!(error = %e, session_id = %session.id, "Failed to persist session");
        }
        tracing::info!(session_id = %session.id, role = ?session.role, "Login succeeded");
        self.current = Some(session.clone());
        Ok(session)
    }

    fn authenticate(&self, directory: &EntityStore, identifier: &str, secret: &str) -> Option<Session> {
        if identifier == self.admin.id && secret == self.admin.password {
            return Some(Session {
                id: self.admin.id.clone(),
                name: self.admin.name.clone(),
                role: Role::Admin,
            });
        }

        // 休假员工同样可以登录，只是看不到呼叫队列
        directory
            .employee(identifier)
            .filter(|e| e.password == secret)
            .map(|e| Session {
                id: e.id.clone(),
                name: e.name.clone(),
                role: Role::Employee,
            })
    }

    /// Drop the current session and its stored record
    pub fn logout(&mut self) -> StorageResult<()> {
        if let Some(session) = self.current.take() {
            tracing::info!(session_id = %session.id, "Logged out");
        }
        self.store.clear()
    }

    /// Reload the persisted session, if any
    pub fn restore(&mut self) -> StorageResult<Option<Session>> {
        let loaded = self.store.load()?;
        if let Some(session) = &loaded {
            tracing::info!(session_id = %session.id, role = ?session.role, "Session restored");
        }
        self.current = loaded.clone();
        Ok(loaded)
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.current.as_ref().map(CurrentUser::from)
    }

    /// The current principal, provided it holds `permission`
    pub fn authorize(&self, permission: &str) -> AppResult<CurrentUser> {
        if !is_valid_permission(permission) {
            tracing::warn!(permission = %permission, "Checking an unknown permission");
        }
        let user = self.current_user().ok_or_else(AppError::not_authenticated)?;
        if !user.has_permission(permission) {
            tracing::debug!(user_id = %user.id, permission = %permission, "Permission denied");
            return Err(
                AppError::permission_denied(format!("Missing permission: {permission}"))
                    .with_detail("permission", permission),
            );
        }
        Ok(user)
    }
}
