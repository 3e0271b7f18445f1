//! The logged-in principal with resolved permissions

use serde::{Deserialize, Serialize};
use shared::models::{Role, Session};

use super::permissions::{PERMISSION_ALL, get_default_permissions};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub permissions: Vec<String>,
}

impl From<&Session> for CurrentUser {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            name: session.name.clone(),
            role: session.role,
            permissions: get_default_permissions(session.role),
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 检查是否拥有指定权限
    ///
    /// - 管理员拥有所有权限
    /// - `"all"` 表示拥有所有权限
    /// - `"leads:*"` 匹配 `"leads:assign"` 等
    pub fn has_permission(&self, permission: &str) -> bool {
        if self.is_admin() {
            return true;
        }
        if self.permissions.iter().any(|p| p == PERMISSION_ALL) {
            return true;
        }

        self.permissions.iter().any(|p| {
            if p == permission {
                return true;
            }
            if let Some(prefix) = p.strip_suffix(":*") {
                permission
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with(':'))
            } else {
                false
            }
        })
    }

    /// 检查是否拥有任一指定权限
    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    /// 检查是否拥有所有指定权限
    pub fn has_all_permissions(&self, permissions: &[&str]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }
}
