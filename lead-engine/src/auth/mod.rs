//! 认证模块 - 会话、当前用户与权限

mod current_user;
mod gate;
pub mod permissions;

pub use current_user::CurrentUser;
pub use gate::SessionGate;
pub use permissions::{ALL_PERMISSIONS, PERMISSION_ALL, get_default_permissions};
