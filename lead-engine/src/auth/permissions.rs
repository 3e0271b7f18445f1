//! Permission Definitions
//!
//! Role-scoped permission strings. The session gate resolves them once at
//! login; the presentation layer uses them to decide which operations to
//! surface. The engine itself does not re-check them on every mutation.
//!
//! ## 设计原则
//! - 管理员 (ADMIN) 拥有 `all`
//! - 员工 (EMPLOYEE) 只能处理自己的呼叫队列、切换自己的在岗状态

use shared::models::Role;

/// Permissions an administrator-managed screen can require
pub const ALL_PERMISSIONS: &[&str] = &[
    // === 管理权限 ===
    "leads:import",     // 上传线索
    "leads:assign",     // 分配 / 取消分配
    "leads:delete",     // 删除线索
    "leads:view_all",   // 全部数据视图
    "feedback:manage",  // 编辑 / 删除任意反馈
    "employees:manage", // 员工增删改
    "reports:view",     // 管理仪表盘
    // === 员工权限 ===
    "leads:work",          // 改状态、记录通话、添加反馈
    "availability:toggle", // 切换 Working / Leave
    "reports:own",         // 个人仪表盘
];

/// Super permission held by administrators
pub const PERMISSION_ALL: &str = "all";

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &[PERMISSION_ALL];

pub const DEFAULT_EMPLOYEE_PERMISSIONS: &[&str] =
    &["leads:work", "availability:toggle", "reports:own"];

/// Get the default permissions for a role
pub fn get_default_permissions(role: Role) -> Vec<String> {
    let list = match role {
        Role::Admin => DEFAULT_ADMIN_PERMISSIONS,
        Role::Employee => DEFAULT_EMPLOYEE_PERMISSIONS,
    };
    list.iter().map(|s| s.to_string()).collect()
}

/// Validate if a permission string is valid
pub fn is_valid_permission(permission: &str) -> bool {
    permission == PERMISSION_ALL
        || ALL_PERMISSIONS.contains(&permission)
        || permission.ends_with(":*")
}
