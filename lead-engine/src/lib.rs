//! Lead Engine - 房产呼叫中心线索生命周期与分配引擎
//!
//! # 架构概述
//!
//! 在进程内被展示层调用，单写者、同步执行：
//!
//! - **实体存储** (`store`): 员工与线索集合
//! - **生命周期** (`engine`): 员工增删改、线索导入/分配/状态/通话/反馈
//! - **会话** (`auth`): 管理员或员工登录、权限
//! - **查询** (`query`): 呼叫队列、筛选、统计
//! - **持久化** (`storage`): redb 会话记录
//!
//! # 模块结构
//!
//! ```text
//! lead-engine/src/
//! ├── core/          # 配置、时钟、ID 策略
//! ├── auth/          # 会话门禁、权限
//! ├── engine/        # 生命周期操作
//! ├── query/         # 只读视图
//! ├── utils/         # 日志、时间、校验
//! ├── ingest.rs      # 表格记录规范化
//! ├── storage.rs     # redb 会话存储
//! └── store.rs       # 实体集合
//! ```

pub mod auth;
pub mod core;
pub mod engine;
pub mod ingest;
pub mod query;
pub mod storage;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, SessionGate};
pub use core::{AdminCredentials, Clock, Config, IdGenerator, ManualClock, SequentialIds, SystemClock};
pub use engine::{
    AssignReport, EngineError, EngineResult, IngestReport, LeadEngine, SharedEngine, shared,
};
pub use ingest::{ParsedRows, rows_from_records};
pub use query::{EmployeeScope, LeadFilter, LeadQuery, QueueView, SortOrder};
pub use storage::{MemorySessionStore, RedbSessionStore, SessionStore, StorageError};
pub use store::EntityStore;
pub use utils::{MAX_FEEDBACK_LEN, validate_feedback_text};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 加载 .env、初始化日志、读取配置并准备工作目录
///
/// 日志先于配置初始化，配置阶段的诊断信息才不会丢失。
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    let config = Config::from_env().map_err(|e| {
        tracing::error!(code = %e.code, error = %e, "Invalid configuration");
        anyhow::anyhow!(e)
    })?;
    std::fs::create_dir_all(&config.work_dir)?;
    Ok(config)
}
