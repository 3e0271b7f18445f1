use chrono_tz::Tz;
use shared::error::{AppError, AppResult};

/// 控制台配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | SESSION_DB | {WORK_DIR}/session.redb | 会话存储文件 |
/// | ADMIN_ID | admin | 管理员账号 |
/// | ADMIN_PASSWORD | 12345 | 管理员密码 (明文) |
/// | ADMIN_NAME | Administrator | 管理员显示名 |
/// | TIMEZONE | UTC | 日期筛选使用的时区 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// ADMIN_PASSWORD=secret TIMEZONE=Asia/Kolkata cargo run -p lead-engine
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// redb session file
    pub session_db: String,
    /// Fixed administrator credential
    pub admin: AdminCredentials,
    /// Timezone used for calendar-day filters on `updated_at`
    pub timezone: Tz,
    pub log_level: String,
    pub log_dir: Option<String>,
}

/// The single hardcoded administrator identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub id: String,
    pub password: String,
    pub name: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            id: "admin".into(),
            password: "12345".into(),
            name: "Administrator".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let work_dir = "./data".to_string();
        Self {
            session_db: format!("{}/session.redb", work_dir),
            work_dir,
            admin: AdminCredentials::default(),
            timezone: Tz::UTC,
            log_level: "info".into(),
            log_dir: None,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值；TIMEZONE 无法识别时返回配置错误
    pub fn from_env() -> AppResult<Self> {
        let defaults = AdminCredentials::default();
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let session_db = std::env::var("SESSION_DB")
            .unwrap_or_else(|_| format!("{}/session.redb", work_dir));

        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) => parse_timezone(&name)?,
            Err(_) => Tz::UTC,
        };

        Ok(Self {
            work_dir,
            session_db,
            admin: AdminCredentials {
                id: std::env::var("ADMIN_ID").unwrap_or(defaults.id),
                password: std::env::var("ADMIN_PASSWORD").unwrap_or(defaults.password),
                name: std::env::var("ADMIN_NAME").unwrap_or(defaults.name),
            },
            timezone,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        })
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, timezone: Tz) -> Self {
        let work_dir = work_dir.into();
        Self {
            session_db: format!("{}/session.redb", work_dir),
            work_dir,
            timezone,
            ..Self::default()
        }
    }
}

/// Parse an IANA timezone name; blank means UTC
fn parse_timezone(name: &str) -> AppResult<Tz> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(Tz::UTC);
    }
    name.parse::<Tz>().map_err(|_| {
        AppError::config(format!("Unknown timezone: {name}")).with_detail("TIMEZONE", name)
    })
}
