use std::sync::Arc;

use anyhow::Context;
use lead_engine::{
    EntityStore, LeadEngine, RedbSessionStore, SessionGate, SystemClock, setup_environment, shared,
};

fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 工作目录, 日志)
    let config = setup_environment()?;

    tracing::info!(work_dir = %config.work_dir, timezone = %config.timezone, "Lead console starting...");

    // 2. 会话存储
    let sessions = RedbSessionStore::open(&config.session_db)
        .with_context(|| format!("opening session store {}", config.session_db))?;
    let mut gate = SessionGate::new(config.admin.clone(), Box::new(sessions));

    // 3. 引擎 (集合由展示层提供，这里从空开始)
    let engine = LeadEngine::restore(EntityStore::new(), Arc::new(SystemClock))
        .with_timezone(config.timezone);
    let engine = shared(engine);

    // 4. 恢复上次会话
    match gate.restore()? {
        Some(session) => {
            let full_view = gate.authorize("leads:view_all").is_ok();
            tracing::info!(
                session_id = %session.id,
                role = ?session.role,
                full_view,
                "Resumed session"
            );
        }
        None => tracing::info!("No stored session, login required"),
    }

    let guard = engine.read();
    tracing::info!(
        employees = guard.store().employees().len(),
        leads = guard.store().leads().len(),
        "Lead console ready"
    );
    Ok(())
}
