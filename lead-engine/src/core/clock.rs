//! Time source
//!
//! The engine never reads the wall clock directly; it asks an injected
//! [`Clock`] so tests can pin timestamps.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Millisecond time source
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock (UTC millis)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        shared::util::now_millis()
    }
}

/// Hand-driven clock for tests and replays
///
/// Clones share the same underlying instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_millis)),
        }
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
