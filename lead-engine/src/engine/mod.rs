//! LeadEngine - lifecycle operations over the entity store
//!
//! This module handles:
//! - Employee lifecycle (create / update / delete with cascade / availability)
//! - Lead lifecycle (bulk ingest, assignment, status, call recording, delete)
//! - Feedback history with the per-lead capacity limit
//! - Change notification (via broadcast channel)
//!
//! # Operation Flow
//!
//! ```text
//! operation(args)
//!     ├─ 1. Validate against current store (no mutation yet)
//!     ├─ 2. Read clock / allocate ids
//!     ├─ 3. Mutate store
//!     ├─ 4. Broadcast StoreEvent
//!     └─ 5. Return result value
//! ```
//!
//! A rejected operation stops at step 1 and returns `Err` with the store
//! untouched. Single writer: every mutation takes `&mut self`; use
//! [`SharedEngine`] when several owners need access.

mod employees;
mod error;
mod feedback;
mod leads;

pub use error::*;
pub use leads::{AssignReport, IngestReport};

use std::sync::Arc;

use chrono_tz::Tz;
use parking_lot::RwLock;
use shared::models::{Lead, StoreEvent};
use tokio::sync::broadcast;

use crate::core::{Clock, IdGenerator, SequentialIds, SystemClock};
use crate::query::LeadQuery;
use crate::store::EntityStore;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

pub struct LeadEngine {
    store: EntityStore,
    clock: Arc<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    event_tx: broadcast::Sender<StoreEvent>,
    /// 日期筛选时区
    tz: Tz,
}

impl std::fmt::Debug for LeadEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadEngine")
            .field("employees", &self.store.employees().len())
            .field("leads", &self.store.leads().len())
            .field("tz", &self.tz)
            .finish()
    }
}

impl Default for LeadEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadEngine {
    /// Empty store, wall clock, sequential ids, UTC date filters
    pub fn new() -> Self {
        Self::with_parts(
            EntityStore::new(),
            Arc::new(SystemClock),
            Box::new(SequentialIds::new()),
        )
    }

    /// Fully injected constructor (tests, restores)
    pub fn with_parts(
        store: EntityStore,
        clock: Arc<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        tracing::debug!(
            employees = store.employees().len(),
            leads = store.leads().len(),
            "LeadEngine initialized"
        );
        Self {
            store,
            clock,
            ids,
            event_tx,
            tz: Tz::UTC,
        }
    }

    /// Start from previously captured collections, resuming the id sequences
    /// from the store's high-water marks
    pub fn restore(store: EntityStore, clock: Arc<dyn Clock>) -> Self {
        let ids = SequentialIds::resume(store.employee_seq(), store.feedback_seq());
        Self::with_parts(store, clock, Box::new(ids))
    }

    /// Set the timezone used by calendar-day filters
    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = tz;
        self
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Read-only projections over the current store
    pub fn query(&self) -> LeadQuery<'_> {
        LeadQuery::new(&self.store, self.tz)
    }

    /// Subscribe to store change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine: the presentation layer may not be listening yet
        if self.event_tx.send(event).is_err() {
            tracing::trace!("No store event subscribers");
        }
    }
}

/// Refresh `updated_at`, strictly past its previous value
///
/// Two mutations inside the same millisecond still produce distinct,
/// increasing timestamps.
pub(crate) fn touch(lead: &mut Lead, now: i64) {
    lead.updated_at = now.max(lead.updated_at + 1);
}

/// Shared handle: the single serialization point for multi-owner access
pub type SharedEngine = Arc<RwLock<LeadEngine>>;

pub fn shared(engine: LeadEngine) -> SharedEngine {
    Arc::new(RwLock::new(engine))
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_touch_is_strictly_increasing() {
        let (mut engine, _clock) = engine_at(T0);
        let report = engine.bulk_ingest(rows(&["A"]));
        let id = &report.created[0];
        let lead = engine.store.lead_mut(id).unwrap();
        touch(lead, T0);
        assert_eq!(lead.updated_at, T0 + 1);
        touch(lead, T0 + 100);
        assert_eq!(lead.updated_at, T0 + 100);
    }

    #[test]
    fn test_events_reach_subscribers() {
        let (mut engine, _clock) = engine_at(T0);
        let mut rx = engine.subscribe();
        let emp = engine.create_employee(new_employee("John")).unwrap();
        match rx.try_recv().unwrap() {
            StoreEvent::EmployeeCreated { employee_id } => assert_eq!(employee_id, emp.id),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_emit_without_subscribers_is_harmless() {
        let (mut engine, _clock) = engine_at(T0);
        assert!(engine.create_employee(new_employee("Solo")).is_ok());
    }

    #[test]
    fn test_shared_handle_serializes_writers() {
        let (engine, _clock) = engine_at(T0);
        let handle = shared(engine);
        {
            let mut guard = handle.write();
            guard.create_employee(new_employee("Ann")).unwrap();
        }
        assert_eq!(handle.read().store().employees().len(), 1);
    }

    #[test]
    fn test_restore_resumes_employee_sequence() {
        let (mut engine, clock) = engine_at(T0);
        engine.create_employee(new_employee("A")).unwrap();
        engine.create_employee(new_employee("B")).unwrap();
        let snapshot = engine.store().clone();

        let mut restored = LeadEngine::restore(snapshot, Arc::new(clock));
        let c = restored.create_employee(new_employee("C")).unwrap();
        assert_eq!(c.id, "EMP003");
    }

    #[test]
    fn test_restore_never_reissues_deleted_employee_id() {
        let (mut engine, clock) = engine_at(T0);
        engine.create_employee(new_employee("A")).unwrap();
        let b = engine.create_employee(new_employee("B")).unwrap();
        engine.delete_employee(&b.id).unwrap();

        let mut restored = LeadEngine::restore(engine.store().clone(), Arc::new(clock));
        let c = restored.create_employee(new_employee("C")).unwrap();
        assert_ne!(c.id, b.id);
        assert_eq!(c.id, "EMP003");
    }

    #[test]
    fn test_restore_keeps_feedback_ids_unique_within_a_millisecond() {
        let (mut engine, clock) = engine_at(5_000);
        let lead_id = engine.bulk_ingest(rows(&["A"])).created.remove(0);
        let first = engine.add_feedback(&lead_id, "first").unwrap();

        let mut restored = LeadEngine::restore(engine.store().clone(), Arc::new(clock));
        let second = restored.add_feedback(&lead_id, "second").unwrap();
        assert_ne!(first.id, second.id);

        restored.delete_feedback(&lead_id, &second.id).unwrap();
        let texts: Vec<&str> = restored
            .store()
            .lead(&lead_id)
            .unwrap()
            .feedbacks
            .iter()
            .map(|f| f.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first"]);
    }
}
