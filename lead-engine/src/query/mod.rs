//! Query / projection layer
//!
//! Read-only views recomputed from the store on every call. Nothing here
//! caches, so a view is always consistent with the latest mutation.

mod filter;
mod stats;

pub use filter::{EmployeeScope, LeadFilter, SortOrder};
pub use stats::{EmployeeStats, FeedbackEntry, StatusCounts};

use std::cmp::Reverse;

use chrono_tz::Tz;
use shared::models::{EmployeeStatus, Feedback, Lead};

use crate::store::EntityStore;
use crate::utils::time::is_on_date;

/// What a caller sees when opening their calling screen
#[derive(Debug, Clone, PartialEq)]
pub enum QueueView<'a> {
    /// Priority-ordered leads of a working employee
    Available(Vec<&'a Lead>),
    /// Queue hidden while the employee is on leave
    OnLeave,
    UnknownEmployee,
}

#[derive(Debug, Clone, Copy)]
pub struct LeadQuery<'a> {
    store: &'a EntityStore,
    tz: Tz,
}

impl<'a> LeadQuery<'a> {
    pub fn new(store: &'a EntityStore, tz: Tz) -> Self {
        Self { store, tz }
    }

    /// Leads assigned to `employee_id`, highest priority first
    ///
    /// NEW (3) > CALL_BACK (2) > everything else (1). Ties keep store order.
    pub fn queue_for(&self, employee_id: &str) -> Vec<&'a Lead> {
        let mut queue: Vec<&Lead> = self
            .store
            .leads()
            .iter()
            .filter(|l| l.is_assigned_to(employee_id))
            .collect();
        queue.sort_by_key(|l| Reverse(l.status.priority()));
        queue
    }

    /// The queue as the employee's own calling screen shows it
    pub fn calling_queue(&self, employee_id: &str) -> QueueView<'a> {
        match self.store.employee(employee_id) {
            None => QueueView::UnknownEmployee,
            Some(e) if !e.status.is_working() => QueueView::OnLeave,
            Some(_) => QueueView::Available(self.queue_for(employee_id)),
        }
    }

    /// Leads matching every criterion of `filter`, in its sort order
    pub fn filter(&self, filter: &LeadFilter) -> Vec<&'a Lead> {
        let mut leads = self.select(filter, true);
        match filter.sort {
            SortOrder::Newest => leads.sort_by_key(|l| Reverse(l.created_at)),
            SortOrder::Oldest => leads.sort_by_key(|l| l.created_at),
        }
        leads
    }

    /// Per-status counts over the leads `filter` selects
    ///
    /// The status criterion is ignored so every bucket stays meaningful.
    pub fn status_counts(&self, filter: &LeadFilter) -> StatusCounts {
        StatusCounts::from_leads(self.select(filter, false))
    }

    /// Leads whose assignee is currently on leave
    pub fn on_leave_assignments(&self) -> Vec<&'a Lead> {
        self.store
            .leads()
            .iter()
            .filter(|l| self.assignee_on_leave(l))
            .collect()
    }

    pub fn employee_stats(&self, employee_id: &str) -> EmployeeStats {
        EmployeeStats::from_leads(
            self.store
                .leads()
                .iter()
                .filter(|l| l.is_assigned_to(employee_id)),
        )
    }

    /// Newest feedback across the employee's leads
    pub fn recent_feedback(&self, employee_id: &str, limit: usize) -> Vec<FeedbackEntry<'a>> {
        let mut entries: Vec<FeedbackEntry<'a>> = self
            .store
            .leads()
            .iter()
            .filter(|l| l.is_assigned_to(employee_id))
            .flat_map(|lead| {
                lead.feedbacks.iter().map(move |feedback| FeedbackEntry {
                    lead_id: &lead.id,
                    lead_name: &lead.name,
                    lead_status: lead.status,
                    feedback,
                })
            })
            .collect();
        entries.sort_by_key(|e| Reverse(e.feedback.timestamp));
        entries.truncate(limit);
        entries
    }

    /// A lead's feedback, newest first; `None` for an unknown lead
    pub fn feedback_history(&self, lead_id: &str) -> Option<Vec<&'a Feedback>> {
        let lead = self.store.lead(lead_id)?;
        Some(lead.feedbacks.iter().rev().collect())
    }

    fn select(&self, filter: &LeadFilter, with_status: bool) -> Vec<&'a Lead> {
        let needle = filter.needle();
        self.store
            .leads()
            .iter()
            .filter(|l| self.in_scope(l, &filter.scope))
            .filter(|l| !with_status || filter.status.is_none_or(|s| l.status == s))
            .filter(|l| filter.date.is_none_or(|d| is_on_date(l.updated_at, d, self.tz)))
            .filter(|l| filter.matches_search(l, needle.as_deref()))
            .collect()
    }

    fn in_scope(&self, lead: &Lead, scope: &EmployeeScope) -> bool {
        match scope {
            EmployeeScope::All => true,
            EmployeeScope::Unassigned => lead.assigned_to.is_none(),
            EmployeeScope::OnLeave => self.assignee_on_leave(lead),
            EmployeeScope::Employee(id) => lead.is_assigned_to(id),
        }
    }

    fn assignee_on_leave(&self, lead: &Lead) -> bool {
        lead.assigned_to
            .as_deref()
            .and_then(|id| self.store.employee(id))
            .is_some_and(|e| e.status == EmployeeStatus::Leave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LeadEngine;
    use crate::engine::test_support::*;
    use chrono::NaiveDate;
    use shared::models::LeadStatus;

    /// John holds A (New), B (Call Back), C (Interested); D is unassigned
    fn seeded() -> (LeadEngine, String, Vec<String>) {
        let (mut engine, clock) = engine_at(T0);
        let john = engine.create_employee(new_employee("John")).unwrap();
        let ids = engine.bulk_ingest(rows(&["Alice", "Bob", "Carol", "Dave"])).created;
        engine
            .assign_leads(&ids[..3], Some(&john.id))
            .unwrap();
        clock.advance(1);
        engine.update_lead_status(&ids[2], LeadStatus::Interested).unwrap();
        engine.update_lead_status(&ids[1], LeadStatus::CallBack).unwrap();
        (engine, john.id, ids)
    }

    #[test]
    fn test_queue_orders_by_priority_stably() {
        let (engine, john, ids) = seeded();
        let queue: Vec<&str> = engine
            .query()
            .queue_for(&john)
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(queue, vec![ids[0].as_str(), ids[1].as_str(), ids[2].as_str()]);
    }

    #[test]
    fn test_calling_queue_hidden_on_leave() {
        let (mut engine, john, _ids) = seeded();
        assert!(matches!(
            engine.query().calling_queue(&john),
            QueueView::Available(q) if q.len() == 3
        ));

        engine.toggle_employee_status(&john).unwrap();
        assert_eq!(engine.query().calling_queue(&john), QueueView::OnLeave);
        assert_eq!(engine.query().calling_queue("EMP999"), QueueView::UnknownEmployee);
        assert_eq!(engine.query().on_leave_assignments().len(), 3);
    }

    #[test]
    fn test_filter_scopes() {
        let (engine, john, ids) = seeded();
        let q = engine.query();
        assert_eq!(q.filter(&LeadFilter::new()).len(), 4);
        let unassigned = q.filter(&LeadFilter::new().scope(EmployeeScope::Unassigned));
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].id, ids[3]);
        assert_eq!(q.filter(&LeadFilter::new().employee(john.clone())).len(), 3);
        assert!(q.filter(&LeadFilter::new().scope(EmployeeScope::OnLeave)).is_empty());
        let interested = q.filter(&LeadFilter::new().status(LeadStatus::Interested));
        assert_eq!(interested.len(), 1);
    }

    #[test]
    fn test_filter_sort_and_search() {
        let (mut engine, _john, first) = seeded();
        let later = engine.bulk_ingest(rows(&["alfred"])).created;

        let q = engine.query();
        let newest = q.filter(&LeadFilter::new());
        assert_eq!(newest[0].id, later[0]);
        assert_eq!(newest[1].id, first[0]);
        let oldest = q.filter(&LeadFilter::new().sort(SortOrder::Oldest));
        assert_eq!(oldest[0].id, first[0]);
        assert_eq!(oldest.last().unwrap().id, later[0]);

        let found = q.filter(&LeadFilter::new().search("AL"));
        let names: Vec<&str> = found.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["alfred", "Alice"]);
    }

    #[test]
    fn test_filter_by_updated_date_in_timezone() {
        let (engine, _john, _ids) = seeded();
        let june_1 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(engine.query().filter(&LeadFilter::new().date(june_1)).len(), 4);

        let ny = engine.with_timezone(chrono_tz::America::New_York);
        assert!(ny.query().filter(&LeadFilter::new().date(june_1)).is_empty());
    }

    #[test]
    fn test_status_counts_ignore_status_criterion() {
        let (engine, john, _ids) = seeded();
        let counts = engine
            .query()
            .status_counts(&LeadFilter::new().employee(john).status(LeadStatus::New));
        assert_eq!(counts.total, 3);
        assert_eq!(counts.new, 1);
        assert_eq!(counts.call_back, 1);
        assert_eq!(counts.interested, 1);
    }

    #[test]
    fn test_employee_stats() {
        let (engine, john, _ids) = seeded();
        let stats = engine.query().employee_stats(&john);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.interested, 1);
    }

    #[test]
    fn test_recent_feedback_and_history() {
        let (mut engine, clock) = engine_at(T0);
        let john = engine.create_employee(new_employee("John")).unwrap();
        let ids = engine.bulk_ingest(rows(&["A", "B"])).created;
        engine.assign_leads(&ids, Some(&john.id)).unwrap();

        clock.advance(10);
        engine.add_feedback(&ids[0], "first").unwrap();
        clock.advance(10);
        engine.add_feedback(&ids[1], "second").unwrap();
        clock.advance(10);
        engine.add_feedback(&ids[0], "third").unwrap();

        let q = engine.query();
        let recent = q.recent_feedback(&john.id, 2);
        let texts: Vec<&str> = recent.iter().map(|e| e.feedback.text.as_str()).collect();
        assert_eq!(texts, vec!["third", "second"]);
        assert_eq!(recent[1].lead_name, "B");

        let history = q.feedback_history(&ids[0]).unwrap();
        assert_eq!(history[0].text, "third");
        assert_eq!(history[1].text, "first");
        assert!(q.feedback_history("L0-0").is_none());
    }
}
