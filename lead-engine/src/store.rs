//! Entity store
//!
//! Authoritative in-memory collections of employees and leads. Pure data:
//! every rule about *how* they change lives in the engine.
//!
//! Leads are kept newest batch first, matching the order the console lists
//! them in right after an upload.

use std::collections::HashSet;

use shared::models::{Employee, Lead};

use crate::core::ids::{parse_employee_seq, parse_feedback_seq};

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    employees: Vec<Employee>,
    leads: Vec<Lead>,
    /// Timestamp handed to the last ingest batch
    last_batch_ts: i64,
    /// Highest employee sequence ever issued, deleted employees included
    employee_seq: u64,
    /// Highest feedback sequence ever issued
    feedback_seq: u64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously captured collections
    ///
    /// Without a recorded high-water mark the id sequences can only resume
    /// after the surviving ids; use [`EntityStore::with_id_marks`] to carry
    /// the marks of a store whose newest employee was deleted.
    pub fn from_parts(employees: Vec<Employee>, leads: Vec<Lead>) -> Self {
        let last_batch_ts = leads.iter().map(|l| l.created_at).max().unwrap_or(0);
        let employee_seq = employees
            .iter()
            .filter_map(|e| parse_employee_seq(&e.id))
            .max()
            .unwrap_or(0);
        let feedback_seq = leads
            .iter()
            .flat_map(|l| l.feedbacks.iter())
            .filter_map(|f| parse_feedback_seq(&f.id))
            .max()
            .unwrap_or(0);
        Self {
            employees,
            leads,
            last_batch_ts,
            employee_seq,
            feedback_seq,
        }
    }

    /// Raise the id high-water marks to at least the given values
    pub fn with_id_marks(mut self, employee_seq: u64, feedback_seq: u64) -> Self {
        self.employee_seq = self.employee_seq.max(employee_seq);
        self.feedback_seq = self.feedback_seq.max(feedback_seq);
        self
    }

    // ========== Employees ==========

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub(crate) fn employee_mut(&mut self, id: &str) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| e.id == id)
    }

    pub fn contains_employee(&self, id: &str) -> bool {
        self.employee(id).is_some()
    }

    pub(crate) fn push_employee(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    pub(crate) fn remove_employee(&mut self, id: &str) -> Option<Employee> {
        let pos = self.employees.iter().position(|e| e.id == id)?;
        Some(self.employees.remove(pos))
    }

    // ========== Leads ==========

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn lead(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    pub(crate) fn lead_mut(&mut self, id: &str) -> Option<&mut Lead> {
        self.leads.iter_mut().find(|l| l.id == id)
    }

    pub(crate) fn leads_mut(&mut self) -> impl Iterator<Item = &mut Lead> {
        self.leads.iter_mut()
    }

    /// Insert a batch ahead of everything already stored, keeping batch order
    pub(crate) fn prepend_leads(&mut self, batch: Vec<Lead>) {
        if batch.is_empty() {
            return;
        }
        let mut merged = batch;
        merged.append(&mut self.leads);
        self.leads = merged;
    }

    /// Remove every lead whose id is in `ids`, returning the removed ids
    pub(crate) fn remove_leads(&mut self, ids: &HashSet<&str>) -> Vec<String> {
        let mut removed = Vec::new();
        self.leads.retain(|l| {
            if ids.contains(l.id.as_str()) {
                removed.push(l.id.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    // ========== Id policy ==========

    pub fn employee_seq(&self) -> u64 {
        self.employee_seq
    }

    pub fn feedback_seq(&self) -> u64 {
        self.feedback_seq
    }

    /// Record an issued employee id so a restore never hands it out again
    pub(crate) fn note_employee_id(&mut self, id: &str) {
        if let Some(seq) = parse_employee_seq(id) {
            self.employee_seq = self.employee_seq.max(seq);
        }
    }

    /// Record an issued feedback id
    pub(crate) fn note_feedback_id(&mut self, id: &str) {
        if let Some(seq) = parse_feedback_seq(id) {
            self.feedback_seq = self.feedback_seq.max(seq);
        }
    }

    /// Claim the timestamp for a new ingest batch
    ///
    /// Strictly greater than any previous batch, so `(batch_ts, row)` lead ids
    /// stay unique even when two uploads land in the same millisecond.
    pub(crate) fn claim_batch_ts(&mut self, now: i64) -> i64 {
        let ts = now.max(self.last_batch_ts + 1);
        self.last_batch_ts = ts;
        ts
    }
}
