//! Lead lifecycle: ingest, assignment, status, calls, deletion

use std::collections::HashSet;

use serde::Serialize;
use shared::models::{EmployeeStatus, Lead, LeadImportRow, LeadStatus, StoreEvent};

use super::{EngineError, EngineResult, LeadEngine, touch};

/// Outcome of a bulk ingest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Ids of the created leads, in row order
    pub created: Vec<String>,
    /// Rows dropped for a missing name, phone or location
    pub dropped: usize,
}

/// Outcome of an assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignReport {
    pub assigned: Vec<String>,
    /// Requested ids with no matching lead
    pub unknown: Vec<String>,
    /// The target employee is currently on leave
    pub employee_on_leave: bool,
}

impl LeadEngine {
    /// Create one lead per complete row
    ///
    /// All accepted rows share one batch timestamp and are placed ahead of
    /// the existing leads, row order preserved.
    pub fn bulk_ingest(&mut self, rows: Vec<LeadImportRow>) -> IngestReport {
        let total = rows.len();
        let accepted: Vec<LeadImportRow> = rows.into_iter().filter(|r| r.is_complete()).collect();
        let dropped = total - accepted.len();
        if accepted.is_empty() {
            tracing::warn!(dropped, "Ingest produced no leads");
            return IngestReport {
                created: Vec::new(),
                dropped,
            };
        }

        let batch_ts = self.store.claim_batch_ts(self.now());
        let batch: Vec<Lead> = accepted
            .into_iter()
            .enumerate()
            .map(|(idx, row)| Lead {
                id: self.ids.lead_id(batch_ts, idx),
                name: row.name.trim().to_string(),
                phone: row.phone.trim().to_string(),
                location: row.location.trim().to_string(),
                status: LeadStatus::New,
                assigned_to: None,
                feedbacks: Vec::new(),
                last_called_at: None,
                created_at: batch_ts,
                updated_at: batch_ts,
            })
            .collect();
        let created: Vec<String> = batch.iter().map(|l| l.id.clone()).collect();
        self.store.prepend_leads(batch);

        tracing::info!(batch_ts, created = created.len(), dropped, "Leads ingested");
        self.emit(StoreEvent::LeadsIngested {
            lead_ids: created.clone(),
        });
        IngestReport { created, dropped }
    }

    /// Point every known lead in `ids` at `employee_id` (`None` unassigns)
    ///
    /// Unknown lead ids are skipped and reported. A target employee that does
    /// not exist rejects the whole call; one on leave is accepted and flagged.
    pub fn assign_leads(
        &mut self,
        ids: &[String],
        employee_id: Option<&str>,
    ) -> EngineResult<AssignReport> {
        let employee_on_leave = match employee_id {
            Some(emp_id) => {
                let Some(employee) = self.store.employee(emp_id) else {
                    tracing::warn!(employee_id = %emp_id, "Assignment rejected, employee not found");
                    return Err(EngineError::EmployeeNotFound(emp_id.to_string()));
                };
                employee.status == EmployeeStatus::Leave
            }
            None => false,
        };

        let now = self.now();
        let mut report = AssignReport {
            employee_on_leave,
            ..Default::default()
        };
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id.as_str()) {
                continue;
            }
            match self.store.lead_mut(id) {
                Some(lead) => {
                    lead.assigned_to = employee_id.map(str::to_string);
                    touch(lead, now);
                    report.assigned.push(id.clone());
                }
                None => report.unknown.push(id.clone()),
            }
        }

        if employee_on_leave {
            tracing::warn!(
                employee_id = ?employee_id,
                count = report.assigned.len(),
                "Leads assigned to an employee on leave"
            );
        } else {
            tracing::info!(
                employee_id = ?employee_id,
                assigned = report.assigned.len(),
                unknown = report.unknown.len(),
                "Leads assigned"
            );
        }
        if !report.assigned.is_empty() {
            self.emit(StoreEvent::LeadsAssigned {
                lead_ids: report.assigned.clone(),
                employee_id: employee_id.map(str::to_string),
            });
        }
        Ok(report)
    }

    /// Any status to any status
    pub fn update_lead_status(&mut self, id: &str, status: LeadStatus) -> EngineResult<Lead> {
        let now = self.now();
        let lead = self
            .store
            .lead_mut(id)
            .ok_or_else(|| EngineError::LeadNotFound(id.to_string()))?;
        let from = lead.status;
        lead.status = status;
        touch(lead, now);
        let updated = lead.clone();

        tracing::info!(lead_id = %id, from = %from, to = %status, "Lead status changed");
        self.emit(StoreEvent::LeadStatusChanged {
            lead_id: id.to_string(),
            status,
        });
        Ok(updated)
    }

    /// Stamp `last_called_at` with the current time
    pub fn record_call(&mut self, id: &str) -> EngineResult<Lead> {
        let now = self.now();
        let lead = self
            .store
            .lead_mut(id)
            .ok_or_else(|| EngineError::LeadNotFound(id.to_string()))?;
        lead.last_called_at = Some(now);
        touch(lead, now);
        let updated = lead.clone();

        tracing::info!(lead_id = %id, at = now, "Call recorded");
        self.emit(StoreEvent::CallRecorded {
            lead_id: id.to_string(),
            at: now,
        });
        Ok(updated)
    }

    pub fn delete_lead(&mut self, id: &str) -> EngineResult<()> {
        if self.store.lead(id).is_none() {
            return Err(EngineError::LeadNotFound(id.to_string()));
        }
        self.delete_leads(&[id.to_string()]);
        Ok(())
    }

    /// Remove every lead in `ids`; unknown ids are ignored
    ///
    /// Returns the ids actually removed.
    pub fn delete_leads(&mut self, ids: &[String]) -> Vec<String> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let removed = self.store.remove_leads(&wanted);
        if removed.is_empty() {
            tracing::debug!(requested = ids.len(), "Nothing to delete");
            return removed;
        }

        tracing::info!(count = removed.len(), "Leads deleted");
        self.emit(StoreEvent::LeadsDeleted {
            lead_ids: removed.clone(),
        });
        removed
    }
}
