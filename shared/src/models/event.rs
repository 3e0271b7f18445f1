//! Store change notifications
//!
//! Emitted after every successful mutation so the presentation layer knows
//! which views to recompute. Rejected operations emit nothing.

use serde::{Deserialize, Serialize};

use super::{EmployeeStatus, LeadStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    EmployeeCreated {
        employee_id: String,
    },
    EmployeeUpdated {
        employee_id: String,
    },
    EmployeeDeleted {
        employee_id: String,
        /// Leads that lost their assignee through the cascade
        unassigned_leads: Vec<String>,
    },
    EmployeeStatusChanged {
        employee_id: String,
        status: EmployeeStatus,
    },
    LeadsIngested {
        lead_ids: Vec<String>,
    },
    LeadsAssigned {
        lead_ids: Vec<String>,
        employee_id: Option<String>,
    },
    LeadStatusChanged {
        lead_id: String,
        status: LeadStatus,
    },
    CallRecorded {
        lead_id: String,
        at: i64,
    },
    FeedbackAdded {
        lead_id: String,
        feedback_id: String,
    },
    FeedbackEdited {
        lead_id: String,
        feedback_id: String,
    },
    FeedbackDeleted {
        lead_id: String,
        feedback_id: String,
    },
    LeadsDeleted {
        lead_ids: Vec<String>,
    },
}
