//! Lead Model

use serde::{Deserialize, Serialize};

/// Hard cap on feedback entries per lead
pub const MAX_FEEDBACKS_PER_LEAD: usize = 3;

/// Call outcome of a lead
///
/// Transitions are free: any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    #[default]
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Connected")]
    Connected,
    #[serde(rename = "Interested")]
    Interested,
    #[serde(rename = "Not Interested")]
    NotInterested,
    #[serde(rename = "Call Back")]
    CallBack,
    #[serde(rename = "Not Connected")]
    NotConnected,
    #[serde(rename = "Invalid")]
    Invalid,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 7] = [
        LeadStatus::New,
        LeadStatus::Connected,
        LeadStatus::Interested,
        LeadStatus::NotInterested,
        LeadStatus::CallBack,
        LeadStatus::NotConnected,
        LeadStatus::Invalid,
    ];

    /// Queue priority: New before Call Back before everything else
    pub fn priority(self) -> u8 {
        match self {
            Self::New => 3,
            Self::CallBack => 2,
            _ => 1,
        }
    }

    /// Still waiting for a conversation (New or Call Back)
    pub fn is_pending(self) -> bool {
        matches!(self, Self::New | Self::CallBack)
    }

    /// Display label, identical to the serialized form
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Connected => "Connected",
            Self::Interested => "Interested",
            Self::NotInterested => "Not Interested",
            Self::CallBack => "Call Back",
            Self::NotConnected => "Not Connected",
            Self::Invalid => "Invalid",
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A timestamped note on a lead's call history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub text: String,
    pub timestamp: i64,
}

/// Lead entity (prospect record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub location: String,
    pub status: LeadStatus,
    /// Employee id; weak reference, `None` means unassigned
    pub assigned_to: Option<String>,
    /// Insertion order is call-history order, at most [`MAX_FEEDBACKS_PER_LEAD`]
    pub feedbacks: Vec<Feedback>,
    pub last_called_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Lead {
    pub fn is_assigned_to(&self, employee_id: &str) -> bool {
        self.assigned_to.as_deref() == Some(employee_id)
    }

    pub fn has_feedback_capacity(&self) -> bool {
        self.feedbacks.len() < MAX_FEEDBACKS_PER_LEAD
    }

    pub fn find_feedback_mut(&mut self, feedback_id: &str) -> Option<&mut Feedback> {
        self.feedbacks.iter_mut().find(|f| f.id == feedback_id)
    }
}

/// One row handed over by the bulk-ingest source
///
/// The upload template names the phone column `number`, so both spellings
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadImportRow {
    pub name: String,
    #[serde(alias = "number")]
    pub phone: String,
    pub location: String,
}

impl LeadImportRow {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            location: location.into(),
        }
    }

    /// All three required fields carry non-blank text
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.phone.trim().is_empty()
            && !self.location.trim().is_empty()
    }
}
