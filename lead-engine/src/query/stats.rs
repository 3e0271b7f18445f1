//! Aggregate views: status counts and per-employee stats

use serde::Serialize;
use shared::models::{Feedback, Lead, LeadStatus};

/// One bucket per status plus the total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub connected: usize,
    pub interested: usize,
    pub not_interested: usize,
    pub call_back: usize,
    pub not_connected: usize,
    pub invalid: usize,
    pub total: usize,
}

impl StatusCounts {
    pub fn from_leads<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> Self {
        let mut counts = Self::default();
        for lead in leads {
            *counts.bucket_mut(lead.status) += 1;
            counts.total += 1;
        }
        counts
    }

    pub fn get(&self, status: LeadStatus) -> usize {
        match status {
            LeadStatus::New => self.new,
            LeadStatus::Connected => self.connected,
            LeadStatus::Interested => self.interested,
            LeadStatus::NotInterested => self.not_interested,
            LeadStatus::CallBack => self.call_back,
            LeadStatus::NotConnected => self.not_connected,
            LeadStatus::Invalid => self.invalid,
        }
    }

    fn bucket_mut(&mut self, status: LeadStatus) -> &mut usize {
        match status {
            LeadStatus::New => &mut self.new,
            LeadStatus::Connected => &mut self.connected,
            LeadStatus::Interested => &mut self.interested,
            LeadStatus::NotInterested => &mut self.not_interested,
            LeadStatus::CallBack => &mut self.call_back,
            LeadStatus::NotConnected => &mut self.not_connected,
            LeadStatus::Invalid => &mut self.invalid,
        }
    }
}

/// Personal dashboard numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeStats {
    pub total: usize,
    pub interested: usize,
    pub connected: usize,
    /// NEW + CALL_BACK
    pub pending: usize,
    pub not_interested: usize,
}

impl EmployeeStats {
    pub fn from_leads<'a>(leads: impl IntoIterator<Item = &'a Lead>) -> Self {
        let mut stats = Self::default();
        for lead in leads {
            stats.total += 1;
            match lead.status {
                LeadStatus::Interested => stats.interested += 1,
                LeadStatus::Connected => stats.connected += 1,
                LeadStatus::NotInterested => stats.not_interested += 1,
                s if s.is_pending() => stats.pending += 1,
                _ => {}
            }
        }
        stats
    }
}

/// A feedback entry together with the lead it belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackEntry<'a> {
    pub lead_id: &'a str,
    pub lead_name: &'a str,
    pub lead_status: LeadStatus,
    pub feedback: &'a Feedback,
}
