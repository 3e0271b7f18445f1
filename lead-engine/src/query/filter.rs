//! Lead filter used by the data, assignment and dashboard screens

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{Lead, LeadStatus};

/// Which assignee a lead must have
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "employee_id", rename_all = "snake_case")]
pub enum EmployeeScope {
    #[default]
    All,
    Unassigned,
    /// Assigned to someone currently on leave
    OnLeave,
    Employee(String),
}

/// Ordering on `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFilter {
    #[serde(default)]
    pub scope: EmployeeScope,
    pub status: Option<LeadStatus>,
    /// Calendar day of `updated_at`, in the engine timezone
    pub date: Option<NaiveDate>,
    /// Case-insensitive substring of the name
    pub search: Option<String>,
    /// Also match `search` against the location
    #[serde(default)]
    pub search_location: bool,
    #[serde(default)]
    pub sort: SortOrder,
}

impl LeadFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: EmployeeScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn employee(self, employee_id: impl Into<String>) -> Self {
        self.scope(EmployeeScope::Employee(employee_id.into()))
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn search_location(mut self, enabled: bool) -> Self {
        self.search_location = enabled;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Lowercased search term, `None` when blank
    pub(crate) fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub(crate) fn matches_search(&self, lead: &Lead, needle: Option<&str>) -> bool {
        let Some(needle) = needle else {
            return true;
        };
        lead.name.to_lowercase().contains(needle)
            || (self.search_location && lead.location.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str, location: &str) -> Lead {
        Lead {
            id: "L1-0".into(),
            name: name.into(),
            phone: "555".into(),
            location: location.into(),
            status: LeadStatus::New,
            assigned_to: None,
            feedbacks: vec![],
            last_called_at: None,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let filter = LeadFilter::new().search("   ");
        assert_eq!(filter.needle(), None);
        assert!(filter.matches_search(&lead("Ann", "Austin"), None));
    }

    #[test]
    fn test_search_is_case_insensitive_and_location_opt_in() {
        let filter = LeadFilter::new().search("AUS");
        let needle = filter.needle();
        let l = lead("Ann", "Austin");
        assert!(!filter.matches_search(&l, needle.as_deref()));

        let filter = filter.search_location(true);
        assert!(filter.matches_search(&l, needle.as_deref()));
        assert!(filter.matches_search(&lead("Klaus", "Oslo"), needle.as_deref()));
    }

    #[test]
    fn test_scope_serde_shape() {
        let json = serde_json::to_value(EmployeeScope::Employee("EMP001".into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "employee", "employee_id": "EMP001"})
        );
        let all: EmployeeScope = serde_json::from_value(serde_json::json!({"kind": "all"})).unwrap();
        assert_eq!(all, EmployeeScope::All);
    }
}
