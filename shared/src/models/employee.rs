//! Employee Model

use serde::{Deserialize, Serialize};

/// Job designation of a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Designation {
    #[default]
    Caller,
    Editor,
    Owner,
}

/// Availability of an employee
///
/// An employee on leave keeps their assigned leads, but their own calling
/// queue is frozen until they switch back to working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmployeeStatus {
    #[default]
    Working,
    Leave,
}

impl EmployeeStatus {
    /// Working ↔ Leave
    pub fn toggled(self) -> Self {
        match self {
            Self::Working => Self::Leave,
            Self::Leave => Self::Working,
        }
    }

    pub fn is_working(self) -> bool {
        self == Self::Working
    }
}

/// Employee entity (caller directory entry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// `EMP` + zero-padded sequence, never reused
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub designation: Designation,
    /// Plaintext shared secret, compared verbatim at login
    pub password: String,
    pub status: EmployeeStatus,
    pub created_at: i64,
}

/// Employee response (without password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub designation: Designation,
    pub status: EmployeeStatus,
    pub created_at: i64,
}

impl From<&Employee> for EmployeeResponse {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id.clone(),
            name: e.name.clone(),
            phone: e.phone.clone(),
            email: e.email.clone(),
            address: e.address.clone(),
            designation: e.designation,
            status: e.status,
            created_at: e.created_at,
        }
    }
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub designation: Designation,
    pub password: String,
}

/// Update employee payload
///
/// Only mutable fields exist here; `id` and `created_at` cannot be patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub designation: Option<Designation>,
    pub password: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl EmployeeUpdate {
    /// Whether the patch carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.designation.is_none()
            && self.password.is_none()
            && self.status.is_none()
    }
}
