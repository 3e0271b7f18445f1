//! Employee lifecycle

use shared::models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate, StoreEvent};

use super::{EngineError, EngineResult, LeadEngine, touch};
use crate::utils::validation::{validate_optional_text, validate_required_text};

impl LeadEngine {
    /// Register a new caller
    ///
    /// Every text field must be non-blank. Duplicate names are allowed.
    pub fn create_employee(&mut self, data: EmployeeCreate) -> EngineResult<Employee> {
        validate_required_text(&data.name, "name")?;
        validate_required_text(&data.phone, "phone")?;
        validate_required_text(&data.email, "email")?;
        validate_required_text(&data.address, "address")?;
        validate_required_text(&data.password, "password")?;

        let employee = Employee {
            id: self.ids.next_employee_id(),
            name: data.name,
            phone: data.phone,
            email: data.email,
            address: data.address,
            designation: data.designation,
            password: data.password,
            status: EmployeeStatus::Working,
            created_at: self.now(),
        };
        self.store.note_employee_id(&employee.id);
        self.store.push_employee(employee.clone());

        tracing::info!(employee_id = %employee.id, name = %employee.name, "Employee created");
        self.emit(StoreEvent::EmployeeCreated {
            employee_id: employee.id.clone(),
        });
        Ok(employee)
    }

    /// Merge the present fields of `patch` into the employee
    ///
    /// Unknown ids are reported as [`EngineError::EmployeeNotFound`].
    pub fn update_employee(&mut self, id: &str, patch: EmployeeUpdate) -> EngineResult<Employee> {
        if patch.is_empty() {
            tracing::debug!(employee_id = %id, "Empty employee patch");
            return self
                .store
                .employee(id)
                .cloned()
                .ok_or_else(|| EngineError::EmployeeNotFound(id.to_string()));
        }
        validate_optional_text(&patch.name, "name")?;
        validate_optional_text(&patch.phone, "phone")?;
        validate_optional_text(&patch.email, "email")?;
        validate_optional_text(&patch.address, "address")?;
        validate_optional_text(&patch.password, "password")?;

        let Some(employee) = self.store.employee_mut(id) else {
            tracing::warn!(employee_id = %id, "Update skipped, employee not found");
            return Err(EngineError::EmployeeNotFound(id.to_string()));
        };
        let previous_status = employee.status;

        let EmployeeUpdate {
            name,
            phone,
            email,
            address,
            designation,
            password,
            status,
        } = patch;
        if let Some(v) = name {
            employee.name = v;
        }
        if let Some(v) = phone {
            employee.phone = v;
        }
        if let Some(v) = email {
            employee.email = v;
        }
        if let Some(v) = address {
            employee.address = v;
        }
        if let Some(v) = designation {
            employee.designation = v;
        }
        if let Some(v) = password {
            employee.password = v;
        }
        if let Some(v) = status {
            employee.status = v;
        }
        let updated = employee.clone();

        tracing::info!(employee_id = %id, "Employee updated");
        self.emit(StoreEvent::EmployeeUpdated {
            employee_id: id.to_string(),
        });
        if updated.status != previous_status {
            tracing::info!(employee_id = %id, status = ?updated.status, "Employee availability changed");
            self.emit(StoreEvent::EmployeeStatusChanged {
                employee_id: id.to_string(),
                status: updated.status,
            });
        }
        Ok(updated)
    }

    /// Remove an employee and unassign every lead pointing at them
    ///
    /// Returns the ids of the leads that lost their assignee.
    pub fn delete_employee(&mut self, id: &str) -> EngineResult<Vec<String>> {
        if self.store.remove_employee(id).is_none() {
            tracing::warn!(employee_id = %id, "Delete skipped, employee not found");
            return Err(EngineError::EmployeeNotFound(id.to_string()));
        }

        let now = self.now();
        let mut unassigned = Vec::new();
        for lead in self.store.leads_mut() {
            if lead.is_assigned_to(id) {
                lead.assigned_to = None;
                touch(lead, now);
                unassigned.push(lead.id.clone());
            }
        }

        tracing::info!(
            employee_id = %id,
            unassigned = unassigned.len(),
            "Employee deleted, leads unassigned"
        );
        self.emit(StoreEvent::EmployeeDeleted {
            employee_id: id.to_string(),
            unassigned_leads: unassigned.clone(),
        });
        Ok(unassigned)
    }

    /// Flip Working ↔ Leave and return the new status
    ///
    /// Assigned leads are left alone; the query layer hides the queue of an
    /// employee on leave.
    pub fn toggle_employee_status(&mut self, id: &str) -> EngineResult<EmployeeStatus> {
        let Some(employee) = self.store.employee_mut(id) else {
            return Err(EngineError::EmployeeNotFound(id.to_string()));
        };
        employee.status = employee.status.toggled();
        let status = employee.status;

        tracing::info!(employee_id = %id, status = ?status, "Employee availability changed");
        self.emit(StoreEvent::EmployeeStatusChanged {
            employee_id: id.to_string(),
            status,
        });
        Ok(status)
    }

    pub fn get_employee(&self, id: &str) -> Option<&Employee> {
        self.store.employee(id)
    }

    pub fn employees(&self) -> &[Employee] {
        self.store.employees()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use shared::models::Designation;

    #[test]
    fn test_create_assigns_sequential_ids_and_defaults() {
        let (mut engine, _clock) = engine_at(T0);
        let a = engine.create_employee(new_employee("John")).unwrap();
        let b = engine.create_employee(new_employee("John")).unwrap();
        assert_eq!(a.id, "EMP001");
        assert_eq!(b.id, "EMP002");
        assert_eq!(a.status, EmployeeStatus::Working);
        assert_eq!(a.created_at, T0);
        assert_eq!(engine.employees().len(), 2);
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let (mut engine, _clock) = engine_at(T0);
        let mut data = new_employee("John");
        data.email = "   ".to_string();
        let result = engine.create_employee(data);
        assert!(matches!(result, Err(EngineError::Validation(_))));
        assert!(engine.employees().is_empty());

        // the failed attempt did not burn an id
        let ok = engine.create_employee(new_employee("Jane")).unwrap();
        assert_eq!(ok.id, "EMP001");
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let (mut engine, _clock) = engine_at(T0);
        engine.create_employee(new_employee("A")).unwrap();
        let b = engine.create_employee(new_employee("B")).unwrap();
        engine.delete_employee(&b.id).unwrap();
        let c = engine.create_employee(new_employee("C")).unwrap();
        assert_eq!(c.id, "EMP003");
    }

    #[test]
    fn test_update_merges_present_fields_only() {
        let (mut engine, clock) = engine_at(T0);
        let emp = engine.create_employee(new_employee("John")).unwrap();
        clock.advance(1_000);

        let updated = engine
            .update_employee(
                &emp.id,
                EmployeeUpdate {
                    password: Some("s3cret".to_string()),
                    designation: Some(Designation::Editor),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.password, "s3cret");
        assert_eq!(updated.designation, Designation::Editor);
        assert_eq!(updated.name, "John");
        assert_eq!(updated.created_at, T0);
        assert_eq!(updated.id, emp.id);
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let (mut engine, _clock) = engine_at(T0);
        engine.create_employee(new_employee("John")).unwrap();
        let before = engine.employees().to_vec();

        let result = engine.update_employee(
            "EMP404",
            EmployeeUpdate {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(result, Err(EngineError::EmployeeNotFound("EMP404".into())));
        assert_eq!(engine.employees(), before.as_slice());
    }

    #[test]
    fn test_empty_patch_emits_nothing() {
        let (mut engine, _clock) = engine_at(T0);
        let emp = engine.create_employee(new_employee("John")).unwrap();
        let mut rx = engine.subscribe();

        let same = engine.update_employee(&emp.id, EmployeeUpdate::default()).unwrap();
        assert_eq!(same, emp);
        assert!(rx.try_recv().is_err());
        assert!(engine.update_employee("EMP404", EmployeeUpdate::default()).is_err());
    }

    #[test]
    fn test_status_patch_announces_availability_change() {
        let (mut engine, _clock) = engine_at(T0);
        let emp = engine.create_employee(new_employee("John")).unwrap();
        let mut rx = engine.subscribe();

        let patch = EmployeeUpdate {
            status: Some(EmployeeStatus::Leave),
            ..Default::default()
        };
        engine.update_employee(&emp.id, patch.clone()).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            StoreEvent::EmployeeUpdated {
                employee_id: emp.id.clone()
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            StoreEvent::EmployeeStatusChanged {
                employee_id: emp.id.clone(),
                status: EmployeeStatus::Leave,
            }
        );

        // same status again: no availability event
        engine.update_employee(&emp.id, patch).unwrap();
        assert!(matches!(
            rx.try_recv().unwrap(),
            StoreEvent::EmployeeUpdated { .. }
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_update_rejects_blank_replacement() {
        let (mut engine, _clock) = engine_at(T0);
        let emp = engine.create_employee(new_employee("John")).unwrap();
        let result = engine.update_employee(
            &emp.id,
            EmployeeUpdate {
                name: Some("".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(EngineError::Validation(_))));
        assert_eq!(engine.get_employee(&emp.id).unwrap().name, "John");
    }

    #[test]
    fn test_delete_cascades_unassignment() {
        let (mut engine, clock) = engine_at(T0);
        let john = engine.create_employee(new_employee("John")).unwrap();
        let jane = engine.create_employee(new_employee("Jane")).unwrap();
        let report = engine.bulk_ingest(rows(&["A", "B", "C"]));
        let (a, b, c) = (&report.created[0], &report.created[1], &report.created[2]);
        engine
            .assign_leads(&[a.clone(), b.clone()], Some(&john.id))
            .unwrap();
        engine.assign_leads(&[c.clone()], Some(&jane.id)).unwrap();
        let before_b = engine.store().lead(b).unwrap().updated_at;

        clock.advance(10);
        let mut unassigned = engine.delete_employee(&john.id).unwrap();
        unassigned.sort();
        let mut expected = vec![a.clone(), b.clone()];
        expected.sort();
        assert_eq!(unassigned, expected);

        assert!(engine.get_employee(&john.id).is_none());
        assert_eq!(engine.store().lead(a).unwrap().assigned_to, None);
        assert!(engine.store().lead(b).unwrap().updated_at > before_b);
        assert_eq!(
            engine.store().lead(c).unwrap().assigned_to.as_deref(),
            Some(jane.id.as_str())
        );
        for lead in engine.store().leads() {
            if let Some(owner) = &lead.assigned_to {
                assert!(engine.store().contains_employee(owner));
            }
        }
    }

    #[test]
    fn test_delete_unknown_employee() {
        let (mut engine, _clock) = engine_at(T0);
        assert_eq!(
            engine.delete_employee("EMP001"),
            Err(EngineError::EmployeeNotFound("EMP001".into()))
        );
    }

    #[test]
    fn test_toggle_status_leaves_assignments() {
        let (mut engine, _clock) = engine_at(T0);
        let emp = engine.create_employee(new_employee("John")).unwrap();
        let report = engine.bulk_ingest(rows(&["A"]));
        engine
            .assign_leads(&report.created, Some(&emp.id))
            .unwrap();
        let lead_before = engine.store().lead(&report.created[0]).unwrap().clone();

        assert_eq!(
            engine.toggle_employee_status(&emp.id),
            Ok(EmployeeStatus::Leave)
        );
        assert_eq!(
            engine.store().lead(&report.created[0]).unwrap(),
            &lead_before
        );
        assert_eq!(
            engine.toggle_employee_status(&emp.id),
            Ok(EmployeeStatus::Working)
        );
        assert!(engine.toggle_employee_status("EMP999").is_err());
    }
}
