// db.rs
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::employee::{Employee, EmployeeFields, EmployeeId, EmployeePatch};
use crate::error::{StoreError, StoreResult};
use crate::validation::{normalize_email, validate_employee};

struct Records {
    // Ids only grow, so key order is insertion order.
    employees: BTreeMap<EmployeeId, Employee>,
    next_id: EmployeeId,
}

impl Records {
    fn new() -> Self {
        Records {
            employees: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn email_taken(&self, email: &str, except: Option<EmployeeId>) -> bool {
        self.employees
            .values()
            .any(|emp| Some(emp.id) != except && emp.email == email)
    }
}

/// In-memory employee store. Every operation runs under one lock guarding
/// both the records and the id counter.
pub struct EmployeeDatabase {
    store: Mutex<Records>,
}

impl Default for EmployeeDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeDatabase {
    pub fn new() -> Self {
        EmployeeDatabase {
            store: Mutex::new(Records::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Records> {
        // Mutations are staged before they touch the map, so a panicked
        // holder cannot leave a half-written record behind.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validates `fields` and stores a new employee under the next id.
    pub fn create(&self, fields: &EmployeeFields) -> StoreResult<Employee> {
        let mut store = self.lock();
        if let Some(Value::String(raw)) = fields.get("email") {
            let email = normalize_email(raw);
            if store.email_taken(&email, None) {
                warn!("rejected create: email {} already exists", email);
                return Err(StoreError::DuplicateEmail(email));
            }
        }
        let new_employee = validate_employee(fields).map_err(|e| {
            debug!("rejected create: {}", e);
            e
        })?;

        let id = store.next_id;
        let employee = new_employee.with_id(id);
        store.employees.insert(id, employee.clone());
        store.next_id += 1;
        info!("created employee {} ({})", id, employee.email);
        Ok(employee)
    }

    pub fn get_by_id(&self, id: EmployeeId) -> Option<Employee> {
        let store = self.lock();
        debug!("get employee {}", id);
        store.employees.get(&id).cloned()
    }

    /// Snapshot of every employee in insertion order.
    pub fn get_all(&self) -> Vec<Employee> {
        let store = self.lock();
        debug!("get all employees ({} records)", store.employees.len());
        store.employees.values().cloned().collect()
    }

    /// Applies the fields present in `fields` to employee `id`.
    ///
    /// Returns `Ok(None)` when there is no such employee. An `id` key in
    /// `fields` is ignored. Either every supplied field is applied or none is.
    pub fn update(&self, id: EmployeeId, fields: &EmployeeFields) -> StoreResult<Option<Employee>> {
        let mut store = self.lock();
        if !store.employees.contains_key(&id) {
            debug!("update: employee {} not found", id);
            return Ok(None);
        }
        if let Some(Value::String(raw)) = fields.get("email") {
            let email = normalize_email(raw);
            if store.email_taken(&email, Some(id)) {
                warn!("rejected update of {}: email {} already exists", id, email);
                return Err(StoreError::DuplicateEmail(email));
            }
        }
        let patch = EmployeePatch::from_fields(fields).map_err(|e| {
            debug!("rejected update of {}: {}", id, e);
            e
        })?;

        let employee = match store.employees.get_mut(&id) {
            Some(employee) => employee,
            None => return Ok(None),
        };
        if !patch.is_empty() {
            patch.apply_to(employee);
            info!("updated employee {}", id);
        }
        Ok(Some(employee.clone()))
    }

    /// Removes employee `id`. The id is never handed out again.
    pub fn delete(&self, id: EmployeeId) -> bool {
        let mut store = self.lock();
        let removed = store.employees.remove(&id).is_some();
        if removed {
            info!("deleted employee {}", id);
        }
        removed
    }

    /// Case-insensitive exact match on the trimmed department name.
    pub fn search_by_department(&self, department: &str) -> Vec<Employee> {
        let wanted = department.trim().to_lowercase();
        let store = self.lock();
        debug!("search department '{}'", wanted);
        store
            .employees
            .values()
            .filter(|emp| emp.department.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    /// Drops every record and restarts ids at 1.
    pub fn clear(&self) {
        let mut store = self.lock();
        *store = Records::new();
        info!("cleared employee store");
    }

    pub fn len(&self) -> usize {
        self.lock().employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
