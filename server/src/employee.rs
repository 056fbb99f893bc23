// employee.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::{
    validate_department, validate_email, validate_hire_date, validate_name, validate_role,
    ValidationResult,
};

pub type EmployeeId = u64;

/// Raw field mapping as received from a request body.
pub type EmployeeFields = Map<String, Value>;

/// A stored employee record. Every string field is already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub hire_date: String,
}

/// A fully validated record that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub hire_date: String,
}

impl NewEmployee {
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            name: self.name,
            email: self.email,
            department: self.department,
            role: self.role,
            hire_date: self.hire_date,
        }
    }
}

/// Validated partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub hire_date: Option<String>,
}

impl EmployeePatch {
    /// Validates the known fields present in `fields`. `id` and unknown keys
    /// are ignored.
    pub fn from_fields(fields: &EmployeeFields) -> ValidationResult<Self> {
        Ok(Self {
            name: fields.get("name").map(|v| validate_name(Some(v))).transpose()?,
            email: fields.get("email").map(|v| validate_email(Some(v))).transpose()?,
            department: fields
                .get("department")
                .map(|v| validate_department(Some(v)))
                .transpose()?,
            role: fields.get("role").map(|v| validate_role(Some(v))).transpose()?,
            hire_date: fields
                .get("hire_date")
                .map(|v| validate_hire_date(Some(v)))
                .transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(email) = self.email {
            employee.email = email;
        }
        if let Some(department) = self.department {
            employee.department = department;
        }
        if let Some(role) = self.role {
            employee.role = role;
        }
        if let Some(hire_date) = self.hire_date {
            employee.hire_date = hire_date;
        }
    }
}
