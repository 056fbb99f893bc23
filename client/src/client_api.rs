use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Id type for employee records, assigned by the server.
pub type EmployeeId = u64;

/// An employee as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub hire_date: String,
}

/// [`NewEmployee`] is the payload for creating a record. The server trims and
/// normalizes every field, so values may be sent as typed by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    pub hire_date: String,
}

/// [`EmployeeUpdate`] carries only the fields to change. `None` fields are
/// left out of the request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
}

impl EmployeeUpdate {
    /// Sets a field by its wire name. Returns `false` for unknown names.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "department" => &mut self.department,
            "role" => &mut self.role,
            "hire_date" => &mut self.hire_date,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Payload of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// [`EmployeeApi`] is the interface a caller uses to talk to the employee
/// service. Lookup misses are `Ok(None)` / `Ok(false)`; validation and
/// duplicate-email rejections surface as errors carrying the server message.
#[async_trait::async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn health(&self) -> Result<HealthStatus>;

    async fn create(&self, employee: &NewEmployee) -> Result<Employee>;

    async fn list(&self) -> Result<Vec<Employee>>;

    async fn get(&self, id: EmployeeId) -> Result<Option<Employee>>;

    async fn update(&self, id: EmployeeId, update: &EmployeeUpdate) -> Result<Option<Employee>>;

    async fn delete(&self, id: EmployeeId) -> Result<bool>;

    async fn search(&self, department: &str) -> Result<Vec<Employee>>;
}
