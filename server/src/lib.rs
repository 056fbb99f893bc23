pub mod db;
pub mod employee;
pub mod error;
pub mod server;
pub mod validation;

pub use db::EmployeeDatabase;
pub use employee::{Employee, EmployeeFields, EmployeeId, EmployeePatch, NewEmployee};
pub use error::{StoreError, StoreResult};
pub use validation::ValidationError;
