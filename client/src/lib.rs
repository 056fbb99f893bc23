pub mod client_api;
pub mod employee_client;
