// server.rs
use log::{debug, error};
use rocket::fairing::AdHoc;
use rocket::http::{Header, Status};
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::{self, Json};
use rocket::{catch, catchers, delete, get, options, patch, post, put, routes, Build, Rocket, State};
use serde::Serialize;
use serde_json::{json, Value};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use crate::db::EmployeeDatabase;
use crate::employee::{EmployeeFields, EmployeeId};
use crate::error::StoreError;

pub const DEFAULT_PORT: u16 = 5000;

/// JSON envelope returned by every endpoint:
/// `{"success": true, "data": ...}` or `{"success": false, "error": "..."}`.
#[derive(Debug)]
pub struct ApiResponse {
    status: Status,
    body: Value,
}

impl ApiResponse {
    pub fn success<T: Serialize>(status: Status, data: T) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => ApiResponse {
                status,
                body: json!({ "success": true, "data": data }),
            },
            Err(e) => {
                error!("failed to serialize response: {}", e);
                Self::error(Status::InternalServerError, "Internal server error")
            }
        }
    }

    pub fn error(status: Status, message: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: json!({ "success": false, "error": message.into() }),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

impl From<StoreError> for ApiResponse {
    fn from(err: StoreError) -> Self {
        ApiResponse::error(Status::BadRequest, err.to_string())
    }
}

impl<'r> Responder<'r, 'static> for ApiResponse {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        (self.status, Json(self.body)).respond_to(req)
    }
}

type JsonBody<'r> = Result<Json<Value>, json::Error<'r>>;

/// Unwraps a request body into a non-empty field mapping.
fn require_fields(body: JsonBody<'_>) -> Result<EmployeeFields, ApiResponse> {
    match body {
        Ok(Json(Value::Object(fields))) if !fields.is_empty() => Ok(fields),
        Ok(Json(Value::Object(_))) | Ok(Json(Value::Null)) => {
            Err(ApiResponse::error(Status::BadRequest, "Request body is required"))
        }
        Ok(Json(_)) => Err(ApiResponse::error(
            Status::BadRequest,
            "Request body must be a JSON object",
        )),
        Err(json::Error::Parse(raw, _)) if raw.trim().is_empty() => {
            Err(ApiResponse::error(Status::BadRequest, "Request body is required"))
        }
        Err(e) => {
            debug!("unreadable request body: {}", e);
            Err(ApiResponse::error(
                Status::BadRequest,
                "Request body must be valid JSON",
            ))
        }
    }
}

/// Anything but plain digits is treated as an unknown resource.
fn parse_id(raw: &str) -> Result<EmployeeId, ApiResponse> {
    let unknown = || ApiResponse::error(Status::NotFound, "Resource not found");
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(unknown());
    }
    raw.parse::<EmployeeId>().map_err(|_| unknown())
}

fn not_found(id: EmployeeId) -> ApiResponse {
    ApiResponse::error(
        Status::NotFound,
        format!("Employee with ID {} not found", id),
    )
}

#[get("/health")]
fn health_check() -> ApiResponse {
    ApiResponse::success(Status::Ok, json!({ "status": "healthy" }))
}

#[post("/employees", data = "<body>")]
fn create_employee(body: JsonBody<'_>, db: &State<Arc<EmployeeDatabase>>) -> ApiResponse {
    let fields = match require_fields(body) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };
    match db.create(&fields) {
        Ok(employee) => ApiResponse::success(Status::Created, employee),
        Err(e) => e.into(),
    }
}

#[get("/employees")]
fn get_all_employees(db: &State<Arc<EmployeeDatabase>>) -> ApiResponse {
    ApiResponse::success(Status::Ok, db.get_all())
}

#[get("/employees/search?<department>")]
fn search_employees(department: Option<String>, db: &State<Arc<EmployeeDatabase>>) -> ApiResponse {
    match department {
        Some(department) if !department.is_empty() => {
            ApiResponse::success(Status::Ok, db.search_by_department(&department))
        }
        _ => ApiResponse::error(Status::BadRequest, "Department parameter is required"),
    }
}

#[get("/employees/<id>")]
fn get_employee(id: &str, db: &State<Arc<EmployeeDatabase>>) -> ApiResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match db.get_by_id(id) {
        Some(employee) => ApiResponse::success(Status::Ok, employee),
        None => not_found(id),
    }
}

#[put("/employees/<id>", data = "<body>")]
fn update_employee(id: &str, body: JsonBody<'_>, db: &State<Arc<EmployeeDatabase>>) -> ApiResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let fields = match require_fields(body) {
        Ok(fields) => fields,
        Err(resp) => return resp,
    };
    if fields.contains_key("id") {
        return ApiResponse::error(Status::BadRequest, "Employee ID cannot be updated");
    }
    match db.update(id, &fields) {
        Ok(Some(employee)) => ApiResponse::success(Status::Ok, employee),
        Ok(None) => not_found(id),
        Err(e) => e.into(),
    }
}

#[delete("/employees/<id>")]
fn delete_employee(id: &str, db: &State<Arc<EmployeeDatabase>>) -> ApiResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if !db.delete(id) {
        return not_found(id);
    }
    ApiResponse::success(
        Status::Ok,
        json!({ "message": format!("Employee {} deleted successfully", id) }),
    )
}

// Rocket answers unmatched methods with 404; these give the known
// resources a proper 405.
#[put("/employees")]
fn collection_put() -> Status {
    Status::MethodNotAllowed
}

#[delete("/employees")]
fn collection_delete() -> Status {
    Status::MethodNotAllowed
}

#[patch("/employees")]
fn collection_patch() -> Status {
    Status::MethodNotAllowed
}

#[post("/employees/<_>")]
fn item_post() -> Status {
    Status::MethodNotAllowed
}

#[patch("/employees/<_>")]
fn item_patch() -> Status {
    Status::MethodNotAllowed
}

#[options("/<_..>")]
fn preflight() -> Status {
    Status::Ok
}

#[catch(404)]
fn resource_not_found() -> ApiResponse {
    ApiResponse::error(Status::NotFound, "Resource not found")
}

#[catch(405)]
fn method_not_allowed() -> ApiResponse {
    ApiResponse::error(Status::MethodNotAllowed, "Method not allowed")
}

#[catch(500)]
fn internal_error() -> ApiResponse {
    ApiResponse::error(Status::InternalServerError, "Internal server error")
}

#[catch(default)]
fn default_catcher(status: Status, _req: &Request<'_>) -> ApiResponse {
    ApiResponse::error(status, status.reason().unwrap_or("Unknown error"))
}

fn cors() -> AdHoc {
    AdHoc::on_response("CORS", |_req, res| {
        Box::pin(async move {
            res.set_header(Header::new("Access-Control-Allow-Origin", "*"));
            res.set_header(Header::new(
                "Access-Control-Allow-Methods",
                "GET, POST, PUT, DELETE, OPTIONS",
            ));
            res.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
        })
    })
}

pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

/// Owns the employee store for the lifetime of the process and wires it
/// into the web server.
pub struct ServerNode {
    config: ServerConfig,
    database: Arc<EmployeeDatabase>,
}

impl ServerNode {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_database(config, Arc::new(EmployeeDatabase::new()))
    }

    pub fn with_database(config: ServerConfig, database: Arc<EmployeeDatabase>) -> Self {
        ServerNode { config, database }
    }

    pub fn build(&self) -> Rocket<Build> {
        let figment = rocket::Config::figment()
            .merge(("address", self.config.address))
            .merge(("port", self.config.port));
        rocket::build()
            .configure(figment)
            .manage(self.database.clone())
            .attach(cors())
            .mount(
                "/api",
                routes![
                    health_check,
                    create_employee,
                    get_all_employees,
                    search_employees,
                    get_employee,
                    update_employee,
                    delete_employee,
                    collection_put,
                    collection_delete,
                    collection_patch,
                    item_post,
                    item_patch,
                ],
            )
            .mount("/", routes![preflight])
            .register(
                "/",
                catchers![
                    resource_not_found,
                    method_not_allowed,
                    internal_error,
                    default_catcher
                ],
            )
    }
}
