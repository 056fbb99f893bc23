use employee_server_node::db::EmployeeDatabase;
use employee_server_node::server::{ServerConfig, ServerNode};
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};
use std::sync::Arc;

pub fn launch_server_node() -> (Arc<EmployeeDatabase>, Client) {
    let db = Arc::new(EmployeeDatabase::new());
    let node = ServerNode::with_database(ServerConfig::default(), db.clone());
    let client = Client::tracked(node.build()).expect("valid rocket instance");
    (db, client)
}

pub fn alice() -> Value {
    json!({
        "name": "Alice Johnson",
        "email": "Alice@X.com",
        "department": "Engineering",
        "role": "Engineer",
        "hire_date": "2023-01-01"
    })
}

pub fn employee(name: &str, email: &str, department: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "department": department,
        "role": "Engineer",
        "hire_date": "2023-01-01"
    })
}

pub fn post_json(client: &Client, uri: &str, body: &Value) -> (Status, Value) {
    let response = client
        .post(uri)
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch();
    read(response)
}

pub fn put_json(client: &Client, uri: &str, body: &Value) -> (Status, Value) {
    let response = client
        .put(uri)
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch();
    read(response)
}

pub fn get_json(client: &Client, uri: &str) -> (Status, Value) {
    read(client.get(uri).dispatch())
}

pub fn delete_json(client: &Client, uri: &str) -> (Status, Value) {
    read(client.delete(uri).dispatch())
}

fn read(response: rocket::local::blocking::LocalResponse<'_>) -> (Status, Value) {
    let status = response.status();
    let body = response
        .into_json::<Value>()
        .expect("response body should be json");
    (status, body)
}
