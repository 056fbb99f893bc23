use chrono::{Duration, Local};
use rocket::http::{ContentType, Status};
use serde_json::json;

mod utils;

use utils::{alice, delete_json, employee, get_json, post_json, put_json};

#[test]
fn test_healthy() {
    let (_, client) = utils::launch_server_node();
    let (status, body) = get_json(&client, "/api/health");
    assert_eq!(status, Status::Ok);
    assert_eq!(body, json!({ "success": true, "data": { "status": "healthy" } }));
}

#[test]
fn test_create_and_fetch() {
    let (_, client) = utils::launch_server_node();
    let (status, body) = post_json(&client, "/api/employees", &alice());
    assert_eq!(status, Status::Created);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["email"], "alice@x.com");

    let (status, fetched) = get_json(&client, "/api/employees/1");
    assert_eq!(status, Status::Ok);
    assert_eq!(fetched["data"], body["data"]);
}

#[test]
fn test_duplicate_email_leaves_store_unchanged() {
    let (db, client) = utils::launch_server_node();
    post_json(&client, "/api/employees", &alice());
    let (status, body) = post_json(
        &client,
        "/api/employees",
        &employee("Alicia Jones", "  aLiCe@x.COM ", "Sales"),
    );
    assert_eq!(status, Status::BadRequest);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Employee with email alice@x.com already exists" })
    );
    assert_eq!(db.len(), 1);
}

#[test]
fn test_create_validation_errors() {
    let (db, client) = utils::launch_server_node();
    let tomorrow = (Local::now().date_naive() + Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();
    let cases = vec![
        (json!({ "hire_date": tomorrow }), "Hire date cannot be in the future"),
        (json!({ "hire_date": "1899-12-31" }), "Hire date must be after 1900"),
        (json!({ "name": "A" }), "Name must be at least 2 characters long"),
        (json!({ "email": "invalid-email" }), "Invalid email format"),
        (json!({ "role": null }), "Role is required and must be a string"),
        (json!({ "hire_date": "+2023-01-01" }), "Hire date must be in YYYY-MM-DD format"),
    ];
    for (overrides, message) in cases {
        let mut body = employee("Test User", "test@x.com", "IT");
        for (key, value) in overrides.as_object().unwrap() {
            body[key] = value.clone();
        }
        let (status, response) = post_json(&client, "/api/employees", &body);
        assert_eq!(status, Status::BadRequest, "{}", message);
        assert_eq!(response["error"], message);
    }
    assert!(db.is_empty());

    let (status, _) = post_json(&client, "/api/employees", &employee("Al", "al@x.com", "IT"));
    assert_eq!(status, Status::Created);
}

#[test]
fn test_create_requires_body() {
    let (_, client) = utils::launch_server_node();
    let (status, body) = post_json(&client, "/api/employees", &json!({}));
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error"], "Request body is required");

    let response = client
        .post("/api/employees")
        .header(ContentType::JSON)
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);

    let response = client
        .post("/api/employees")
        .header(ContentType::JSON)
        .body("{not json")
        .dispatch();
    assert_eq!(response.status(), Status::BadRequest);
    let body = response.into_json::<serde_json::Value>().unwrap();
    assert_eq!(body["success"], false);
}

#[test]
fn test_list_in_insertion_order() {
    let (_, client) = utils::launch_server_node();
    post_json(&client, "/api/employees", &employee("Zed", "z@x.com", "Ops"));
    post_json(&client, "/api/employees", &employee("Amy", "a@x.com", "Ops"));
    let (status, body) = get_json(&client, "/api/employees");
    assert_eq!(status, Status::Ok);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Zed", "Amy"]);
}

#[test]
fn test_get_missing_and_non_numeric() {
    let (_, client) = utils::launch_server_node();
    let (status, body) = get_json(&client, "/api/employees/999");
    assert_eq!(status, Status::NotFound);
    assert_eq!(body["error"], "Employee with ID 999 not found");

    let (status, body) = get_json(&client, "/api/employees/abc");
    assert_eq!(status, Status::NotFound);
    assert_eq!(body["error"], "Resource not found");
}

#[test]
fn test_signed_id_is_not_a_match() {
    let (_, client) = utils::launch_server_node();
    post_json(&client, "/api/employees", &alice());
    let (status, body) = get_json(&client, "/api/employees/+1");
    assert_eq!(status, Status::NotFound);
    assert_eq!(body["error"], "Resource not found");
    let (status, _) = delete_json(&client, "/api/employees/+1");
    assert_eq!(status, Status::NotFound);
    let (status, _) = get_json(&client, "/api/employees/1");
    assert_eq!(status, Status::Ok);
}

#[test]
fn test_update() {
    let (_, client) = utils::launch_server_node();
    post_json(&client, "/api/employees", &alice());

    let (status, body) = put_json(
        &client,
        "/api/employees/1",
        &json!({ "role": "Lead Software Engineer" }),
    );
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"]["role"], "Lead Software Engineer");
    assert_eq!(body["data"]["name"], "Alice Johnson");

    let (status, body) = put_json(&client, "/api/employees/1", &json!({ "id": 5 }));
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error"], "Employee ID cannot be updated");

    let (status, body) = put_json(&client, "/api/employees/1", &json!({}));
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error"], "Request body is required");

    let (status, _) = put_json(&client, "/api/employees/42", &json!({ "role": "Boss" }));
    assert_eq!(status, Status::NotFound);

    let (status, body) = put_json(&client, "/api/employees/1", &json!({ "name": "X" }));
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error"], "Name must be at least 2 characters long");
}

#[test]
fn test_update_email_conflict() {
    let (db, client) = utils::launch_server_node();
    post_json(&client, "/api/employees", &alice());
    post_json(&client, "/api/employees", &employee("Bob", "bob@x.com", "Sales"));
    let (status, body) = put_json(&client, "/api/employees/2", &json!({ "email": "ALICE@x.com" }));
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error"], "Employee with email alice@x.com already exists");
    assert_eq!(db.get_by_id(2).unwrap().email, "bob@x.com");
}

#[test]
fn test_delete() {
    let (_, client) = utils::launch_server_node();
    post_json(&client, "/api/employees", &alice());
    let (status, body) = delete_json(&client, "/api/employees/1");
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"]["message"], "Employee 1 deleted successfully");

    let (status, _) = delete_json(&client, "/api/employees/1");
    assert_eq!(status, Status::NotFound);

    // ids are not reused
    let (_, body) = post_json(&client, "/api/employees", &alice());
    assert_eq!(body["data"]["id"], 2);
}

#[test]
fn test_search() {
    let (_, client) = utils::launch_server_node();
    post_json(&client, "/api/employees", &alice());
    post_json(&client, "/api/employees", &employee("Bob", "bob@x.com", "engineering"));
    post_json(&client, "/api/employees", &employee("Carol", "carol@x.com", "Marketing"));

    let (status, plain) = get_json(&client, "/api/employees/search?department=Engineering");
    assert_eq!(status, Status::Ok);
    assert_eq!(plain["data"].as_array().unwrap().len(), 2);
    let (_, lower) = get_json(&client, "/api/employees/search?department=engineering");
    let (_, padded) = get_json(&client, "/api/employees/search?department=%20%20Engineering%20%20");
    assert_eq!(plain, lower);
    assert_eq!(plain, padded);

    let (status, body) = get_json(&client, "/api/employees/search?department=Legal");
    assert_eq!(status, Status::Ok);
    assert_eq!(body["data"], json!([]));

    let (status, body) = get_json(&client, "/api/employees/search");
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["error"], "Department parameter is required");
    let (status, _) = get_json(&client, "/api/employees/search?department=");
    assert_eq!(status, Status::BadRequest);
}

#[test]
fn test_method_not_allowed() {
    let (_, client) = utils::launch_server_node();
    let response = client.patch("/api/employees/1").dispatch();
    assert_eq!(response.status(), Status::MethodNotAllowed);
    let body = response.into_json::<serde_json::Value>().unwrap();
    assert_eq!(body, json!({ "success": false, "error": "Method not allowed" }));

    let response = client.delete("/api/employees").dispatch();
    assert_eq!(response.status(), Status::MethodNotAllowed);
}

#[test]
fn test_unknown_route() {
    let (_, client) = utils::launch_server_node();
    let (status, body) = get_json(&client, "/api/nothing-here");
    assert_eq!(status, Status::NotFound);
    assert_eq!(body, json!({ "success": false, "error": "Resource not found" }));
}

#[test]
fn test_cors_headers() {
    let (_, client) = utils::launch_server_node();
    let response = client.get("/api/health").dispatch();
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
    let response = client.options("/api/employees").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert!(response
        .headers()
        .get_one("Access-Control-Allow-Methods")
        .unwrap()
        .contains("PUT"));
}
