use clap::{App, Arg};
use employee_client::client_api::{Employee, EmployeeApi, EmployeeUpdate, NewEmployee};
use employee_client::employee_client::{ClientError, HttpEmployeeClient, DEFAULT_BASE_URL};
use std::time::{Duration, Instant};

// Walks through every endpoint of a running server: creates a handful of
// employees, reads, updates, searches, deletes and finally triggers the
// validation errors.

fn print_section(title: &str) {
    println!("\n{}", "=".repeat(70));
    println!("  {}", title);
    println!("{}", "=".repeat(70));
}

fn print_table(employees: &[Employee]) {
    println!(
        "\n{:<5} {:<20} {:<30} {:<15} {:<25}",
        "ID", "Name", "Email", "Department", "Role"
    );
    println!("{}", "-".repeat(100));
    for emp in employees {
        println!(
            "{:<5} {:<20.20} {:<30.30} {:<15.15} {:<25.25}",
            emp.id, emp.name, emp.email, emp.department, emp.role
        );
    }
}

fn sample_employees() -> Vec<NewEmployee> {
    let rows = [
        ("Alice Johnson", "alice.johnson@techcorp.com", "Engineering", "Software Engineer", "2023-06-15"),
        ("Bob Williams", "bob.williams@techcorp.com", "Engineering", "Senior DevOps Engineer", "2022-03-10"),
        ("Carol Martinez", "carol.martinez@techcorp.com", "Marketing", "Marketing Manager", "2023-01-20"),
        ("David Chen", "david.chen@techcorp.com", "Sales", "Sales Representative", "2024-02-01"),
        ("Emma Davis", "emma.davis@techcorp.com", "Engineering", "QA Engineer", "2023-09-05"),
    ];
    rows.iter()
        .map(|(name, email, department, role, hire_date)| NewEmployee {
            name: name.to_string(),
            email: email.to_string(),
            department: department.to_string(),
            role: role.to_string(),
            hire_date: hire_date.to_string(),
        })
        .collect()
}

fn report_error(description: &str, err: anyhow::Error) {
    match err.downcast_ref::<ClientError>() {
        Some(client_err) => match client_err.server_message() {
            Some(message) => println!("{} -> rejected: {}", description, message),
            None => println!("{} -> failed: {}", description, client_err),
        },
        None => println!("{} -> failed: {}", description, err),
    }
}

async fn demo_create(client: &dyn EmployeeApi) -> Vec<Employee> {
    print_section("1. CREATE - Adding Employees");
    let mut created = Vec::new();
    for new_employee in sample_employees() {
        let description = format!("Creating {} - {}", new_employee.name, new_employee.role);
        match client.create(&new_employee).await {
            Ok(employee) => {
                println!("{} -> id {}", description, employee.id);
                created.push(employee);
            }
            Err(e) => report_error(&description, e),
        }
    }
    println!("\nCreated {} employees", created.len());
    created
}

async fn demo_read_all(client: &dyn EmployeeApi) {
    print_section("2. READ - All Employees");
    match client.list().await {
        Ok(employees) => {
            println!("Found {} employees:", employees.len());
            print_table(&employees);
        }
        Err(e) => report_error("Fetching all employees", e),
    }
}

async fn demo_read_single(client: &dyn EmployeeApi, id: u64) {
    print_section(&format!("3. READ - Employee {}", id));
    match client.get(id).await {
        Ok(Some(employee)) => print_table(&[employee]),
        Ok(None) => println!("Employee {} not found", id),
        Err(e) => report_error("Fetching employee", e),
    }
}

async fn demo_update(client: &dyn EmployeeApi, id: u64) {
    print_section(&format!("4. UPDATE - Promote Employee {}", id));
    let update = EmployeeUpdate {
        role: Some(String::from("Lead Software Engineer")),
        department: Some(String::from("Engineering")),
        ..EmployeeUpdate::default()
    };
    match client.update(id, &update).await {
        Ok(Some(employee)) => println!("Employee promoted to: {}", employee.role),
        Ok(None) => println!("Employee {} not found", id),
        Err(e) => report_error("Updating employee", e),
    }
}

async fn demo_search(client: &dyn EmployeeApi, department: &str) {
    print_section(&format!("5. SEARCH - Department: {}", department));
    match client.search(department).await {
        Ok(employees) => {
            println!("Found {} employees in {}:", employees.len(), department);
            for emp in employees {
                println!("  * {} - {}", emp.name, emp.role);
            }
        }
        Err(e) => report_error("Searching employees", e),
    }
}

async fn demo_delete(client: &dyn EmployeeApi, id: u64) {
    print_section(&format!("6. DELETE - Remove Employee {}", id));
    match client.delete(id).await {
        Ok(true) => println!("Employee {} deleted", id),
        Ok(false) => println!("Employee {} not found", id),
        Err(e) => report_error("Deleting employee", e),
    }
}

async fn demo_error_handling(client: &dyn EmployeeApi) {
    print_section("7. ERROR HANDLING - Validation Examples");

    let invalid_email = NewEmployee {
        name: String::from("Test User"),
        email: String::from("invalid-email"),
        department: String::from("IT"),
        role: String::from("Developer"),
        hire_date: String::from("2024-01-01"),
    };
    if let Err(e) = client.create(&invalid_email).await {
        report_error("Creating employee with invalid email", e);
    }

    let future_hire = NewEmployee {
        name: String::from("Future Employee"),
        email: String::from("future@test.com"),
        hire_date: String::from("2999-01-01"),
        ..invalid_email
    };
    if let Err(e) = client.create(&future_hire).await {
        report_error("Creating employee with future hire date", e);
    }

    match client.get(999).await {
        Ok(None) => println!("Fetching employee 999 -> not found"),
        Ok(Some(employee)) => println!("Fetching employee 999 -> unexpectedly found {}", employee.name),
        Err(e) => report_error("Fetching employee 999", e),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let matches = App::new("Employee Demo")
        .version("1.0")
        .about("Runs a scripted tour of the employee management API")
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .takes_value(true)
                .help("Base URL of the API, e.g. http://localhost:5000/api"),
        )
        .arg(
            Arg::new("pause_ms")
                .long("pause-ms")
                .takes_value(true)
                .default_value("0")
                .help("Pause between demo steps in milliseconds"),
        )
        .get_matches();
    let server = matches.value_of("server").unwrap_or(DEFAULT_BASE_URL);
    let pause = Duration::from_millis(
        matches
            .value_of("pause_ms")
            .and_then(|ms| ms.parse().ok())
            .unwrap_or(0),
    );
    let client = HttpEmployeeClient::new(server);

    print_section("Checking Server Status");
    if let Err(e) = client.health().await {
        println!("Cannot reach {}: {}", client.base_url(), e);
        println!("\nPlease start the server first:");
        println!("  cargo run --bin employee_server_node");
        return;
    }
    println!("Server is running and healthy");

    let start = Instant::now();
    let created = demo_create(&client).await;
    let (first, last) = match (created.first(), created.last()) {
        (Some(first), Some(last)) => (first.id, last.id),
        _ => {
            println!("\nFailed to create employees. Stopping demo.");
            return;
        }
    };
    tokio::time::sleep(pause).await;
    demo_read_all(&client).await;
    tokio::time::sleep(pause).await;
    demo_read_single(&client, first).await;
    tokio::time::sleep(pause).await;
    demo_update(&client, first).await;
    tokio::time::sleep(pause).await;
    demo_search(&client, "Engineering").await;
    demo_search(&client, "Marketing").await;
    tokio::time::sleep(pause).await;
    demo_delete(&client, last).await;
    tokio::time::sleep(pause).await;
    demo_error_handling(&client).await;

    print_section("DEMO COMPLETED");
    println!("Time used: {:?}", start.elapsed());
}
