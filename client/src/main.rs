use clap::{App, Arg};
use employee_client::client_api::{Employee, EmployeeApi, EmployeeUpdate, NewEmployee};
use employee_client::employee_client::{HttpEmployeeClient, DEFAULT_BASE_URL};
use tokio::io::{self, AsyncBufReadExt, BufReader};

fn print_employee(employee: &Employee) {
    println!(
        "{:<5} {:<20} {:<30} {:<15} {:<25} {}",
        employee.id,
        employee.name,
        employee.email,
        employee.department,
        employee.role,
        employee.hire_date
    );
}

fn print_employees(employees: &[Employee]) {
    if employees.is_empty() {
        println!("(no employees)");
        return;
    }
    for employee in employees {
        print_employee(employee);
    }
}

fn parse_new_employee(fields: &str) -> Option<NewEmployee> {
    let parts: Vec<&str> = fields.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [name, email, department, role, hire_date] => Some(NewEmployee {
            name: name.to_string(),
            email: email.to_string(),
            department: department.to_string(),
            role: role.to_string(),
            hire_date: hire_date.to_string(),
        }),
        _ => None,
    }
}

fn parse_update(assignments: &[&str]) -> Result<EmployeeUpdate, String> {
    let mut update = EmployeeUpdate::default();
    for assignment in assignments {
        let (field, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("expected field=value, got '{}'", assignment))?;
        if !update.set(field, value) {
            return Err(format!("unknown field '{}'", field));
        }
    }
    Ok(update)
}

async fn run_command(client: &dyn EmployeeApi, line: &str) -> anyhow::Result<bool> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    match command {
        "health" => println!("Status: {}", client.health().await?.status),
        "list" => print_employees(&client.list().await?),
        "get" => match rest.parse() {
            Ok(id) => match client.get(id).await? {
                Some(employee) => print_employee(&employee),
                None => println!("Employee {} not found", id),
            },
            Err(_) => eprintln!("Usage: get <id>"),
        },
        "create" => match parse_new_employee(rest) {
            Some(new_employee) => {
                let employee = client.create(&new_employee).await?;
                println!("Created employee {}", employee.id);
                print_employee(&employee);
            }
            None => eprintln!("Usage: create <name>|<email>|<department>|<role>|<hire_date>"),
        },
        "update" => {
            let mut args = rest.split_whitespace();
            let id = args.next().and_then(|id| id.parse().ok());
            let assignments: Vec<&str> = args.collect();
            match (id, parse_update(&assignments)) {
                (Some(id), Ok(update)) if !update.is_empty() => {
                    match client.update(id, &update).await? {
                        Some(employee) => print_employee(&employee),
                        None => println!("Employee {} not found", id),
                    }
                }
                (_, Err(e)) => eprintln!("Error: {}", e),
                _ => eprintln!("Usage: update <id> <field>=<value> ..."),
            }
        }
        "delete" => match rest.parse() {
            Ok(id) => {
                if client.delete(id).await? {
                    println!("Employee {} deleted", id);
                } else {
                    println!("Employee {} not found", id);
                }
            }
            Err(_) => eprintln!("Usage: delete <id>"),
        },
        "search" if !rest.is_empty() => print_employees(&client.search(rest).await?),
        "search" => eprintln!("Usage: search <department>"),
        "help" => {
            println!("Available commands:");
            println!("  health                                   - Check the service");
            println!("  list                                     - List all employees");
            println!("  get <id>                                 - Show one employee");
            println!("  create <name>|<email>|<dept>|<role>|<hire_date>");
            println!("                                           - Add an employee");
            println!("  update <id> <field>=<value> ...          - Change fields of an employee");
            println!("  delete <id>                              - Remove an employee");
            println!("  search <department>                      - Filter by department");
            println!("  help                                     - Show this message");
            println!("  quit                                     - Exit the client");
        }
        "quit" => return Ok(false),
        "" => {}
        _ => eprintln!("Unknown command: '{}'", line),
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();
    let matches = App::new("Employee Client")
        .version("1.0")
        .about("Talks to the employee management service")
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .takes_value(true)
                .help("Base URL of the API, e.g. http://localhost:5000/api"),
        )
        .get_matches();

    let server = matches.value_of("server").unwrap_or(DEFAULT_BASE_URL);
    let client = HttpEmployeeClient::new(server);

    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    println!("Employee Client ({})", client.base_url());
    println!("Type 'help' for a list of commands");

    while reader.read_line(&mut line).await? > 0 {
        match run_command(&client, line.trim()).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("Error: {}", e),
        }
        line.clear();
    }

    Ok(())
}
