use clap::{App, Arg};
use employee_server_node::server::{ServerConfig, ServerNode, DEFAULT_PORT};
use log::LevelFilter;
use std::net::IpAddr;

fn setup_logger(level: LevelFilter, log_file: &str) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .chain(fern::log_file(log_file)?)
        .apply()?;
    Ok(())
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let default_port = DEFAULT_PORT.to_string();
    let matches = App::new("employee-server-node")
        .version("1.0")
        .author("employee-management")
        .about("REST API for managing employee records")
        .arg(
            Arg::with_name("address")
                .long("address")
                .takes_value(true)
                .default_value("0.0.0.0")
                .help("Address to bind the HTTP server to"),
        )
        .arg(
            Arg::with_name("port")
                .long("port")
                .takes_value(true)
                .help("Port to listen on (falls back to $PORT, then 5000)"),
        )
        .arg(
            Arg::with_name("log_file")
                .long("log-file")
                .takes_value(true)
                .default_value("output.log")
                .help("File that receives a copy of the log"),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Log at debug level (also enabled by EMS_DEBUG=true)"),
        )
        .get_matches();

    let debug = matches.is_present("debug") || env_flag("EMS_DEBUG");
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = matches.value_of("log_file").unwrap_or("output.log");
    if let Err(e) = setup_logger(level, log_file) {
        eprintln!("failed to set up logging: {}", e);
    }

    let port = match matches.value_of("port") {
        Some(port) => port.to_string(),
        None => std::env::var("PORT").unwrap_or(default_port),
    };
    let port = port.parse::<u16>()?;
    let address = matches.value_of("address").unwrap_or("0.0.0.0").parse::<IpAddr>()?;

    log::info!("starting employee service on {}:{}", address, port);
    let server_node = ServerNode::new(ServerConfig { address, port });
    server_node.build().launch().await?;
    Ok(())
}
