use tracing_subscriber::EnvFilter;
use vmexport::cli::execute_command;
use vmexport::commands::parse_cli_commands;

/// Main entry point for the program
fn main() {
    // Intialize the logging subsystem
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let matches = parse_cli_commands();

    match execute_command(&matches) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ::std::process::exit(e.exit_code().code());
        }
    }
}
