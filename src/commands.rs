//! CLI command definition for the asset exporter.

use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const PARAMETER_CONFIG: &str = "config";
pub const PARAMETER_OUTPUT_DIR: &str = "output-dir";
pub const PARAMETER_CLIENT_ID: &str = "client-id";

pub fn create_cli_command() -> Command {
    let config_parameter = Arg::new(PARAMETER_CONFIG)
        .short('c')
        .long(PARAMETER_CONFIG)
        .num_args(1)
        .required(false)
        .help("Path to the YAML configuration file")
        .value_parser(clap::value_parser!(PathBuf));

    let output_dir_parameter = Arg::new(PARAMETER_OUTPUT_DIR)
        .short('o')
        .long(PARAMETER_OUTPUT_DIR)
        .num_args(1)
        .required(false)
        .help("Directory the CSV file is written to (defaults to the current directory)")
        .value_parser(clap::value_parser!(PathBuf));

    let client_id_parameter = Arg::new(PARAMETER_CLIENT_ID)
        .long(PARAMETER_CLIENT_ID)
        .num_args(1)
        .required(false)
        .help("Skip the interactive prompt and export assets for this client ID")
        .value_parser(clap::value_parser!(u64));

    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(config_parameter)
        .arg(output_dir_parameter)
        .arg(client_id_parameter)
}

pub fn parse_cli_commands() -> ArgMatches {
    create_cli_command().get_matches()
}
