//! CLI command execution and error-to-exit-code mapping.

use crate::commands::{PARAMETER_CLIENT_ID, PARAMETER_CONFIG, PARAMETER_OUTPUT_DIR};
use crate::configuration::{Configuration, ConfigurationError};
use crate::exit_codes::VmExitCode;
use crate::export::{run_export, ExportError};
use crate::pagination::PaginationError;
use clap::ArgMatches;
use std::path::PathBuf;
use thiserror::Error;

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error related to configuration loading or management
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    /// Error raised anywhere in the export run
    #[error("{0}")]
    ExportError(#[from] ExportError),
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> VmExitCode {
        match self {
            CliError::ConfigurationError(_) => VmExitCode::ConfigError,
            CliError::ExportError(e) => match e {
                ExportError::AuthError(_) => VmExitCode::AuthError,
                ExportError::ApiError(_) => VmExitCode::NetworkError,
                ExportError::PaginationError(PaginationError::FetchError(_)) => {
                    VmExitCode::NetworkError
                }
                ExportError::PaginationError(_) => VmExitCode::ApiError,
                ExportError::FormattingError(_) => VmExitCode::DataError,
                ExportError::IoError(_) => VmExitCode::CannotCreateOutput,
                ExportError::PromptError(_) => VmExitCode::UsageError,
                ExportError::NoClients => VmExitCode::ApiError,
                ExportError::ClientNotFound(_) => VmExitCode::UsageError,
            },
        }
    }
}

/// Executes the export run described by the parsed command line.
pub fn execute_command(matches: &ArgMatches) -> Result<(), CliError> {
    let configuration = match matches.get_one::<PathBuf>(PARAMETER_CONFIG) {
        Some(path) => Configuration::load_from_file(path.clone())?,
        None => Configuration::load_default()?,
    };

    let output_dir = matches
        .get_one::<PathBuf>(PARAMETER_OUTPUT_DIR)
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    let client_id = matches.get_one::<u64>(PARAMETER_CLIENT_ID).copied();

    let output_path = run_export(&configuration, &output_dir, client_id)?;
    println!("Saved assets to CSV '{}'", output_path.display());

    Ok(())
}
