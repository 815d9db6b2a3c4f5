//! The export action: authenticate, pick a client, fetch its assets and
//! write them to a timestamped CSV file.

use crate::auth::{AuthClient, AuthError};
use crate::client::{ApiClient, ApiError, PaginationRequest};
use crate::configuration::Configuration;
use crate::format::{CsvRecordProducer, FormattingError};
use crate::model::{AssetList, Client};
use crate::pagination::{fetch_all_pages, PaginationError, DEFAULT_PAGE_SIZE};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("authentication failed: {0}")]
    AuthError(#[from] AuthError),
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),
    #[error("failed to retrieve a complete result set: {0}")]
    PaginationError(#[from] PaginationError),
    #[error("formatting error: {0}")]
    FormattingError(#[from] FormattingError),
    #[error("failed to write CSV file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("prompt error: {0}")]
    PromptError(#[from] inquire::InquireError),
    #[error("no clients available on this instance")]
    NoClients,
    #[error("client {0} not found on this instance")]
    ClientNotFound(u64),
}

/// Replaces path-hostile characters in a client name so it can be used
/// as a file name stem.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Prompts the operator to pick a client, looping until the choice is
/// confirmed. Declining the confirmation re-prompts rather than aborting.
fn select_client(clients: &[Client]) -> Result<&Client, ExportError> {
    let options: Vec<String> = clients
        .iter()
        .enumerate()
        .map(|(index, client)| format!("{} - {}", index + 1, client))
        .collect();

    loop {
        let choice = inquire::Select::new("Select a client to export assets from", options.clone())
            .with_help_message("Choose the client whose assets will be exported to CSV")
            .raw_prompt()?;
        let client = &clients[choice.index];

        let confirmed =
            inquire::Confirm::new(&format!("Export asset(s) from '{}' to CSV?", client.name))
                .with_default(true)
                .prompt()?;
        if confirmed {
            return Ok(client);
        }
    }
}

fn resolve_client<'a>(
    clients: &'a [Client],
    preselected_client_id: Option<u64>,
) -> Result<&'a Client, ExportError> {
    match preselected_client_id {
        Some(id) => clients
            .iter()
            .find(|client| client.id == id)
            .ok_or(ExportError::ClientNotFound(id)),
        None => select_client(clients),
    }
}

/// Runs the full export and returns the path of the written CSV file.
pub fn run_export(
    configuration: &Configuration,
    output_dir: &Path,
    preselected_client_id: Option<u64>,
) -> Result<PathBuf, ExportError> {
    let auth = AuthClient::from_configuration(configuration);
    let session = auth.authenticate(configuration.username(), configuration.password())?;
    let api = ApiClient::new(session)?;

    info!("Loading clients from instance...");
    let clients = fetch_all_pages(DEFAULT_PAGE_SIZE, |offset, limit| {
        api.list_clients(PaginationRequest { offset, limit })
    })?;
    info!("Loaded {} client(s) from instance", clients.len());
    if clients.is_empty() {
        return Err(ExportError::NoClients);
    }

    let selected_client = resolve_client(&clients, preselected_client_id)?;

    // The file name carries the export start time, so take the timestamp
    // before fetching the assets.
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
    let file_name = format!(
        "{}_{}.csv",
        sanitize_file_name(&selected_client.name),
        timestamp
    );
    let output_path = output_dir.join(file_name);

    info!("Loading assets for client '{}'...", selected_client.name);
    let assets = fetch_all_pages(DEFAULT_PAGE_SIZE, |offset, limit| {
        debug!("Loading page of client assets at offset {}...", offset);
        api.list_client_assets(selected_client.id, PaginationRequest { offset, limit })
    })?;
    info!("Loaded {} asset(s) from client", assets.len());

    let assets = AssetList::new(assets);
    fs::write(&output_path, assets.to_csv_with_header()?)?;
    info!("Saved {} asset(s) to CSV {:?}", assets.len(), output_path);

    Ok(output_path)
}
