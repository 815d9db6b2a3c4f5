//! HTTP client for the platform's list endpoints.
//!
//! List endpoints are POST requests carrying an offset/limit pagination
//! payload; the typed paged responses are handed to the paginator, which
//! owns the page-by-page protocol.

use crate::auth::Session;
use crate::model::{Asset, Client, PagedResponse};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, trace};

const CLIENTS_PATH: &str = "/api/v2/clients";
const REQUEST_TIMEOUT_SECONDS: u64 = 60;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("unexpected response from server: {0}")]
    UnexpectedResponse(StatusCode),
}

/// Offset/limit payload sent with every list request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PaginationRequest {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Serialize)]
struct ListRequest {
    pagination: PaginationRequest,
}

pub struct ApiClient {
    session: Session,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(session: Session) -> Result<ApiClient, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;
        Ok(ApiClient { session, client })
    }

    /// Requests one page of the instance's clients.
    pub fn list_clients(
        &self,
        pagination: PaginationRequest,
    ) -> Result<PagedResponse<Client>, ApiError> {
        self.post_page(CLIENTS_PATH, pagination)
    }

    /// Requests one page of the assets belonging to a client.
    pub fn list_client_assets(
        &self,
        client_id: u64,
        pagination: PaginationRequest,
    ) -> Result<PagedResponse<Asset>, ApiError> {
        let path = format!("{}/{}/assets", CLIENTS_PATH, client_id);
        self.post_page(&path, pagination)
    }

    fn post_page<T>(
        &self,
        path: &str,
        pagination: PaginationRequest,
    ) -> Result<PagedResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!(
            "{}{}",
            self.session.base_url().as_str().trim_end_matches('/'),
            path
        );
        trace!(
            "POST {} (offset={}, limit={})",
            url,
            pagination.offset,
            pagination.limit
        );

        let response = self
            .client
            .post(url)
            .headers(self.session.auth_headers())
            .json(&ListRequest { pagination })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedResponse(status));
        }

        let response_text = response.text()?;
        match serde_json::from_str::<PagedResponse<T>>(&response_text) {
            Ok(page) => Ok(page),
            Err(e) => {
                error!("Failed to deserialize page response: {}", e);
                Err(ApiError::JsonError(e))
            }
        }
    }
}
