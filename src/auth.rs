//! Authentication against the platform API.
//!
//! The exporter authenticates once up front and carries the resulting
//! session (base URL plus bearer token) through the rest of the run.

use crate::configuration::Configuration;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

const AUTHENTICATE_PATH: &str = "/api/v1/authenticate";
const REQUEST_TIMEOUT_SECONDS: u64 = 20;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("missing username in configuration")]
    MissingUsername,
    #[error("missing password in configuration")]
    MissingPassword,
    #[error("error during HTTP request")]
    HttpError(#[from] reqwest::Error),
    #[error("authentication rejected by server: {0}")]
    AuthenticationRejected(StatusCode),
    #[error("authentication response carried no token")]
    MissingToken,
    #[error("token cannot be used as an HTTP header value: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
}

#[derive(Debug, Serialize)]
struct AuthenticationRequest {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct AuthenticationResponse {
    #[serde(default)]
    token: Option<String>,
}

/// An authenticated session against one platform instance.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: Url,
    authorization: HeaderValue,
}

impl Session {
    /// The token is validated here, so a malformed one surfaces as an
    /// authentication failure instead of an unauthenticated run.
    fn new(base_url: Url, token: &str) -> Result<Session, AuthError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))?;
        authorization.set_sensitive(true);
        Ok(Session {
            base_url,
            authorization,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Headers carrying the bearer token, attached to every API request.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("vmexport"));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers
    }
}

pub struct AuthClient {
    base_url: Url,
}

impl AuthClient {
    pub fn new(base_url: Url) -> AuthClient {
        AuthClient { base_url }
    }

    pub fn from_configuration(configuration: &Configuration) -> AuthClient {
        AuthClient::new(configuration.instance_url().clone())
    }

    /// Performs the credential handshake and returns a usable session.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        if username.is_empty() {
            return Err(AuthError::MissingUsername);
        }
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let url = format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            AUTHENTICATE_PATH
        );
        debug!("Authenticating against {}...", url);

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;

        let body = AuthenticationRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = client.post(url).json(&body).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(AuthError::AuthenticationRejected(status));
        }

        let response: AuthenticationResponse = response.json()?;
        match response.token {
            Some(token) => {
                debug!("Authentication successful, received token");
                Session::new(self.base_url.clone(), &token)
            }
            None => Err(AuthError::MissingToken),
        }
    }
}
