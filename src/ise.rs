//! ISE ERS API Client
//!
//! Thin wrapper over the authorization profile resource of the ERS REST
//! API: a credential check against `versioninfo` and profile creation.

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::IseConfig;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::profile::{AuthorizationProfile, AuthorizationProfileRequest};

/// Placeholder used when a failed create carries no error title
pub const NO_ERROR_MESSAGE: &str = "No error message provided";

const MAX_BODY_EXCERPT: usize = 200;

/// ERS API client. Auth and JSON headers are attached to every request.
pub struct IseClient {
    client: Client,
    config: IseConfig,
}

/// Result of the `versioninfo` credential check
#[derive(Debug, Clone)]
pub struct CredentialCheck {
    pub status: StatusCode,
    pub body: String,
}

impl CredentialCheck {
    /// Only an exact 200 counts as valid
    pub fn is_valid(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// What ISE said about a rejected create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    /// `ERSResponse.messages[0].title`
    Title(String),
    /// JSON body without the title path, or an empty body
    Missing,
    /// Body was not JSON; holds a truncated excerpt
    NotJson(String),
}

impl ErrorDetail {
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return ErrorDetail::Missing;
        }

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => value
                .pointer("/ERSResponse/messages/0/title")
                .and_then(|title| title.as_str())
                .map(|title| ErrorDetail::Title(title.to_string()))
                .unwrap_or(ErrorDetail::Missing),
            Err(_) => ErrorDetail::NotJson(excerpt(body, MAX_BODY_EXCERPT)),
        }
    }
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorDetail::Title(title) => write!(f, "{}", title),
            ErrorDetail::Missing => write!(f, "{}", NO_ERROR_MESSAGE),
            ErrorDetail::NotJson(body) => write!(f, "Response body was not JSON: {}", body),
        }
    }
}

/// Outcome of a single create call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    Rejected { status: u16, detail: ErrorDetail },
}

impl IseClient {
    /// Build a client for `config` authenticating as `credentials`
    pub fn new(config: IseConfig, credentials: &Credentials) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("ise-authz-import/", env!("CARGO_PKG_VERSION")))
            .default_headers(credentials.auth_headers()?)
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &IseConfig {
        &self.config
    }

    /// GET `versioninfo` to confirm the credentials are accepted
    pub async fn check_credentials(&self) -> Result<CredentialCheck> {
        let url = self.config.version_info_url();
        debug!("Checking credentials against {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("versioninfo returned {}", status);
        Ok(CredentialCheck { status, body })
    }

    /// POST a profile. Non-201 responses are returned as
    /// [`CreateOutcome::Rejected`], not as errors.
    pub async fn create_profile(&self, profile: &AuthorizationProfile) -> Result<CreateOutcome> {
        let url = self.config.create_url();
        debug!("Creating authorization profile {} at {}", profile.name, url);

        let response = self
            .client
            .post(url)
            .json(&AuthorizationProfileRequest::new(profile))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CREATED {
            return Ok(CreateOutcome::Created);
        }

        let body = response.text().await?;
        debug!("Create of {} failed ({}): {}", profile.name, status, body);

        Ok(CreateOutcome::Rejected {
            status: status.as_u16(),
            detail: ErrorDetail::from_body(&body),
        })
    }
}

fn excerpt(s: &str, max: usize) -> String {
    let s = s.trim();
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
