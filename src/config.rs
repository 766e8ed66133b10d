//! ERS Endpoint Configuration

use std::time::Duration;

/// Default ERS API port on an ISE PAN
pub const DEFAULT_ERS_PORT: u16 = 9060;

/// Default CSV input, read from the working directory
pub const DEFAULT_CSV_FILE: &str = "AP.csv";

const AUTHZ_PROFILE_PATH: &str = "/ers/config/authorizationprofile";

/// Connection settings for the authorization profile endpoint
#[derive(Debug, Clone)]
pub struct IseConfig {
    /// Base URL of the authorization profile resource
    pub base_url: String,
    /// Skip certificate verification (lab appliances with self-signed certs)
    pub accept_invalid_certs: bool,
    /// Per-request timeout; `None` leaves requests unbounded
    pub timeout: Option<Duration>,
}

impl IseConfig {
    /// Configuration for an ISE node reached over HTTPS on the given port.
    ///
    /// Certificate verification is disabled: ISE PANs are usually installed
    /// with self-signed certificates. This is a development/lab setting and
    /// applies only to clients built from this config.
    pub fn for_host(host: &str, port: u16) -> Self {
        Self {
            base_url: format!("https://{}:{}{}", host.trim(), port, AUTHZ_PROFILE_PATH),
            accept_invalid_certs: true,
            timeout: None,
        }
    }

    /// Configuration for an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            accept_invalid_certs: true,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL used to check credentials
    pub fn version_info_url(&self) -> String {
        format!("{}/versioninfo", self.base_url)
    }

    /// URL profiles are POSTed to
    pub fn create_url(&self) -> &str {
        &self.base_url
    }
}
