//! Import Errors
//!
//! Failures that stop an import run. Per-row create rejections are not
//! errors; they are reported through [`crate::ise::CreateOutcome`].

use thiserror::Error;

/// Errors that can occur while talking to ISE or reading the CSV input
#[derive(Debug, Error)]
pub enum IseError {
    /// Transport-level HTTP failure (DNS, connect, TLS, reset)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials produced a header value reqwest refuses
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The versioninfo check did not return 200
    #[error("Credentials rejected by ISE (status {status}): {body}")]
    CredentialsRejected { status: u16, body: String },

    /// CSV input could not be opened or decoded
    #[error("Failed to read CSV {path}: {source}")]
    CsvRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV input is structurally invalid
    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, IseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_rejected_display() {
        let err = IseError::CredentialsRejected {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Credentials rejected by ISE (status 401): Unauthorized"
        );
    }
}
