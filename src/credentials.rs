//! Operator Credentials
//!
//! Username, password and target host are collected interactively once per
//! run and kept only in memory.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use dialoguer::{Input, Password};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::error::IseError;

/// ERS admin credentials
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Prompt for username (echoed) then password (hidden)
    pub fn prompt() -> Result<Self> {
        let username: String = Input::new()
            .with_prompt("Enter your username")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read username")?;

        let password = Password::new()
            .with_prompt("Enter your password")
            .allow_empty_password(true)
            .interact()
            .context("Failed to read password")?;

        Ok(Self::new(username, password))
    }

    /// `Basic <base64(username:password)>`
    pub fn basic_auth_value(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {}", encoded)
    }

    /// Headers sent with every ERS call
    pub fn auth_headers(&self) -> Result<HeaderMap, IseError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut auth = HeaderValue::from_str(&self.basic_auth_value())?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        Ok(headers)
    }
}

/// Prompt for the PAN address
pub fn prompt_host() -> Result<String> {
    let host: String = Input::new()
        .with_prompt("Provide ISE PAN IP")
        .interact_text()
        .context("Failed to read ISE host")?;
    Ok(host.trim().to_string())
}
