//! Import Run
//!
//! Validates credentials, then walks the CSV rows in order and creates one
//! authorization profile per usable row. Rows are submitted one at a time;
//! a rejected create is reported and the run moves on.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::IseError;
use crate::ise::{CreateOutcome, ErrorDetail, IseClient};
use crate::profile::AuthorizationProfile;
use crate::rows::{read_rows, NumberedRow};

/// Import statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub rows_read: usize,
    pub created: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl ImportStats {
    pub fn summary(&self) -> String {
        format!(
            "Rows read: {}, created: {}, failed: {}, skipped: {}",
            self.rows_read, self.created, self.failed, self.skipped
        )
    }
}

/// Confirm the credentials against `versioninfo`.
///
/// Anything other than 200 aborts the run with
/// [`IseError::CredentialsRejected`].
pub async fn validate(client: &IseClient) -> Result<()> {
    let url = client.config().version_info_url();
    println!("Testing credentials with URL: {}", url);

    let check = client
        .check_credentials()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;
    println!("Response status code: {}", check.status.as_u16());

    if check.is_valid() {
        println!(" ====== Credentials are valid. ======");
        return Ok(());
    }

    println!(
        " ===== Failed to validate credentials. ===== Status Code: {}, Response: {}",
        check.status.as_u16(),
        check.body
    );
    Err(IseError::CredentialsRejected {
        status: check.status.as_u16(),
        body: check.body,
    }
    .into())
}

/// Create one profile and write the outcome to `out`
pub async fn submit<W: Write>(
    client: &IseClient,
    profile: &AuthorizationProfile,
    out: &mut W,
) -> Result<CreateOutcome> {
    let outcome = client
        .create_profile(profile)
        .await
        .with_context(|| format!("Failed to submit profile {}", profile.name))?;

    match &outcome {
        CreateOutcome::Created => {
            writeln!(out, "\n{}", created_message(&profile.name))?;
            writeln!(out, "{}", profile.to_pretty_json()?)?;
        }
        CreateOutcome::Rejected { status, detail } => {
            warn!(profile = %profile.name, status = *status, "Profile rejected by ISE");
            writeln!(out, "\n{}", rejected_message(&profile.name, *status, detail))?;
        }
    }

    Ok(outcome)
}

/// Validate credentials, then import every row of `csv_path`
pub async fn run(client: &IseClient, csv_path: &Path) -> Result<ImportStats> {
    validate(client).await?;

    let rows = read_rows(csv_path)?;
    info!("Importing {} rows from {}", rows.len(), csv_path.display());

    import_rows(client, &rows, &mut std::io::stdout()).await
}

/// Submit already-parsed rows, skipping those without `name`/`accessType`
pub async fn import_rows<W: Write>(
    client: &IseClient,
    rows: &[NumberedRow],
    out: &mut W,
) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    for numbered in rows {
        stats.rows_read += 1;

        let Some(profile) = AuthorizationProfile::from_row(&numbered.row) else {
            debug!("Row {}: missing name or accessType, skipped", numbered.line);
            stats.skipped += 1;
            continue;
        };

        match submit(client, &profile, out).await? {
            CreateOutcome::Created => stats.created += 1,
            CreateOutcome::Rejected { .. } => stats.failed += 1,
        }
    }

    info!("Import finished. {}", stats.summary());
    Ok(stats)
}

/// Transform the CSV and print the bodies that would be submitted, without
/// touching the network
pub fn preview(csv_path: &Path) -> Result<ImportStats> {
    let rows = read_rows(csv_path)?;
    let mut stats = ImportStats::default();

    for numbered in &rows {
        stats.rows_read += 1;
        match AuthorizationProfile::from_row(&numbered.row) {
            Some(profile) => {
                println!("\nRow {}: {}", numbered.line, profile.name);
                println!("{}", profile.to_pretty_json()?);
            }
            None => {
                debug!("Row {}: missing name or accessType, skipped", numbered.line);
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

pub fn created_message(name: &str) -> String {
    format!(" *** Successfully created profile: {}", name)
}

pub fn rejected_message(name: &str, status: u16, detail: &ErrorDetail) -> String {
    format!(
        " !!! Failed to create profile: {}, Status Code: {},\n Message: {}",
        name, status, detail
    )
}
