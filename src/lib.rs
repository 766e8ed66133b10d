//! ISE Authorization Profile Importer Library
//!
//! Creates Cisco ISE authorization profiles from CSV rows through the ERS
//! REST API, one profile per row.

pub mod config;
pub mod credentials;
pub mod error;
pub mod importer;
pub mod ise;
pub mod profile;
pub mod rows;

pub use config::IseConfig;
pub use credentials::Credentials;
pub use error::IseError;
pub use importer::ImportStats;
pub use ise::{CreateOutcome, IseClient};
pub use profile::AuthorizationProfile;
pub use rows::ProfileRow;
