// Configuration constants and environment helpers
use std::path::PathBuf;

use crate::errors::MigrationError;

/// Legacy save read when no path is given on the command line.
pub const DEFAULT_SAVE_FILE: &str = "planar.save";

/// Destination store used when `SAVE_MIGRATE_DATABASE` is not set.
pub const DEFAULT_DATABASE: &str = "planar.sqlite";

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "save_migrate=info,save_migrate_repository=info";

/// Exit code for every aborted conversion.
pub const FAILURE_EXIT_CODE: u8 = 2;

const DATABASE_VAR: &str = "SAVE_MIGRATE_DATABASE";
const ATOMIC_LOCATION_OPTIONS_VAR: &str = "SAVE_MIGRATE_ATOMIC_LOCATION_OPTIONS";

/// Settings for one conversion run, built once at process entry.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Path of the destination SQLite store. It must not exist yet.
    pub destination: PathBuf,
    /// Wrap the location options phase in a transaction as well. The legacy
    /// conversion committed those rows one by one.
    pub atomic_location_options: bool,
}

impl MigrationConfig {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            atomic_location_options: false,
        }
    }

    /// Reads the configuration from the environment.
    pub fn from_env() -> Result<Self, MigrationError> {
        let destination = std::env::var(DATABASE_VAR).unwrap_or_else(|_| DEFAULT_DATABASE.to_string());
        let atomic_location_options = match std::env::var(ATOMIC_LOCATION_OPTIONS_VAR) {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                MigrationError::Config(format!(
                    "{ATOMIC_LOCATION_OPTIONS_VAR} must be true or false, got {raw:?}"
                ))
            })?,
            Err(_) => false,
        };

        Ok(Self {
            destination: PathBuf::from(destination),
            atomic_location_options,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
