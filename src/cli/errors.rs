//! CLI-specific error types
//!
//! Every CLI error is fatal: main prints it and exits non-zero.

use std::io;

use thiserror::Error;

use crate::http_server::ConfigError;
use crate::products::StoreError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable or invalid
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Data file could not be opened or written
    #[error("{0}")]
    Store(#[from] StoreError),

    /// The command needs a file-backed store
    #[error("No data file configured; pass --data-file or set data_file in the config")]
    MissingDataFile,

    /// stdout or socket I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Output could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "CATALOG_CLI_CONFIG_ERROR",
            CliError::Store(_) => "CATALOG_CLI_STORE_ERROR",
            CliError::MissingDataFile => "CATALOG_CLI_MISSING_DATA_FILE",
            CliError::Io(_) => "CATALOG_CLI_IO_ERROR",
            CliError::Json(_) => "CATALOG_CLI_IO_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
