//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] fanta_store::StoreError),

    /// Request rejected or failed in the manager
    #[error("{0}")]
    Manager(#[from] fanta_manager::ManagerError),

    /// Scheduler error
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] fanta_scheduler::SchedulerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Stable reason code, when the manager rejected the request
    pub fn code(&self) -> Option<&'static str> {
        match self {
            CliError::Manager(e) => Some(e.code()),
            _ => None,
        }
    }
}
