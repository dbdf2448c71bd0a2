//! Error types for scheduler operations

use fanta_manager::ManagerError;
use thiserror::Error;

/// Errors that can occur during scheduler operations
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Period settlement or repricing failed as a whole
    #[error("Batch error: {0}")]
    Batch(#[from] ManagerError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
