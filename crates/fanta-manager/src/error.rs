//! Error types for the RosterManager

use fanta_domain::EngineError;
use thiserror::Error;

/// Errors that can occur during roster operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManagerError {
    /// Rule, gate or lookup failure raised by the engine
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// League store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ManagerError {
    /// Stable machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            ManagerError::Engine(e) => e.code(),
            ManagerError::Store(_) => "store",
            ManagerError::Config(_) => "config",
        }
    }

    /// The engine error, when this is one
    pub fn as_engine(&self) -> Option<&EngineError> {
        match self {
            ManagerError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

pub(crate) fn store_error<E: std::fmt::Display>(e: E) -> ManagerError {
    ManagerError::Store(e.to_string())
}
