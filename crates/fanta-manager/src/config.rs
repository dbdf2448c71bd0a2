//! Configuration for the RosterManager

use crate::ManagerError;
use serde::{Deserialize, Serialize};

/// Configuration for roster operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// How many times a roster write is attempted when another writer
    /// commits first
    pub max_write_attempts: u32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: 3,
        }
    }
}

impl ManagerConfig {
    /// Configuration for deployments with many writers per roster
    pub fn high_contention() -> Self {
        Self {
            max_write_attempts: 10,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ManagerError> {
        if self.max_write_attempts == 0 {
            return Err(ManagerError::Config(
                "max_write_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ManagerConfig::default();
        assert_eq!(config.max_write_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = ManagerConfig {
            max_write_attempts: 0,
        };
        assert!(matches!(config.validate(), Err(ManagerError::Config(_))));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: ManagerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ManagerConfig::default());
        assert!(ManagerConfig::high_contention().max_write_attempts > config.max_write_attempts);
    }
}
