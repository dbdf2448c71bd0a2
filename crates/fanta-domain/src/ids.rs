//! Identifier types for athletes, roster owners and transfer windows

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a real-world athlete, as issued by the statistics provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AthleteId(u32);

impl AthleteId {
    /// Wrap a provider identifier
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw provider value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AthleteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the participant owning a roster
///
/// Issued by the identity collaborator; the engine treats it as opaque.
/// Deserialization goes through [`OwnerId::new`], so stored documents obey
/// the same trimming and blank check.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OwnerId(String);

impl OwnerId {
    /// Create an owner id, rejecting blank values
    ///
    /// # Examples
    ///
    /// ```
    /// use fanta_domain::OwnerId;
    ///
    /// assert!(OwnerId::new("user-42").is_ok());
    /// assert!(OwnerId::new("   ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("Owner id cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the owner id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OwnerId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OwnerId> for String {
    fn from(owner: OwnerId) -> Self {
        owner.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a transfer window based on UUIDv7
///
/// UUIDv7 keeps windows created later sorting after earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(uuid::Uuid);

impl WindowId {
    /// Generate a new UUIDv7-based WindowId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse a WindowId from its hyphenated string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid window id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0.as_u128()
    }
}

impl Default for WindowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
