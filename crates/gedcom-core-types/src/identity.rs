//! Registry identity
//!
//! A `RegistryId` names one cross-reference registry (one per open
//! document). Records keep only this value as their back-reference, never a
//! pointer to the registry itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a single cross-reference registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistryId(Uuid);

impl RegistryId {
    /// Generate a new RegistryId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RegistryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RegistryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
