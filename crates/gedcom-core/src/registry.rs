//! Cross-reference registry
//!
//! Maps identifiers to handles into the owning document's record arena. The
//! registry is the only source of fresh identifiers and the only judge of
//! uniqueness; records keep just the [`RegistryId`] of the registry that
//! issued their identifier.

use indexmap::IndexMap;

use gedcom_core_types::RegistryId;

use crate::errors::{GedcomError, Result};
use crate::xref::Xref;

/// Opaque handle to a record in a document's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(u64);

impl RecordKey {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier-to-record map with a private counter
///
/// One counter serves every prefix, so `N1`, `S2`, `N3` is a possible
/// sequence. Counter values are never handed out twice, even after the
/// identifier they produced is removed.
#[derive(Debug, Clone)]
pub struct Registry {
    id: RegistryId,
    counter: u64,
    entries: IndexMap<Xref, RecordKey>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            id: RegistryId::new(),
            counter: 0,
            entries: IndexMap::new(),
        }
    }

    pub fn id(&self) -> RegistryId {
        self.id
    }

    /// Produce an identifier that is not currently mapped
    ///
    /// # Errors
    ///
    /// Returns `IdentifierSpaceExhausted` if the counter overflows, or
    /// `InvalidXref` if `prefix` contains reserved characters.
    pub fn generate_identifier(&mut self, prefix: &str) -> Result<Xref> {
        loop {
            self.counter = self
                .counter
                .checked_add(1)
                .ok_or_else(|| GedcomError::IdentifierSpaceExhausted {
                    prefix: prefix.to_string(),
                })?;
            let candidate = Xref::generated(prefix, self.counter)?;
            if !self.entries.contains_key(&candidate) {
                tracing::debug!(xref = %candidate, "Generated identifier");
                return Ok(candidate);
            }
        }
    }

    /// Register a record under an explicit identifier
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentifier` if the identifier is already mapped.
    pub fn add(&mut self, xref: Xref, key: RecordKey) -> Result<()> {
        if self.entries.contains_key(&xref) {
            return Err(GedcomError::DuplicateIdentifier {
                xref: xref.to_string(),
            });
        }
        self.entries.insert(xref, key);
        Ok(())
    }

    pub fn lookup(&self, xref: &Xref) -> Option<RecordKey> {
        self.entries.get(xref).copied()
    }

    pub fn contains(&self, xref: &Xref) -> bool {
        self.entries.contains_key(xref)
    }

    /// Drop a mapping
    ///
    /// Copies of the identifier held by other records are left dangling.
    pub fn remove(&mut self, xref: &Xref) -> Option<RecordKey> {
        self.entries.shift_remove(xref)
    }

    /// Mappings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Xref, RecordKey)> {
        self.entries.iter().map(|(xref, key)| (xref, *key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
