//! Static party directory.
//!
//! The [`Directory`] is built once at startup and never mutated afterwards,
//! so it can be shared across request tasks behind an `Arc` without locking.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::PartyId;

// ---------------------------------------------------------------------------
// Party
// ---------------------------------------------------------------------------

/// A directory entry that can send or receive notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
}

impl Party {
    pub fn new(id: PartyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// Ordered, read-only collection of [`Party`] entries with unique ids.
#[derive(Debug, Clone)]
pub struct Directory {
    parties: Vec<Party>,
}

impl Directory {
    /// Build a directory from an ordered list of parties.
    ///
    /// Rejects the list with [`CoreError::Conflict`] if two entries share an id.
    pub fn new(parties: Vec<Party>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(parties.len());
        for party in &parties {
            if !seen.insert(party.id) {
                return Err(CoreError::Conflict(format!(
                    "duplicate party id {} in directory",
                    party.id
                )));
            }
        }
        Ok(Self { parties })
    }

    /// The built-in directory used when no directory file is configured.
    pub fn builtin() -> Self {
        Self {
            parties: vec![
                Party::new(1, "Emma"),
                Party::new(2, "Bruno"),
                Party::new(3, "Rick"),
                Party::new(4, "Lena"),
            ],
        }
    }

    /// Load a directory from a JSON file containing an array of
    /// `{"id": .., "name": ..}` objects.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|e| {
            CoreError::InvalidSource(format!("cannot read {}: {e}", path.display()))
        })?;
        let parties: Vec<Party> = serde_json::from_slice(&raw).map_err(|e| {
            CoreError::InvalidSource(format!("cannot parse {}: {e}", path.display()))
        })?;
        Self::new(parties)
    }

    /// Find the first party whose id equals `id`.
    pub fn find(&self, id: PartyId) -> Option<&Party> {
        self.parties.iter().find(|party| party.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Party> {
        self.parties.iter()
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
