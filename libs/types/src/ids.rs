//! Identifier types for game entities
//!
//! Players are in-process agents created once at session start, so their
//! identity is a dense 0-based index rather than a random identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a player within one session.
///
/// Indexes directly into the session's player ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(usize);

impl PlayerId {
    /// Create from a 0-based index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the 0-based index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
