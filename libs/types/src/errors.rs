//! Error taxonomy for session construction
//!
//! Rejected trading commands are not errors: the engine reports them as
//! ordinary boolean failures with no state change and no event. Errors
//! here are fatal construction-time invariant violations.

use thiserror::Error;

/// Fatal errors raised while building a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player count must be 4 or 5, got {0}")]
    InvalidPlayerCount(usize),

    #[error("dealt {dealt} cards, expected {expected}")]
    DeckMismatch { dealt: usize, expected: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = GameError::InvalidPlayerCount(3);
        assert_eq!(err.to_string(), "player count must be 4 or 5, got 3");

        let err = GameError::DeckMismatch { dealt: 39, expected: 40 };
        assert!(err.to_string().contains("39"));
        assert!(err.to_string().contains("40"));
    }
}
