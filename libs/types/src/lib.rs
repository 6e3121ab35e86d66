//! Types library for the figgie trading game
//!
//! This library provides the core type definitions shared across the game
//! workspace: the suit vocabulary, player identities, card ledgers, and the
//! error taxonomy for session construction.
//!
//! # Modules
//! - `suit`: The four tradable suits and their opposite pairing
//! - `hand`: Per-suit card counts for one player
//! - `ids`: Player identifiers
//! - `errors`: Error taxonomy

pub mod errors;
pub mod hand;
pub mod ids;
pub mod suit;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::hand::*;
    pub use crate::ids::*;
    pub use crate::suit::*;
}
