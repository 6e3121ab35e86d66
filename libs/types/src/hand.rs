//! Per-player card ledger
//!
//! A `Hand` maps each suit to a non-negative count. Counts are kept
//! non-negative by the engine's no-short-sell checks before mutation,
//! not by clamping here.

use serde::{Deserialize, Serialize};

use crate::suit::Suit;

/// Card counts held by one player, indexed by suit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    counts: [u32; Suit::COUNT],
}

impl Hand {
    /// An empty hand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards held in a suit.
    pub fn count(&self, suit: Suit) -> u32 {
        self.counts[suit.index()]
    }

    /// Total number of cards held across all suits.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Add one card of a suit.
    pub fn add(&mut self, suit: Suit) {
        self.counts[suit.index()] += 1;
    }

    /// Remove one card of a suit.
    ///
    /// The caller must have verified the suit is held; the count is
    /// never allowed to go negative.
    pub fn remove(&mut self, suit: Suit) {
        debug_assert!(self.counts[suit.index()] > 0);
        self.counts[suit.index()] -= 1;
    }
}

impl FromIterator<Suit> for Hand {
    fn from_iter<I: IntoIterator<Item = Suit>>(cards: I) -> Self {
        let mut hand = Hand::new();
        for card in cards {
            hand.add(card);
        }
        hand
    }
}
