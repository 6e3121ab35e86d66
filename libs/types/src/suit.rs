//! The four tradable suits
//!
//! Each suit is an independent instrument with its own market. Suits are
//! paired into two fixed opposite pairs; the goal suit of a session is
//! derived from the opposite pairing at deal time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four tradable suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// Number of suits.
    pub const COUNT: usize = 4;

    /// All suits in declaration order.
    pub const ALL: [Suit; Suit::COUNT] =
        [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// The suit's partner in its opposite pair.
    ///
    /// Hearts pairs with Diamonds, Clubs pairs with Spades.
    pub fn opposite(self) -> Suit {
        match self {
            Suit::Hearts => Suit::Diamonds,
            Suit::Diamonds => Suit::Hearts,
            Suit::Clubs => Suit::Spades,
            Suit::Spades => Suit::Clubs,
        }
    }

    /// Dense index into per-suit arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Suit at a dense index, if in range.
    pub fn from_index(index: usize) -> Option<Suit> {
        Suit::ALL.get(index).copied()
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for suit in Suit::ALL {
            assert_eq!(suit.opposite().opposite(), suit);
            assert_ne!(suit.opposite(), suit);
        }
    }

    #[test]
    fn test_opposite_pairs() {
        assert_eq!(Suit::Hearts.opposite(), Suit::Diamonds);
        assert_eq!(Suit::Clubs.opposite(), Suit::Spades);
    }

    #[test]
    fn test_index_round_trip() {
        for suit in Suit::ALL {
            assert_eq!(Suit::from_index(suit.index()), Some(suit));
        }
        assert_eq!(Suit::from_index(Suit::COUNT), None);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Suit::Clubs).unwrap();
        let back: Suit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Suit::Clubs);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn index_round_trips_and_out_of_range_is_none(index in 0usize..32) {
                match Suit::from_index(index) {
                    Some(suit) => prop_assert_eq!(suit.index(), index),
                    None => prop_assert!(index >= Suit::COUNT),
                }
            }
        }
    }
}
