//! Event structures for the matching engine
//!
//! Events are emitted only for accepted state changes; rejected commands
//! emit nothing. Sinks receive events synchronously in emission order.

use serde::{Deserialize, Serialize};
use types::ids::PlayerId;
use types::suit::Suit;

/// A state change broadcast to every registered sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new best quote was posted on one side of a suit's market.
    Quote {
        player: PlayerId,
        suit: Suit,
        is_bid: bool,
        price: i64,
    },
    /// A player pulled their resting quotes in a suit.
    Out { player: PlayerId, suit: Suit },
    /// A trade settled between two players at a single price.
    ///
    /// `buyer_initiated` is true when the buy side triggered the match
    /// (a buy at market or a crossing bid).
    Fill {
        buyer: PlayerId,
        seller: PlayerId,
        buyer_initiated: bool,
        suit: Suit,
        price: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_round_trip() {
        let event = GameEvent::Fill {
            buyer: PlayerId::new(0),
            seller: PlayerId::new(2),
            buyer_initiated: true,
            suit: Suit::Clubs,
            price: 7,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
