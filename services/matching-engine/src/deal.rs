//! Deck composition and the deal
//!
//! The 40-card deck assigns the {8, 10, 10, 12} multiset to the four
//! suits at random; the goal suit is the opposite of whichever suit got
//! 12 cards. The shuffled deck splits evenly across 4 or 5 players.

use rand::Rng;
use types::hand::Hand;
use types::suit::Suit;

/// Total cards dealt per session.
pub const DECK_SIZE: usize = 40;

/// Per-suit card counts, assigned to suits at random each deal.
pub const SUIT_SIZES: [usize; Suit::COUNT] = [8, 10, 10, 12];

/// The count that marks the goal suit's opposite.
pub const GOAL_MARKER_SIZE: usize = 12;

/// Outcome of dealing one session.
#[derive(Debug, Clone)]
pub struct Deal {
    /// Hidden from players until end of game.
    pub goal_suit: Suit,
    /// One dealt hand per player, in player order.
    pub hands: Vec<Hand>,
}

/// Fisher-Yates shuffle.
fn shuffle<T, R: Rng>(rng: &mut R, items: &mut [T]) {
    let mut n = items.len();
    while n > 1 {
        n -= 1;
        let k = rng.gen_range(0..=n);
        items.swap(k, n);
    }
}

/// Deal a fresh session for `player_count` players.
///
/// The caller validates the player count; 4 and 5 both divide the deck
/// evenly so no remainder cards exist.
pub fn deal<R: Rng>(rng: &mut R, player_count: usize) -> Deal {
    let mut sizes = SUIT_SIZES;
    shuffle(rng, &mut sizes);

    let mut goal_suit = Suit::Hearts;
    let mut deck: Vec<Suit> = Vec::with_capacity(DECK_SIZE);
    for (i, &size) in sizes.iter().enumerate() {
        let suit = Suit::ALL[i];
        if size == GOAL_MARKER_SIZE {
            goal_suit = suit.opposite();
        }
        deck.extend(std::iter::repeat(suit).take(size));
    }
    shuffle(rng, &mut deck);

    let hand_size = DECK_SIZE / player_count;
    let hands = deck
        .chunks(hand_size)
        .map(|chunk| chunk.iter().copied().collect())
        .collect();

    Deal { goal_suit, hands }
}
