//! Game session
//!
//! Owns the player ledger and one market per suit. Deals the deck with a
//! seeded RNG, routes trading commands into the markets, fans events out
//! to registered sinks, and applies the goal-suit payout at end of game.
//!
//! Every mutating entry point is a no-op returning failure once the
//! session has ended. The session has no interior locking: callers that
//! share it across tasks wrap it in a single mutual-exclusion domain so
//! a fill, which touches two players' cash and hands, stays atomic.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use types::errors::GameError;
use types::hand::Hand;
use types::ids::PlayerId;
use types::suit::Suit;

use crate::deal::{self, DECK_SIZE};
use crate::events::GameEvent;
use crate::market::{Market, Quote};

/// Total pot returned to players through end-game payouts.
pub const POT: i64 = 200;

/// Payout per goal-suit card held at end of game.
pub const PAYOFF_PER_CARD: i64 = 10;

/// Receives every accepted-state-change event, synchronously, in
/// emission order.
///
/// Sinks are informational: they get a shared reference and have no way
/// to re-enter the session from inside delivery. Delivery scheduling
/// (delays, queues) belongs to the layer that registered the sink.
pub trait EventSink: Send {
    fn deliver(&self, event: &GameEvent);
}

/// One player's cash and holdings.
///
/// Cash is signed and may go negative: the buy-in is a loan recovered
/// through end-game payouts. Mutated only by settlement and payout.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub cash: i64,
    pub hand: Hand,
}

/// A trading session for 4 or 5 in-process players.
pub struct GameSession {
    players: Vec<PlayerState>,
    markets: [Market; Suit::COUNT],
    goal_suit: Suit,
    ended: bool,
    sinks: Vec<Box<dyn EventSink>>,
}

impl GameSession {
    /// Deal and open a new session.
    ///
    /// Debits every player the buy-in (`POT / player_count`) and deals
    /// the deck evenly. Fails fast on an invalid player count or a
    /// dealt-card mismatch; trading never starts from a bad ledger.
    pub fn new(player_count: usize, seed: u64) -> Result<Self, GameError> {
        if player_count != 4 && player_count != 5 {
            return Err(GameError::InvalidPlayerCount(player_count));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let deal = deal::deal(&mut rng, player_count);

        let dealt: usize = deal.hands.iter().map(|h| h.total() as usize).sum();
        if dealt != DECK_SIZE || deal.hands.len() != player_count {
            return Err(GameError::DeckMismatch {
                dealt,
                expected: DECK_SIZE,
            });
        }

        let buy_in = POT / player_count as i64;
        let players = deal
            .hands
            .into_iter()
            .map(|hand| PlayerState {
                cash: -buy_in,
                hand,
            })
            .collect();

        Ok(Self {
            players,
            markets: Suit::ALL.map(Market::new),
            goal_suit: deal.goal_suit,
            ended: false,
            sinks: Vec::new(),
        })
    }

    /// Register a notification sink. One per player plus any presenters.
    pub fn register_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.players[player.index()].hand
    }

    pub fn cash(&self, player: PlayerId) -> i64 {
        self.players[player.index()].cash
    }

    pub fn best_bid(&self, suit: Suit) -> Option<Quote> {
        self.markets[suit.index()].best_bid()
    }

    pub fn best_ask(&self, suit: Suit) -> Option<Quote> {
        self.markets[suit.index()].best_ask()
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// The suit whose holdings pay out. Fixed at deal time; exposed for
    /// scoring and tests, hidden from agents behind their session view.
    pub fn goal_suit(&self) -> Suit {
        self.goal_suit
    }

    /// Post or cross a bid for `player` in `suit`.
    pub fn bid(&mut self, player: PlayerId, suit: Suit, price: i64) -> bool {
        self.command(player, |session, events| {
            session.markets[suit.index()].bid(player, price, &mut session.players, events)
        })
    }

    /// Post or cross an ask for `player` in `suit`.
    pub fn ask(&mut self, player: PlayerId, suit: Suit, price: i64) -> bool {
        self.command(player, |session, events| {
            session.markets[suit.index()].ask(player, price, &mut session.players, events)
        })
    }

    /// Pull `player`'s resting quotes in `suit`.
    pub fn out(&mut self, player: PlayerId, suit: Suit) {
        self.command(player, |session, events| {
            session.markets[suit.index()].out(player, events);
            true
        });
    }

    /// Take the resting ask in `suit` at its posted price.
    pub fn buy(&mut self, player: PlayerId, suit: Suit) -> bool {
        self.command(player, |session, events| {
            session.markets[suit.index()].buy(player, &mut session.players, events)
        })
    }

    /// Hit the resting bid in `suit` at its posted price.
    pub fn sell(&mut self, player: PlayerId, suit: Suit) -> bool {
        self.command(player, |session, events| {
            session.markets[suit.index()].sell(player, &mut session.players, events)
        })
    }

    /// Shared gate for every mutating command: rejected outright after
    /// the session ends or for an unknown player, and events produced by
    /// an accepted command broadcast before the result returns.
    fn command<F>(&mut self, player: PlayerId, op: F) -> bool
    where
        F: FnOnce(&mut Self, &mut Vec<GameEvent>) -> bool,
    {
        if self.ended || player.index() >= self.players.len() {
            return false;
        }
        let mut events = Vec::new();
        let accepted = op(self, &mut events);
        self.broadcast(&events);
        accepted
    }

    fn broadcast(&self, events: &[GameEvent]) {
        for event in events {
            for sink in &self.sinks {
                sink.deliver(event);
            }
        }
    }

    /// End the session and apply payouts. Idempotent.
    ///
    /// Each player collects `PAYOFF_PER_CARD` per goal-suit card out of
    /// the pot; the remaining pot splits evenly among the players tied
    /// at the top goal count. The integer-division remainder of that
    /// split is dropped, not redistributed.
    pub fn end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;

        let goal_counts: Vec<i64> = self
            .players
            .iter()
            .map(|p| p.hand.count(self.goal_suit) as i64)
            .collect();

        let mut pot = POT;
        for (player, &count) in self.players.iter_mut().zip(&goal_counts) {
            let payoff = count * PAYOFF_PER_CARD;
            pot -= payoff;
            player.cash += payoff;
        }

        let top = goal_counts.iter().copied().max().unwrap_or(0);
        let leaders: Vec<usize> = goal_counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == top)
            .map(|(i, _)| i)
            .collect();
        let bonus = pot / leaders.len() as i64;
        for i in leaders {
            self.players[i].cash += bonus;
        }
    }

    /// Build a session with a fixed ledger, bypassing the deal.
    #[cfg(test)]
    pub(crate) fn fixed(hands: Vec<Hand>, goal_suit: Suit) -> Self {
        let buy_in = POT / hands.len() as i64;
        let players = hands
            .into_iter()
            .map(|hand| PlayerState {
                cash: -buy_in,
                hand,
            })
            .collect();
        Self {
            players,
            markets: Suit::ALL.map(Market::new),
            goal_suit,
            ended: false,
            sinks: Vec::new(),
        }
    }
}
