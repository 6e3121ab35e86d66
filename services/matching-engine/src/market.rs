//! Per-suit single-level market
//!
//! Each suit carries at most one resting bid and one resting ask. A
//! quote must strictly improve its side to replace the resting quote; a
//! price that crosses the opposing side executes immediately instead of
//! resting, so a standing cross never exists. Fills settle directly
//! against the shared player ledger passed in by the session.

use serde::{Deserialize, Serialize};
use types::ids::PlayerId;
use types::suit::Suit;

use crate::events::GameEvent;
use crate::session::PlayerState;

/// A resting quote: the single best price level on one side, no depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub price: i64,
    pub owner: PlayerId,
}

/// Single-level order book and settlement for one suit.
#[derive(Debug)]
pub struct Market {
    suit: Suit,
    best_bid: Option<Quote>,
    best_ask: Option<Quote>,
}

impl Market {
    pub fn new(suit: Suit) -> Self {
        Self {
            suit,
            best_bid: None,
            best_ask: None,
        }
    }

    pub fn best_bid(&self) -> Option<Quote> {
        self.best_bid
    }

    pub fn best_ask(&self) -> Option<Quote> {
        self.best_ask
    }

    /// Post a bid, or cross it into an immediate buy.
    ///
    /// Rejected when the player id is out of range, the price is
    /// negative, or the price does not strictly improve the resting
    /// bid. A player may out-bid their own resting bid.
    pub fn bid(
        &mut self,
        player: PlayerId,
        price: i64,
        players: &mut [PlayerState],
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if player.index() >= players.len() || price < 0 {
            return false;
        }
        if let Some(best) = self.best_bid {
            if price <= best.price {
                return false;
            }
        }
        // Cross: at or through the resting ask, take it instead of posting.
        if let Some(ask) = self.best_ask {
            if price >= ask.price {
                return self.buy(player, players, events);
            }
        }

        self.best_bid = Some(Quote { price, owner: player });
        events.push(GameEvent::Quote {
            player,
            suit: self.suit,
            is_bid: true,
            price,
        });
        true
    }

    /// Post an ask, or cross it into an immediate sell.
    ///
    /// Additionally rejected when the player holds none of the suit.
    pub fn ask(
        &mut self,
        player: PlayerId,
        price: i64,
        players: &mut [PlayerState],
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if player.index() >= players.len() || price < 0 {
            return false;
        }
        // No short selling.
        if players[player.index()].hand.count(self.suit) == 0 {
            return false;
        }
        if let Some(best) = self.best_ask {
            if price >= best.price {
                return false;
            }
        }
        // Cross: at or through the resting bid, hit it instead of posting.
        if let Some(bid) = self.best_bid {
            if price <= bid.price {
                return self.sell(player, players, events);
            }
        }

        self.best_ask = Some(Quote { price, owner: player });
        events.push(GameEvent::Quote {
            player,
            suit: self.suit,
            is_bid: false,
            price,
        });
        true
    }

    /// Pull the player's own resting quotes.
    ///
    /// The out event fires even when the player had nothing resting.
    pub fn out(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        if self.best_bid.map_or(false, |q| q.owner == player) {
            self.best_bid = None;
        }
        if self.best_ask.map_or(false, |q| q.owner == player) {
            self.best_ask = None;
        }
        events.push(GameEvent::Out {
            player,
            suit: self.suit,
        });
    }

    /// Take the resting ask at its posted price.
    ///
    /// Rejected when the buyer id is out of range, no ask rests, or the
    /// caller owns it. A fill consumes the opposing quote as well: the
    /// bid that was resting is stale once the level trades.
    pub fn buy(
        &mut self,
        buyer: PlayerId,
        players: &mut [PlayerState],
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if buyer.index() >= players.len() {
            return false;
        }
        let ask = match self.best_ask {
            Some(quote) => quote,
            None => return false,
        };
        if ask.owner == buyer {
            return false;
        }

        self.settle(buyer, ask.owner, true, ask.price, players, events);
        self.best_bid = None;
        self.best_ask = None;
        true
    }

    /// Hit the resting bid at its posted price.
    ///
    /// Rejected when the seller id is out of range, no bid rests, the
    /// caller owns it, or the caller holds none of the suit.
    pub fn sell(
        &mut self,
        seller: PlayerId,
        players: &mut [PlayerState],
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if seller.index() >= players.len() {
            return false;
        }
        let bid = match self.best_bid {
            Some(quote) => quote,
            None => return false,
        };
        // No short selling.
        if players[seller.index()].hand.count(self.suit) == 0 {
            return false;
        }
        if bid.owner == seller {
            return false;
        }

        self.settle(bid.owner, seller, false, bid.price, players, events);
        self.best_bid = None;
        self.best_ask = None;
        true
    }

    /// Move cash and one card between the parties and record the fill.
    fn settle(
        &self,
        buyer: PlayerId,
        seller: PlayerId,
        buyer_initiated: bool,
        price: i64,
        players: &mut [PlayerState],
        events: &mut Vec<GameEvent>,
    ) {
        players[buyer.index()].cash -= price;
        players[seller.index()].cash += price;
        players[buyer.index()].hand.add(self.suit);
        players[seller.index()].hand.remove(self.suit);
        events.push(GameEvent::Fill {
            buyer,
            seller,
            buyer_initiated,
            suit: self.suit,
            price,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::hand::Hand;

    const SUIT: Suit = Suit::Clubs;

    fn ledger(cards: &[u32]) -> Vec<PlayerState> {
        cards
            .iter()
            .map(|&n| {
                let mut hand = Hand::new();
                for _ in 0..n {
                    hand.add(SUIT);
                }
                PlayerState { cash: -50, hand }
            })
            .collect()
    }

    fn market() -> Market {
        Market::new(SUIT)
    }

    #[test]
    fn test_bid_posts_and_emits() {
        let mut market = market();
        let mut players = ledger(&[1, 1]);
        let mut events = Vec::new();

        assert!(market.bid(PlayerId::new(0), 5, &mut players, &mut events));
        assert_eq!(market.best_bid().map(|q| q.price), Some(5));
        assert_eq!(market.best_ask(), None);
        assert_eq!(
            events,
            vec![GameEvent::Quote {
                player: PlayerId::new(0),
                suit: SUIT,
                is_bid: true,
                price: 5,
            }]
        );
    }

    #[test]
    fn test_bid_must_strictly_improve() {
        let mut market = market();
        let mut players = ledger(&[1, 1]);
        let mut events = Vec::new();

        assert!(market.bid(PlayerId::new(0), 5, &mut players, &mut events));
        events.clear();

        // Equal or worse prices are rejected without an event.
        assert!(!market.bid(PlayerId::new(1), 5, &mut players, &mut events));
        assert!(!market.bid(PlayerId::new(1), 4, &mut players, &mut events));
        assert!(events.is_empty());
        assert_eq!(market.best_bid().map(|q| q.owner), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut market = market();
        let mut players = ledger(&[1, 1]);
        let mut events = Vec::new();

        assert!(!market.bid(PlayerId::new(0), -1, &mut players, &mut events));
        assert!(!market.ask(PlayerId::new(0), -1, &mut players, &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_player_may_outbid_own_quote() {
        let mut market = market();
        let mut players = ledger(&[1, 1]);
        let mut events = Vec::new();

        assert!(market.bid(PlayerId::new(0), 3, &mut players, &mut events));
        assert!(market.bid(PlayerId::new(0), 4, &mut players, &mut events));
        assert_eq!(market.best_bid().map(|q| q.price), Some(4));
    }

    #[test]
    fn test_crossing_bid_fills_at_ask_price() {
        let mut market = market();
        let mut players = ledger(&[0, 1]);
        let mut events = Vec::new();

        assert!(market.ask(PlayerId::new(1), 7, &mut players, &mut events));
        events.clear();

        // Bid 8 crosses the resting ask: trade at 7, not 8.
        assert!(market.bid(PlayerId::new(0), 8, &mut players, &mut events));
        assert_eq!(
            events,
            vec![GameEvent::Fill {
                buyer: PlayerId::new(0),
                seller: PlayerId::new(1),
                buyer_initiated: true,
                suit: SUIT,
                price: 7,
            }]
        );
        assert_eq!(players[0].cash, -57);
        assert_eq!(players[1].cash, -43);
        assert_eq!(players[0].hand.count(SUIT), 1);
        assert_eq!(players[1].hand.count(SUIT), 0);
        assert_eq!(market.best_bid(), None);
        assert_eq!(market.best_ask(), None);
    }

    #[test]
    fn test_crossing_ask_fills_at_bid_price() {
        let mut market = market();
        let mut players = ledger(&[0, 1]);
        let mut events = Vec::new();

        assert!(market.bid(PlayerId::new(0), 6, &mut players, &mut events));
        events.clear();

        assert!(market.ask(PlayerId::new(1), 4, &mut players, &mut events));
        assert_eq!(
            events,
            vec![GameEvent::Fill {
                buyer: PlayerId::new(0),
                seller: PlayerId::new(1),
                buyer_initiated: false,
                suit: SUIT,
                price: 6,
            }]
        );
        assert_eq!(players[0].cash, -56);
        assert_eq!(players[1].cash, -44);
    }

    #[test]
    fn test_short_sell_rejected() {
        let mut market = market();
        let mut players = ledger(&[0, 1]);
        let mut events = Vec::new();

        assert!(!market.ask(PlayerId::new(0), 3, &mut players, &mut events));
        assert!(events.is_empty());
        assert_eq!(market.best_ask(), None);

        // Sell against a resting bid is also gated on holdings.
        assert!(market.bid(PlayerId::new(1), 3, &mut players, &mut events));
        assert!(!market.sell(PlayerId::new(0), &mut players, &mut events));
        assert_eq!(players[0].cash, -50);
    }

    #[test]
    fn test_self_trade_rejected() {
        let mut market = market();
        let mut players = ledger(&[1, 1]);
        let mut events = Vec::new();

        assert!(market.ask(PlayerId::new(0), 5, &mut players, &mut events));
        assert!(!market.buy(PlayerId::new(0), &mut players, &mut events));

        // A bid crossing your own ask is rejected too, leaving the ask
        // standing and the bid unposted.
        assert!(!market.bid(PlayerId::new(0), 6, &mut players, &mut events));
        assert_eq!(market.best_ask().map(|q| q.price), Some(5));
        assert_eq!(market.best_bid(), None);
        assert_eq!(players[0].cash, -50);
    }

    #[test]
    fn test_buy_clears_both_sides() {
        let mut market = market();
        let mut players = ledger(&[1, 1, 1]);
        let mut events = Vec::new();

        assert!(market.bid(PlayerId::new(0), 2, &mut players, &mut events));
        assert!(market.ask(PlayerId::new(1), 6, &mut players, &mut events));
        assert!(market.buy(PlayerId::new(2), &mut players, &mut events));

        assert_eq!(market.best_bid(), None);
        assert_eq!(market.best_ask(), None);
        assert_eq!(players[2].cash, -56);
        assert_eq!(players[1].cash, -44);
        assert_eq!(players[0].cash, -50);
    }

    #[test]
    fn test_buy_without_ask_rejected() {
        let mut market = market();
        let mut players = ledger(&[1, 1]);
        let mut events = Vec::new();

        assert!(!market.buy(PlayerId::new(0), &mut players, &mut events));
        assert!(!market.sell(PlayerId::new(0), &mut players, &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_out_clears_only_own_quotes() {
        let mut market = market();
        let mut players = ledger(&[1, 1]);
        let mut events = Vec::new();

        assert!(market.bid(PlayerId::new(0), 2, &mut players, &mut events));
        assert!(market.ask(PlayerId::new(1), 6, &mut players, &mut events));
        events.clear();

        market.out(PlayerId::new(0), &mut events);
        assert_eq!(market.best_bid(), None);
        assert_eq!(market.best_ask().map(|q| q.owner), Some(PlayerId::new(1)));
        assert_eq!(
            events,
            vec![GameEvent::Out {
                player: PlayerId::new(0),
                suit: SUIT,
            }]
        );

        // Out with nothing resting still announces.
        events.clear();
        market.out(PlayerId::new(0), &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_out_of_range_player_rejected() {
        let mut market = market();
        let mut players = ledger(&[1, 1]);
        let mut events = Vec::new();
        let stranger = PlayerId::new(9);

        assert!(!market.bid(stranger, 5, &mut players, &mut events));
        assert!(!market.ask(stranger, 5, &mut players, &mut events));
        assert!(events.is_empty());

        // Resting liquidity from a valid player is not reachable either.
        assert!(market.bid(PlayerId::new(0), 3, &mut players, &mut events));
        assert!(market.ask(PlayerId::new(1), 6, &mut players, &mut events));
        assert!(!market.buy(stranger, &mut players, &mut events));
        assert!(!market.sell(stranger, &mut players, &mut events));
        assert_eq!(market.best_bid().map(|q| q.price), Some(3));
        assert_eq!(market.best_ask().map(|q| q.price), Some(6));
    }

    #[test]
    fn test_no_standing_cross_after_any_step() {
        let mut market = market();
        let mut players = ledger(&[2, 2, 2]);
        let mut events = Vec::new();

        market.bid(PlayerId::new(0), 3, &mut players, &mut events);
        market.ask(PlayerId::new(1), 5, &mut players, &mut events);
        market.bid(PlayerId::new(2), 5, &mut players, &mut events);

        if let (Some(bid), Some(ask)) = (market.best_bid(), market.best_ask()) {
            assert!(bid.price < ask.price);
        }
    }
}
