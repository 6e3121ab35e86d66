//! Belief-driven heuristic trader
//!
//! Tracks, per suit, a probability that the suit is the goal suit plus a
//! confidence half-width. The initial belief comes from the agent's own
//! dealt counts; quotes from other players and the agent's own passive
//! fills nudge it. The belief turns into a fair-value band, and the
//! trader either takes a market trading through that band (one time in
//! four) or re-quotes both sides of it after a random think delay.

use std::time::Duration;

use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use live_session::{PlayerAgent, SessionView};
use matching_engine::deal::DECK_SIZE;
use matching_engine::session::PAYOFF_PER_CARD;
use types::ids::PlayerId;
use types::suit::Suit;

const BELIEF_STEP: f64 = 0.05;
const CONFIDENCE_STEP: f64 = 0.03;
const CONFIDENCE_FLOOR: f64 = 0.1;
const CONFIDENCE_CEIL: f64 = 0.6;

/// Heuristic trading agent with a deterministic seed.
pub struct SmartTrader {
    rng: ChaCha8Rng,
    view: Option<SessionView>,
    hand_size: u32,
    goal_pr: [f64; Suit::COUNT],
    goal_conf: [f64; Suit::COUNT],
}

impl SmartTrader {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            view: None,
            hand_size: 0,
            goal_pr: [0.0; Suit::COUNT],
            goal_conf: [0.0; Suit::COUNT],
        }
    }

    /// Prior that a suit is the goal suit, from the dealt count alone.
    ///
    /// Holding more of a suit makes its opposite-pair partner more
    /// likely to carry 12 cards, so the band widens with count. The
    /// bands are calibrated per hand size (10 for 4 players, 8 for 5).
    fn initial_goal_pr(&self, count: u32) -> f64 {
        match self.hand_size {
            8 => {
                let (lower, upper) = (0.05, 0.29);
                lower + (upper - lower) * (count as f64 / 8.0)
            }
            10 => {
                let (lower, upper) = (0.01, 0.30);
                lower + (upper - lower) * (count as f64 / 10.0)
            }
            _ => 0.25,
        }
    }

    /// Clamp confidence, floor probabilities at zero, and renormalize
    /// the probabilities to sum to one.
    fn normalize(&mut self) {
        for pr in &mut self.goal_pr {
            *pr = pr.max(0.0);
        }
        for conf in &mut self.goal_conf {
            *conf = conf.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEIL);
        }
        let sum: f64 = self.goal_pr.iter().sum();
        if sum > 0.0 {
            for pr in &mut self.goal_pr {
                *pr /= sum;
            }
        }
    }

    fn to_price(value: f64) -> i64 {
        value.round() as i64
    }

    /// Trade or re-quote every suit against the current fair band.
    async fn act_on_fair(&mut self) {
        let view = match &self.view {
            Some(view) => view.clone(),
            None => return,
        };

        for suit in Suit::ALL {
            let i = suit.index();
            let mut fair_low = (self.goal_pr[i] - self.goal_conf[i]) * PAYOFF_PER_CARD as f64;
            let mut fair_high = (self.goal_pr[i] + self.goal_conf[i]) * PAYOFF_PER_CARD as f64;

            if self.goal_pr[i] > 0.8 {
                // Near-certain goal suit: fold in expected bonus value.
                let adjust = (self.goal_pr[i] - 0.8) * 40.0;
                fair_low += adjust;
                fair_high += adjust;
            }
            let fair_mid = (fair_low + fair_high) / 2.0;

            let market = view.market(suit);
            let best_bid = market.best_bid().await;
            let best_ask = market.best_ask().await;

            let mut hit = false;
            let mut lift = false;
            if best_bid.unwrap_or(0) as f64 > fair_mid {
                hit = self.rng.gen_range(0..4) == 0;
            } else if (best_ask.unwrap_or(i64::MAX) as f64) < fair_mid {
                lift = self.rng.gen_range(0..4) == 0;
            }

            if hit {
                debug!(%suit, fair_mid, "hitting rich bid");
                market.sell().await;
            } else if lift {
                debug!(%suit, fair_mid, "lifting cheap ask");
                market.buy().await;
            } else {
                // Think, then quote both sides of the band.
                let think = Duration::from_millis(self.rng.gen_range(500..8000));
                let handle = market.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(think).await;
                    handle.bid(Self::to_price(fair_low)).await;
                    handle.ask(Self::to_price(fair_high)).await;
                });
            }
        }
    }

    fn my_id(&self) -> Option<PlayerId> {
        self.view.as_ref().map(|view| view.player_id())
    }
}

#[async_trait]
impl PlayerAgent for SmartTrader {
    async fn initialize(&mut self, view: SessionView) {
        self.hand_size = (DECK_SIZE / view.player_count()) as u32;
        let hand = view.hand().await;
        for suit in Suit::ALL {
            self.goal_pr[suit.index()] = self.initial_goal_pr(hand.count(suit));
            self.goal_conf[suit.index()] = 0.25;
        }
        self.view = Some(view);
        self.normalize();
        self.act_on_fair().await;
    }

    async fn on_quote(&mut self, player: PlayerId, suit: Suit, is_bid: bool, price: i64) {
        if Some(player) == self.my_id() {
            return;
        }

        // Someone quoting through our belief moves it toward theirs.
        let implied_pr = price as f64 / PAYOFF_PER_CARD as f64;
        let i = suit.index();
        if is_bid && self.goal_pr[i] < implied_pr {
            self.goal_pr[i] += BELIEF_STEP;
            self.goal_conf[i] += CONFIDENCE_STEP;
            self.normalize();
        } else if !is_bid && self.goal_pr[i] > implied_pr {
            self.goal_pr[i] -= BELIEF_STEP;
            self.goal_conf[i] += CONFIDENCE_STEP;
            self.normalize();
        }

        self.act_on_fair().await;
    }

    async fn on_out(&mut self, player: PlayerId, _suit: Suit) {
        if Some(player) == self.my_id() {
            return;
        }
        self.act_on_fair().await;
    }

    async fn on_fill(
        &mut self,
        buyer: PlayerId,
        seller: PlayerId,
        buyer_initiated: bool,
        suit: Suit,
        _price: i64,
    ) {
        let me = self.my_id();
        let passive_buy = Some(buyer) == me && !buyer_initiated;
        let passive_sell = Some(seller) == me && buyer_initiated;
        if !(passive_buy || passive_sell) {
            return;
        }

        // Our passive quote got taken; lean the belief away from the
        // side we just gave up and tighten confidence.
        let i = suit.index();
        self.goal_pr[i] += if buyer_initiated { -BELIEF_STEP } else { BELIEF_STEP };
        self.goal_conf[i] -= CONFIDENCE_STEP;
        self.normalize();
        self.act_on_fair().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trader_with_hand_size(hand_size: u32) -> SmartTrader {
        let mut trader = SmartTrader::new(42);
        trader.hand_size = hand_size;
        trader
    }

    #[test]
    fn test_initial_prior_scales_with_count() {
        let trader = trader_with_hand_size(10);
        assert!(trader.initial_goal_pr(0) < trader.initial_goal_pr(5));
        assert!(trader.initial_goal_pr(5) < trader.initial_goal_pr(10));
        assert!((trader.initial_goal_pr(0) - 0.01).abs() < 1e-9);
        assert!((trader.initial_goal_pr(10) - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_initial_prior_for_five_player_hand() {
        let trader = trader_with_hand_size(8);
        assert!((trader.initial_goal_pr(0) - 0.05).abs() < 1e-9);
        assert!((trader.initial_goal_pr(8) - 0.29).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_hand_size_is_flat() {
        let trader = trader_with_hand_size(7);
        assert_eq!(trader.initial_goal_pr(3), 0.25);
    }

    #[test]
    fn test_normalize_clamps_and_sums_to_one() {
        let mut trader = trader_with_hand_size(10);
        trader.goal_pr = [0.5, -0.1, 0.3, 0.7];
        trader.goal_conf = [0.0, 0.9, 0.25, -0.2];
        trader.normalize();

        let sum: f64 = trader.goal_pr.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(trader.goal_pr.iter().all(|&pr| pr >= 0.0));
        assert!(trader
            .goal_conf
            .iter()
            .all(|&conf| (CONFIDENCE_FLOOR..=CONFIDENCE_CEIL).contains(&conf)));
    }

    #[test]
    fn test_to_price_rounds() {
        assert_eq!(SmartTrader::to_price(2.4), 2);
        assert_eq!(SmartTrader::to_price(2.5), 3);
        assert_eq!(SmartTrader::to_price(-0.4), 0);
    }
}
