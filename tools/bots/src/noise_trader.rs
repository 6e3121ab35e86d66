//! Seeded random quoter
//!
//! Keeps markets lively by reacting to a fraction of notifications with
//! a random one-sided quote in a random suit. Useful background flow
//! for demos and soak tests; carries no beliefs and no edge.

use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use live_session::{PlayerAgent, SessionView};
use types::ids::PlayerId;
use types::suit::Suit;

/// Configuration for the noise trader.
#[derive(Debug, Clone)]
pub struct NoiseTraderConfig {
    /// Highest price the trader will quote.
    pub max_price: i64,
    /// Chance (0..1) of reacting to any one notification.
    pub act_ratio: f64,
}

impl Default for NoiseTraderConfig {
    fn default() -> Self {
        Self {
            max_price: 8,
            act_ratio: 0.25,
        }
    }
}

/// Random quoter with a deterministic seed.
pub struct NoiseTrader {
    rng: ChaCha8Rng,
    view: Option<SessionView>,
    config: NoiseTraderConfig,
}

impl NoiseTrader {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, NoiseTraderConfig::default())
    }

    pub fn with_config(seed: u64, config: NoiseTraderConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            view: None,
            config,
        }
    }

    async fn maybe_quote(&mut self) {
        let view = match &self.view {
            Some(view) => view.clone(),
            None => return,
        };
        if self.rng.gen::<f64>() >= self.config.act_ratio {
            return;
        }

        let suit = Suit::ALL[self.rng.gen_range(0..Suit::COUNT)];
        let market = view.market(suit);
        let price = self.rng.gen_range(1..=self.config.max_price);
        if self.rng.gen_bool(0.5) {
            market.bid(price).await;
        } else {
            // Rejected when we hold none of the suit; that is fine.
            market.ask(price).await;
        }
    }
}

#[async_trait]
impl PlayerAgent for NoiseTrader {
    async fn initialize(&mut self, view: SessionView) {
        self.view = Some(view);
        self.maybe_quote().await;
    }

    async fn on_quote(&mut self, _player: PlayerId, _suit: Suit, _is_bid: bool, _price: i64) {
        self.maybe_quote().await;
    }

    async fn on_out(&mut self, _player: PlayerId, _suit: Suit) {
        self.maybe_quote().await;
    }

    async fn on_fill(
        &mut self,
        _buyer: PlayerId,
        _seller: PlayerId,
        _buyer_initiated: bool,
        _suit: Suit,
        _price: i64,
    ) {
        self.maybe_quote().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_sane() {
        let config = NoiseTraderConfig::default();
        assert!(config.max_price > 0);
        assert!((0.0..=1.0).contains(&config.act_ratio));
    }
}
