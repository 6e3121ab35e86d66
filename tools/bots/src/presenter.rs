//! Log-based presenter
//!
//! Renders the three notification kinds as structured log lines. Issues
//! no commands; sees events in emission order.

use tracing::info;

use live_session::Presenter;
use types::ids::PlayerId;
use types::suit::Suit;

/// Presenter that writes every event to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn on_quote(&mut self, player: PlayerId, suit: Suit, is_bid: bool, price: i64) {
        let side = if is_bid { "bid" } else { "ask" };
        info!(%player, %suit, side, price, "quote");
    }

    fn on_out(&mut self, player: PlayerId, suit: Suit) {
        info!(%player, %suit, "out");
    }

    fn on_fill(
        &mut self,
        buyer: PlayerId,
        seller: PlayerId,
        buyer_initiated: bool,
        suit: Suit,
        price: i64,
    ) {
        let initiator = if buyer_initiated { "buyer" } else { "seller" };
        info!(%buyer, %seller, %suit, price, initiator, "fill");
    }
}
