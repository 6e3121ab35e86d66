//! Agent and presenter capabilities
//!
//! A `PlayerAgent` is the pluggable decision-making collaborator: it
//! receives delayed notifications and issues trade commands through the
//! market handles on its session view. A `Presenter` is render-only: it
//! observes the same three notification kinds in emission order and
//! never mutates the session.

use async_trait::async_trait;
use types::ids::PlayerId;
use types::suit::Suit;

use crate::session::SessionView;

/// A trading agent driven by notifications.
///
/// Per-agent delivery is FIFO: notifications arrive in the order the
/// engine emitted them, even though the random information delay skews
/// when they arrive relative to other agents.
#[async_trait]
pub trait PlayerAgent: Send + 'static {
    /// Delivered once, before any other notification. The view is the
    /// agent's only path into the session.
    async fn initialize(&mut self, view: SessionView);

    /// Some player posted a new best quote.
    async fn on_quote(&mut self, player: PlayerId, suit: Suit, is_bid: bool, price: i64);

    /// Some player pulled their quotes in a suit.
    async fn on_out(&mut self, player: PlayerId, suit: Suit);

    /// A trade settled. `buyer_initiated` is true when the buy side
    /// triggered the match.
    async fn on_fill(
        &mut self,
        buyer: PlayerId,
        seller: PlayerId,
        buyer_initiated: bool,
        suit: Suit,
        price: i64,
    );
}

/// Render-only observer of the event stream.
///
/// Called synchronously at emission time, so implementations must be
/// quick and must not block.
pub trait Presenter: Send + 'static {
    fn on_quote(&mut self, player: PlayerId, suit: Suit, is_bid: bool, price: i64);
    fn on_out(&mut self, player: PlayerId, suit: Suit);
    fn on_fill(
        &mut self,
        buyer: PlayerId,
        seller: PlayerId,
        buyer_initiated: bool,
        suit: Suit,
        price: i64,
    );
}
