//! Trading agents and presenters
//!
//! External collaborators for the game core: decision-making agents that
//! implement `PlayerAgent`, and render-only presenters. The core never
//! depends on these; they are injected at session construction.
//!
//! # Modules
//! - `smart_trader` — Belief-driven heuristic trader
//! - `noise_trader` — Seeded random quoter for background flow
//! - `presenter` — Log-based render-only presenter

pub mod noise_trader;
pub mod presenter;
pub mod smart_trader;

pub use noise_trader::{NoiseTrader, NoiseTraderConfig};
pub use presenter::LogPresenter;
pub use smart_trader::SmartTrader;
