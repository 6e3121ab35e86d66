//! Matching & settlement engine
//!
//! The synchronous core of the figgie trading game. One `Market` per suit
//! holds at most one best bid and one best ask; crossing quotes resolve
//! into an immediate trade against the shared player ledger. The
//! `GameSession` owns the ledger and the four markets, deals the deck,
//! computes the goal-suit payout, and fans accepted-state-change events
//! out to every registered sink.
//!
//! # Modules
//! - `market` — Per-suit single-level book, crossing, settlement
//! - `session` — Player ledger, command entry points, payout, fan-out
//! - `deal` — Deck composition and the seeded deal
//! - `events` — Events broadcast after accepted commands

pub mod deal;
pub mod events;
pub mod market;
pub mod session;

pub use events::GameEvent;
pub use market::Quote;
pub use session::{EventSink, GameSession};
