//! Live session service
//!
//! Wraps the synchronous `GameSession` so that independent agents
//! experience realistic, overlapping information and execution latency
//! while every state mutation stays serialized behind one session-wide
//! lock.
//!
//! # Architecture
//!
//! ```text
//!            commands (delayed, then serialized)
//!  Agent ──────────────────────────────────────► ┌─────────────┐
//!    ▲                                           │ GameSession │
//!    │   per-agent FIFO queue + random delay     │  (mutex)    │
//!    └─────────────◄──────────────────────────── └─────────────┘
//!            notifications (emission order)
//! ```
//!
//! # Modules
//! - `delay` — Randomized latency configuration
//! - `agent` — `PlayerAgent` and `Presenter` capabilities
//! - `session` — `LiveSession`, per-agent delivery, market handles

pub mod agent;
pub mod delay;
pub mod session;

pub use agent::{PlayerAgent, Presenter};
pub use delay::{DelayConfig, DelayRange};
pub use session::{LiveSession, MarketHandle, RunningSession, SessionView};
