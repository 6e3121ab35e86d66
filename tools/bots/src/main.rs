//! Demo runner: one timed game between seeded bots.
//!
//! Deals a four-player session, wires three belief-driven traders and
//! one noise trader, logs every event, and settles after a fixed wall
//! clock. Deterministic per seed up to scheduler interleaving.

use std::time::Duration;

use tracing::{error, info};

use bots::{LogPresenter, NoiseTrader, SmartTrader};
use live_session::{LiveSession, PlayerAgent};
use types::ids::PlayerId;
use types::suit::Suit;

const PLAYERS: usize = 4;
const GAME_SECS: u64 = 60;
const SEED: u64 = 2024;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut agents: Vec<Box<dyn PlayerAgent>> = Vec::with_capacity(PLAYERS);
    for i in 0..PLAYERS - 1 {
        agents.push(Box::new(SmartTrader::new(SEED + i as u64)));
    }
    agents.push(Box::new(NoiseTrader::new(SEED + PLAYERS as u64)));

    let mut session = match LiveSession::new(agents, SEED) {
        Ok(session) => session,
        Err(err) => {
            error!(%err, "failed to deal session");
            return;
        }
    };
    session.attach_presenter(Box::new(LogPresenter));

    let running = session.start();
    tokio::time::sleep(Duration::from_secs(GAME_SECS)).await;
    running.end().await;

    let goal_suit = running.goal_suit().await;
    info!(%goal_suit, "goal suit revealed");

    let balances = running.balances().await;
    let hands = running.hands().await;
    for (i, (balance, hand)) in balances.iter().zip(&hands).enumerate() {
        let player = PlayerId::new(i);
        let goal_count = hand.count(goal_suit);
        info!(%player, balance, goal_count, "final standing");
    }

    let winner = balances
        .iter()
        .enumerate()
        .max_by_key(|(_, balance)| **balance)
        .map(|(i, _)| PlayerId::new(i));
    if let Some(winner) = winner {
        info!(%winner, "winner");
    }

    for suit in Suit::ALL {
        let total: u32 = hands.iter().map(|hand| hand.count(suit)).sum();
        info!(%suit, total, "suit total");
    }
}
