//! Live session wiring
//!
//! One `tokio::sync::Mutex<GameSession>` is the single mutual-exclusion
//! domain for the whole session; per-suit locking is deliberately
//! avoided because a fill moves cash and a card between two players
//! atomically. Notifications fan out under that lock into per-agent
//! unbounded queues, so queue order always equals emission order; a
//! dedicated drain task per agent then sleeps an independent random
//! information delay before delivering each one, which keeps delivery
//! FIFO per agent while skewing arrival times across agents.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use matching_engine::events::GameEvent;
use matching_engine::session::{EventSink, GameSession};
use types::errors::GameError;
use types::hand::Hand;
use types::ids::PlayerId;
use types::suit::Suit;

use crate::agent::{PlayerAgent, Presenter};
use crate::delay::{DelayConfig, DelayRange};

/// Sink handed to the engine for one agent: a non-blocking send into
/// the agent's delivery queue. Runs under the session lock, so it must
/// never call back into the session.
struct ChannelSink {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl EventSink for ChannelSink {
    fn deliver(&self, event: &GameEvent) {
        // The receiver lives as long as the delivery task; a closed
        // channel only means the runtime is shutting down.
        let _ = self.tx.send(*event);
    }
}

/// Sink for a render-only presenter, delivered at emission time with no
/// information delay.
struct PresenterSink {
    presenter: std::sync::Mutex<Box<dyn Presenter>>,
}

impl EventSink for PresenterSink {
    fn deliver(&self, event: &GameEvent) {
        if let Ok(mut presenter) = self.presenter.lock() {
            match *event {
                GameEvent::Quote {
                    player,
                    suit,
                    is_bid,
                    price,
                } => presenter.on_quote(player, suit, is_bid, price),
                GameEvent::Out { player, suit } => presenter.on_out(player, suit),
                GameEvent::Fill {
                    buyer,
                    seller,
                    buyer_initiated,
                    suit,
                    price,
                } => presenter.on_fill(buyer, seller, buyer_initiated, suit, price),
            }
        }
    }
}

struct AgentSlot {
    agent: Box<dyn PlayerAgent>,
    rx: mpsc::UnboundedReceiver<GameEvent>,
}

/// A dealt session with registered agents, ready to start.
pub struct LiveSession {
    session: GameSession,
    delays: DelayConfig,
    seed: u64,
    slots: Vec<AgentSlot>,
}

impl LiveSession {
    /// Deal a session for the given agents with the default latency
    /// model. One agent per player, 4 or 5 of them.
    pub fn new(agents: Vec<Box<dyn PlayerAgent>>, seed: u64) -> Result<Self, GameError> {
        Self::with_delays(agents, seed, DelayConfig::default())
    }

    pub fn with_delays(
        agents: Vec<Box<dyn PlayerAgent>>,
        seed: u64,
        delays: DelayConfig,
    ) -> Result<Self, GameError> {
        let mut session = GameSession::new(agents.len(), seed)?;

        let slots = agents
            .into_iter()
            .map(|agent| {
                let (tx, rx) = mpsc::unbounded_channel();
                session.register_sink(Box::new(ChannelSink { tx }));
                AgentSlot { agent, rx }
            })
            .collect();

        Ok(Self {
            session,
            delays,
            seed,
            slots,
        })
    }

    /// Attach a render-only presenter. May be called more than once.
    pub fn attach_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.session.register_sink(Box::new(PresenterSink {
            presenter: std::sync::Mutex::new(presenter),
        }));
    }

    /// Start trading: spawn one delivery task per agent. Each task
    /// first delivers the initialization notification (after one
    /// information delay, so agents come online at staggered times),
    /// then drains its queue one notification at a time.
    pub fn start(self) -> RunningSession {
        let player_count = self.session.player_count();
        let inner = Arc::new(Mutex::new(self.session));
        info!(player_count, "session started");

        let tasks = self
            .slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                let player = PlayerId::new(i);
                let view = SessionView {
                    session: Arc::clone(&inner),
                    player,
                    player_count,
                    execution: self.delays.execution,
                    rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(stream_seed(
                        self.seed,
                        2 * i as u64 + 1,
                    )))),
                };
                let rng = ChaCha8Rng::seed_from_u64(stream_seed(self.seed, 2 * i as u64));
                tokio::spawn(deliver(slot, view, self.delays.information, rng))
            })
            .collect();

        RunningSession { inner, tasks }
    }
}

/// Per-agent delivery loop: FIFO, one independently delayed
/// notification at a time.
async fn deliver(
    mut slot: AgentSlot,
    view: SessionView,
    delay: DelayRange,
    mut rng: ChaCha8Rng,
) {
    let player = view.player;

    tokio::time::sleep(delay.sample(&mut rng)).await;
    debug!(%player, "initializing agent");
    slot.agent.initialize(view).await;

    while let Some(event) = slot.rx.recv().await {
        tokio::time::sleep(delay.sample(&mut rng)).await;
        debug!(%player, ?event, "delivering notification");
        match event {
            GameEvent::Quote {
                player,
                suit,
                is_bid,
                price,
            } => slot.agent.on_quote(player, suit, is_bid, price).await,
            GameEvent::Out { player, suit } => slot.agent.on_out(player, suit).await,
            GameEvent::Fill {
                buyer,
                seller,
                buyer_initiated,
                suit,
                price,
            } => {
                slot.agent
                    .on_fill(buyer, seller, buyer_initiated, suit, price)
                    .await
            }
        }
    }
}

/// A started session. Dropping it stops delivery; ending it first is
/// the normal shutdown path.
pub struct RunningSession {
    inner: Arc<Mutex<GameSession>>,
    tasks: Vec<JoinHandle<()>>,
}

impl RunningSession {
    /// End the game and apply payouts. Idempotent; every command issued
    /// afterwards is rejected.
    pub async fn end(&self) {
        self.inner.lock().await.end();
        info!("session ended");
    }

    pub async fn ended(&self) -> bool {
        self.inner.lock().await.ended()
    }

    /// The goal suit, for scoring once the game is over.
    pub async fn goal_suit(&self) -> Suit {
        self.inner.lock().await.goal_suit()
    }

    /// Final (or current) cash per player, in player order.
    pub async fn balances(&self) -> Vec<i64> {
        let session = self.inner.lock().await;
        (0..session.player_count())
            .map(|i| session.cash(PlayerId::new(i)))
            .collect()
    }

    /// Current holdings per player, in player order.
    pub async fn hands(&self) -> Vec<Hand> {
        let session = self.inner.lock().await;
        (0..session.player_count())
            .map(|i| session.hand(PlayerId::new(i)).clone())
            .collect()
    }
}

impl Drop for RunningSession {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// An agent's window into the session: identity, a holdings snapshot,
/// and one market handle per suit.
#[derive(Clone)]
pub struct SessionView {
    session: Arc<Mutex<GameSession>>,
    player: PlayerId,
    player_count: usize,
    execution: DelayRange,
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl SessionView {
    pub fn player_id(&self) -> PlayerId {
        self.player
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Snapshot of the agent's current holdings, taken under the
    /// session lock.
    pub async fn hand(&self) -> Hand {
        self.session.lock().await.hand(self.player).clone()
    }

    pub fn market(&self, suit: Suit) -> MarketHandle {
        MarketHandle {
            session: Arc::clone(&self.session),
            rng: Arc::clone(&self.rng),
            player: self.player,
            suit,
            execution: self.execution,
        }
    }
}

/// Command surface for one agent in one suit's market.
///
/// Commands sleep an independent execution delay, then run to
/// completion under the session lock. Reads skip the delay but still
/// take the lock, so they never observe a half-settled trade.
#[derive(Clone)]
pub struct MarketHandle {
    session: Arc<Mutex<GameSession>>,
    rng: Arc<Mutex<ChaCha8Rng>>,
    player: PlayerId,
    suit: Suit,
    execution: DelayRange,
}

impl MarketHandle {
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Current best bid price, undelayed.
    pub async fn best_bid(&self) -> Option<i64> {
        self.session.lock().await.best_bid(self.suit).map(|q| q.price)
    }

    /// Current best ask price, undelayed.
    pub async fn best_ask(&self) -> Option<i64> {
        self.session.lock().await.best_ask(self.suit).map(|q| q.price)
    }

    async fn execution_delay(&self) {
        let wait = {
            let mut rng = self.rng.lock().await;
            self.execution.sample(&mut *rng)
        };
        tokio::time::sleep(wait).await;
    }

    /// Post or cross a bid after the execution delay.
    pub async fn bid(&self, price: i64) -> bool {
        self.execution_delay().await;
        let accepted = self
            .session
            .lock()
            .await
            .bid(self.player, self.suit, price);
        debug!(player = %self.player, suit = %self.suit, price, accepted, "bid");
        accepted
    }

    /// Post or cross an ask after the execution delay.
    pub async fn ask(&self, price: i64) -> bool {
        self.execution_delay().await;
        let accepted = self
            .session
            .lock()
            .await
            .ask(self.player, self.suit, price);
        debug!(player = %self.player, suit = %self.suit, price, accepted, "ask");
        accepted
    }

    /// Pull own quotes after the execution delay.
    pub async fn out(&self) {
        self.execution_delay().await;
        self.session.lock().await.out(self.player, self.suit);
        debug!(player = %self.player, suit = %self.suit, "out");
    }

    /// Take the resting ask after the execution delay.
    pub async fn buy(&self) -> bool {
        self.execution_delay().await;
        let accepted = self.session.lock().await.buy(self.player, self.suit);
        debug!(player = %self.player, suit = %self.suit, accepted, "buy");
        accepted
    }

    /// Hit the resting bid after the execution delay.
    pub async fn sell(&self) -> bool {
        self.execution_delay().await;
        let accepted = self.session.lock().await.sell(self.player, self.suit);
        debug!(player = %self.player, suit = %self.suit, accepted, "sell");
        accepted
    }
}

/// Derive an independent RNG stream from the session seed.
fn stream_seed(master: u64, stream: u64) -> u64 {
    master ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
