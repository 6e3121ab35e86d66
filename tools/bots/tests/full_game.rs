//! End-to-end game under virtual time: seeded traders, default latency
//! model, a full trading window, then settlement checks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bots::SmartTrader;
use live_session::{LiveSession, PlayerAgent, Presenter};
use types::ids::PlayerId;
use types::suit::Suit;

const PLAYERS: usize = 4;
const SEED: u64 = 7;

/// Presenter that only counts events, shared with the test body.
struct CountingPresenter {
    quotes: Arc<AtomicUsize>,
    fills: Arc<AtomicUsize>,
}

impl Presenter for CountingPresenter {
    fn on_quote(&mut self, _player: PlayerId, _suit: Suit, _is_bid: bool, _price: i64) {
        self.quotes.fetch_add(1, Ordering::Relaxed);
    }

    fn on_out(&mut self, _player: PlayerId, _suit: Suit) {}

    fn on_fill(
        &mut self,
        _buyer: PlayerId,
        _seller: PlayerId,
        _buyer_initiated: bool,
        _suit: Suit,
        _price: i64,
    ) {
        self.fills.fetch_add(1, Ordering::Relaxed);
    }
}

#[tokio::test(start_paused = true)]
async fn full_game_settles_cleanly() {
    let agents: Vec<Box<dyn PlayerAgent>> = (0..PLAYERS)
        .map(|i| Box::new(SmartTrader::new(SEED + i as u64)) as Box<dyn PlayerAgent>)
        .collect();

    let quotes = Arc::new(AtomicUsize::new(0));
    let fills = Arc::new(AtomicUsize::new(0));

    let mut session = LiveSession::new(agents, SEED).unwrap();
    session.attach_presenter(Box::new(CountingPresenter {
        quotes: Arc::clone(&quotes),
        fills: Arc::clone(&fills),
    }));

    let running = session.start();
    tokio::time::sleep(Duration::from_secs(120)).await;

    // Buy-ins are collected at the deal; every fill moves cash between
    // players, so the total stays at minus the pot until settlement.
    let pre_end: i64 = running.balances().await.iter().sum();
    assert_eq!(pre_end, -200);

    assert!(
        quotes.load(Ordering::Relaxed) > 0,
        "two virtual minutes with four active traders must produce quotes"
    );

    running.end().await;
    assert!(running.ended().await);

    // Settlement redistributes the pot; only the integer remainder of
    // the leader split is withheld, and there are at most four leaders.
    let post_end: i64 = running.balances().await.iter().sum();
    assert!((-4..=0).contains(&post_end), "total was {post_end}");

    let hands = running.hands().await;
    let total_cards: u32 = hands
        .iter()
        .map(|hand| Suit::ALL.iter().map(|&s| hand.count(s)).sum::<u32>())
        .sum();
    assert_eq!(total_cards, 40);

    let mut suit_totals: Vec<u32> = Suit::ALL
        .iter()
        .map(|&suit| hands.iter().map(|hand| hand.count(suit)).sum())
        .collect();
    suit_totals.sort_unstable();
    assert_eq!(suit_totals, vec![8, 10, 10, 12]);

    // The goal suit is the opposite of the twelve-card suit.
    let goal = running.goal_suit().await;
    let twelve = Suit::ALL
        .iter()
        .copied()
        .find(|&suit| hands.iter().map(|hand| hand.count(suit)).sum::<u32>() == 12);
    assert_eq!(twelve.map(Suit::opposite), Some(goal));
}
