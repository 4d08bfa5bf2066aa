//! End-to-end games and tournaments through the public API

use ttt_weights::{
    config::PolicyConfig,
    pipeline::{GameRunner, MetricsObserver, Tournament},
    policy::{RandomPolicy, WeightedPolicy},
    ports::Policy,
    store::{SharedStore, StateStore, StoreSnapshot, lock_store},
    tictactoe::Board,
};

fn weighted(name: &str, store: &SharedStore, config: PolicyConfig) -> Box<dyn Policy> {
    Box::new(WeightedPolicy::new(name, store.clone(), config).unwrap())
}

/// Two learners with their own stores plus a random baseline
fn train(rounds: usize, seed: u64) -> (StoreSnapshot, StoreSnapshot) {
    let first = StateStore::new().shared();
    let second = StateStore::new().shared();
    let mut players = vec![
        weighted("player1", &first, PolicyConfig::new()),
        weighted("player2", &second, PolicyConfig::new()),
        Box::new(RandomPolicy::new("random")) as Box<dyn Policy>,
    ];
    Tournament::new(rounds)
        .with_seed(seed)
        .run(&mut players)
        .unwrap();

    let first = lock_store(&first).unwrap().snapshot();
    let second = lock_store(&second).unwrap().snapshot();
    (first, second)
}

#[test]
fn random_game_outcome_matches_final_board() {
    for seed in 0..50 {
        let mut x = RandomPolicy::with_seed("x", seed);
        let mut o = RandomPolicy::with_seed("o", seed ^ 0xff);
        let record = GameRunner::new().play(&mut x, &mut o).unwrap();

        assert!(record.moves() <= 9);
        let (finished, outcome) = record.final_board().unwrap().is_terminal();
        assert!(finished);
        assert_eq!(outcome.result(), Some(record.result));
        for window in record.history.windows(2) {
            assert!(!window[0].is_terminal().0);
        }
    }
}

#[test]
fn learner_credits_own_games_only() {
    let rounds = 5;
    let (first, _) = train(rounds, 42);
    let store = StateStore::from_snapshot(first).unwrap();

    // player1 meets two opponents as X and as O
    let opening = store.get_weight_strict(&Board::empty()).unwrap();
    assert_eq!(opening.play_count, 4 * rounds as u64);
    assert!(store.bucket_len(1) >= 1);
    assert!(store.bucket_len(1) <= 3);
}

#[test]
fn seeded_training_is_reproducible() {
    let a = train(4, 7);
    let b = train(4, 7);
    assert_eq!(a, b);
}

#[test]
fn frozen_players_leave_store_untouched() {
    let (snapshot, _) = train(3, 11);
    let store = StateStore::from_snapshot(snapshot.clone()).unwrap().shared();

    let frozen = PolicyConfig::new().with_learning(false);
    let mut players = vec![
        weighted("frozen1", &store, frozen.clone()),
        weighted("frozen2", &store, frozen),
        Box::new(RandomPolicy::new("random")) as Box<dyn Policy>,
    ];
    let standings = Tournament::new(3)
        .with_seed(5)
        .run(&mut players)
        .unwrap();

    assert_eq!(standings.games_played(), 18);
    assert_eq!(lock_store(&store).unwrap().snapshot(), snapshot);
}

#[test]
fn shared_observer_collects_metrics() {
    use std::sync::{Arc, Mutex};

    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let mut players: Vec<Box<dyn Policy>> = vec![
        Box::new(RandomPolicy::new("a")),
        Box::new(RandomPolicy::new("b")),
    ];
    Tournament::new(10)
        .with_seed(1)
        .with_observer(Box::new(Arc::clone(&metrics)))
        .run(&mut players)
        .unwrap();

    let summary = metrics.lock().unwrap().summary();
    assert_eq!(summary.total_games, 20);
    assert_eq!(summary.x_wins + summary.o_wins + summary.draws, 20);
    assert!(summary.avg_game_length >= 5.0 && summary.avg_game_length <= 9.0);
}

#[test]
fn dedupe_policy_still_plays_legal_games() {
    let store = StateStore::new().shared();
    let config = PolicyConfig::new().with_seed(3).with_dedupe(true);
    let mut x = WeightedPolicy::new("x", store.clone(), config.clone()).unwrap();
    let mut o = WeightedPolicy::new("o", store.clone(), config.with_learning(false)).unwrap();

    for _ in 0..10 {
        let record = GameRunner::new().play(&mut x, &mut o).unwrap();
        assert!(record.final_board().unwrap().is_terminal().0);
    }
    assert_eq!(
        lock_store(&store)
            .unwrap()
            .get_weight(&Board::empty())
            .play_count,
        10
    );
}
