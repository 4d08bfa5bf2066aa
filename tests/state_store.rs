use ttt_weights::{
    Error,
    store::{OutcomeAdjustments, StateStore, lock_store},
    tictactoe::{Board, GameResult},
};

fn board(text: &str) -> Board {
    Board::parse(text).unwrap()
}

#[test]
fn running_average_matches_closed_form() {
    let mut store = StateStore::new();
    let state = board("X--/-O-/---");
    let results = [
        GameResult::XWon,
        GameResult::Draw,
        GameResult::OWon,
        GameResult::XWon,
        GameResult::Draw,
    ];
    let table = OutcomeAdjustments::default();

    for (played, result) in results.iter().enumerate() {
        let record = store.record_outcome(&state, *result);
        let expected: f64 = results[..=played]
            .iter()
            .map(|r| table.for_result(*r))
            .sum::<f64>()
            / (played + 1) as f64;
        assert_eq!(record.play_count, played as u64 + 1);
        assert!((record.weight - expected).abs() < 1e-12);
    }
}

#[test]
fn history_credits_every_board_once() {
    let history = [
        Board::empty(),
        board("X--/---/---"),
        board("X--/-O-/---"),
        board("XX-/-O-/---"),
        board("XX-/-O-/--O"),
        board("XXX/-O-/--O"),
    ];
    let mut store = StateStore::new();
    store.apply_game_history(&history, GameResult::XWon);

    assert_eq!(store.len(), history.len());
    for state in &history {
        let record = store.get_weight_strict(state).unwrap();
        assert_eq!(record.play_count, 1);
        assert_eq!(record.weight, 1.0);
        assert_eq!(store.bucket_len(state.moves_played()), 1);
    }
}

#[test]
fn symmetric_histories_accumulate_together() {
    let mut store = StateStore::new();
    let corner_opening = [Board::empty(), board("X--/---/---")];
    let mirrored_opening = [Board::empty(), board("--X/---/---")];

    store.apply_game_history(&corner_opening, GameResult::XWon);
    store.apply_game_history(&mirrored_opening, GameResult::Draw);

    let record = store.get_weight(&board("---/---/X--"));
    assert_eq!(record.play_count, 2);
    assert!((record.weight - 0.85).abs() < 1e-12);
    assert_eq!(store.get_weight(&Board::empty()).play_count, 2);
}

#[test]
fn unseen_lookups_are_not_recorded() {
    let store = StateStore::with_default_weight(0.4);
    let state = board("XO-/---/---");
    assert_eq!(store.get_weight(&state).weight, 0.4);
    assert_eq!(store.get_weight(&state).play_count, 0);
    assert!(matches!(
        store.get_weight_strict(&state),
        Err(Error::UnknownKey { .. })
    ));
    assert!(store.is_empty());
}

#[test]
fn iteration_and_clear() {
    let mut store = StateStore::new();
    store.apply_game_history(
        &[Board::empty(), board("----X----")],
        GameResult::Draw,
    );

    let mut seen: Vec<(usize, String)> = store
        .iter()
        .map(|(moves, key, _)| (moves, key.to_string()))
        .collect();
    seen.sort();
    assert_eq!(
        seen,
        vec![(0, "---------".to_string()), (1, "----X----".to_string())]
    );

    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.bucket_len(1), 0);
}

#[test]
fn shared_handle_sees_updates() {
    let shared = StateStore::new().shared();
    let other = shared.clone();
    lock_store(&shared)
        .unwrap()
        .record_outcome(&Board::empty(), GameResult::OWon);
    assert_eq!(
        lock_store(&other).unwrap().get_weight(&Board::empty()).weight,
        0.0
    );
}
