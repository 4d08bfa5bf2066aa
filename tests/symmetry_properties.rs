//! Symmetry invariants checked over every reachable position

use std::{
    collections::{HashSet, VecDeque},
    hash::{BuildHasher, RandomState},
};

use ttt_weights::{
    CanonicalKey,
    tictactoe::{Board, D4Transform, SquareGrid, all_transforms, are_equivalent},
};

/// Every board reachable from the empty board by legal play, stopping at
/// terminal boards, as concrete layouts
fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut boards = Vec::new();
    let mut queue = VecDeque::from([Board::empty()]);

    while let Some(board) = queue.pop_front() {
        if !seen.insert(board.encode()) {
            continue;
        }
        boards.push(board);
        if board.is_terminal().0 {
            continue;
        }
        for next in board.successors(false) {
            queue.push_back(next.unwrap());
        }
    }
    boards
}

#[test]
fn reachable_position_counts() {
    let boards = reachable_boards();
    assert_eq!(boards.len(), 5478);

    let classes: HashSet<CanonicalKey> = boards.iter().map(|b| *b.canonical_key()).collect();
    assert_eq!(classes.len(), 765);
}

#[test]
fn every_variant_is_equal_with_equal_hash() {
    let hasher = RandomState::new();
    for board in reachable_boards() {
        let hash = hasher.hash_one(board);
        for variant in board.variants() {
            assert_eq!(variant, board);
            assert_eq!(hasher.hash_one(variant), hash);
            assert_eq!(
                Board::from_flat(*variant.cells()).unwrap().canonical_key(),
                board.canonical_key()
            );
        }
    }
}

#[test]
fn canonical_key_is_smallest_variant() {
    for board in reachable_boards() {
        let smallest = board.variants().iter().map(Board::encode).min().unwrap();
        assert_eq!(board.canonical_key().as_string(), smallest);
    }
}

#[test]
fn transform_composition_stays_in_group() {
    let grid = SquareGrid::new(vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]).unwrap();
    let originals = all_transforms(&grid);

    for transformed in &originals {
        for twice in all_transforms(transformed) {
            assert!(originals.contains(&twice));
        }
    }

    for a in D4Transform::all() {
        for b in D4Transform::all() {
            let composed = a.then(b);
            assert_eq!(composed.apply(&grid), b.apply(&a.apply(&grid)));
        }
        assert_eq!(a.then(a.inverse()).apply(&grid), grid);
    }
}

#[test]
fn equal_boards_are_equivalent_grids() {
    let a = Board::parse("XO-/-X-/--O").unwrap();
    let b = Board::parse("O--/-X-/-OX").unwrap();
    let to_grid = |board: &Board| {
        SquareGrid::new(board.rows().iter().map(|row| row.to_vec()).collect()).unwrap()
    };
    assert_eq!(a == b, are_equivalent(&to_grid(&a), &to_grid(&b)));
}
