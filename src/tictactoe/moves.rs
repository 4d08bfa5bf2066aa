//! Successor enumeration

use super::Board;
use crate::{Result, types::CanonicalKey};

/// Lazy sequence of the boards reachable in one move.
///
/// Cells are tried in row-major order. With deduplication on, a successor
/// whose canonical key was already produced by this sequence is skipped, so
/// the first representative of each class wins. Cloning the sequence (or
/// calling [`Successors::restart`]) gives an independent pass.
#[derive(Debug, Clone)]
pub struct Successors {
    board: Board,
    dedupe: bool,
    next_index: usize,
    seen: Vec<CanonicalKey>,
}

impl Successors {
    pub fn new(board: &Board, dedupe: bool) -> Self {
        Self {
            board: *board,
            dedupe,
            next_index: 0,
            seen: Vec::new(),
        }
    }

    /// A fresh pass over the same board
    #[must_use]
    pub fn restart(&self) -> Self {
        Self::new(&self.board, self.dedupe)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

impl Iterator for Successors {
    type Item = Result<Board>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index < self.board.cells().len() {
            let index = self.next_index;
            self.next_index += 1;

            if self.board.cells()[index] != super::Cell::Empty {
                continue;
            }

            let successor = match self.board.place(index / 3, index % 3) {
                Ok(successor) => successor,
                Err(err) => return Some(Err(err)),
            };

            if self.dedupe {
                let key = *successor.canonical_key();
                if self.seen.contains(&key) {
                    continue;
                }
                self.seen.push(key);
            }

            return Some(Ok(successor));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.board.cells()[self.next_index.min(self.board.cells().len())..]
            .iter()
            .filter(|&&cell| cell == super::Cell::Empty)
            .count();
        if self.dedupe {
            // every remaining cell may repeat a class already produced
            (0, Some(remaining))
        } else {
            (remaining, Some(remaining))
        }
    }
}

/// Boards reachable from `board` by placing the next player's mark once
pub fn successors(board: &Board, dedupe: bool) -> Successors {
    Successors::new(board, dedupe)
}

impl Board {
    /// See [`successors`]
    pub fn successors(&self, dedupe: bool) -> Successors {
        Successors::new(self, dedupe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{Cell, Player};

    fn collect(board: &Board, dedupe: bool) -> Vec<Board> {
        successors(board, dedupe)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_opening_successors() {
        let board = Board::empty();
        assert_eq!(collect(&board, false).len(), 9);

        let unique = collect(&board, true);
        assert_eq!(unique.len(), 3);
        // corner, edge, center in row-major discovery order
        assert_eq!(unique[0].encode(), "X--------");
        assert_eq!(unique[1].encode(), "-X-------");
        assert_eq!(unique[2].encode(), "----X----");
    }

    #[test]
    fn test_size_hint_bounds_remaining() {
        for dedupe in [false, true] {
            let mut successors = Board::empty().successors(dedupe);
            loop {
                let (lower, upper) = successors.size_hint();
                let remaining = successors.clone().count();
                assert!(lower <= remaining, "lower {lower} > remaining {remaining}");
                assert!(upper.is_some_and(|upper| remaining <= upper));
                if successors.next().is_none() {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_row_major_order() {
        let board = Board::parse("X--/-O-/---").unwrap();
        let positions: Vec<String> = collect(&board, false)
            .iter()
            .map(Board::encode)
            .collect();
        assert_eq!(positions.len(), 7);
        assert_eq!(positions[0], "XX--O----");
        assert_eq!(positions[6], "X---O---X");
    }

    #[test]
    fn test_successors_place_next_player() {
        let board = Board::parse("X--/---/---").unwrap();
        for successor in collect(&board, false) {
            assert_eq!(successor.count(Cell::O), 1);
            assert_eq!(successor.next_to_move(), Player::X);
        }
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        // Mirror-symmetric board: columns 0 and 2 pair up.
        let board = Board::parse("-X-/-O-/---").unwrap();
        let all = collect(&board, false);
        let unique = collect(&board, true);
        assert_eq!(all.len(), 7);
        assert_eq!(unique.len(), 4);
        assert_eq!(unique[0].encode(), "XX--O----");
        for (i, a) in unique.iter().enumerate() {
            for b in &unique[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_restart_is_independent() {
        let board = Board::empty();
        let mut first = successors(&board, true);
        first.next();
        let restarted = first.restart();
        assert_eq!(restarted.count(), 3);
        assert_eq!(first.count(), 2);
    }

    #[test]
    fn test_full_board_has_no_successors() {
        let board = Board::parse("XOX/XOO/OXX").unwrap();
        assert_eq!(successors(&board, false).count(), 0);
    }
}
