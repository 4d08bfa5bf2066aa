//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board, in scan order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Owner of the first completed line in scan order.
    ///
    /// Rows are checked top to bottom, then columns left to right, then the
    /// main diagonal and finally the anti-diagonal. A board with winning
    /// lines for both players reports whichever comes first.
    pub fn first_completed_line(cells: &[Cell; 9]) -> Option<Player> {
        WINNING_LINES.iter().find_map(|line| {
            let first = cells[line[0]];
            let complete = line.iter().all(|&idx| cells[idx] == first);
            if complete { first.to_player() } else { None }
        })
    }

    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Number of completed lines on the board, for either player
    pub fn completed_lines(cells: &[Cell; 9]) -> usize {
        WINNING_LINES
            .iter()
            .filter(|line| {
                let first = cells[line[0]];
                first != Cell::Empty && line.iter().all(|&idx| cells[idx] == first)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_won_horizontal() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        cells[2] = Cell::X;

        assert!(LineAnalyzer::has_won(&cells, Player::X));
        assert!(!LineAnalyzer::has_won(&cells, Player::O));
        assert_eq!(LineAnalyzer::first_completed_line(&cells), Some(Player::X));
    }

    #[test]
    fn test_has_won_vertical() {
        let mut cells = [Cell::Empty; 9];
        cells[0] = Cell::O;
        cells[3] = Cell::O;
        cells[6] = Cell::O;

        assert!(LineAnalyzer::has_won(&cells, Player::O));
        assert_eq!(LineAnalyzer::first_completed_line(&cells), Some(Player::O));
    }

    #[test]
    fn test_anti_diagonal() {
        let mut cells = [Cell::Empty; 9];
        cells[2] = Cell::X;
        cells[4] = Cell::X;
        cells[6] = Cell::X;

        assert_eq!(LineAnalyzer::first_completed_line(&cells), Some(Player::X));
    }

    #[test]
    fn test_empty_line_is_not_a_win() {
        let cells = [Cell::Empty; 9];
        assert_eq!(LineAnalyzer::first_completed_line(&cells), None);
        assert_eq!(LineAnalyzer::completed_lines(&cells), 0);
    }

    #[test]
    fn test_row_wins_over_later_column() {
        // O O O
        // X X X
        // . . .
        // An unreachable position: the top row is scanned first.
        let mut cells = [Cell::Empty; 9];
        for idx in 0..3 {
            cells[idx] = Cell::O;
            cells[idx + 3] = Cell::X;
        }
        assert_eq!(LineAnalyzer::first_completed_line(&cells), Some(Player::O));
        assert_eq!(LineAnalyzer::completed_lines(&cells), 2);
    }
}
