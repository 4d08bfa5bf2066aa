//! Board representation and basic operations

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use super::{lines::LineAnalyzer, symmetry::D4Transform};
use crate::{
    Error, Result,
    error::InvalidStateReason,
    types::{BOARD_SIDE, BOARD_SIZE, CanonicalKey},
};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '-' | '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().symbol())
    }
}

/// Status of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    XWon,
    OWon,
    Draw,
    Continues,
}

impl Outcome {
    /// The finished result, or `None` while the game continues
    pub fn result(self) -> Option<GameResult> {
        match self {
            Outcome::XWon => Some(GameResult::XWon),
            Outcome::OWon => Some(GameResult::OWon),
            Outcome::Draw => Some(GameResult::Draw),
            Outcome::Continues => None,
        }
    }

    pub fn is_finished(self) -> bool {
        self != Outcome::Continues
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::XWon => f.write_str("X won!"),
            Outcome::OWon => f.write_str("O won!"),
            Outcome::Draw => f.write_str("Draw."),
            Outcome::Continues => f.write_str("Game continues"),
        }
    }
}

/// Result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    XWon,
    OWon,
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::XWon => Some(Player::X),
            GameResult::OWon => Some(Player::O),
            GameResult::Draw => None,
        }
    }
}

impl From<GameResult> for Outcome {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::XWon => Outcome::XWon,
            GameResult::OWon => Outcome::OWon,
            GameResult::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Outcome::from(*self).fmt(f)
    }
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
    empty: usize,
}

impl PieceCount {
    fn of(cells: &[Cell]) -> Self {
        let mut count = PieceCount {
            x: 0,
            o: 0,
            empty: 0,
        };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }
}

/// A validated 3x3 board.
///
/// Boards are immutable. Equality and hashing use the canonical key, so a
/// board compares equal to each of its rotations and reflections. Use
/// [`Board::same_grid`] to compare concrete layouts.
#[derive(Debug, Clone, Copy)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
    key: CanonicalKey,
}

impl Board {
    /// The opening position
    pub fn empty() -> Self {
        let cells = [Cell::Empty; BOARD_SIZE];
        Board {
            cells,
            key: Self::canonicalize(&cells),
        }
    }

    /// Create a board from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the grid is not 3x3 or the piece
    /// counts are impossible (O ahead of X, or X more than one ahead).
    pub fn new(grid: Vec<Vec<Cell>>) -> Result<Self> {
        if grid.len() != BOARD_SIDE || grid.iter().any(|row| row.len() != BOARD_SIDE) {
            return Err(Error::InvalidState {
                reason: InvalidStateReason::NotSquare,
            });
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (slot, cell) in cells.iter_mut().zip(grid.into_iter().flatten()) {
            *slot = cell;
        }
        Self::from_flat(cells)
    }

    /// Create a board from fixed-size rows
    pub fn from_rows(rows: [[Cell; BOARD_SIDE]; BOARD_SIDE]) -> Result<Self> {
        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (index, slot) in cells.iter_mut().enumerate() {
            *slot = rows[index / BOARD_SIDE][index % BOARD_SIDE];
        }
        Self::from_flat(cells)
    }

    /// Create a board from row-major cells
    pub fn from_flat(cells: [Cell; BOARD_SIZE]) -> Result<Self> {
        Self::validate(&PieceCount::of(&cells))?;
        Ok(Board {
            cells,
            key: Self::canonicalize(&cells),
        })
    }

    /// Parse a board from text.
    ///
    /// Whitespace, `/` and `|` are ignored so rows can be separated for
    /// readability: `"XO-/-X-/--O"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCellCharacter`] for an unknown symbol and
    /// [`Error::InvalidState`] if the text does not hold exactly nine cells
    /// or the piece counts are impossible.
    pub fn parse(s: &str) -> Result<Self> {
        let mut cells = Vec::with_capacity(BOARD_SIZE);
        for (position, c) in s
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '|'))
            .enumerate()
        {
            let cell = Cell::from_symbol(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position,
                context: s.to_string(),
            })?;
            cells.push(cell);
        }

        let cells: [Cell; BOARD_SIZE] = cells.try_into().map_err(|_| Error::InvalidState {
            reason: InvalidStateReason::WrongCellCount,
        })?;
        Self::from_flat(cells)
    }

    fn validate(count: &PieceCount) -> Result<()> {
        let reason = if count.x + count.o + count.empty != BOARD_SIZE {
            InvalidStateReason::WrongCellCount
        } else if count.o > count.x {
            InvalidStateReason::TooManyO
        } else if count.x > count.o + 1 {
            InvalidStateReason::TooManyX
        } else {
            return Ok(());
        };
        Err(Error::InvalidState { reason })
    }

    fn canonicalize(cells: &[Cell; BOARD_SIZE]) -> CanonicalKey {
        CanonicalKey::smallest(
            D4Transform::all()
                .iter()
                .map(|transform| transform_cells(cells, transform)),
        )
    }

    /// Symmetry-invariant identity, computed once at construction
    pub fn canonical_key(&self) -> &CanonicalKey {
        &self.key
    }

    /// Row-major cells
    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Cell at (`row`, `col`)
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < BOARD_SIDE && col < BOARD_SIDE {
            Some(self.cells[row * BOARD_SIDE + col])
        } else {
            None
        }
    }

    pub fn rows(&self) -> [[Cell; BOARD_SIDE]; BOARD_SIDE] {
        let mut rows = [[Cell::Empty; BOARD_SIDE]; BOARD_SIDE];
        for (index, &cell) in self.cells.iter().enumerate() {
            rows[index / BOARD_SIDE][index % BOARD_SIDE] = cell;
        }
        rows
    }

    /// Number of cells holding `cell`
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    pub fn moves_played(&self) -> usize {
        BOARD_SIZE - self.count(Cell::Empty)
    }

    /// X moves on even move counts, O on odd
    pub fn next_to_move(&self) -> Player {
        if self.moves_played().is_multiple_of(2) {
            Player::X
        } else {
            Player::O
        }
    }

    /// Empty cells as (row, col), row-major
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(index, _)| (index / BOARD_SIDE, index % BOARD_SIDE))
    }

    /// Status of the board, see [`Board::is_terminal`]
    pub fn outcome(&self) -> Outcome {
        match LineAnalyzer::first_completed_line(&self.cells) {
            Some(Player::X) => Outcome::XWon,
            Some(Player::O) => Outcome::OWon,
            None if !self.cells.contains(&Cell::Empty) => Outcome::Draw,
            None => Outcome::Continues,
        }
    }

    /// Whether the game is over, and how.
    ///
    /// Lines are scanned rows first, then columns, then the two diagonals;
    /// the first complete line decides the winner. A full board without a
    /// line is a draw.
    pub fn is_terminal(&self) -> (bool, Outcome) {
        let outcome = self.outcome();
        (outcome.is_finished(), outcome)
    }

    /// Place the current player's mark at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] or [`Error::OccupiedCell`] for an
    /// unusable target cell.
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&self, row: usize, col: usize) -> Result<Board> {
        match self.cell(row, col) {
            None => Err(Error::OutOfBounds { row, col }),
            Some(Cell::Empty) => {
                let mut cells = self.cells;
                cells[row * BOARD_SIDE + col] = self.next_to_move().to_cell();
                Self::from_flat(cells)
            }
            Some(_) => Err(Error::OccupiedCell { row, col }),
        }
    }

    /// Rotate `turns` quarter turns counter-clockwise.
    ///
    /// Only the presentation changes; the rotated board is equal to this one.
    #[must_use]
    pub fn rotate(&self, turns: usize) -> Board {
        self.transform(&D4Transform::rotation(turns))
    }

    /// Apply any symmetry transform
    #[must_use]
    pub fn transform(&self, transform: &D4Transform) -> Board {
        Board {
            cells: transform_cells(&self.cells, transform),
            key: self.key,
        }
    }

    /// The eight symmetric variants, in generation order
    pub fn variants(&self) -> [Board; 8] {
        D4Transform::all().map(|transform| self.transform(&transform))
    }

    /// Compare concrete layouts, ignoring symmetry
    pub fn same_grid(&self, other: &Board) -> bool {
        self.cells == other.cells
    }

    /// Row-major nine-character encoding of the concrete layout
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&cell| cell.symbol()).collect()
    }
}

fn transform_cells(cells: &[Cell; BOARD_SIZE], transform: &D4Transform) -> [Cell; BOARD_SIZE] {
    let mut transformed = [Cell::Empty; BOARD_SIZE];
    for (index, &cell) in cells.iter().enumerate() {
        let (row, col) = transform.map_position(BOARD_SIDE, index / BOARD_SIDE, index % BOARD_SIDE);
        transformed[row * BOARD_SIDE + col] = cell;
    }
    transformed
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Board {
    type Error = Error;

    fn try_from(grid: Vec<Vec<Cell>>) -> Result<Self> {
        Board::new(grid)
    }
}

impl std::str::FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::parse(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.symbol())?;
            if (i + 1).is_multiple_of(BOARD_SIDE) && i < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Board::parse(&text).map_err(serde::de::Error::custom)
    }
}
