//! Newtype wrappers and shared constants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Cell;

/// Number of cells along one side of the board.
pub const BOARD_SIDE: usize = 3;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = BOARD_SIDE * BOARD_SIDE;

/// One bucket per possible move count, 0 through 9 inclusive.
pub const BUCKET_COUNT: usize = BOARD_SIZE + 1;

/// Weight given to a state the store has never seen.
pub const DEFAULT_WEIGHT: f64 = 0.7;

/// Symmetry-invariant identity of a board.
///
/// Holds the lexicographically smallest row-major serialization (over the
/// symbols `-`, `O`, `X`) among the eight symmetric variants of a grid. Two
/// boards share a key exactly when one is a rotation or reflection of the
/// other.
///
/// # Examples
///
/// ```
/// use ttt_weights::tictactoe::Board;
///
/// let corner = Board::parse("X--/---/---").unwrap();
/// let other_corner = Board::parse("---/---/--X").unwrap();
/// assert_eq!(corner.canonical_key(), other_corner.canonical_key());
/// assert_eq!(corner.canonical_key().as_string(), "--------X");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey([u8; BOARD_SIZE]);

impl CanonicalKey {
    /// Smallest serialization among the given variants.
    pub(crate) fn smallest<I>(variants: I) -> Self
    where
        I: IntoIterator<Item = [Cell; BOARD_SIZE]>,
    {
        let mut best = [u8::MAX; BOARD_SIZE];
        for cells in variants {
            let encoded = cells.map(|cell| cell.symbol() as u8);
            if encoded < best {
                best = encoded;
            }
        }
        CanonicalKey(best)
    }

    /// Parse a key previously produced by [`CanonicalKey::as_string`].
    ///
    /// The text must describe a valid board and must already be the
    /// smallest of its variants.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid board, or
    /// [`crate::Error::NonCanonicalKey`] if it is valid but not canonical.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let board = crate::tictactoe::Board::parse(s)?;
        let key = *board.canonical_key();
        if key.as_string() != board.encode() {
            return Err(crate::Error::NonCanonicalKey { key: s.to_string() });
        }
        Ok(key)
    }

    /// Cells of the canonical variant, row-major
    pub fn cells(&self) -> [Cell; BOARD_SIZE] {
        self.0.map(|byte| Cell::from_symbol(char::from(byte)).unwrap_or(Cell::Empty))
    }

    /// Moves played on the canonical variant (the same for every variant)
    pub fn moves_played(&self) -> usize {
        self.0.iter().filter(|&&byte| byte != b'-').count()
    }

    pub fn as_string(&self) -> String {
        self.0.iter().map(|&byte| char::from(byte)).collect()
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl Serialize for CanonicalKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for CanonicalKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        CanonicalKey::parse(&text).map_err(serde::de::Error::custom)
    }
}
