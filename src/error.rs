//! Error types for the ttt-weights crate

use thiserror::Error;

/// Why a grid was rejected as a tic-tac-toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidStateReason {
    /// The grid does not have exactly three rows of three cells
    NotSquare,
    /// The per-value counts do not add up to nine cells
    WrongCellCount,
    /// O has more marks than X
    TooManyO,
    /// X is more than one mark ahead of O
    TooManyX,
}

impl std::fmt::Display for InvalidStateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InvalidStateReason::NotSquare => "state is not a 3x3 square",
            InvalidStateReason::WrongCellCount => "wrong number of cells",
            InvalidStateReason::TooManyO => "too many O's",
            InvalidStateReason::TooManyX => "too many X's",
        };
        f.write_str(text)
    }
}

/// Main error type for the crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("not a valid game state: {reason}")]
    InvalidState { reason: InvalidStateReason },

    #[error("invalid grid shape: {reason}")]
    InvalidShape { reason: String },

    #[error("no weight recorded for state '{key}'")]
    UnknownKey { key: String },

    #[error("'{key}' is a valid board but not its canonical form")]
    NonCanonicalKey { key: String },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("cell ({row}, {col}) is already occupied")]
    OccupiedCell { row: usize, col: usize },

    #[error("cell ({row}, {col}) is out of bounds (must be 0-2)")]
    OutOfBounds { row: usize, col: usize },

    #[error("game history has no states")]
    EmptyHistory,

    #[error("game history ends in a non-terminal state:\n{board}")]
    UnfinishedGame { board: String },

    #[error("no successor states available:\n{board}")]
    NoSuccessors { board: String },

    #[error("policy '{policy}' returned an illegal move:\n{board}")]
    IllegalMove { policy: String, board: String },

    #[error("state store is unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("observer is unavailable: {message}")]
    ObserverUnavailable { message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("snapshot entry {index} ('{key}'): {reason}")]
    InvalidSnapshotEntry {
        index: usize,
        key: String,
        reason: String,
    },

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
