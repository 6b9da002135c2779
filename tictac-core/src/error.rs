//! Error types for board parsing and session navigation

use thiserror::Error;

/// Failure to parse a board from its 9-character text form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("expected 9 cells, found {0}")]
    WrongCellCount(usize),

    #[error("invalid cell character '{0}' (use X, O, or _ . - for empty)")]
    InvalidCell(char),
}

/// Caller contract violations on a game session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("history index {index} out of range (history has {len} entries)")]
    HistoryIndexOutOfRange { index: usize, len: usize },
}
