//! TICTAC Core - Game engine and AI
//!
//! This crate provides the core game logic for TICTAC:
//! - Board snapshots (3x3 grid, row-major cells)
//! - Win and draw detection
//! - Exhaustive minimax search for the computer Opponent
//! - Game session with rewindable move history

pub mod board;
pub mod error;
pub mod outcome;
pub mod search;
pub mod session;

// Re-exports for convenient access
pub use board::{cell_index, Board, Mark, BOARD_SIZE, CELL_COUNT, LINES};
pub use error::{BoardParseError, SessionError};
pub use outcome::{detect_outcome, Outcome};
pub use search::{
    choose_move, minimax, select_opponent_move, MinimaxAI, ScoredMove, DRAW_SCORE, LOSS_SCORE,
    WIN_SCORE,
};
pub use session::{GameSession, MoveEntry, SessionView, Turn};
