//! Win and draw detection

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark, LINES};

/// Terminal classification of a board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Ongoing,
    PlayerWins,
    OpponentWins,
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    /// The winning mark, if any
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::PlayerWins => Some(Mark::Player),
            Outcome::OpponentWins => Some(Mark::Opponent),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }

    /// Status text shown to the player
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Ongoing => "Ongoing",
            Outcome::PlayerWins => "Player wins",
            Outcome::OpponentWins => "Opponent wins",
            Outcome::Draw => "Draw",
        }
    }

    fn win_for(mark: Mark) -> Self {
        match mark {
            Mark::Player => Outcome::PlayerWins,
            Mark::Opponent => Outcome::OpponentWins,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a board
///
/// Lines are checked in [`LINES`] order and the first complete line decides
/// the winner. A full board with no complete line is a draw.
pub fn detect_outcome(board: &Board) -> Outcome {
    for [a, b, c] in LINES {
        if let Some(mark) = board.get(a) {
            if board.get(b) == Some(mark) && board.get(c) == Some(mark) {
                return Outcome::win_for(mark);
            }
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}
