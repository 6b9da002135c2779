//! Exhaustive minimax search for the Opponent

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark, LINES};
use crate::outcome::{detect_outcome, Outcome};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Opponent has won
pub const WIN_SCORE: i32 = 10;

/// Player has won
pub const LOSS_SCORE: i32 = -10;

/// Full board, no line
pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// TYPES
// ============================================================================

/// A candidate Opponent move with its minimax value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub cell: usize,
    pub score: i32,
}

// ============================================================================
// MINIMAX AI
// ============================================================================

/// Minimax search handle for the Opponent
///
/// The search is exhaustive: no pruning, no depth limit, and terminal scores
/// carry no depth bonus, so every forced win scores the same. Boards are
/// branched by copy, the caller's board is never touched.
#[derive(Debug, Default)]
pub struct MinimaxAI {
    nodes: u64,
}

impl MinimaxAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions visited by the last search
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    /// Best Opponent move for `board`, `None` on a terminal or full board
    ///
    /// A move that completes an Opponent line right away is always taken.
    /// Otherwise every empty cell is scored in ascending order and the first
    /// cell with the strictly greatest score wins.
    pub fn best_move(&mut self, board: &Board) -> Option<ScoredMove> {
        self.nodes = 0;

        if detect_outcome(board).is_terminal() {
            return None;
        }

        if let Some(cell) = winning_cell(board, Mark::Opponent) {
            tracing::debug!(cell, "opponent completes a line");
            return Some(ScoredMove {
                cell,
                score: WIN_SCORE,
            });
        }

        let best = first_best(&self.score_moves(board));

        if let Some(mv) = best {
            tracing::debug!(
                cell = mv.cell,
                score = mv.score,
                nodes = self.nodes,
                "opponent move selected"
            );
        }

        best
    }

    /// Every empty cell with the score of placing the Opponent mark there
    ///
    /// Empty on a terminal board. Cells are listed in ascending order.
    pub fn score_moves(&mut self, board: &Board) -> Vec<ScoredMove> {
        self.nodes = 0;

        if detect_outcome(board).is_terminal() {
            return Vec::new();
        }

        board
            .empty_cells()
            .map(|cell| ScoredMove {
                cell,
                score: self.minimax(&board.with_mark(cell, Mark::Opponent), Mark::Player),
            })
            .collect()
    }

    /// Minimax value of `board` with `to_move` next
    ///
    /// Opponent maximizes, Player minimizes.
    pub fn minimax(&mut self, board: &Board, to_move: Mark) -> i32 {
        self.nodes += 1;

        match detect_outcome(board) {
            Outcome::OpponentWins => return WIN_SCORE,
            Outcome::PlayerWins => return LOSS_SCORE,
            Outcome::Draw => return DRAW_SCORE,
            Outcome::Ongoing => {}
        }

        let scores = board
            .empty_cells()
            .map(|cell| self.minimax(&board.with_mark(cell, to_move), to_move.other()));

        let best = match to_move {
            Mark::Opponent => scores.max(),
            Mark::Player => scores.min(),
        };

        // Ongoing boards always have an empty cell
        best.unwrap_or(DRAW_SCORE)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Cell the Opponent plays on `board`, `None` on a terminal or full board
pub fn select_opponent_move(board: &Board) -> Option<usize> {
    MinimaxAI::new().best_move(board).map(|mv| mv.cell)
}

/// The move `best_move` would play, read off a `score_moves` listing of `board`
///
/// Lets a caller that already scored every cell skip a second search.
pub fn choose_move(board: &Board, scored: &[ScoredMove]) -> Option<ScoredMove> {
    match winning_cell(board, Mark::Opponent) {
        Some(cell) => scored.iter().copied().find(|mv| mv.cell == cell),
        None => first_best(scored),
    }
}

/// Minimax value of `board` with `to_move` next
pub fn minimax(board: &Board, to_move: Mark) -> i32 {
    MinimaxAI::new().minimax(board, to_move)
}

/// First move with the strictly greatest score
fn first_best(scored: &[ScoredMove]) -> Option<ScoredMove> {
    scored.iter().copied().fold(None, |best, mv| match best {
        Some(b) if mv.score <= b.score => Some(b),
        _ => Some(mv),
    })
}

/// First empty cell (ascending) that completes a line for `mark`
fn winning_cell(board: &Board, mark: Mark) -> Option<usize> {
    board.empty_cells().find(|&cell| {
        LINES.iter().any(|line| {
            line.contains(&cell)
                && line
                    .iter()
                    .all(|&index| index == cell || board.get(index) == Some(mark))
        })
    })
}

// ============================================================================
// TESTS
// ============================================================================
