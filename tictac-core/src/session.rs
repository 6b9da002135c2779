//! Game session: board history, cursor, and the player-facing operations

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark, CELL_COUNT};
use crate::error::SessionError;
use crate::outcome::{detect_outcome, Outcome};
use crate::search::select_opponent_move;

// ============================================================================
// TYPES
// ============================================================================

/// One applied turn: the Player's cell and the Opponent's reply
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub player_cell: usize,
    /// `None` when the Player's move ended the game
    pub opponent_cell: Option<usize>,
    /// Outcome of the board after the turn
    pub outcome: Outcome,
}

/// A jump target in the move list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub index: usize,
    pub label: String,
}

/// Read-only projection of a session for display
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub board: Board,
    pub status: Outcome,
    pub status_label: String,
    pub cursor: usize,
    pub history_len: usize,
    pub next: Mark,
    pub moves: Vec<MoveEntry>,
}

// ============================================================================
// GAME SESSION
// ============================================================================

/// Single-player session against the minimax Opponent
///
/// `history[0]` is the empty board and `history[k]` the board after the k-th
/// full turn. The cursor selects the displayed board and always points into
/// `history`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    history: Vec<Board>,
    cursor: usize,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            history: vec![Board::empty()],
            cursor: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn current_board(&self) -> &Board {
        &self.history[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Never true: the starting board is always present
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Outcome of the board at the cursor
    pub fn status(&self) -> Outcome {
        detect_outcome(self.current_board())
    }

    pub fn status_label(&self) -> &'static str {
        self.status().label()
    }

    /// Side to move by cursor parity (display only)
    pub fn next_mark(&self) -> Mark {
        if self.cursor % 2 == 0 {
            Mark::Player
        } else {
            Mark::Opponent
        }
    }

    /// Jump targets, one per history entry
    pub fn moves(&self) -> Vec<MoveEntry> {
        (0..self.history.len())
            .map(|index| MoveEntry {
                index,
                label: if index == 0 {
                    "start".to_string()
                } else {
                    index.to_string()
                },
            })
            .collect()
    }

    pub fn view(&self) -> SessionView {
        let status = self.status();
        SessionView {
            board: *self.current_board(),
            status,
            status_label: status.label().to_string(),
            cursor: self.cursor,
            history_len: self.history.len(),
            next: self.next_mark(),
            moves: self.moves(),
        }
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Play the Player's mark at `cell`, then the Opponent's reply
    ///
    /// Ignored (returns `None`, no state change) when `cell` is off the
    /// board, already occupied, or the board at the cursor is finished.
    /// Otherwise the new board replaces every entry after the cursor and the
    /// cursor moves onto it.
    pub fn apply_human_move(&mut self, cell: usize) -> Option<Turn> {
        let board = *self.current_board();

        if cell >= CELL_COUNT {
            tracing::debug!(cell, "move ignored: cell off the board");
            return None;
        }
        let status = detect_outcome(&board);
        if status.is_terminal() {
            tracing::debug!(cell, %status, "move ignored: game is over");
            return None;
        }
        if !board.is_empty_cell(cell) {
            tracing::debug!(cell, "move ignored: cell occupied");
            return None;
        }

        let mut next = board.with_mark(cell, Mark::Player);
        let mut opponent_cell = None;

        if !detect_outcome(&next).is_terminal() {
            if let Some(reply) = select_opponent_move(&next) {
                next = next.with_mark(reply, Mark::Opponent);
                opponent_cell = Some(reply);
            }
        }

        self.history.truncate(self.cursor + 1);
        self.history.push(next);
        self.cursor = self.history.len() - 1;

        let turn = Turn {
            player_cell: cell,
            opponent_cell,
            outcome: detect_outcome(&next),
        };

        tracing::debug!(
            player_cell = turn.player_cell,
            opponent_cell = ?turn.opponent_cell,
            outcome = %turn.outcome,
            cursor = self.cursor,
            "turn applied"
        );

        Some(turn)
    }

    /// Move the cursor to `index` without touching history
    pub fn jump_to(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.history.len() {
            return Err(SessionError::HistoryIndexOutOfRange {
                index,
                len: self.history.len(),
            });
        }

        self.cursor = index;
        tracing::debug!(cursor = index, "jumped");
        Ok(())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = GameSession::new();
        assert_eq!(session.len(), 1);
        assert_eq!(session.cursor(), 0);
        assert_eq!(*session.current_board(), Board::empty());
        assert_eq!(session.status(), Outcome::Ongoing);
        assert_eq!(session.next_mark(), Mark::Player);
        assert!(!session.is_empty());
    }

    #[test]
    fn test_move_adds_one_full_turn() {
        let mut session = GameSession::new();
        let turn = session.apply_human_move(4).unwrap();

        assert_eq!(turn.player_cell, 4);
        assert_eq!(turn.opponent_cell, Some(0));
        assert_eq!(turn.outcome, Outcome::Ongoing);
        assert_eq!(session.len(), 2);
        assert_eq!(session.cursor(), 1);

        let board = session.current_board();
        assert_eq!(board.get(4), Some(Mark::Player));
        assert_eq!(board.get(0), Some(Mark::Opponent));
        assert_eq!(board.count(Mark::Player), 1);
        assert_eq!(board.count(Mark::Opponent), 1);
    }

    #[test]
    fn test_occupied_cell_ignored() {
        let mut session = GameSession::new();
        session.apply_human_move(4).unwrap();
        let before = session.clone();

        assert_eq!(session.apply_human_move(4), None);
        assert_eq!(session.apply_human_move(0), None);
        assert_eq!(session, before);
    }

    #[test]
    fn test_off_board_cell_ignored() {
        let mut session = GameSession::new();
        assert_eq!(session.apply_human_move(9), None);
        assert_eq!(session, GameSession::new());
    }

    #[test]
    fn test_start_entry_survives_moves() {
        let mut session = GameSession::new();
        session.apply_human_move(0).unwrap();
        session.jump_to(0).unwrap();

        assert_eq!(*session.current_board(), Board::empty());
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_move_after_rewind_discards_future() {
        let mut session = GameSession::new();
        session.apply_human_move(4).unwrap();
        session.apply_human_move(8).unwrap();
        assert_eq!(session.len(), 3);
        let discarded = session.history()[2];

        session.jump_to(1).unwrap();
        let k = session.current_board().empty_cells().find(|&c| c != 8).unwrap();
        session.apply_human_move(k).unwrap();

        assert_eq!(session.len(), 3);
        assert_eq!(session.cursor(), 2);
        assert_ne!(session.history()[2], discarded);
    }

    #[test]
    fn test_rewind_to_start_then_move() {
        let mut session = GameSession::new();
        session.apply_human_move(4).unwrap();
        session.apply_human_move(8).unwrap();

        session.jump_to(1).unwrap();
        session.jump_to(0).unwrap();
        session.apply_human_move(2).unwrap();

        assert_eq!(session.len(), 2);
        assert_eq!(session.current_board().get(2), Some(Mark::Player));
    }

    #[test]
    fn test_jump_out_of_range() {
        let mut session = GameSession::new();
        session.apply_human_move(4).unwrap();

        let err = session.jump_to(2).unwrap_err();
        assert_eq!(err, SessionError::HistoryIndexOutOfRange { index: 2, len: 2 });
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn test_jump_is_idempotent() {
        let mut session = GameSession::new();
        session.apply_human_move(4).unwrap();
        session.apply_human_move(8).unwrap();

        session.jump_to(1).unwrap();
        let once = session.clone();
        session.jump_to(1).unwrap();
        assert_eq!(session, once);
        assert_eq!(session.next_mark(), Mark::Opponent);
    }

    #[test]
    fn test_moves_labels() {
        let mut session = GameSession::new();
        session.apply_human_move(4).unwrap();
        session.apply_human_move(8).unwrap();

        let labels: Vec<String> = session.moves().into_iter().map(|m| m.label).collect();
        assert_eq!(labels, vec!["start", "1", "2"]);
    }

    #[test]
    fn test_view_projection() {
        let mut session = GameSession::new();
        session.apply_human_move(4).unwrap();
        let view = session.view();

        assert_eq!(view.board, *session.current_board());
        assert_eq!(view.status, Outcome::Ongoing);
        assert_eq!(view.status_label, "Ongoing");
        assert_eq!(view.cursor, 1);
        assert_eq!(view.history_len, 2);
        assert_eq!(view.moves.len(), 2);
    }

    #[test]
    fn test_filling_move_gets_no_reply() {
        let mut session = GameSession::new();
        for cell in [4, 8, 1, 6] {
            let turn = session.apply_human_move(cell).unwrap();
            assert!(turn.opponent_cell.is_some());
        }

        let turn = session.apply_human_move(5).unwrap();
        assert_eq!(
            turn,
            Turn {
                player_cell: 5,
                opponent_cell: None,
                outcome: Outcome::Draw,
            }
        );
        assert!(session.current_board().is_full());
        assert_eq!(session.current_board().count(Mark::Player), 5);
        assert_eq!(session.current_board().count(Mark::Opponent), 4);

        let last = session.history()[session.len() - 1];
        let previous = session.history()[session.len() - 2];
        let changed: Vec<usize> = (0..CELL_COUNT)
            .filter(|&i| last.get(i) != previous.get(i))
            .collect();
        assert_eq!(changed, vec![5]);
    }

    #[test]
    fn test_finished_game_ignores_moves() {
        let mut session = GameSession::new();
        // Player always takes the first empty cell
        while session.status() == Outcome::Ongoing {
            let cell = session.current_board().empty_cells().next().unwrap();
            session.apply_human_move(cell).unwrap();
        }
        let finished = session.clone();

        for cell in 0..CELL_COUNT {
            assert_eq!(session.apply_human_move(cell), None);
        }
        assert_eq!(session, finished);
        assert_ne!(session.status(), Outcome::PlayerWins);
    }
}
