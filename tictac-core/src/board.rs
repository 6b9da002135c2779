//! 3x3 board geometry and immutable board snapshots

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardParseError;

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// Board side length
pub const BOARD_SIZE: usize = 3;

/// The 8 winning lines, rows first, then columns, then diagonals
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// A mark placed on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Human side, shown as "X"
    #[serde(rename = "X")]
    Player,
    /// Engine side, shown as "O"
    #[serde(rename = "O")]
    Opponent,
}

impl Mark {
    pub fn other(self) -> Self {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Opponent => 'O',
        }
    }
}

/// Cell index from row and column (row-major)
pub const fn cell_index(row: usize, col: usize) -> usize {
    row * BOARD_SIZE + col
}

/// Board snapshot (copy to branch)
///
/// Boards are values: placing a mark returns a new board and leaves the
/// original untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Option<Mark>; CELL_COUNT],
}

impl Board {
    /// The empty starting board
    pub const fn empty() -> Self {
        Self {
            cells: [None; CELL_COUNT],
        }
    }

    pub const fn from_cells(cells: [Option<Mark>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.cells
    }

    /// Mark at `index`, `None` for empty or off-board
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// True if `index` is on the board and empty
    pub fn is_empty_cell(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index].is_none()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Empty cell indices in ascending order
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index)
    }

    /// Number of cells holding `mark`
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|cell| **cell == Some(mark)).count()
    }

    /// New board with `mark` placed at `index`
    ///
    /// The caller must pass an empty, on-board cell.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Board {
        debug_assert!(self.is_empty_cell(index), "cell {index} is not an empty cell");
        let mut next = *self;
        next.cells[index] = Some(mark);
        next
    }
}

impl fmt::Display for Board {
    /// Three rows of `X`, `O` and `.`, separated by newlines
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..BOARD_SIZE {
                let symbol = self.cells[cell_index(row, col)].map_or('.', Mark::symbol);
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parse 9 cell characters in row-major order
    ///
    /// `X`/`x` is the Player, `O`/`o` the Opponent, and `_`, `.` or `-` an
    /// empty cell. Whitespace, `/` and `|` are ignored so rows can be
    /// separated for readability.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; CELL_COUNT];
        let mut count = 0;

        for ch in s.chars() {
            if ch.is_whitespace() || ch == '/' || ch == '|' {
                continue;
            }
            let cell = match ch {
                'X' | 'x' => Some(Mark::Player),
                'O' | 'o' => Some(Mark::Opponent),
                '_' | '.' | '-' => None,
                other => return Err(BoardParseError::InvalidCell(other)),
            };
            if count < CELL_COUNT {
                cells[count] = cell;
            }
            count += 1;
        }

        if count != CELL_COUNT {
            return Err(BoardParseError::WrongCellCount(count));
        }

        Ok(Board { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_cover_every_cell() {
        let mut seen = [0; CELL_COUNT];
        for line in LINES {
            for index in line {
                seen[index] += 1;
            }
        }
        // Center sits on 4 lines, corners on 3, edges on 2
        assert_eq!(seen, [3, 2, 3, 2, 4, 2, 3, 2, 3]);
    }

    #[test]
    fn test_with_mark_leaves_original() {
        let board = Board::empty();
        let next = board.with_mark(4, Mark::Player);

        assert_eq!(board, Board::empty());
        assert_eq!(next.get(4), Some(Mark::Player));
        assert_eq!(next.count(Mark::Player), 1);
    }

    #[test]
    fn test_empty_cells_ascending() {
        let board: Board = "XO_ _X_ __O".parse().unwrap();
        let empty: Vec<usize> = board.empty_cells().collect();
        assert_eq!(empty, vec![2, 3, 5, 6, 7]);
        assert!(!board.is_full());
    }

    #[test]
    fn test_parse_and_display() {
        let board: Board = "xx./oo./...".parse().unwrap();
        assert_eq!(board.get(0), Some(Mark::Player));
        assert_eq!(board.get(4), Some(Mark::Opponent));
        assert_eq!(board.get(8), None);
        assert_eq!(board.to_string(), "XX.\nOO.\n...");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "XX_".parse::<Board>(),
            Err(BoardParseError::WrongCellCount(3))
        ));
        assert!(matches!(
            "XX_OO_??_".parse::<Board>(),
            Err(BoardParseError::InvalidCell('?'))
        ));
        assert!(matches!(
            "XXXXXXXXXX".parse::<Board>(),
            Err(BoardParseError::WrongCellCount(10))
        ));
    }

    #[test]
    fn test_off_board_index() {
        let board = Board::empty();
        assert_eq!(board.get(9), None);
        assert!(!board.is_empty_cell(9));
    }

    #[test]
    fn test_json_uses_symbols() {
        let board = Board::empty().with_mark(0, Mark::Player).with_mark(1, Mark::Opponent);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["X","O",null,null,null,null,null,null,null]"#);
    }
}
