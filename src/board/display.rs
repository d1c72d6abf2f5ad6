use super::error::BoardError;
use super::{Actor, Board, Cell};
use std::fmt;
use std::str::FromStr;

const EMPTY_CHAR: char = '.';
const ROW_SEPARATOR: char = '/';

impl Board {
    /// Compact layout string: rows from top to bottom separated by `/`,
    /// `.` for empty cells, `A` and `O` for the AI's and the opponent's discs.
    pub fn to_layout(&self) -> String {
        let mut rows = Vec::with_capacity(self.rows());
        for row in (0..self.rows()).rev() {
            let line: String = (0..self.columns())
                .map(|column| cell_char(self.cells[self.position(column, row)]))
                .collect();
            rows.push(line);
        }
        rows.join(&ROW_SEPARATOR.to_string())
    }
}

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => EMPTY_CHAR,
        Cell::Disc(actor) => actor.to_char(),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..self.rows()).rev() {
            for column in 0..self.columns() {
                write!(f, " {}", cell_char(self.cells[self.position(column, row)]))?;
            }
            writeln!(f)?;
        }
        for column in 0..self.columns() {
            write!(f, " {}", column % 10)?;
        }
        writeln!(f)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(layout: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = layout.trim().split(ROW_SEPARATOR).map(str::trim).collect();
        let columns = rows.first().map(|row| row.chars().count()).unwrap_or(0);

        if rows.iter().any(|row| row.chars().count() != columns) {
            return Err(BoardError::InvalidLayoutError {
                msg: "every row must have the same number of cells",
            });
        }

        let mut board = Board::new(columns, rows.len())?;
        let row_count = rows.len();

        // The layout lists the top row first; placement has to start at the
        // bottom so that floating discs can be detected column by column.
        for (index_from_top, line) in rows.iter().enumerate().rev() {
            let row = row_count - 1 - index_from_top;
            for (column, c) in line.chars().enumerate() {
                if c == EMPTY_CHAR {
                    continue;
                }
                let actor =
                    Actor::from_char(c).ok_or(BoardError::InvalidLayoutCharacterError { c })?;
                if board.next_free_row(column) != Some(row) {
                    return Err(BoardError::FloatingDiscError { column });
                }
                board = board.place(board.position(column, row), actor)?;
            }
        }

        Ok(board)
    }
}

/// Builds a board from a layout written inline, top row first, rows
/// separated by `/`. Panics on malformed input, so it is meant for tests.
///
/// ```
/// use connect4::board_position;
///
/// let board = board_position! {
///     ..../
///     ..../
///     .A../
///     OAO.
/// };
/// assert_eq!(board.columns(), 4);
/// assert_eq!(board.discs_placed(), 4);
/// ```
#[macro_export]
macro_rules! board_position {
    ($($cell:tt)*) => {{
        let layout: String = stringify!($($cell)*)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        layout
            .parse::<$crate::board::Board>()
            .expect("invalid board layout")
    }};
}
