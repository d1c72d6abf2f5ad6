pub mod actor;
pub mod error;
pub mod zobrist;

mod display;


pub use actor::Actor;
use error::BoardError;
use smallvec::SmallVec;

pub const STANDARD_COLUMNS: usize = 7;
pub const STANDARD_ROWS: usize = 6;
pub const MAX_CELLS: usize = 256;

/// Number of contiguous discs needed to win.
pub const CONNECTION_LENGTH: usize = 4;

/// Window value reached only when an anchor disc and its three neighbors all
/// belong to the same actor (3 neighbors, 2 points each).
pub const WIN_THRESHOLD: i32 = 6;

// (column step, row step) for horizontal, vertical, ascending and descending lines
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Column indices, small enough to live on the stack for any sensible board.
pub type ColumnList = SmallVec<[usize; 16]>;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Cell {
    Empty,
    Disc(Actor),
}

impl Cell {
    pub fn actor(self) -> Option<Actor> {
        match self {
            Cell::Empty => None,
            Cell::Disc(actor) => Some(actor),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Snapshot of a column-based grid. Cells are stored column-major,
/// `column * rows + row`, with row 0 at the bottom. Every placement returns a
/// new board, so sibling positions in a search tree never alias.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    columns: usize,
    rows: usize,
    cells: SmallVec<[Cell; 64]>,
    discs_placed: usize,
    discs_placed_by_actor: [usize; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            columns: STANDARD_COLUMNS,
            rows: STANDARD_ROWS,
            cells: SmallVec::from_elem(Cell::Empty, STANDARD_COLUMNS * STANDARD_ROWS),
            discs_placed: 0,
            discs_placed_by_actor: [0, 0],
        }
    }
}

impl Board {
    pub fn new(columns: usize, rows: usize) -> Result<Self, BoardError> {
        let capacity = match columns.checked_mul(rows) {
            Some(capacity) if columns > 0 && rows > 0 && capacity <= MAX_CELLS => capacity,
            _ => {
                return Err(BoardError::InvalidDimensionsError {
                    max_cells: MAX_CELLS,
                })
            }
        };

        Ok(Self {
            columns,
            rows,
            cells: SmallVec::from_elem(Cell::Empty, capacity),
            discs_placed: 0,
            discs_placed_by_actor: [0, 0],
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn discs_placed(&self) -> usize {
        self.discs_placed
    }

    pub fn discs_placed_by(&self, actor: Actor) -> usize {
        self.discs_placed_by_actor[actor.index()]
    }

    #[inline]
    pub fn position(&self, column: usize, row: usize) -> usize {
        column * self.rows + row
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<Cell> {
        self.cells.get(position).copied()
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.get(self.position(column, row))
    }

    fn cell_at(&self, column: isize, row: isize) -> Option<Cell> {
        if column < 0 || row < 0 {
            return None;
        }
        self.cell(column as usize, row as usize)
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        match self.cell(column, self.rows - 1) {
            Some(top) => !top.is_empty(),
            None => true,
        }
    }

    pub fn next_free_row(&self, column: usize) -> Option<usize> {
        if column >= self.columns {
            return None;
        }
        (0..self.rows).find(|&row| self.cells[self.position(column, row)].is_empty())
    }

    /// Columns that can still take a disc, left to right.
    pub fn legal_columns(&self) -> ColumnList {
        (0..self.columns)
            .filter(|&column| !self.is_column_full(column))
            .collect()
    }

    pub fn has_legal_column(&self) -> bool {
        (0..self.columns).any(|column| !self.is_column_full(column))
    }

    /// Returns a copy of this board with `actor`'s disc on `position`.
    pub fn place(&self, position: usize, actor: Actor) -> Result<Board, BoardError> {
        match self.get(position) {
            None => return Err(BoardError::PositionOutOfRangeError { position }),
            Some(Cell::Disc(_)) => return Err(BoardError::CellOccupiedPlaceError { position }),
            Some(Cell::Empty) => (),
        }

        let mut board = self.clone();
        board.cells[position] = Cell::Disc(actor);
        board.discs_placed += 1;
        board.discs_placed_by_actor[actor.index()] += 1;
        Ok(board)
    }

    /// Drops a disc into `column`, returning the new board and the position
    /// the disc landed on.
    pub fn drop_disc(&self, column: usize, actor: Actor) -> Result<(Board, usize), BoardError> {
        if column >= self.columns {
            return Err(BoardError::ColumnOutOfRangeError {
                column,
                columns: self.columns,
            });
        }

        let row = self
            .next_free_row(column)
            .ok_or(BoardError::ColumnFullError { column })?;
        let position = self.position(column, row);
        let board = self.place(position, actor)?;
        Ok((board, position))
    }

    pub fn is_draw(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn has_connection(&self, actor: Actor) -> bool {
        DIRECTIONS
            .iter()
            .any(|&direction| self.best_window(actor, direction) == Some(WIN_THRESHOLD))
    }

    /// Strongest partial connection for `actor`, from 0 up to `WIN_THRESHOLD`.
    pub fn evaluate(&self, actor: Actor) -> i32 {
        let mut best = 0;
        for &direction in DIRECTIONS.iter() {
            if let Some(value) = self.best_window(actor, direction) {
                if value == WIN_THRESHOLD {
                    return WIN_THRESHOLD;
                }
                best = best.max(value);
            }
        }
        best
    }

    /// Scores every in-bounds window anchored on one of `actor`'s discs and
    /// extending along `direction`. Returns `None` when no window fits.
    fn best_window(&self, actor: Actor, (column_step, row_step): (isize, isize)) -> Option<i32> {
        let mut best: Option<i32> = None;

        for (position, cell) in self.cells.iter().enumerate() {
            if *cell != Cell::Disc(actor) {
                continue;
            }

            let column = (position / self.rows) as isize;
            let row = (position % self.rows) as isize;
            let mut value = 0;
            let mut fits = true;

            for step in 1..CONNECTION_LENGTH as isize {
                match self.cell_at(column + column_step * step, row + row_step * step) {
                    Some(neighbor) => value += neighbor_value(neighbor, actor),
                    None => {
                        fits = false;
                        break;
                    }
                }
            }

            if !fits {
                continue;
            }
            if value == WIN_THRESHOLD {
                return Some(WIN_THRESHOLD);
            }
            best = Some(best.map_or(value, |b| b.max(value)));
        }

        best
    }
}

#[inline]
fn neighbor_value(neighbor: Cell, actor: Actor) -> i32 {
    match neighbor {
        Cell::Disc(owner) if owner == actor => 2,
        Cell::Empty => 1,
        Cell::Disc(_) => -2,
    }
}
