use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Cannot place a disc on a cell that is already occupied (position {position})")]
    CellOccupiedPlaceError { position: usize },
    #[error("Cannot place a disc outside of the board (position {position})")]
    PositionOutOfRangeError { position: usize },
    #[error("Column {column} does not exist on a board with {columns} columns")]
    ColumnOutOfRangeError { column: usize, columns: usize },
    #[error("Column {column} is full")]
    ColumnFullError { column: usize },
    #[error("A board needs at least one column and one row, and at most {max_cells} cells")]
    InvalidDimensionsError { max_cells: usize },
    #[error("Invalid board layout: {msg}")]
    InvalidLayoutError { msg: &'static str },
    #[error("Invalid character `{c}` in board layout")]
    InvalidLayoutCharacterError { c: char },
    #[error("Disc in column {column} is floating above an empty cell")]
    FloatingDiscError { column: usize },
}
