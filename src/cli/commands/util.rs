//! Shared utilities for CLI commands.

use connect4::board::error::BoardError;
use connect4::board::{Board, STANDARD_COLUMNS, STANDARD_ROWS};
use connect4::engine::{Algorithm, EngineConfig, Game};
use connect4::evaluate::GameEnding;
use structopt::StructOpt;

/// Flags shared by every command that runs an engine.
#[derive(StructOpt, Clone, Debug)]
pub struct EngineArgs {
    #[structopt(short, long, default_value = "negamax")]
    pub algorithm: Algorithm,
    #[structopt(short, long, default_value = "6")]
    pub depth: u8,
    #[structopt(long, default_value = "1000", help = "MCTS iterations per decision")]
    pub iterations: u32,
    #[structopt(long, default_value = "16", help = "MTD(f) tests per decision")]
    pub max_iterations: u32,
    #[structopt(long, default_value = "1000003")]
    pub table_length: usize,
    #[structopt(long, default_value = "0.75", help = "MCTS exploration constant")]
    pub exploration: f64,
    #[structopt(long, default_value = "100")]
    pub half_width: i32,
    #[structopt(
        long,
        default_value = "2",
        help = "NegaScout re-searches children with at least this many plies left (capped at 2)"
    )]
    pub research_threshold: u8,
    #[structopt(long, help = "Seed for every random choice the engine makes")]
    pub seed: Option<u64>,
}

impl EngineArgs {
    pub fn to_config(&self) -> EngineConfig {
        EngineConfig {
            algorithm: self.algorithm,
            search_depth: self.depth,
            iterations: self.iterations,
            max_iterations: self.max_iterations,
            table_length: self.table_length,
            exploration: self.exploration,
            aspiration_half_width: self.half_width,
            research_threshold: self.research_threshold,
            seed: self.seed,
        }
    }
}

/// Starting position: an explicit layout, or an empty board of the given size.
#[derive(StructOpt, Clone, Debug)]
pub struct BoardArgs {
    #[structopt(long, default_value = "7")]
    pub columns: usize,
    #[structopt(long, default_value = "6")]
    pub rows: usize,
    #[structopt(long = "board", help = "Starting layout, rows top first, separated by `/`")]
    pub layout: Option<Board>,
}

impl BoardArgs {
    pub fn initial_board(&self) -> Result<Board, BoardError> {
        match &self.layout {
            Some(board) => Ok(board.clone()),
            None if self.columns == STANDARD_COLUMNS && self.rows == STANDARD_ROWS => {
                Ok(Board::default())
            }
            None => Board::new(self.columns, self.rows),
        }
    }
}

pub(crate) fn print_game(game: &Game) {
    println!("{}", game.board());
    if let Some((actor, column)) = game.history().last() {
        println!("{} played column {}", actor, column);
    }
}

pub(crate) fn print_ending(ending: GameEnding) {
    match ending {
        GameEnding::Win(actor) => println!("{} wins!", actor),
        GameEnding::Draw => println!("draw!"),
    }
}
