//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    calculate_best_move::CalculateBestMoveArgs, play::PlayArgs, watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "connect4",
    about = "A pluggable game-tree search engine for connect four"
)]
pub enum Connect4 {
    #[structopt(
        name = "play",
        about = "Play a game against the computer. Enter a column number to drop a disc, or `quit`. Your side is chosen at random unless you specify one with `--actor`. The engine is configured with `--algorithm` (default: negamax) and `--depth` (default: 6)."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "watch",
        about = "Watch the computer play against itself. Use `--opponent-algorithm` and `--opponent-depth` to pit two different configurations against each other."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "calculate-best-move",
        about = "Choose a column for the given `--board` layout (required), rows top first, separated by `/`, with `.` empty, `A` ai and `O` opponent."
    )]
    CalculateBestMove(CalculateBestMoveArgs),
}

impl crate::cli::commands::Command for Connect4 {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Play(cmd),
            Watch(cmd),
            CalculateBestMove(cmd),
        }
    }
}
