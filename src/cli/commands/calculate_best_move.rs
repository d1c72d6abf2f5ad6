//! Calculate best move command - choose a column for a given layout.

use connect4::board::{Actor, Board};
use connect4::engine::Engine;
use structopt::StructOpt;

use super::util::EngineArgs;
use super::Command;

#[derive(StructOpt)]
pub struct CalculateBestMoveArgs {
    #[structopt(flatten)]
    pub engine: EngineArgs,
    #[structopt(long = "board")]
    pub board: Board,
    #[structopt(long, default_value = "ai", help = "Actor to move")]
    pub actor: Actor,
}

impl Command for CalculateBestMoveArgs {
    fn execute(self) {
        let mut engine = Engine::with_config(self.engine.to_config());

        match engine.decide(&self.board, self.actor) {
            Ok(decision) => println!("{} (score {})", decision.column, decision.score),
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}
