//! Watch command - watch the computer play against itself.

use std::thread::sleep;
use std::time::Duration;

use connect4::board::Actor;
use connect4::engine::{Algorithm, Engine, Game};
use structopt::StructOpt;

use super::util::{print_ending, print_game, BoardArgs, EngineArgs};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(flatten)]
    pub engine: EngineArgs,
    #[structopt(flatten)]
    pub board: BoardArgs,
    #[structopt(long, help = "Algorithm for the opponent (default: same as --algorithm)")]
    pub opponent_algorithm: Option<Algorithm>,
    #[structopt(long, help = "Depth for the opponent (default: same as --depth)")]
    pub opponent_depth: Option<u8>,
    #[structopt(long, default_value = "opponent", help = "Actor that moves first")]
    pub first: Actor,
    #[structopt(
        long = "delay",
        default_value = "500",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
}

impl Command for WatchArgs {
    fn execute(self) {
        let board = match self.board.initial_board() {
            Ok(board) => board,
            Err(err) => {
                eprintln!("Invalid board: {}", err);
                std::process::exit(1);
            }
        };

        let ai_config = self.engine.to_config();
        let mut opponent_config = ai_config.clone();
        if let Some(algorithm) = self.opponent_algorithm {
            opponent_config.algorithm = algorithm;
        }
        if let Some(depth) = self.opponent_depth {
            opponent_config.search_depth = depth;
        }
        opponent_config.seed = ai_config.seed.map(|seed| seed.wrapping_add(1));

        let mut ai = Engine::with_config(ai_config);
        let mut opponent = Engine::with_config(opponent_config);
        let mut game = Game::new(board, self.first);
        print_game(&game);

        loop {
            if let Some(ending) = game.ending() {
                print_ending(ending);
                break;
            }
            sleep(Duration::from_millis(self.delay_ms));

            let engine = match game.to_move() {
                Actor::AI => &mut ai,
                Actor::Opponent => &mut opponent,
            };
            if let Err(error) = game.play_engine_turn(engine) {
                println!("error: {}", error);
                break;
            }
            print_game(&game);
        }

        println!(
            "ai ({}): mean nodes {:.1}; opponent ({}): mean nodes {:.1}",
            ai.algorithm_name(),
            ai.stats().mean_position_count(),
            opponent.algorithm_name(),
            opponent.stats().mean_position_count()
        );
    }
}
