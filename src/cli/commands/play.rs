//! Play command - play a game against the computer.

use std::io;

use connect4::board::Actor;
use connect4::engine::{Engine, Game};
use regex::Regex;
use structopt::StructOpt;

use super::util::{print_ending, print_game, BoardArgs, EngineArgs};
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(flatten)]
    pub engine: EngineArgs,
    #[structopt(flatten)]
    pub board: BoardArgs,
    #[structopt(short = "c", long = "actor", help = "Your side: `ai` or `opponent` (default: random)")]
    pub actor: Option<Actor>,
    #[structopt(long, default_value = "opponent", help = "Actor that moves first")]
    pub first: Actor,
}

impl Command for PlayArgs {
    fn execute(self) {
        let board = match self.board.initial_board() {
            Ok(board) => board,
            Err(err) => {
                eprintln!("Invalid board: {}", err);
                std::process::exit(1);
            }
        };
        let human = self
            .actor
            .unwrap_or_else(|| Actor::random(&mut rand::thread_rng()));
        let mut engine = Engine::with_config(self.engine.to_config());
        let mut game = Game::new(board, self.first);

        println!("you are {}", human);
        print_game(&game);

        loop {
            if let Some(ending) = game.ending() {
                print_ending(ending);
                break;
            }

            if game.to_move() != human {
                if let Err(error) = game.play_engine_turn(&mut engine) {
                    println!("error: {}", error);
                    break;
                }
                print_game(&game);
                continue;
            }

            let mut input = String::new();
            let parsed = match io::stdin().read_line(&mut input) {
                Ok(0) => break,
                Ok(_n) => PlayerCommand::parse(input.trim()),
                Err(error) => {
                    println!("error: {}", error);
                    continue;
                }
            };

            match parsed {
                Ok(PlayerCommand::Drop { column }) => match game.play(column) {
                    Ok(()) => print_game(&game),
                    Err(error) => println!("invalid move: {}", error),
                },
                Ok(PlayerCommand::Quit) => break,
                Err(error) => println!("failed to parse command `{}`: {}", input.trim_end(), error),
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PlayerCommand {
    Drop { column: usize },
    Quit,
}

impl PlayerCommand {
    fn parse(command: &str) -> Result<PlayerCommand, &'static str> {
        if command == "quit" {
            return Ok(PlayerCommand::Quit);
        }

        let re = Regex::new(r"^(?:move\s+)?(\d+)$").map_err(|_| "invalid command pattern")?;
        let caps = re.captures(command).ok_or("expected a column number or `quit`")?;
        let column = caps[1].parse().map_err(|_| "column number is too large")?;
        Ok(PlayerCommand::Drop { column })
    }
}
