//! Turn bookkeeping for hosts that drive a whole game through the engine.

use crate::board::{Actor, Board};
use crate::evaluate::{self, GameEnding};

use super::{Engine, EngineError};

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Actor,
    history: Vec<(Actor, usize)>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::default(), Actor::Opponent)
    }
}

impl Game {
    pub fn new(board: Board, to_move: Actor) -> Self {
        Self {
            board,
            to_move,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Actor {
        self.to_move
    }

    /// Columns played so far, oldest first.
    pub fn history(&self) -> &[(Actor, usize)] {
        &self.history
    }

    pub fn ending(&self) -> Option<GameEnding> {
        evaluate::game_ending(&self.board)
    }

    /// Drops a disc for the actor to move and passes the turn.
    pub fn play(&mut self, column: usize) -> Result<(), EngineError> {
        let (board, _) = self
            .board
            .drop_disc(column, self.to_move)
            .map_err(|error| EngineError::BoardError { error })?;
        self.board = board;
        self.history.push((self.to_move, column));
        self.to_move = self.to_move.opposite();
        Ok(())
    }

    /// Lets `engine` choose and play the next column.
    pub fn play_engine_turn(&mut self, engine: &mut Engine) -> Result<usize, EngineError> {
        let column = engine.choose_column(&self.board, self.to_move)?;
        self.play(column)?;
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::error::BoardError;

    #[test]
    fn test_play_alternates_turns() {
        let mut game = Game::new(Board::new(4, 4).unwrap(), Actor::AI);
        game.play(1).unwrap();
        game.play(1).unwrap();

        assert_eq!(game.to_move(), Actor::AI);
        assert_eq!(game.history(), &[(Actor::AI, 1), (Actor::Opponent, 1)]);
        assert_eq!(game.board().discs_placed(), 2);
    }

    #[test]
    fn test_play_into_full_column() {
        let mut game = Game::new(Board::new(4, 2).unwrap(), Actor::AI);
        game.play(0).unwrap();
        game.play(0).unwrap();

        assert_eq!(
            game.play(0),
            Err(EngineError::BoardError {
                error: BoardError::ColumnFullError { column: 0 }
            })
        );
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_detects_a_win() {
        let mut game = Game::new(Board::new(4, 4).unwrap(), Actor::AI);
        for column in [0, 1, 0, 1, 0, 1, 0].iter() {
            assert_eq!(game.ending(), None);
            game.play(*column).unwrap();
        }
        assert_eq!(game.ending(), Some(GameEnding::Win(Actor::AI)));
    }
}
