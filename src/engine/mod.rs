//! The decision entry point hosts call: a board snapshot and the acting
//! actor in, a non-full column out.

pub mod game;

use std::fmt;
use std::str::FromStr;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::board::error::BoardError;
use crate::board::{Actor, Board};
use crate::mcts::{MctsConfig, MonteCarlo};
use crate::searcher::transposition_table::DEFAULT_TABLE_LENGTH;
use crate::searcher::{
    aspiration, mtdf, Aspiration, Decision, Minimax, Mtdf, NegaMax, NegaScout, Pvs, RandomColumn,
    SearchContext, SearchError, SearchStats, Searcher, DEFAULT_RESEARCH_THRESHOLD,
};

pub use game::Game;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Minimax,
    NegaMax,
    NegaScout,
    Pvs,
    Mtdf,
    Aspiration,
    Mcts,
    Random,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Algorithm::Minimax,
        Algorithm::NegaMax,
        Algorithm::NegaScout,
        Algorithm::Pvs,
        Algorithm::Mtdf,
        Algorithm::Aspiration,
        Algorithm::Mcts,
        Algorithm::Random,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Minimax => "minimax",
            Algorithm::NegaMax => "negamax",
            Algorithm::NegaScout => "negascout",
            Algorithm::Pvs => "pvs",
            Algorithm::Mtdf => "mtdf",
            Algorithm::Aspiration => "aspiration",
            Algorithm::Mcts => "mcts",
            Algorithm::Random => "random",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// used for parsing cli args
type ParseError = &'static str;

impl FromStr for Algorithm {
    type Err = ParseError;

    fn from_str(algorithm: &str) -> Result<Self, Self::Err> {
        let algorithm = algorithm.to_ascii_lowercase();
        Self::ALL
            .iter()
            .find(|candidate| candidate.name() == algorithm)
            .copied()
            .ok_or("algorithm must be one of: minimax, negamax, negascout, pvs, mtdf, aspiration, mcts, random")
    }
}

/// Every knob of a decision procedure. One config per actor.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub algorithm: Algorithm,
    pub search_depth: u8,
    /// MCTS iterations per decision.
    pub iterations: u32,
    /// Null-window tests MTD(f) may run per decision.
    pub max_iterations: u32,
    pub table_length: usize,
    pub exploration: f64,
    pub aspiration_half_width: i32,
    pub research_threshold: u8,
    /// Seeds every random source of the searcher; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::NegaMax,
            search_depth: 6,
            iterations: crate::mcts::config::DEFAULT_ITERATIONS,
            max_iterations: mtdf::DEFAULT_MAX_ITERATIONS,
            table_length: DEFAULT_TABLE_LENGTH,
            exploration: crate::mcts::config::DEFAULT_EXPLORATION,
            aspiration_half_width: aspiration::DEFAULT_HALF_WIDTH,
            research_threshold: DEFAULT_RESEARCH_THRESHOLD,
            seed: None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Board error: {error}")]
    BoardError { error: BoardError },
    #[error("Search error: {error}")]
    SearchError { error: SearchError },
}

/// One actor's decision procedure and the state it keeps between decisions.
pub struct Engine {
    config: EngineConfig,
    context: SearchContext,
    searcher: Box<dyn Searcher>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let context = SearchContext::new(config.search_depth)
            .with_research_threshold(config.research_threshold);
        let searcher = build_searcher(&config);
        Self {
            config,
            context,
            searcher,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.searcher.name()
    }

    pub fn stats(&self) -> &SearchStats {
        self.context.stats()
    }

    /// Picks a non-full column for `acting` to play on `board`.
    pub fn choose_column(&mut self, board: &Board, acting: Actor) -> Result<usize, EngineError> {
        self.decide(board, acting).map(|decision| decision.column)
    }

    /// Like `choose_column`, but also reports the score behind the choice.
    pub fn decide(&mut self, board: &Board, acting: Actor) -> Result<Decision, EngineError> {
        let decision = self
            .searcher
            .search(&mut self.context, board, acting)
            .map_err(|error| EngineError::SearchError { error })?;

        let stats = self.context.stats();
        info!(
            "{} ({}): value {}, column {}, nodes {}, mean {:.1}",
            self.searcher.name(),
            acting,
            decision.score,
            decision.column,
            stats.searched_position_count(),
            stats.mean_position_count()
        );
        Ok(decision)
    }

    /// Starts a new transposition context, e.g. for a new game. `capacity` is
    /// the cell count of the boards that will follow.
    pub fn reinitialize(&mut self, capacity: usize) {
        self.searcher.reinitialize(capacity);
        self.context.reset_stats();
    }
}

fn build_searcher(config: &EngineConfig) -> Box<dyn Searcher> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match config.algorithm {
        Algorithm::Minimax => Box::new(Minimax),
        Algorithm::NegaMax => Box::new(NegaMax),
        Algorithm::NegaScout => Box::new(NegaScout),
        Algorithm::Pvs => Box::new(Pvs),
        Algorithm::Mtdf => Box::new(Mtdf::new(config.table_length, config.max_iterations, rng)),
        Algorithm::Aspiration => Box::new(Aspiration::new(NegaMax, config.aspiration_half_width)),
        Algorithm::Mcts => Box::new(MonteCarlo::new(
            MctsConfig::default()
                .with_iterations(config.iterations)
                .with_exploration(config.exploration),
            rng,
        )),
        Algorithm::Random => Box::new(RandomColumn::new(rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(algorithm: Algorithm) -> EngineConfig {
        EngineConfig {
            algorithm,
            search_depth: 3,
            iterations: 200,
            table_length: 10_007,
            seed: Some(31),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL.iter() {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(*algorithm));
        }
        assert_eq!("NegaScout".parse::<Algorithm>(), Ok(Algorithm::NegaScout));
        assert!("alphabeta".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.algorithm, Algorithm::NegaMax);
        assert_eq!(config.search_depth, 6);
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.max_iterations, 16);
        assert_eq!(config.table_length, 1_000_003);
        assert_eq!(config.aspiration_half_width, 100);
        assert_eq!(config.research_threshold, 2);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_every_algorithm_returns_a_legal_column() {
        let board = Board::default();
        for algorithm in Algorithm::ALL.iter() {
            let mut engine = Engine::with_config(config(*algorithm));
            assert_eq!(engine.algorithm_name(), algorithm.name());

            let column = engine.choose_column(&board, Actor::AI).unwrap();
            assert!(column < board.columns(), "{}", algorithm);
            assert!(!board.is_column_full(column));
        }
    }

    #[test]
    fn test_errors_are_wrapped() {
        let mut engine = Engine::with_config(EngineConfig {
            search_depth: 0,
            ..config(Algorithm::Pvs)
        });
        assert_eq!(
            engine.choose_column(&Board::default(), Actor::AI),
            Err(EngineError::SearchError {
                error: SearchError::DepthTooLow
            })
        );
    }

    #[test]
    fn test_stats_and_reinitialize() {
        let mut engine = Engine::with_config(config(Algorithm::Mtdf));
        let board = Board::default();

        engine.choose_column(&board, Actor::Opponent).unwrap();
        engine.choose_column(&board, Actor::Opponent).unwrap();
        assert_eq!(engine.stats().searches(), 2);
        assert!(engine.stats().mean_position_count() > 0.0);

        engine.reinitialize(Board::new(5, 4).unwrap().capacity());
        assert_eq!(engine.stats().searches(), 0);
        assert!(engine
            .choose_column(&Board::new(5, 4).unwrap(), Actor::Opponent)
            .is_ok());
    }
}
