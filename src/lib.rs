pub mod board;
pub mod engine;
pub mod evaluate;
pub mod mcts;
pub mod searcher;
