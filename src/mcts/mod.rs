//! Monte Carlo tree search.
//!
//! Builds a fresh tree per decision. Each iteration descends by UCB1 through
//! fully expanded nodes, expands one random untried column, plays random
//! moves to the end of the game or the depth budget, and backs the rollout's
//! reward up the path. The most visited root child is played.

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use search::MonteCarlo;
pub use tree::MctsTree;
