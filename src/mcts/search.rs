//! MCTS search driver.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::config::MctsConfig;
use super::node::{MctsNode, NodeId};
use super::tree::MctsTree;
use crate::board::{Actor, Board};
use crate::evaluate::{self, WIN_SCORE};
use crate::searcher::{Decision, SearchContext, SearchError, Searcher};

pub struct MonteCarlo {
    config: MctsConfig,
    rng: StdRng,
}

impl MonteCarlo {
    pub fn new(config: MctsConfig, rng: StdRng) -> Self {
        Self { config, rng }
    }

    pub fn seeded(config: MctsConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Runs the configured number of iterations from `board` and returns the
    /// resulting tree. The rollout depth budget is the context depth, capped
    /// by the number of empty cells.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn build_tree(
        &mut self,
        context: &mut SearchContext,
        board: &Board,
        to_move: Actor,
    ) -> Result<MctsTree, SearchError> {
        context.validate(board)?;

        let empty_cells = board.capacity() - board.discs_placed();
        let budget = (context.depth() as usize).min(empty_cells) as u8;
        let mut tree = MctsTree::new(MctsNode::root(board.clone(), to_move, budget));
        context.increment_position_count();

        for _ in 0..self.config.iterations.max(1) {
            self.iteration(context, &mut tree, to_move)?;
        }
        Ok(tree)
    }

    fn iteration(
        &mut self,
        context: &mut SearchContext,
        tree: &mut MctsTree,
        root_actor: Actor,
    ) -> Result<(), SearchError> {
        let selected = self.select(tree)?;
        let leaf = if tree.get(selected).is_terminal {
            selected
        } else {
            context.increment_position_count();
            self.expand(tree, selected)?
        };
        let reward = self.rollout(tree.get(leaf), root_actor);
        backpropagate(tree, leaf, reward, root_actor);
        Ok(())
    }

    /// Descends by UCB1 until a terminal node or one with untried columns.
    fn select(&self, tree: &MctsTree) -> Result<NodeId, SearchError> {
        let mut current = tree.root();
        loop {
            let node = tree.get(current);
            if node.is_terminal || !node.is_fully_expanded() {
                return Ok(current);
            }
            current = tree
                .best_ucb1_child(current, self.config.exploration_constant)
                .ok_or(SearchError::InvalidState)?;
        }
    }

    fn expand(&mut self, tree: &mut MctsTree, id: NodeId) -> Result<NodeId, SearchError> {
        let parent = tree.get(id);
        let column = *parent
            .untried_columns()
            .choose(&mut self.rng)
            .ok_or(SearchError::InvalidState)?;
        let (board, _) = parent
            .board
            .drop_disc(column, parent.to_move)
            .map_err(|_| SearchError::InvalidState)?;
        let child = MctsNode::child(id, parent, column, board);
        Ok(tree.alloc(child))
    }

    /// Random playout from `node`. The reward is the final board's score for
    /// `root_actor`, scaled to `[-1, 1]`.
    fn rollout(&mut self, node: &MctsNode, root_actor: Actor) -> f64 {
        let mut board = node.board.clone();
        let mut to_move = node.to_move;
        let mut remaining = node.remaining_depth;

        while remaining > 0 && !evaluate::is_end_of_game(&board) {
            let column = match board.legal_columns().choose(&mut self.rng) {
                Some(column) => *column,
                None => break,
            };
            board = match board.drop_disc(column, to_move) {
                Ok((next, _)) => next,
                Err(_) => break,
            };
            to_move = to_move.opposite();
            remaining -= 1;
        }

        let score = evaluate::score(&board, root_actor) as f64 / WIN_SCORE as f64;
        score.clamp(-1.0, 1.0)
    }
}

/// Adds `reward` (root actor's view) to every node from `leaf` to the root,
/// flipped for nodes entered by the other actor.
fn backpropagate(tree: &mut MctsTree, leaf: NodeId, reward: f64, root_actor: Actor) {
    let mut current = Some(leaf);
    while let Some(id) = current {
        let node = tree.get_mut(id);
        node.visits += 1;
        node.total_reward += if node.mover() == root_actor {
            reward
        } else {
            -reward
        };
        current = node.parent;
    }
}

impl Searcher for MonteCarlo {
    fn name(&self) -> &'static str {
        "mcts"
    }

    /// The reported score is the chosen child's mean reward in percent.
    fn search(
        &mut self,
        context: &mut SearchContext,
        board: &Board,
        to_move: Actor,
    ) -> Result<Decision, SearchError> {
        context.validate(board)?;
        let start = context.begin_search();
        let tree = self.build_tree(context, board, to_move)?;

        let best = tree
            .most_visited_child(tree.root())
            .map(|id| tree.get(id))
            .ok_or(SearchError::InvalidState)?;
        let column = best.column.ok_or(SearchError::InvalidState)?;
        let score = (best.mean_reward() * 100.0).round() as i32;

        debug!(
            "mcts: {} nodes, column {} visited {} times, mean reward {:.3}",
            tree.len(),
            column,
            best.visits,
            best.mean_reward()
        );
        context.finish_search(score, start);
        Ok(Decision { score, column })
    }
}
