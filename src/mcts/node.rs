//! MCTS nodes.
//!
//! Nodes live in the `MctsTree` arena and point at each other by `NodeId`.
//! A parent link is only an index, so the tree never owns a cycle.

use std::fmt;

use smallvec::SmallVec;

use crate::board::{Actor, Board, ColumnList};
use crate::evaluate;

/// Index into the `MctsTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct MctsNode {
    pub board: Board,

    /// Actor to move at this node.
    pub to_move: Actor,

    /// Column played to reach this node, `None` for the root.
    pub column: Option<usize>,

    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,

    /// Plies a rollout from this node may still play.
    pub remaining_depth: u8,

    pub visits: u32,

    /// Sum of rollout rewards, from the point of view of the actor who moved
    /// into this node.
    pub total_reward: f64,

    /// Game over or out of depth budget.
    pub is_terminal: bool,

    /// Expanded children keyed by column.
    pub children: SmallVec<[(usize, NodeId); 8]>,
}

impl MctsNode {
    pub fn root(board: Board, to_move: Actor, depth_budget: u8) -> Self {
        Self::new(board, to_move, None, None, depth_budget)
    }

    pub fn child(parent_id: NodeId, parent: &MctsNode, column: usize, board: Board) -> Self {
        Self::new(
            board,
            parent.to_move.opposite(),
            Some(column),
            Some(parent_id),
            parent.remaining_depth.saturating_sub(1),
        )
    }

    fn new(
        board: Board,
        to_move: Actor,
        column: Option<usize>,
        parent: Option<NodeId>,
        remaining_depth: u8,
    ) -> Self {
        let is_terminal = remaining_depth == 0 || evaluate::is_end_of_game(&board);
        Self {
            board,
            to_move,
            column,
            parent,
            remaining_depth,
            visits: 0,
            total_reward: 0.0,
            is_terminal,
            children: SmallVec::new(),
        }
    }

    /// The actor whose disc produced this node.
    #[inline]
    pub fn mover(&self) -> Actor {
        self.to_move.opposite()
    }

    #[must_use]
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }

    pub fn child_at(&self, column: usize) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(child_column, _)| *child_column == column)
            .map(|(_, id)| *id)
    }

    /// Legal columns that have no child yet.
    pub fn untried_columns(&self) -> ColumnList {
        self.board
            .legal_columns()
            .into_iter()
            .filter(|column| self.child_at(*column).is_none())
            .collect()
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_columns().is_empty()
    }

    /// UCB1 value of this node as seen from its parent. Unvisited nodes are
    /// always tried first.
    pub fn ucb1(&self, parent_visits: u32, exploration_constant: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        let exploration = (2.0 * (parent_visits.max(1) as f64).ln() / visits).sqrt();
        self.mean_reward() + exploration_constant * exploration
    }
}
