//! Adversarial search over connection-game positions.
//!
//! # Score convention
//!
//! Every algorithm scores a node from the point of view of the actor to move
//! there (negamax form). Leaves are scored by `evaluate::leaf_score`, which
//! is the only place that deals with perspective and depth scaling, so all
//! algorithms below agree on the value of a position.
//!
//! # Algorithms
//!
//! - `Minimax`: exhaustive negamax, no pruning. The reference the others are
//!   tested against.
//! - `NegaMax`: fail-soft negamax with alpha-beta pruning.
//! - `NegaScout`: null-window probes after the first child, with a full
//!   re-search when a probe fails high on a deep enough subtree.
//! - `Pvs`: principal variation search, fail-hard.
//! - `Mtdf`: memory-enhanced test driver. Repeated null-window searches
//!   against a transposition table keyed by incrementally updated Zobrist
//!   hashes.
//! - `Aspiration`: wraps a windowed search and narrows the root window
//!   around the previous decision's score.
//! - `RandomColumn`: uniform choice among the non-full columns.
//!
//! Search is single-threaded and bounded by depth only. State that outlives
//! a call (transposition table, aspiration center, MTD(f) guess) is owned by
//! the searcher value, one per actor.

pub mod aspiration;
pub mod minimax;
pub mod mtdf;
pub mod negamax;
pub mod negascout;
pub mod node;
pub mod pvs;
pub mod random;
pub mod transposition_table;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::{Actor, Board};
use crate::evaluate::{self, leaf_score};

pub use aspiration::Aspiration;
pub use minimax::Minimax;
pub use mtdf::Mtdf;
pub use negamax::NegaMax;
pub use negascout::NegaScout;
pub use node::{NodePayload, SearchNode};
pub use pvs::Pvs;
pub use random::RandomColumn;
pub use transposition_table::{TranspositionRecord, TranspositionTable};

/// Window bounds. Kept symmetric so negating a bound never overflows.
pub const INFINITY: i32 = i32::MAX;
pub const NEG_INFINITY: i32 = -INFINITY;

pub const DEFAULT_RESEARCH_THRESHOLD: u8 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("invalid state: the position has no available columns or is already decided")]
    InvalidState,
    #[error("board has {board} cells but the zobrist table was built for {table}")]
    DimensionMismatch { board: usize, table: usize },
    #[error("board is {board:?} (columns, rows) but the zobrist keys are bound to {table:?}")]
    ShapeMismatch {
        board: (usize, usize),
        table: (usize, usize),
    },
}

/// Backed-up value of a node and the column that produced it. `column` is
/// `None` for leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub column: Option<usize>,
}

impl SearchResult {
    pub fn new(score: i32, column: Option<usize>) -> Self {
        Self { score, column }
    }

    pub fn leaf(score: i32) -> Self {
        Self {
            score,
            column: None,
        }
    }
}

/// Outcome of a root search: always names a playable column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub score: i32,
    pub column: usize,
}

/// Statistics collected during search.
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    position_count: usize,
    cutoff_count: usize,
    searches: usize,
    total_positions: usize,
    last_score: Option<i32>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn begin(&mut self) {
        self.position_count = 0;
        self.cutoff_count = 0;
    }

    fn record_result(&mut self, score: i32, duration: Duration) {
        self.searches += 1;
        self.total_positions += self.position_count;
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }

    pub fn searched_position_count(&self) -> usize {
        self.position_count
    }

    pub fn cutoff_count(&self) -> usize {
        self.cutoff_count
    }

    pub fn searches(&self) -> usize {
        self.searches
    }

    /// Mean positions searched per decision over the searcher's lifetime.
    pub fn mean_position_count(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.total_positions as f64 / self.searches as f64
        }
    }

    pub fn last_score(&self) -> Option<i32> {
        self.last_score
    }

    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }
}

/// Per-actor search parameters and counters, passed by reference into every
/// search call.
#[derive(Clone, Debug)]
pub struct SearchContext {
    depth: u8,
    research_threshold: u8,
    stats: SearchStats,
}

impl SearchContext {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            research_threshold: DEFAULT_RESEARCH_THRESHOLD,
            stats: SearchStats::default(),
        }
    }

    pub fn with_research_threshold(mut self, research_threshold: u8) -> Self {
        self.research_threshold = research_threshold;
        self
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn research_threshold(&self) -> u8 {
        self.research_threshold
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    #[inline]
    pub fn remaining_depth<P: NodePayload>(&self, node: &SearchNode<P>) -> u8 {
        self.depth.saturating_sub(node.ply())
    }

    /// Rejects searches that cannot produce a column.
    pub fn validate(&self, board: &Board) -> Result<(), SearchError> {
        if self.depth < 1 {
            return Err(SearchError::DepthTooLow);
        }
        if !board.has_legal_column() || evaluate::is_end_of_game(board) {
            return Err(SearchError::InvalidState);
        }
        Ok(())
    }

    /// Scores `node` if the search stops there: out of depth or game over.
    #[inline]
    pub fn leaf<P: NodePayload>(&self, node: &SearchNode<P>) -> Option<SearchResult> {
        if self.remaining_depth(node) == 0 || node.is_end_of_game() {
            Some(SearchResult::leaf(leaf_score(node, self.depth)))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn increment_position_count(&mut self) {
        self.stats.position_count += 1;
    }

    #[inline]
    fn increment_cutoff_count(&mut self) {
        self.stats.cutoff_count += 1;
    }

    pub(crate) fn begin_search(&mut self) -> Instant {
        self.stats.begin();
        Instant::now()
    }

    pub(crate) fn finish_search(&mut self, score: i32, start: Instant) {
        self.stats.record_result(score, start.elapsed());
    }
}

/// A decision procedure: board in, playable column out.
pub trait Searcher {
    fn name(&self) -> &'static str;

    fn search(
        &mut self,
        context: &mut SearchContext,
        board: &Board,
        to_move: Actor,
    ) -> Result<Decision, SearchError>;

    /// Drops any state tied to the previous game. `capacity` is the number
    /// of cells on the boards that will be searched next.
    fn reinitialize(&mut self, _capacity: usize) {}
}

/// A search that can be run with an arbitrary `(alpha, beta)` window.
pub trait WindowedSearch {
    fn search_window(
        &self,
        context: &mut SearchContext,
        node: &SearchNode,
        alpha: i32,
        beta: i32,
    ) -> SearchResult;
}

/// Validates the root, runs `search` on it and turns the result into a
/// decision.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub(crate) fn search_root<P, F>(
    context: &mut SearchContext,
    root: &SearchNode<P>,
    search: F,
) -> Result<Decision, SearchError>
where
    P: NodePayload,
    F: FnOnce(&mut SearchContext, &SearchNode<P>) -> SearchResult,
{
    context.validate(root.board())?;
    debug!("search depth: {}, to move: {}", context.depth(), root.to_move());

    let start = context.begin_search();
    let result = search(context, root);
    context.finish_search(result.score, start);

    let column = result.column.ok_or(SearchError::InvalidState)?;
    Ok(Decision {
        score: result.score,
        column,
    })
}

/// Full-window root search for any windowed algorithm.
pub(crate) fn search_full_window<S: WindowedSearch>(
    searcher: &S,
    context: &mut SearchContext,
    board: &Board,
    to_move: Actor,
) -> Result<Decision, SearchError> {
    let root = SearchNode::root(board.clone(), to_move);
    search_root(context, &root, |context, root| {
        searcher.search_window(context, root, NEG_INFINITY, INFINITY)
    })
}
