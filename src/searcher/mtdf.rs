//! MTD(f): minimax by repeated null-window tests.
//!
//! Each test asks "is the value of the root greater than `bound`?" and comes
//! back with a bound on the true value. The driver keeps the tightest lower
//! and upper bounds seen so far and re-centers the next test on the latest
//! result until the bounds meet. A transposition table keyed by Zobrist
//! hashes keeps the repeated tests cheap.

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::transposition_table::{Probe, TranspositionRecord, DEFAULT_TABLE_LENGTH};
use super::{
    search_root, Decision, SearchContext, SearchError, SearchNode, SearchResult, Searcher,
    TranspositionTable, INFINITY, NEG_INFINITY,
};
use crate::board::zobrist::{BoardHash, ZobristTable};
use crate::board::{Actor, Board};

pub const DEFAULT_MAX_ITERATIONS: u32 = 16;

#[derive(Debug)]
pub struct Mtdf {
    table_length: usize,
    max_iterations: u32,
    keys: Option<ZobristTable>,
    /// `(columns, rows)` of the boards the keys are bound to. Unset after
    /// `reinitialize` until the next search.
    shape: Option<(usize, usize)>,
    table: TranspositionTable,
    guess: i32,
    rng: StdRng,
}

impl Default for Mtdf {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_LENGTH, DEFAULT_MAX_ITERATIONS, StdRng::from_entropy())
    }
}

impl Mtdf {
    pub fn new(table_length: usize, max_iterations: u32, rng: StdRng) -> Self {
        Self {
            table_length,
            max_iterations: max_iterations.max(1),
            keys: None,
            shape: None,
            table: TranspositionTable::new(table_length),
            guess: 0,
            rng,
        }
    }

    pub fn seeded(table_length: usize, max_iterations: u32, seed: u64) -> Self {
        Self::new(table_length, max_iterations, StdRng::seed_from_u64(seed))
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.table
    }

    /// First guess of the next search: the value found by the previous one.
    pub fn guess(&self) -> i32 {
        self.guess
    }

    pub fn keys(&self) -> Option<&ZobristTable> {
        self.keys.as_ref()
    }

    /// Keys are generated on first use so the table matches the first board
    /// searched. Later boards must have the same columns and rows.
    fn ensure_keys(&mut self, board: &Board) -> Result<(), SearchError> {
        let capacity = board.capacity();
        let shape = (board.columns(), board.rows());

        let rng = &mut self.rng;
        let keys = self
            .keys
            .get_or_insert_with(|| ZobristTable::new(capacity, rng));
        if keys.positions() != capacity {
            return Err(SearchError::DimensionMismatch {
                board: capacity,
                table: keys.positions(),
            });
        }

        match self.shape {
            Some(table) if table != shape => Err(SearchError::ShapeMismatch {
                board: shape,
                table,
            }),
            Some(_) => Ok(()),
            None => {
                self.shape = Some(shape);
                Ok(())
            }
        }
    }
}

impl Searcher for Mtdf {
    fn name(&self) -> &'static str {
        "mtdf"
    }

    fn search(
        &mut self,
        context: &mut SearchContext,
        board: &Board,
        to_move: Actor,
    ) -> Result<Decision, SearchError> {
        context.validate(board)?;
        self.ensure_keys(board)?;

        let Mtdf {
            keys,
            table,
            guess,
            max_iterations,
            ..
        } = self;
        let keys = keys.as_ref().ok_or(SearchError::InvalidState)?;
        let root = SearchNode::hashed_root(board.clone(), to_move, keys);

        let decision = search_root(context, &root, |context, root| {
            drive(context, table, keys, root, *guess, *max_iterations)
        })?;

        debug!(
            "mtdf tt: size {}, hits {}, saved {}, overwrites {}, collisions {}",
            table.size(),
            table.hits(),
            table.saved(),
            table.overwrites(),
            table.collisions()
        );
        *guess = decision.score;
        Ok(decision)
    }

    fn reinitialize(&mut self, capacity: usize) {
        self.keys = Some(ZobristTable::new(capacity, &mut self.rng));
        self.shape = None;
        self.table = TranspositionTable::new(self.table_length);
        self.guess = 0;
    }
}

/// Narrows `[lower, upper]` around the root value, starting from `first_guess`.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
fn drive(
    context: &mut SearchContext,
    table: &mut TranspositionTable,
    keys: &ZobristTable,
    root: &SearchNode<BoardHash>,
    first_guess: i32,
    max_iterations: u32,
) -> SearchResult {
    let mut lower = NEG_INFINITY;
    let mut upper = INFINITY;
    let mut guess = first_guess;
    let mut proven: Option<SearchResult> = None;
    let mut last = SearchResult::new(first_guess, None);

    for iteration in 0..max_iterations {
        let gamma = guess.max(lower.saturating_add(1));
        last = test(context, table, keys, root, gamma - 1);
        guess = last.score;

        if guess < gamma {
            upper = guess;
        } else {
            lower = guess;
            proven = Some(last);
        }
        debug!(
            "mtdf iteration {}: gamma {}, result {}, bounds [{}, {}]",
            iteration, gamma, guess, lower, upper
        );

        if lower >= upper {
            break;
        }
    }

    // A fail-high test proves its column reaches the value; prefer it.
    let column = proven
        .filter(|result| result.score == guess)
        .and_then(|result| result.column)
        .or(last.column)
        .or_else(|| proven.and_then(|result| result.column));
    SearchResult::new(guess, column)
}

/// Fail-soft null-window search around `bound`: the result is greater than
/// `bound` exactly when the true value is, and is a bound on it otherwise.
fn test(
    context: &mut SearchContext,
    table: &mut TranspositionTable,
    keys: &ZobristTable,
    node: &SearchNode<BoardHash>,
    bound: i32,
) -> SearchResult {
    let remaining = context.remaining_depth(node);
    let hash = node.hash();

    let mut record = match table.probe(hash, remaining) {
        Probe::Hit(record) => {
            if record.min_score > bound {
                return SearchResult::new(record.min_score, record.best_move);
            }
            if record.max_score <= bound {
                return SearchResult::new(record.max_score, record.best_move);
            }
            record
        }
        Probe::OtherDepth(_) | Probe::Miss => TranspositionRecord::new(hash, remaining),
    };

    context.increment_position_count();
    if let Some(leaf) = context.leaf(node) {
        record.min_score = leaf.score;
        record.max_score = leaf.score;
        table.save(record);
        return leaf;
    }

    let mut best = SearchResult::new(NEG_INFINITY, None);
    for child in node.children(keys) {
        let score = -test(context, table, keys, &child, -bound - 1).score;
        if score > best.score {
            best = SearchResult::new(score, child.column());
        }
        if best.score > bound {
            context.increment_cutoff_count();
            break;
        }
    }

    if best.score > bound {
        record.min_score = best.score;
    } else {
        record.max_score = best.score;
    }
    if best.score > bound || record.best_move.is_none() {
        record.best_move = best.column;
    }
    table.save(record);
    best
}
