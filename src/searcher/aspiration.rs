use log::debug;

use super::{
    search_root, Decision, NegaMax, SearchContext, SearchError, SearchNode, SearchResult, Searcher,
    WindowedSearch, INFINITY, NEG_INFINITY,
};
use crate::board::{Actor, Board};

pub const DEFAULT_HALF_WIDTH: i32 = 100;

/// Aspiration windows around a windowed search.
///
/// The first decision is searched with the full window. Each later decision
/// starts from `previous ± half_width`; if the result falls on or outside
/// the window the failing side is opened to infinity and the root is
/// searched again, so at most two re-searches happen per decision.
#[derive(Clone, Debug)]
pub struct Aspiration<S = NegaMax> {
    inner: S,
    half_width: i32,
    previous_score: Option<i32>,
}

impl Default for Aspiration<NegaMax> {
    fn default() -> Self {
        Self::new(NegaMax, DEFAULT_HALF_WIDTH)
    }
}

impl<S: WindowedSearch> Aspiration<S> {
    pub fn new(inner: S, half_width: i32) -> Self {
        Self {
            inner,
            half_width: half_width.max(1),
            previous_score: None,
        }
    }

    pub fn half_width(&self) -> i32 {
        self.half_width
    }

    /// Center of the next window, `None` before the first decision.
    pub fn previous_score(&self) -> Option<i32> {
        self.previous_score
    }

    fn search_node(&mut self, context: &mut SearchContext, root: &SearchNode) -> SearchResult {
        let result = match self.previous_score {
            None => self
                .inner
                .search_window(context, root, NEG_INFINITY, INFINITY),
            Some(previous) => {
                let mut alpha = previous.saturating_sub(self.half_width).max(NEG_INFINITY);
                let mut beta = previous.saturating_add(self.half_width);
                loop {
                    let result = self.inner.search_window(context, root, alpha, beta);
                    if result.score <= alpha && alpha > NEG_INFINITY {
                        debug!("aspiration fail low at {}, re-searching", result.score);
                        alpha = NEG_INFINITY;
                    } else if result.score >= beta && beta < INFINITY {
                        debug!("aspiration fail high at {}, re-searching", result.score);
                        beta = INFINITY;
                    } else {
                        break result;
                    }
                }
            }
        };
        self.previous_score = Some(result.score);
        result
    }
}

impl<S: WindowedSearch> Searcher for Aspiration<S> {
    fn name(&self) -> &'static str {
        "aspiration"
    }

    fn search(
        &mut self,
        context: &mut SearchContext,
        board: &Board,
        to_move: Actor,
    ) -> Result<Decision, SearchError> {
        let root = SearchNode::root(board.clone(), to_move);
        search_root(context, &root, |context, root| self.search_node(context, root))
    }

    fn reinitialize(&mut self, _capacity: usize) {
        self.previous_score = None;
    }
}
