use super::{
    search_full_window, Decision, SearchContext, SearchError, SearchNode, SearchResult, Searcher,
    WindowedSearch, NEG_INFINITY,
};
use crate::board::{Actor, Board};

/// Negamax with alpha-beta pruning.
///
/// Fail-soft: the returned score may fall outside `(alpha, beta)`, in which
/// case it is a bound on the true value rather than the value itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NegaMax;

impl WindowedSearch for NegaMax {
    fn search_window(
        &self,
        context: &mut SearchContext,
        node: &SearchNode,
        mut alpha: i32,
        beta: i32,
    ) -> SearchResult {
        context.increment_position_count();
        if let Some(leaf) = context.leaf(node) {
            return leaf;
        }

        let mut best = SearchResult::new(NEG_INFINITY, None);
        for child in node.children(&()) {
            let score = -self.search_window(context, &child, -beta, -alpha).score;
            if score > best.score {
                best = SearchResult::new(score, child.column());
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                context.increment_cutoff_count();
                break;
            }
        }
        best
    }
}

impl Searcher for NegaMax {
    fn name(&self) -> &'static str {
        "negamax"
    }

    fn search(
        &mut self,
        context: &mut SearchContext,
        board: &Board,
        to_move: Actor,
    ) -> Result<Decision, SearchError> {
        search_full_window(self, context, board, to_move)
    }
}
