use super::{
    search_full_window, Decision, SearchContext, SearchError, SearchNode, SearchResult, Searcher,
    WindowedSearch, NEG_INFINITY,
};
use crate::board::{Actor, Board};

/// NegaScout: the first child gets the full window, later children a null
/// window `(-alpha - 1, -alpha)`. A probe that lands strictly inside the
/// window is only a lower bound, so the child is searched again with
/// `(-beta, -probe)`.
///
/// Children with fewer than `research_threshold` plies left are not
/// re-searched. The threshold is capped at `EXACT_PROBE_PLIES + 1`: with one
/// ply or less below a child every leaf is scored exactly and the probe
/// already returns the true value, while deeper probes are only bounds.
#[derive(Clone, Copy, Debug, Default)]
pub struct NegaScout;

/// Deepest child whose fail-soft null-window probe is exact.
pub const EXACT_PROBE_PLIES: u8 = 1;

fn needs_research(context: &SearchContext, child: &SearchNode) -> bool {
    let threshold = context.research_threshold().min(EXACT_PROBE_PLIES + 1);
    context.remaining_depth(child) >= threshold
}

impl WindowedSearch for NegaScout {
    fn search_window(
        &self,
        context: &mut SearchContext,
        node: &SearchNode,
        alpha: i32,
        beta: i32,
    ) -> SearchResult {
        context.increment_position_count();
        if let Some(leaf) = context.leaf(node) {
            return leaf;
        }

        let mut best = SearchResult::new(NEG_INFINITY, None);
        let mut adaptive_beta = beta;

        for (index, child) in node.children(&()).enumerate() {
            let probe = -self
                .search_window(context, &child, -adaptive_beta, -alpha.max(best.score))
                .score;

            let score = if index > 0
                && probe > best.score
                && probe > alpha
                && probe < beta
                && needs_research(context, &child)
            {
                -self.search_window(context, &child, -beta, -probe).score
            } else {
                probe
            };

            if score > best.score {
                best = SearchResult::new(score, child.column());
            }
            if best.score >= beta {
                context.increment_cutoff_count();
                return best;
            }

            adaptive_beta = alpha.max(best.score).saturating_add(1);
        }
        best
    }
}

impl Searcher for NegaScout {
    fn name(&self) -> &'static str {
        "negascout"
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
