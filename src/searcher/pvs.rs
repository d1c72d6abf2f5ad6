use super::{
    search_full_window, Decision, SearchContext, SearchError, SearchNode, SearchResult, Searcher,
    WindowedSearch,
};
use crate::board::{Actor, Board};

/// Principal variation search, fail-hard.
///
/// The first child is assumed best and searched with the full window. Every
/// later child is first tested with a null window around alpha and only
/// searched properly if the test says it beats alpha. Scores are clamped to
/// `[alpha, beta]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pvs;

impl WindowedSearch for Pvs {
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

        let mut best_column = None;
        for (index, child) in node.children(&()).enumerate() {
            let score = if index == 0 {
                -self.search_window(context, &child, -beta, -alpha).score
            } else {
                let probe = -self
                    .search_window(context, &child, -alpha - 1, -alpha)
                    .score;
                if probe > alpha && probe < beta {
                    -self.search_window(context, &child, -beta, -probe).score
                } else {
                    probe
                }
            };

            if score >= beta {
                context.increment_cutoff_count();
                return SearchResult::new(beta, child.column());
            }
            if score > alpha || best_column.is_none() {
                alpha = alpha.max(score);
                best_column = child.column();
            }
        }
        SearchResult::new(alpha, best_column)
    }
}

impl Searcher for Pvs {
    fn name(&self) -> &'static str {
        "pvs"
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
