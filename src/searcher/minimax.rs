use super::{
    search_root, Decision, SearchContext, SearchError, SearchNode, SearchResult, Searcher,
    NEG_INFINITY,
};
use crate::board::{Actor, Board};

/// Exhaustive depth-limited negamax. Visits every node, so it is only useful
/// at small depths and as the baseline other searches must agree with.
#[derive(Clone, Copy, Debug, Default)]
pub struct Minimax;

impl Minimax {
    fn negamax(&self, context: &mut SearchContext, node: &SearchNode) -> SearchResult {
        context.increment_position_count();
        if let Some(leaf) = context.leaf(node) {
            return leaf;
        }

        let mut best = SearchResult::new(NEG_INFINITY, None);
        for child in node.children(&()) {
            let score = -self.negamax(context, &child).score;
            if score > best.score {
                best = SearchResult::new(score, child.column());
            }
        }
        best
    }
}

impl Searcher for Minimax {
    fn name(&self) -> &'static str {
        "minimax"
    }

    fn search(
        &mut self,
        context: &mut SearchContext,
        board: &Board,
        to_move: Actor,
    ) -> Result<Decision, SearchError> {
        let root = SearchNode::root(board.clone(), to_move);
        search_root(context, &root, |context, root| self.negamax(context, root))
    }
}
