use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{Decision, SearchContext, SearchError, Searcher};
use crate::board::{Actor, Board};

/// Plays a uniformly random non-full column. Depth is validated like any
/// other searcher but otherwise ignored.
#[derive(Clone, Debug)]
pub struct RandomColumn {
    rng: StdRng,
}

impl RandomColumn {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Searcher for RandomColumn {
    fn name(&self) -> &'static str {
        "random"
    }

    fn search(
        &mut self,
        context: &mut SearchContext,
        board: &Board,
        _to_move: Actor,
    ) -> Result<Decision, SearchError> {
        context.validate(board)?;
        let start = context.begin_search();
        let column = *board
            .legal_columns()
            .choose(&mut self.rng)
            .ok_or(SearchError::InvalidState)?;
        context.increment_position_count();
        context.finish_search(0, start);

        Ok(Decision { score: 0, column })
    }
}
