//! Search tree nodes.
//!
//! A node is a board, the actor to move and the column that produced it.
//! Algorithm-specific data rides along as a payload that is advanced on
//! every placement, so hashed and plain searches share one move generator.

use std::fmt::Debug;

use crate::board::zobrist::{BoardHash, ZobristTable};
use crate::board::{Actor, Board};
use crate::evaluate;

/// Extra per-node data derived from the parent's payload and the disc that
/// was just placed.
pub trait NodePayload: Clone + Debug {
    /// Shared, immutable data needed to advance the payload.
    type Keys: ?Sized;

    fn advance(&self, keys: &Self::Keys, position: usize, actor: Actor) -> Self;
}

impl NodePayload for () {
    type Keys = ();

    #[inline(always)]
    fn advance(&self, _keys: &(), _position: usize, _actor: Actor) {}
}

impl NodePayload for BoardHash {
    type Keys = ZobristTable;

    #[inline]
    fn advance(&self, keys: &ZobristTable, position: usize, actor: Actor) -> Self {
        self.toggle(keys, position, actor).pass_turn(keys, actor)
    }
}

#[derive(Clone, Debug)]
pub struct SearchNode<P = ()> {
    board: Board,
    to_move: Actor,
    column: Option<usize>,
    ply: u8,
    payload: P,
}

impl SearchNode<()> {
    pub fn root(board: Board, to_move: Actor) -> Self {
        Self::with_payload(board, to_move, ())
    }
}

impl SearchNode<BoardHash> {
    /// Hashes the root board once; descendants only xor in their new disc
    /// and the change of turn.
    pub fn hashed_root(board: Board, to_move: Actor, keys: &ZobristTable) -> Self {
        let hash = keys.position_hash(&board, to_move);
        Self::with_payload(board, to_move, hash)
    }

    #[inline]
    pub fn hash(&self) -> BoardHash {
        self.payload
    }
}

impl<P: NodePayload> SearchNode<P> {
    pub fn with_payload(board: Board, to_move: Actor, payload: P) -> Self {
        Self {
            board,
            to_move,
            column: None,
            ply: 0,
            payload,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Actor {
        self.to_move
    }

    /// Column played to reach this node, `None` at the root.
    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn ply(&self) -> u8 {
        self.ply
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// The actor to move at the root of the tree this node belongs to.
    pub fn root_actor(&self) -> Actor {
        if self.ply % 2 == 0 {
            self.to_move
        } else {
            self.to_move.opposite()
        }
    }

    pub fn is_end_of_game(&self) -> bool {
        evaluate::is_end_of_game(&self.board)
    }

    /// Successor nodes, left to right. Full columns are skipped.
    pub fn children<'a>(&'a self, keys: &'a P::Keys) -> impl Iterator<Item = SearchNode<P>> + 'a
    where
        P: 'a,
    {
        let mover = self.to_move;
        (0..self.board.columns()).filter_map(move |column| {
            let (board, position) = self.board.drop_disc(column, mover).ok()?;
            Some(SearchNode {
                board,
                to_move: mover.opposite(),
                column: Some(column),
                ply: self.ply.saturating_add(1),
                payload: self.payload.advance(keys, position, mover),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_children_skip_full_columns() {
        let board = board_position! {
            A.../
            O.../
            A.../
            O...
        };
        let root = SearchNode::root(board, Actor::AI);
        let columns: Vec<_> = root.children(&()).map(|child| child.column()).collect();
        assert_eq!(columns, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_children_alternate_turns() {
        let root = SearchNode::root(Board::new(4, 4).unwrap(), Actor::Opponent);
        for child in root.children(&()) {
            assert_eq!(child.to_move(), Actor::AI);
            assert_eq!(child.ply(), 1);
            assert_eq!(child.root_actor(), Actor::Opponent);
            assert_eq!(child.board().discs_placed_by(Actor::Opponent), 1);
            for grandchild in child.children(&()) {
                assert_eq!(grandchild.to_move(), Actor::Opponent);
                assert_eq!(grandchild.root_actor(), Actor::Opponent);
            }
        }
    }

    #[test]
    fn test_children_leave_the_parent_untouched() {
        let root = SearchNode::root(Board::new(4, 4).unwrap(), Actor::AI);
        let count = root.children(&()).count();
        assert_eq!(count, 4);
        assert_eq!(root.board().discs_placed(), 0);
    }

    #[test]
    fn test_hashed_children_track_full_hash() {
        let keys = ZobristTable::new(16, &mut StdRng::seed_from_u64(3));
        let root = SearchNode::hashed_root(Board::new(4, 4).unwrap(), Actor::AI, &keys);

        for child in root.children(&keys) {
            assert_eq!(
                child.hash(),
                keys.position_hash(child.board(), child.to_move())
            );
            for grandchild in child.children(&keys) {
                assert_eq!(
                    grandchild.hash(),
                    keys.position_hash(grandchild.board(), grandchild.to_move())
                );
            }
        }
    }
}
