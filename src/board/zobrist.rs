use super::{Actor, Board, Cell};
use rand::Rng;
use std::fmt;

// Zobrist board hashing
// * One number for each actor at each cell ( capacity * 2 )
// * One number for each actor to move ( 2 )
//
// To get the zobrist hash for any position:
// [Hash for AI disc on cell 0] xor [Hash for Opponent disc on cell 5] xor ... ( all placed discs )
//
// Placing a disc xors one cell number and swaps the to-move number, so
// search never has to rehash a full board.

/// 32-bit position fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct BoardHash(u32);

impl BoardHash {
    pub const EMPTY: BoardHash = BoardHash(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Hash of the position after `actor` places a disc on `position`.
    #[inline]
    pub fn toggle(self, keys: &ZobristTable, position: usize, actor: Actor) -> Self {
        Self(self.0 ^ keys.key(position, actor))
    }

    /// Hash of the same discs with the turn passed from `actor` to the other.
    #[inline]
    pub fn pass_turn(self, keys: &ZobristTable, actor: Actor) -> Self {
        Self(self.0 ^ keys.turn_key(actor) ^ keys.turn_key(actor.opposite()))
    }
}

impl fmt::Display for BoardHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Immutable matrix of random keys, one per (cell, actor) pair, plus one
/// key per actor to move. Generated once per transposition context and
/// shared by every node of a search.
#[derive(Clone, Debug)]
pub struct ZobristTable {
    keys: Vec<[u32; 2]>,
    turn_keys: [u32; 2],
}

impl ZobristTable {
    pub fn new<R: Rng + ?Sized>(positions: usize, rng: &mut R) -> Self {
        Self {
            keys: (0..positions).map(|_| [rng.gen(), rng.gen()]).collect(),
            turn_keys: [rng.gen(), rng.gen()],
        }
    }

    /// Number of board cells this table has keys for.
    pub fn positions(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn key(&self, position: usize, actor: Actor) -> u32 {
        self.keys[position][actor.index()]
    }

    #[inline]
    pub fn turn_key(&self, actor: Actor) -> u32 {
        self.turn_keys[actor.index()]
    }

    /// Hash of the discs and the actor to move. Only used to seed the root
    /// of a search.
    pub fn position_hash(&self, board: &Board, to_move: Actor) -> BoardHash {
        BoardHash(self.hash(board).0 ^ self.turn_key(to_move))
    }

    /// Full pass over the discs on the board.
    pub fn hash(&self, board: &Board) -> BoardHash {
        let mut hash = BoardHash::EMPTY;
        for position in 0..board.capacity() {
            if let Some(Cell::Disc(actor)) = board.get(position) {
                hash = hash.toggle(self, position, actor);
            }
        }
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn table(positions: usize) -> ZobristTable {
        ZobristTable::new(positions, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_all_keys_distinct() {
        let zob = table(42);
        let mut seen = HashSet::new();

        for position in 0..zob.positions() {
            for actor in Actor::ALL.iter() {
                let key = zob.key(position, *actor);
                assert!(
                    seen.insert(key),
                    "zobrist key for position {} ({}) is repeated",
                    position,
                    actor
                );
            }
        }
    }

    #[test]
    fn test_empty_board_hashes_to_zero() {
        let zob = table(42);
        assert_eq!(zob.hash(&Board::default()), BoardHash::EMPTY);
    }

    #[test]
    fn test_incremental_hash_matches_full_pass() {
        let zob = table(16);
        let mut board = Board::new(4, 4).unwrap();
        let mut incremental = BoardHash::EMPTY;
        let mut actor = Actor::AI;
        let columns = [0, 1, 1, 2, 3, 3, 0, 2, 2, 1, 0, 3, 3, 2, 1, 0];

        for &column in columns.iter() {
            let (next, position) = board.drop_disc(column, actor).unwrap();
            incremental = incremental.toggle(&zob, position, actor);
            board = next;
            actor = actor.opposite();
            assert_eq!(zob.hash(&board), incremental);
        }
        assert_eq!(board.discs_placed(), 16);
    }

    #[test]
    fn test_transpositions_hash_equal() {
        let zob = table(42);
        let start = Board::default();

        let (a, _) = start.drop_disc(2, Actor::AI).unwrap();
        let (a, _) = a.drop_disc(4, Actor::Opponent).unwrap();
        let (a, _) = a.drop_disc(3, Actor::AI).unwrap();

        let (b, _) = start.drop_disc(3, Actor::AI).unwrap();
        let (b, _) = b.drop_disc(4, Actor::Opponent).unwrap();
        let (b, _) = b.drop_disc(2, Actor::AI).unwrap();

        assert_eq!(a, b);
        assert_eq!(zob.hash(&a), zob.hash(&b));
    }

    #[test]
    fn test_turn_is_part_of_the_position() {
        let zob = table(16);
        let board = Board::new(4, 4).unwrap();
        let (next, position) = board.drop_disc(1, Actor::Opponent).unwrap();

        assert_ne!(
            zob.position_hash(&next, Actor::AI),
            zob.position_hash(&next, Actor::Opponent)
        );
        assert_eq!(
            zob.position_hash(&board, Actor::Opponent)
                .toggle(&zob, position, Actor::Opponent)
                .pass_turn(&zob, Actor::Opponent),
            zob.position_hash(&next, Actor::AI)
        );
    }

    #[test]
    fn test_hash_changes_per_placement() {
        let zob = table(42);
        let board = Board::default();
        let (next, _) = board.drop_disc(3, Actor::AI).unwrap();
        assert_ne!(zob.hash(&board), zob.hash(&next));
    }
}
