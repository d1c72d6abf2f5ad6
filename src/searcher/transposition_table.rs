//! Fixed-length transposition table for MTD(f).
//!
//! Records are addressed by `hash % length`. Each slot holds one record and a
//! new save always replaces whatever is there. The full hash is kept in the
//! record so a slot shared by two positions reads as a miss.

use rustc_hash::FxHashMap;

use super::{INFINITY, NEG_INFINITY};
use crate::board::zobrist::BoardHash;

pub const DEFAULT_TABLE_LENGTH: usize = 1_000_003;

/// Bounds on the value of a position searched with `depth` plies remaining.
/// `min_score == max_score` marks an exact value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranspositionRecord {
    pub hash: BoardHash,
    pub min_score: i32,
    pub max_score: i32,
    pub best_move: Option<usize>,
    pub depth: u8,
}

impl TranspositionRecord {
    /// A record that proves nothing yet.
    pub fn new(hash: BoardHash, depth: u8) -> Self {
        Self {
            hash,
            min_score: NEG_INFINITY,
            max_score: INFINITY,
            best_move: None,
            depth,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.min_score == self.max_score
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    Miss,
    /// Same position, searched with a different number of plies remaining.
    /// Leaf scores scale with remaining depth, so its bounds do not apply.
    OtherDepth(TranspositionRecord),
    Hit(TranspositionRecord),
}

#[derive(Debug)]
pub struct TranspositionTable {
    length: usize,
    records: FxHashMap<usize, TranspositionRecord>,
    saved: usize,
    overwrites: usize,
    hits: usize,
    collisions: usize,
    depth_rejected: usize,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_LENGTH)
    }
}

impl TranspositionTable {
    /// `length` is clamped to at least one slot.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
            records: FxHashMap::default(),
            saved: 0,
            overwrites: 0,
            hits: 0,
            collisions: 0,
            depth_rejected: 0,
        }
    }

    #[inline]
    fn index(&self, hash: BoardHash) -> usize {
        hash.value() as usize % self.length
    }

    /// Looks up the record for `hash`, whatever depth it was searched at.
    pub fn get(&mut self, hash: BoardHash) -> Option<TranspositionRecord> {
        let record = *self.records.get(&self.index(hash))?;
        if record.hash != hash {
            self.collisions += 1;
            return None;
        }
        self.hits += 1;
        Some(record)
    }

    /// Looks up `hash` and reports whether the stored record can stand in for
    /// a search with exactly `depth` plies remaining.
    pub fn probe(&mut self, hash: BoardHash, depth: u8) -> Probe {
        match self.get(hash) {
            None => Probe::Miss,
            Some(record) if record.depth == depth => Probe::Hit(record),
            Some(record) => {
                self.depth_rejected += 1;
                Probe::OtherDepth(record)
            }
        }
    }

    pub fn save(&mut self, record: TranspositionRecord) {
        let index = self.index(record.hash);
        if self.records.insert(index, record).is_some() {
            self.overwrites += 1;
        }
        self.saved += 1;
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.saved = 0;
        self.overwrites = 0;
        self.hits = 0;
        self.collisions = 0;
        self.depth_rejected = 0;
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of occupied slots.
    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn saved(&self) -> usize {
        self.saved
    }

    pub fn overwrites(&self) -> usize {
        self.overwrites
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn depth_rejected(&self) -> usize {
        self.depth_rejected
    }
}
