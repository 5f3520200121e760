use std::collections::HashMap;

use log::debug;

use crate::game::{Fingerprint, Player};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtEntry {
    pub best_column: Option<usize>,
    /// From the maximizer's point of view.
    pub score: i32,
    pub depth: u32,
    pub bound: Bound,
    /// Side to move at the stored node.
    pub mover: Player,
}

impl TtEntry {
    /// Whether this entry settles a node searched to `depth` inside `(alpha, beta)`.
    ///
    /// Only entries computed at exactly `depth` qualify, so a cached result never stands in
    /// for a search of a different depth.
    pub fn cutoff(&self, depth: u32, alpha: i32, beta: i32) -> bool {
        if self.depth != depth {
            return false;
        }
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => self.score >= beta,
            Bound::Upper => self.score <= alpha,
        }
    }
}

/// Board fingerprint to the best move (and bounded score) found for that exact board.
///
/// Scores are relative to one maximizing side; [`set_perspective`](Self::set_perspective)
/// drops everything when that side changes. A miss is always safe.
#[derive(Debug)]
pub struct TranspositionTable {
    entries: HashMap<Fingerprint, TtEntry>,
    max_entries: usize,
    perspective: Option<Player>,
}

impl TranspositionTable {
    pub fn new(max_entries: usize) -> Self {
        TranspositionTable {
            entries: HashMap::new(),
            max_entries,
            perspective: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn perspective(&self) -> Option<Player> {
        self.perspective
    }

    pub fn set_perspective(&mut self, maximizer: Player) {
        if self.perspective == Some(maximizer) {
            return;
        }
        if !self.entries.is_empty() {
            debug!(
                "maximizer changed to {maximizer}, dropping {} cached entries",
                self.entries.len()
            );
        }
        self.entries.clear();
        self.perspective = Some(maximizer);
    }

    /// Entry for this board with `mover` to play.
    pub fn probe(&self, key: Fingerprint, mover: Player) -> Option<&TtEntry> {
        self.entries.get(&key).filter(|entry| entry.mover == mover)
    }

    pub fn best_move(&self, key: Fingerprint, mover: Player) -> Option<usize> {
        self.probe(key, mover).and_then(|entry| entry.best_column)
    }

    /// Insert or replace. An existing entry for the same board is kept if it is deeper.
    pub fn store(&mut self, key: Fingerprint, entry: TtEntry) {
        if let Some(current) = self.entries.get_mut(&key) {
            if entry.depth >= current.depth || entry.mover != current.mover {
                *current = entry;
            }
            return;
        }

        if self.entries.len() >= self.max_entries {
            debug!(
                "transposition table reached {} entries, flushing",
                self.entries.len()
            );
            self.entries.clear();
        }
        self.entries.insert(key, entry);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(1 << 20)
    }
}
