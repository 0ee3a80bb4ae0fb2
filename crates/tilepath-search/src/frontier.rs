//! The frontier: one generic pending set for every search strategy.
//!
//! Cost-aware searches use a min-key binary heap with stable (first
//! inserted wins) tie-breaking; BFS and DFS use plain queue / stack
//! semantics. Re-inserting a member with a better key is the decrease-key
//! path; superseded heap entries are skipped lazily on removal via an
//! O(1) membership set.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::error::Error;
use std::fmt;

use tilepath_core::Point;

/// Which tile field orders a priority frontier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortKey {
    /// f = g + h (A*).
    FScore,
    /// g · weight (Dijkstra).
    GScore,
    /// h only (Greedy best-first).
    HScore,
}

/// Ordering discipline of a [`Frontier`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Discipline {
    /// Minimum-key extraction, stable on ties.
    Priority(SortKey),
    /// First in, first out (BFS).
    Fifo,
    /// Last in, first out (DFS).
    Lifo,
}

/// Error signalled by [`Frontier::remove`] on an empty frontier.
///
/// A programmer error: search loops check [`Frontier::is_empty`] first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EmptyQueue;

impl fmt::Display for EmptyQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("remove() called on an empty frontier")
    }
}

impl Error for EmptyQueue {}

/// Heap entry ordered by key, then insertion sequence.
#[derive(Copy, Clone, PartialEq)]
struct Entry {
    key: f64,
    seq: u64,
    pos: Point,
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (a max-heap) pops the smallest key first;
        // equal keys pop in insertion order.
        other
            .key
            .total_cmp(&self.key)
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

enum Store {
    Heap(BinaryHeap<Entry>),
    Fifo(VecDeque<Point>),
    Lifo(Vec<Point>),
}

/// The pending set of discovered-but-not-yet-expanded tiles.
pub struct Frontier {
    discipline: Discipline,
    store: Store,
    members: HashSet<Point>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier with the given discipline.
    pub fn new(discipline: Discipline) -> Self {
        let store = match discipline {
            Discipline::Priority(_) => Store::Heap(BinaryHeap::new()),
            Discipline::Fifo => Store::Fifo(VecDeque::new()),
            Discipline::Lifo => Store::Lifo(Vec::new()),
        };
        Self {
            discipline,
            store,
            members: HashSet::new(),
            seq: 0,
        }
    }

    /// The frontier's ordering discipline.
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Number of member tiles (superseded heap entries not counted).
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the frontier holds no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Membership test for `pos`.
    pub fn contains(&self, pos: Point) -> bool {
        self.members.contains(&pos)
    }

    /// Insert `pos` with sort key `key` (ignored by FIFO/LIFO frontiers).
    ///
    /// Inserting an existing member of a priority frontier re-keys it:
    /// the best key wins on removal and the member is removed once.
    pub fn insert(&mut self, pos: Point, key: f64) {
        match &mut self.store {
            Store::Heap(heap) => {
                heap.push(Entry {
                    key,
                    seq: self.seq,
                    pos,
                });
                self.seq += 1;
            }
            Store::Fifo(queue) => {
                if !self.members.contains(&pos) {
                    queue.push_back(pos);
                }
            }
            Store::Lifo(stack) => {
                if !self.members.contains(&pos) {
                    stack.push(pos);
                }
            }
        }
        self.members.insert(pos);
    }

    /// Extract and remove the best element: minimum key for priority
    /// frontiers (ties broken first-inserted), queue/stack order otherwise.
    pub fn remove(&mut self) -> Result<Point, EmptyQueue> {
        match &mut self.store {
            Store::Heap(heap) => loop {
                let entry = heap.pop().ok_or(EmptyQueue)?;
                // Superseded entries for already-removed (or re-keyed and
                // since removed) members are skipped.
                if self.members.remove(&entry.pos) {
                    return Ok(entry.pos);
                }
            },
            Store::Fifo(queue) => {
                let pos = queue.pop_front().ok_or(EmptyQueue)?;
                self.members.remove(&pos);
                Ok(pos)
            }
            Store::Lifo(stack) => {
                let pos = stack.pop().ok_or(EmptyQueue)?;
                self.members.remove(&pos);
                Ok(pos)
            }
        }
    }

    /// Drop all members and pending entries.
    pub fn clear(&mut self) {
        match &mut self.store {
            Store::Heap(heap) => heap.clear(),
            Store::Fifo(queue) => queue.clear(),
            Store::Lifo(stack) => stack.clear(),
        }
        self.members.clear();
        self.seq = 0;
    }
}
