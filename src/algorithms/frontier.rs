use crate::grid::Position;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Priority key for a frontier entry. `BinaryHeap` is a max-heap, so `Ord`
/// is reversed: lower priority first, then lower sequence number.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Key {
    priority: usize,
    seq: u64,
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            other => other,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct QueueEntry {
    key: Key,
    pos: Position,
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-priority frontier with FIFO order among equal priorities.
///
/// Entries are never updated in place: a cell whose distance improves is
/// pushed again and the stale copy is skipped by the caller on pop.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: BinaryHeap<QueueEntry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Frontier::default()
    }

    pub fn push(&mut self, pos: Position, priority: usize) {
        let key = Key {
            priority,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.push(QueueEntry { key, pos });
    }

    /// Removes the entry with the lowest priority, oldest first on ties.
    pub fn pop(&mut self) -> Option<(Position, usize)> {
        self.queue.pop().map(|e| (e.pos, e.key.priority))
    }

    /// Total number of pushes since construction.
    pub fn pushes(&self) -> u64 {
        self.next_seq
    }
}
