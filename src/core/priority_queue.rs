//! Binary max-heap keyed by an explicit extraction function.
//!
//! Items with equal keys come out in insertion order: every entry carries a
//! sequence number and the earlier one wins a tie.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

struct Entry<T, K> {
    key: K,
    seq: u64,
    item: T,
}

impl<T, K: Ord> PartialEq for Entry<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl<T, K: Ord> Eq for Entry<T, K> {}

impl<T, K: Ord> PartialOrd for Entry<T, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, K: Ord> Ord for Entry<T, K> {
    /// Larger key first; for equal keys the lower sequence number is "greater"
    /// so the heap yields it first.
    fn cmp(&self, other: &Self) -> Ordering {
        match self.key.cmp(&other.key) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            ordering => ordering,
        }
    }
}

pub struct PriorityQueue<T, K> {
    heap: BinaryHeap<Entry<T, K>>,
    key_fn: fn(&T) -> K,
    next_seq: u64,
}

impl<T, K: Ord> PriorityQueue<T, K> {
    pub fn new(key_fn: fn(&T) -> K) -> Self {
        Self {
            heap: BinaryHeap::new(),
            key_fn,
            next_seq: 0,
        }
    }

    pub fn push(&mut self, item: T) {
        let key = (self.key_fn)(&item);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { key, seq, item });
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|entry| &entry.item)
    }

    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Iterates in pop order without touching the queue.
    ///
    /// The iterator owns a throwaway heap of references, so it is lazy
    /// (each step is one `O(log n)` pop) and can be cloned to restart.
    pub fn iter_ordered(&self) -> OrderedIter<'_, T, K> {
        OrderedIter {
            pending: self.heap.iter().collect(),
        }
    }
}

impl<T: Clone, K: Clone + Ord> Clone for PriorityQueue<T, K> {
    fn clone(&self) -> Self {
        let heap = self
            .heap
            .iter()
            .map(|entry| Entry {
                key: entry.key.clone(),
                seq: entry.seq,
                item: entry.item.clone(),
            })
            .collect::<Vec<_>>();

        Self {
            heap: BinaryHeap::from(heap),
            key_fn: self.key_fn,
            next_seq: self.next_seq,
        }
    }
}

impl<T, K> fmt::Debug for PriorityQueue<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.heap.len())
            .field("next_seq", &self.next_seq)
            .finish()
    }
}

pub struct OrderedIter<'a, T, K> {
    pending: BinaryHeap<&'a Entry<T, K>>,
}

impl<T, K: Ord> Clone for OrderedIter<'_, T, K> {
    fn clone(&self) -> Self {
        Self {
            pending: self.pending.clone(),
        }
    }
}

impl<'a, T, K: Ord> Iterator for OrderedIter<'a, T, K> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.pending.pop().map(|entry| &entry.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pending.len(), Some(self.pending.len()))
    }
}

impl<T, K: Ord> ExactSizeIterator for OrderedIter<'_, T, K> {}
