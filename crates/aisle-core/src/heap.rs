//! Min-heap frontier for the grid search.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A frontier entry. Ordered by `f_score` only; equal scores are unordered.
#[derive(Debug, Clone, Copy)]
pub struct OpenCell {
    pub index: usize,
    pub f_score: f64,
}

impl PartialEq for OpenCell {
    fn eq(&self, other: &Self) -> bool {
        FloatOrd(self.f_score) == FloatOrd(other.f_score)
    }
}

impl Eq for OpenCell {}

impl PartialOrd for OpenCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenCell {
    fn cmp(&self, other: &Self) -> Ordering {
        FloatOrd(self.f_score).cmp(&FloatOrd(other.f_score))
    }
}

/// Binary min-heap keyed by `f_score`.
///
/// Stale entries are not removed; the search skips cells it has already
/// closed when they come back out.
#[derive(Debug, Default)]
pub struct MinHeap {
    data: BinaryHeap<Reverse<OpenCell>>,
}

impl MinHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, index: usize, f_score: f64) {
        self.data.push(Reverse(OpenCell { index, f_score }));
    }

    pub fn pop(&mut self) -> Option<OpenCell> {
        self.data.pop().map(|Reverse(cell)| cell)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
