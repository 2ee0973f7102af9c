//! `MinHeap` — binary min-heap keyed by an integer score.
//!
//! `std::collections::BinaryHeap` would need a `Reverse` wrapper plus an
//! `Ord` impl that looks only at the score.  Keying on a plain `i64` through
//! the [`Scored`] trait keeps the frontier entries small and the ordering
//! explicit.
//!
//! Equal scores have no stable order: which of several minimum entries
//! `pop` returns depends on insertion history.  It is deterministic for a
//! given push/pop sequence, which is all the planner relies on.

/// Anything that can sit in a [`MinHeap`].
pub trait Scored {
    fn score(&self) -> i64;
}

/// Array-backed binary min-heap.
#[derive(Debug, Clone)]
pub struct MinHeap<T: Scored> {
    items: Vec<T>,
}

impl<T: Scored> Default for MinHeap<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Scored> MinHeap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }

    /// Append `item` and sift it up while strictly less than its parent.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        let mut i = self.items.len() - 1;
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.items[i].score() < self.items[parent].score() {
                self.items.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    /// Remove and return a minimum-score item.
    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let min = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// A minimum-score item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn sift_down(&mut self, mut i: usize) {
        let size = self.items.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;

            if left < size && self.items[left].score() < self.items[smallest].score() {
                smallest = left;
            }
            if right < size && self.items[right].score() < self.items[smallest].score() {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.items.swap(i, smallest);
            i = smallest;
        }
    }
}
