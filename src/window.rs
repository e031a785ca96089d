//! Monotonic sliding-window minimum.
//!
//! Holds `(value, index)` pairs for indices inside `[left, right]` and answers
//! "smallest value in the window" in O(1). Values are non-decreasing from the
//! front of the deque to the back, so the front is always the minimum.
//!
//! Each index enters and leaves the deque at most once, which is what keeps a
//! full DP scan linear.

use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct SlidingWindowMin {
    entries: VecDeque<(f64, usize)>,
    /// Smallest index still inside the window.
    left: usize,
}

impl SlidingWindowMin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` at `index` on the right edge.
    ///
    /// Entries whose value is `>= value` can never be the minimum again while
    /// this one is in range, so they are dropped from the tail first. On ties the
    /// newest index survives.
    pub fn push(&mut self, value: f64, index: usize) {
        debug_assert!(index >= self.left, "push below the window's left edge");
        while let Some(&(back, _)) = self.entries.back() {
            if back >= value {
                self.entries.pop_back();
            } else {
                break;
            }
        }
        self.entries.push_back((value, index));
    }

    /// Advance the left edge past `index`; every index `<= index` leaves the window.
    pub fn evict_left(&mut self, index: usize) {
        while self.left <= index {
            if let Some(&(_, front)) = self.entries.front() {
                if front == self.left {
                    self.entries.pop_front();
                }
            }
            self.left += 1;
        }
    }

    /// Current minimum and the index holding it, or `None` when the window is empty.
    #[inline]
    pub fn query(&self) -> Option<(f64, usize)> {
        self.entries.front().copied()
    }

    /// Smallest index still inside the window.
    #[inline]
    pub fn left(&self) -> usize {
        self.left
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::SlidingWindowMin;

    #[test]
    fn empty_window_has_no_minimum() {
        let w = SlidingWindowMin::new();
        assert_eq!(w.query(), None);
        assert!(w.is_empty());
        assert_eq!(w.left(), 0);
    }

    #[test]
    fn tracks_minimum_as_values_arrive() {
        let mut w = SlidingWindowMin::new();
        w.push(5.0, 0);
        assert_eq!(w.query(), Some((5.0, 0)));
        w.push(7.0, 1);
        assert_eq!(w.query(), Some((5.0, 0)));
        w.push(2.0, 2);
        assert_eq!(w.query(), Some((2.0, 2)));
        // 5.0 and 7.0 were dominated by 2.0.
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn ties_keep_the_newest_index() {
        let mut w = SlidingWindowMin::new();
        w.push(1.0, 0);
        w.push(1.0, 1);
        assert_eq!(w.query(), Some((1.0, 1)));
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn eviction_drops_front_only_when_it_leaves() {
        let mut w = SlidingWindowMin::new();
        w.push(1.0, 0);
        w.push(3.0, 1);
        w.push(2.0, 2);
        w.evict_left(0);
        assert_eq!(w.left(), 1);
        assert_eq!(w.query(), Some((2.0, 2)));
        // index 1 was already dominated, evicting it leaves 2 in place
        w.evict_left(1);
        assert_eq!(w.query(), Some((2.0, 2)));
        w.evict_left(2);
        assert_eq!(w.query(), None);
        assert_eq!(w.left(), 3);
    }

    #[test]
    fn evicting_behind_the_edge_is_a_no_op() {
        let mut w = SlidingWindowMin::new();
        w.push(4.0, 0);
        w.evict_left(0);
        w.push(6.0, 1);
        w.evict_left(0);
        assert_eq!(w.query(), Some((6.0, 1)));
        assert_eq!(w.left(), 1);
    }

    #[test]
    fn infinite_entries_never_shadow_finite_ones() {
        let mut w = SlidingWindowMin::new();
        w.push(0.0, 0);
        w.push(f64::INFINITY, 1);
        w.push(f64::INFINITY, 2);
        assert_eq!(w.query(), Some((0.0, 0)));
        assert_eq!(w.len(), 2);
        w.evict_left(0);
        assert_eq!(w.query(), Some((f64::INFINITY, 2)));
    }

    #[test]
    fn matches_naive_minimum_over_a_scan() {
        let values = [4.0, 1.0, 3.0, 1.0, 5.0, 0.5, 2.0, 2.0, 9.0, 0.0];
        let width = 3usize;
        let mut w = SlidingWindowMin::new();
        for (i, &v) in values.iter().enumerate() {
            w.push(v, i);
            if i >= width {
                w.evict_left(i - width);
            }
            let lo = i.saturating_sub(width - 1);
            let naive = values[lo..=i].iter().copied().fold(f64::INFINITY, f64::min);
            let (min, at) = w.query().unwrap();
            assert_eq!(min, naive, "window ending at {i}");
            assert_eq!(values[at], naive);
        }
    }
}
