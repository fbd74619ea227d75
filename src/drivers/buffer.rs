use std::iter::Chain;
use std::slice::Iter;
use crate::drivers::{Sample, ScopeError};
/// Fixed-capacity history of decoded samples, oldest overwritten first.
///
/// Storage is allocated once up front. `slots.len()` is the fill count, so a slot
/// holding an all-zero sample is never confused with one that was never written.
pub struct HistoryRing {
    slots: Vec<Sample>,
    head: usize, // index of the oldest sample once the ring is full
    capacity: usize,
}
impl HistoryRing {
    pub fn with_capacity(capacity: usize) -> Result<Self, ScopeError> {
        if capacity == 0 {
            return Err(ScopeError::InvalidCapacity);
        }
        Ok(Self {
            slots: Vec::with_capacity(capacity),
            head: 0,
            capacity,
        })
    }
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity
    }
    /// O(1); evicts the oldest sample when full.
    pub fn append(&mut self, sample: Sample) {
        if self.slots.len() < self.capacity {
            self.slots.push(sample);
        } else {
            self.slots[self.head] = sample;
            self.head = (self.head + 1) % self.capacity;
        }
    }
    /// Most recently appended sample (arrival order, not timestamp order).
    pub fn latest(&self) -> Option<Sample> {
        let len = self.slots.len();
        if len == 0 {
            return None;
        }
        self.slots.get((self.head + len - 1) % len).copied()
    }
    pub fn snapshot(&self) -> RingView<'_> {
        let (newer, older) = self.slots.split_at(self.head);
        RingView { older, newer }
    }
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
    }
}
/// Borrowed oldest-first view of a [`HistoryRing`].
#[derive(Clone, Copy, Debug)]
pub struct RingView<'a> {
    older: &'a [Sample],
    newer: &'a [Sample],
}
impl<'a> RingView<'a> {
    pub fn len(&self) -> usize {
        self.older.len() + self.newer.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn iter(&self) -> Chain<Iter<'a, Sample>, Iter<'a, Sample>> {
        self.older.iter().chain(self.newer.iter())
    }
    pub fn latest(&self) -> Option<&'a Sample> {
        self.newer.last().or_else(|| self.older.last())
    }
    pub fn to_vec(&self) -> Vec<Sample> {
        self.iter().copied().collect()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    fn sample(i: usize) -> Sample {
        Sample::new(i as f64 * 0.01, [i as i32, -(i as i32), 0])
    }
    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            HistoryRing::with_capacity(0),
            Err(ScopeError::InvalidCapacity)
        ));
    }
    #[test]
    fn empty_ring_has_no_latest_and_empty_snapshot() {
        let ring = HistoryRing::with_capacity(4).unwrap();
        assert!(ring.is_empty());
        assert_eq!(ring.latest(), None);
        assert!(ring.snapshot().is_empty());
        assert_eq!(ring.snapshot().latest(), None);
    }
    #[test]
    fn zero_valued_sample_counts_as_written() {
        let mut ring = HistoryRing::with_capacity(4).unwrap();
        ring.append(Sample::new(0.0, [0, 0, 0]));
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.latest(), Some(Sample::new(0.0, [0, 0, 0])));
    }
    #[test]
    fn partial_fill_keeps_insertion_order() {
        let mut ring = HistoryRing::with_capacity(5).unwrap();
        for i in 0..3 {
            ring.append(sample(i));
        }
        assert!(!ring.is_full());
        assert_eq!(ring.snapshot().to_vec(), vec![sample(0), sample(1), sample(2)]);
        assert_eq!(ring.latest(), Some(sample(2)));
    }
    #[test]
    fn wraps_and_evicts_oldest() {
        let mut ring = HistoryRing::with_capacity(3).unwrap();
        for i in 0..5 {
            ring.append(sample(i));
        }
        assert!(ring.is_full());
        assert_eq!(ring.snapshot().to_vec(), vec![sample(2), sample(3), sample(4)]);
        assert_eq!(ring.latest(), Some(sample(4)));
        assert_eq!(ring.snapshot().latest(), Some(&sample(4)));
    }
    #[test]
    fn out_of_order_timestamps_are_not_resorted() {
        let mut ring = HistoryRing::with_capacity(4).unwrap();
        ring.append(Sample::new(2.0, [2, 0, 0]));
        ring.append(Sample::new(1.0, [1, 0, 0]));
        assert_eq!(ring.latest().map(|s| s.timestamp), Some(1.0));
        let order: Vec<f64> = ring.snapshot().iter().map(|s| s.timestamp).collect();
        assert_eq!(order, vec![2.0, 1.0]);
    }
    #[test]
    fn clear_resets_fill_count() {
        let mut ring = HistoryRing::with_capacity(2).unwrap();
        for i in 0..3 {
            ring.append(sample(i));
        }
        ring.clear();
        assert!(ring.is_empty());
        ring.append(sample(9));
        assert_eq!(ring.snapshot().to_vec(), vec![sample(9)]);
    }
    proptest! {
        #[test]
        fn keeps_exactly_the_last_capacity_samples(capacity in 1usize..64, extra in 1usize..200) {
            let mut ring = HistoryRing::with_capacity(capacity).unwrap();
            let total = capacity + extra;
            for i in 0..total {
                ring.append(sample(i));
            }
            let expected: Vec<Sample> = (extra..total).map(sample).collect();
            prop_assert_eq!(ring.len(), capacity);
            prop_assert_eq!(ring.snapshot().to_vec(), expected);
        }
    }
}
