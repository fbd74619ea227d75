use crate::drivers::{RingView, Sample};
pub const MIN_WINDOW_SECS: f64 = 1.0;
pub const MAX_WINDOW_SECS: f64 = 20.0;
// Window-edge slack in units of the reference's own rounding step, so epoch-scale
// timestamps keep an inclusive edge too (1.0 - 0.7 > 0.3 in f64).
const EDGE_TOLERANCE_ULPS: f64 = 4.0;
/// Operator-selected trailing display window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowSpec {
    seconds: f64,
}
impl WindowSpec {
    /// Clamps into `[MIN_WINDOW_SECS, MAX_WINDOW_SECS]`; non-finite input falls back to the minimum.
    pub fn new(seconds: f64) -> Self {
        let seconds = if seconds.is_finite() {
            seconds.clamp(MIN_WINDOW_SECS, MAX_WINDOW_SECS)
        } else {
            MIN_WINDOW_SECS
        };
        Self { seconds }
    }
    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}
impl Default for WindowSpec {
    fn default() -> Self {
        WindowSpec { seconds: 5.0 }
    }
}
/// Samples within `duration_secs` of the last-arrived sample, oldest-first.
///
/// The reference is the newest sample by arrival, not the largest timestamp; reordered
/// datagrams are neither re-sorted nor corrected for skew. The reference itself is always
/// selected, whatever its timestamp. Any other sample whose age is not finite (a NaN or
/// infinite timestamp on either side) is left out.
pub fn select(ring: RingView<'_>, duration_secs: f64) -> Vec<Sample> {
    let Some(reference) = ring.latest().map(|s| s.timestamp) else {
        return Vec::new();
    };
    let newest = ring.len() - 1;
    let limit = duration_secs + edge_tolerance(reference);
    ring.iter()
        .enumerate()
        .filter(|&(i, s)| {
            let age = reference - s.timestamp;
            i == newest || (age.is_finite() && age <= limit)
        })
        .map(|(_, s)| *s)
        .collect()
}
fn edge_tolerance(reference: f64) -> f64 {
    if reference.is_finite() {
        reference.abs().max(1.0) * EDGE_TOLERANCE_ULPS * f64::EPSILON
    } else {
        0.0
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::HistoryRing;
    fn ring_with(timestamps: &[f64]) -> HistoryRing {
        let mut ring = HistoryRing::with_capacity(64).unwrap();
        for (i, &t) in timestamps.iter().enumerate() {
            ring.append(Sample::new(t, [i as i32, 0, 0]));
        }
        ring
    }
    #[test]
    fn empty_ring_selects_nothing() {
        let ring = HistoryRing::with_capacity(8).unwrap();
        assert!(select(ring.snapshot(), 5.0).is_empty());
    }
    #[test]
    fn single_sample_is_always_selected() {
        let ring = ring_with(&[42.0]);
        let window = select(ring.snapshot(), 1.0);
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].timestamp, 42.0);
    }
    #[test]
    fn single_non_finite_sample_is_still_selected() {
        for t in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let ring = ring_with(&[t]);
            let window = select(ring.snapshot(), 5.0);
            assert_eq!(window.len(), 1);
            assert_eq!(window[0].channels[0], 0);
        }
    }
    #[test]
    fn infinite_timestamp_behind_finite_reference_is_left_out() {
        let ring = ring_with(&[1.0, f64::INFINITY, 2.0]);
        let picked: Vec<f64> = select(ring.snapshot(), 5.0)
            .iter()
            .map(|s| s.timestamp)
            .collect();
        assert_eq!(picked, vec![1.0, 2.0]);
    }
    #[test]
    fn non_finite_reference_keeps_only_itself() {
        let ring = ring_with(&[1.0, 2.0, f64::NAN]);
        let window = select(ring.snapshot(), 20.0);
        assert_eq!(window.len(), 1);
        assert!(window[0].timestamp.is_nan());
        let ring = ring_with(&[1.0, 2.0, f64::INFINITY]);
        assert_eq!(select(ring.snapshot(), 20.0).len(), 1);
    }
    #[test]
    fn edge_stays_inclusive_for_epoch_scale_timestamps() {
        let base = 1_700_000_000.0;
        let timestamps: Vec<f64> = (0..=10).map(|i| base + i as f64 / 10.0).collect();
        let ring = ring_with(&timestamps);
        let picked: Vec<i32> = select(ring.snapshot(), 0.3)
            .iter()
            .map(|s| s.channels[0])
            .collect();
        assert_eq!(picked, vec![7, 8, 9, 10]);
    }
    #[test]
    fn trailing_window_over_tenth_second_grid() {
        let timestamps: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        let ring = ring_with(&timestamps);
        let picked: Vec<f64> = select(ring.snapshot(), 0.3)
            .iter()
            .map(|s| s.timestamp)
            .collect();
        assert_eq!(picked, vec![0.7, 0.8, 0.9, 1.0]);
    }
    #[test]
    fn window_edge_is_inclusive() {
        let ring = ring_with(&[0.0, 1.0, 2.0, 3.0]);
        let picked: Vec<f64> = select(ring.snapshot(), 2.0)
            .iter()
            .map(|s| s.timestamp)
            .collect();
        assert_eq!(picked, vec![1.0, 2.0, 3.0]);
    }
    #[test]
    fn reference_is_last_arrival_even_when_out_of_order() {
        // 5.0 arrived before the late 2.5; the late one is the reference.
        let ring = ring_with(&[1.0, 2.0, 5.0, 2.5]);
        let picked: Vec<f64> = select(ring.snapshot(), 1.0)
            .iter()
            .map(|s| s.timestamp)
            .collect();
        assert_eq!(picked, vec![2.0, 5.0, 2.5]);
    }
    #[test]
    fn window_spec_is_clamped() {
        assert_eq!(WindowSpec::new(0.2).seconds(), MIN_WINDOW_SECS);
        assert_eq!(WindowSpec::new(99.0).seconds(), MAX_WINDOW_SECS);
        assert_eq!(WindowSpec::new(7.5).seconds(), 7.5);
        assert_eq!(WindowSpec::new(f64::NAN).seconds(), MIN_WINDOW_SECS);
        assert_eq!(WindowSpec::default().seconds(), 5.0);
    }
}
