use crate::drivers::{Sample, ScopeError, CHANNELS};
/// One channel laid out for a step plot: `ys[i]` spans `xs[i]..xs[i + 1]`.
///
/// Non-empty series always carry exactly one more x than y.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepSeries {
    pub xs: Vec<f64>,
    pub ys: Vec<i32>,
}
impl StepSeries {
    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }
    /// Corner points of the stair line, two per value.
    pub fn stair_points(&self) -> Vec<[f64; 2]> {
        let mut points = Vec::with_capacity(self.ys.len() * 2);
        for (span, &y) in self.xs.windows(2).zip(&self.ys) {
            let y = f64::from(y);
            points.push([span[0], y]);
            points.push([span[1], y]);
        }
        points
    }
    pub fn y_bounds(&self) -> Option<(i32, i32)> {
        let min = self.ys.iter().copied().min()?;
        let max = self.ys.iter().copied().max()?;
        Some((min, max))
    }
}
/// Builds the step series of `channel` over an already windowed run of samples.
///
/// The trailing x is `last + dt`, with `dt` taken from the two newest timestamps. When
/// fewer than two samples exist, or that delta is not a positive finite number (a
/// reordered pair), `default_dt` is used instead.
pub fn build(window: &[Sample], channel: usize, default_dt: f64) -> Result<StepSeries, ScopeError> {
    if channel >= CHANNELS {
        return Err(ScopeError::ChannelOutOfRange {
            index: channel,
            channels: CHANNELS,
        });
    }
    let Some(last) = window.last() else {
        return Ok(StepSeries::default());
    };
    let dt = match window {
        [.., prev, newest] => {
            let delta = newest.timestamp - prev.timestamp;
            if delta.is_finite() && delta > 0.0 {
                delta
            } else {
                default_dt
            }
        }
        _ => default_dt,
    };
    let mut xs = Vec::with_capacity(window.len() + 1);
    xs.extend(window.iter().map(|s| s.timestamp));
    xs.push(last.timestamp + dt);
    let ys = window.iter().map(|s| s.channels[channel]).collect();
    Ok(StepSeries { xs, ys })
}
#[cfg(test)]
mod tests {
    use super::*;
    const DT: f64 = 0.02;
    fn samples(timestamps: &[f64]) -> Vec<Sample> {
        timestamps
            .iter()
            .enumerate()
            .map(|(i, &t)| Sample::new(t, [i as i32, 10 * i as i32, -(i as i32)]))
            .collect()
    }
    #[test]
    fn empty_window_builds_empty_series() {
        let series = build(&[], 0, DT).unwrap();
        assert!(series.xs.is_empty());
        assert!(series.ys.is_empty());
        assert!(series.stair_points().is_empty());
        assert_eq!(series.y_bounds(), None);
    }
    #[test]
    fn single_sample_uses_default_interval() {
        let series = build(&samples(&[3.0]), 1, DT).unwrap();
        assert_eq!(series.ys, vec![0]);
        assert_eq!(series.xs, vec![3.0, 3.0 + DT]);
    }
    #[test]
    fn trailing_x_extends_by_latest_delta() {
        let series = build(&samples(&[1.0, 1.5, 1.75]), 1, DT).unwrap();
        assert_eq!(series.ys, vec![0, 10, 20]);
        assert_eq!(series.xs, vec![1.0, 1.5, 1.75, 2.0]);
        assert_eq!(series.xs.len(), series.ys.len() + 1);
    }
    #[test]
    fn reordered_tail_falls_back_to_default_interval() {
        let series = build(&samples(&[2.0, 1.0]), 0, DT).unwrap();
        assert_eq!(series.xs, vec![2.0, 1.0, 1.0 + DT]);
    }
    #[test]
    fn picks_the_requested_channel() {
        let series = build(&samples(&[0.0, 1.0]), 2, DT).unwrap();
        assert_eq!(series.ys, vec![0, -1]);
        assert_eq!(series.y_bounds(), Some((-1, 0)));
    }
    #[test]
    fn channel_out_of_range_is_an_error() {
        assert!(matches!(
            build(&samples(&[0.0]), CHANNELS, DT),
            Err(ScopeError::ChannelOutOfRange { index: 3, channels: 3 })
        ));
    }
    #[test]
    fn stair_points_hold_each_value_across_its_span() {
        let series = build(&samples(&[0.0, 1.0]), 1, DT).unwrap();
        assert_eq!(
            series.stair_points(),
            vec![[0.0, 0.0], [1.0, 0.0], [1.0, 10.0], [2.0, 10.0]]
        );
    }
    #[test]
    fn x_count_is_value_count_plus_one() {
        for m in 1..50 {
            let timestamps: Vec<f64> = (0..m).map(|i| i as f64 * DT).collect();
            let series = build(&samples(&timestamps), 0, DT).unwrap();
            assert_eq!(series.ys.len(), m);
            assert_eq!(series.xs.len(), m + 1);
        }
    }
}
