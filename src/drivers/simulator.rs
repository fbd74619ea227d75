use std::f64::consts::TAU;
use std::time::Instant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::drivers::wire::{encode, Sample, CHANNELS, RECORD_BYTES};
use crate::drivers::{DatagramSource, SourceError};
// Older backlog is skipped, the way a full kernel queue would drop it.
const MAX_BACKLOG: u64 = 500;
/// Three-phase sine generator that speaks the wire format, for running without hardware.
pub struct SimulatedSource {
    started_at: Instant,
    period_secs: f64,
    emitted: u64,
    frequency_hz: f64,
    amplitude: f64,
    jitter: f64,
    rng: StdRng,
}
impl SimulatedSource {
    pub fn new(period_secs: f64) -> Self {
        Self {
            started_at: Instant::now(),
            period_secs,
            emitted: 0,
            frequency_hz: 1.0,
            amplitude: 1000.0,
            jitter: 15.0,
            rng: StdRng::from_entropy(),
        }
    }
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.max(0.0);
        self
    }
    fn sample_at(&mut self, timestamp: f64) -> Sample {
        let mut channels = [0i32; CHANNELS];
        for (phase, value) in channels.iter_mut().enumerate() {
            let offset = phase as f64 * TAU / CHANNELS as f64;
            let mut v = self.amplitude * (TAU * self.frequency_hz * timestamp + offset).sin();
            if self.jitter > 0.0 {
                v += self.rng.gen_range(-self.jitter..=self.jitter);
            }
            *value = v.round() as i32;
        }
        Sample::new(timestamp, channels)
    }
    /// Emits the next due record given `elapsed_secs` since start.
    fn next_due(&mut self, elapsed_secs: f64, buf: &mut [u8]) -> Option<usize> {
        let due = (elapsed_secs / self.period_secs).floor() as u64 + 1;
        if due.saturating_sub(self.emitted) > MAX_BACKLOG {
            self.emitted = due - MAX_BACKLOG;
        }
        if self.emitted >= due {
            return None;
        }
        let timestamp = self.emitted as f64 * self.period_secs;
        self.emitted += 1;
        let record = encode(&self.sample_at(timestamp));
        let len = RECORD_BYTES.min(buf.len());
        buf[..len].copy_from_slice(&record[..len]);
        Some(len)
    }
}
impl DatagramSource for SimulatedSource {
    fn poll_datagram(&mut self, buf: &mut [u8]) -> Result<Option<usize>, SourceError> {
        let elapsed = self.started_at.elapsed().as_secs_f64();
        Ok(self.next_due(elapsed, buf))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::wire::decode;
    fn drain_at(source: &mut SimulatedSource, elapsed: f64) -> Vec<Sample> {
        let mut buf = [0u8; 64];
        let mut out = Vec::new();
        while let Some(len) = source.next_due(elapsed, &mut buf) {
            out.push(decode(&buf[..len]).unwrap());
        }
        out
    }
    #[test]
    fn emits_one_record_per_elapsed_period() {
        let mut source = SimulatedSource::new(0.02).with_jitter(0.0);
        let first = drain_at(&mut source, 0.0);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].timestamp, 0.0);
        let next = drain_at(&mut source, 0.1);
        assert_eq!(next.len(), 5);
        assert!(drain_at(&mut source, 0.1).is_empty());
    }
    #[test]
    fn phases_are_a_third_of_a_turn_apart() {
        let mut source = SimulatedSource::new(0.02).with_jitter(0.0);
        let sample = drain_at(&mut source, 0.0)[0];
        assert_eq!(sample.channels[0], 0);
        assert_eq!(sample.channels[1], 866);
        assert_eq!(sample.channels[2], -866);
    }
    #[test]
    fn long_stalls_skip_old_backlog() {
        let mut source = SimulatedSource::new(0.01).with_jitter(0.0);
        let burst = drain_at(&mut source, 60.0);
        assert_eq!(burst.len() as u64, MAX_BACKLOG);
    }
}
