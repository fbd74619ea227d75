use crate::drivers::DecodeError;
/// Channels carried by every datagram.
pub const CHANNELS: usize = 3;
const TIMESTAMP_BYTES: usize = 8;
const CHANNEL_BYTES: usize = 4;
/// Exact payload size of one datagram: f64 timestamp followed by `CHANNELS` x i32.
pub const RECORD_BYTES: usize = TIMESTAMP_BYTES + CHANNEL_BYTES * CHANNELS;
/// One decoded telemetry record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Sender clock, seconds.
    pub timestamp: f64,
    pub channels: [i32; CHANNELS],
}
impl Sample {
    pub fn new(timestamp: f64, channels: [i32; CHANNELS]) -> Self {
        Self {
            timestamp,
            channels,
        }
    }
}
/// Parses one little-endian record. Any length other than `RECORD_BYTES` is rejected.
pub fn decode(buffer: &[u8]) -> Result<Sample, DecodeError> {
    if buffer.len() != RECORD_BYTES {
        return Err(DecodeError::BadLength {
            expected: RECORD_BYTES,
            actual: buffer.len(),
        });
    }
    let (head, body) = buffer.split_at(TIMESTAMP_BYTES);
    let mut raw_ts = [0u8; TIMESTAMP_BYTES];
    raw_ts.copy_from_slice(head);
    let mut channels = [0i32; CHANNELS];
    for (value, chunk) in channels.iter_mut().zip(body.chunks_exact(CHANNEL_BYTES)) {
        let mut raw = [0u8; CHANNEL_BYTES];
        raw.copy_from_slice(chunk);
        *value = i32::from_le_bytes(raw);
    }
    Ok(Sample {
        timestamp: f64::from_le_bytes(raw_ts),
        channels,
    })
}
/// Inverse of [`decode`]; used by the simulator and tests.
pub fn encode(sample: &Sample) -> [u8; RECORD_BYTES] {
    let mut out = [0u8; RECORD_BYTES];
    out[..TIMESTAMP_BYTES].copy_from_slice(&sample.timestamp.to_le_bytes());
    for (chunk, value) in out[TIMESTAMP_BYTES..]
        .chunks_exact_mut(CHANNEL_BYTES)
        .zip(sample.channels.iter())
    {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
    out
}
