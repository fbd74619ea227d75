use std::io;
use thiserror::Error;
/// A datagram that does not match the fixed record layout.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("datagram length mismatch: expected {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },
}
/// Transport-level failures. Would-block is not one of them; it ends a drain.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to bind UDP socket on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("transport fault: {0}")]
    Transport(#[from] io::Error),
}
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("history capacity must be greater than zero")]
    InvalidCapacity,
    #[error("channel index {index} out of range (stream has {channels} channels)")]
    ChannelOutOfRange { index: usize, channels: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ScopeError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ScopeError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for ScopeError {
    fn from(value: image::ImageError) -> Self {
        ScopeError::Plot(value.to_string())
    }
}
