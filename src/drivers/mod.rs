// src/drivers/mod.rs
// 采集引擎：解码 -> 环形缓冲 -> 时间窗口 -> 阶梯序列
pub mod buffer;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod series;
pub mod simulator;
pub mod source;
pub mod window;
pub mod wire;
// 公开导出常用类型，方便外部调用
pub use buffer::{HistoryRing, RingView};
pub use error::{DecodeError, ScopeError, SourceError};
pub use pipeline::{
    ChannelSeries, IngestStats, PlaybackState, ScopeView, StreamController, TickReport,
};
pub use plot::{render_view_png, PlotStyle};
pub use series::StepSeries;
pub use simulator::SimulatedSource;
pub use source::{DatagramSource, UdpSource};
pub use window::{WindowSpec, MAX_WINDOW_SECS, MIN_WINDOW_SECS};
pub use wire::{Sample, CHANNELS, RECORD_BYTES};
