use std::path::{Path, PathBuf};
use crate::config::ScopeConfig;
use crate::drivers::series::{self, StepSeries};
use crate::drivers::source::DatagramSource;
use crate::drivers::window::{self, WindowSpec};
use crate::drivers::wire::{self, CHANNELS};
use crate::drivers::{HistoryRing, ScopeError};
use crate::recorder::SampleRecorder;
use crate::types::ScopeCommand;
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Running,
    Paused,
}
impl PlaybackState {
    pub fn toggled(self) -> Self {
        match self {
            PlaybackState::Running => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Running,
        }
    }
}
/// Step series of one visible channel.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelSeries {
    pub channel: usize,
    pub series: StepSeries,
}
/// Rendering-ready output of the last running tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopeView {
    /// Timestamp of the last-arrived sample, for the x-axis range.
    pub newest_timestamp: Option<f64>,
    pub window_seconds: f64,
    pub channels: Vec<ChannelSeries>, // visible channels only, ascending index
}
impl ScopeView {
    pub fn series(&self, channel: usize) -> Option<&StepSeries> {
        self.channels
            .iter()
            .find(|c| c.channel == channel)
            .map(|c| &c.series)
    }
    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(|c| c.series.is_empty())
    }
}
/// Counts for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub datagrams: u64,
    pub appended: u64,
    pub discarded_paused: u64,
    pub malformed: u64,
    pub transport_faults: u64,
    pub view_updated: bool,
}
/// Running totals since start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub ticks: u64,
    pub datagrams: u64,
    pub appended: u64,
    pub discarded_paused: u64,
    pub malformed: u64,
    pub transport_faults: u64,
}
impl IngestStats {
    fn absorb(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.datagrams += report.datagrams;
        self.appended += report.appended;
        self.discarded_paused += report.discarded_paused;
        self.malformed += report.malformed;
        self.transport_faults += report.transport_faults;
    }
}
/// Owns the history and playback controls; driven by an external tick.
pub struct StreamController<S: DatagramSource> {
    source: S,
    ring: HistoryRing,
    state: PlaybackState,
    window: WindowSpec,
    visible: [bool; CHANNELS],
    nominal_period_secs: f64,
    scratch: Vec<u8>,
    view: ScopeView,
    stats: IngestStats,
    recorder: SampleRecorder,
    recording_dir: PathBuf,
}
impl<S: DatagramSource> StreamController<S> {
    pub fn new(source: S, config: &ScopeConfig) -> Result<Self, ScopeError> {
        config.validate()?;
        let window = WindowSpec::new(config.window_seconds);
        let state = if config.start_paused {
            PlaybackState::Paused
        } else {
            PlaybackState::Running
        };
        Ok(Self {
            source,
            ring: HistoryRing::with_capacity(config.history_capacity)?,
            state,
            window,
            visible: config.visible_channels,
            nominal_period_secs: config.nominal_period_secs,
            scratch: vec![0u8; config.recv_buffer_bytes],
            view: ScopeView {
                window_seconds: window.seconds(),
                ..ScopeView::default()
            },
            stats: IngestStats::default(),
            recorder: SampleRecorder::new(),
            recording_dir: config.recording_dir.clone(),
        })
    }
    /// One ingestion pass. The source is drained even while paused so the kernel
    /// queue never backs up; paused samples are decoded and then dropped.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let running = self.state == PlaybackState::Running;
        let ring = &mut self.ring;
        let recorder = &mut self.recorder;
        let drained = self.source.drain_pending(&mut self.scratch, |datagram| {
            report.datagrams += 1;
            match wire::decode(datagram) {
                Ok(sample) if running => {
                    ring.append(sample);
                    recorder.record(&sample);
                    report.appended += 1;
                }
                Ok(_) => report.discarded_paused += 1,
                Err(err) => {
                    report.malformed += 1;
                    log::debug!("dropping datagram: {err}");
                }
            }
        });
        if let Err(err) = drained {
            report.transport_faults += 1;
            log::warn!("{err}; retrying on next tick");
        }
        if running {
            self.refresh_view();
            report.view_updated = true;
        }
        self.stats.absorb(&report);
        log::trace!("tick: {report:?}");
        report
    }
    fn refresh_view(&mut self) {
        let samples = window::select(self.ring.snapshot(), self.window.seconds());
        let dt = self.nominal_period_secs;
        let channels = (0..CHANNELS)
            .filter(|&ch| self.visible[ch])
            .filter_map(|ch| match series::build(&samples, ch, dt) {
                Ok(series) => Some(ChannelSeries { channel: ch, series }),
                Err(err) => {
                    log::debug!("skipping channel {ch}: {err}");
                    None
                }
            })
            .collect();
        self.view = ScopeView {
            newest_timestamp: self.ring.latest().map(|s| s.timestamp),
            window_seconds: self.window.seconds(),
            channels,
        };
    }
    pub fn apply(&mut self, command: ScopeCommand) -> Result<(), ScopeError> {
        match command {
            ScopeCommand::SetPaused(paused) => self.set_paused(paused),
            ScopeCommand::TogglePause => {
                self.toggle();
            }
            ScopeCommand::SetWindowDuration(seconds) => {
                self.set_window_duration(seconds);
            }
            ScopeCommand::SetChannelVisible(index, visible) => {
                self.set_channel_visible(index, visible)?
            }
            ScopeCommand::StartRecording(label) => {
                let dir = self.recording_dir.clone();
                self.start_recording(&dir, &label)?;
            }
            ScopeCommand::StopRecording => {
                self.stop_recording();
            }
            ScopeCommand::ClearHistory => self.clear(),
        }
        Ok(())
    }
    pub fn toggle(&mut self) -> PlaybackState {
        self.state = self.state.toggled();
        log::info!("playback {:?}", self.state);
        self.state
    }
    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.is_paused() {
            self.toggle();
        }
    }
    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }
    pub fn state(&self) -> PlaybackState {
        self.state
    }
    /// Returns the duration actually applied after clamping. Takes effect on the next running tick.
    pub fn set_window_duration(&mut self, seconds: f64) -> f64 {
        self.window = WindowSpec::new(seconds);
        self.window.seconds()
    }
    pub fn window(&self) -> WindowSpec {
        self.window
    }
    pub fn set_channel_visible(&mut self, index: usize, visible: bool) -> Result<(), ScopeError> {
        let slot = self
            .visible
            .get_mut(index)
            .ok_or(ScopeError::ChannelOutOfRange {
                index,
                channels: CHANNELS,
            })?;
        *slot = visible;
        Ok(())
    }
    pub fn is_channel_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }
    pub fn start_recording(&mut self, dir: &Path, label: &str) -> Result<PathBuf, ScopeError> {
        Ok(self.recorder.start(dir, label)?)
    }
    pub fn stop_recording(&mut self) -> Option<PathBuf> {
        self.recorder.stop()
    }
    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }
    /// Drops all history and the cached view; controls and stats are kept.
    pub fn clear(&mut self) {
        self.ring.clear();
        self.view = ScopeView {
            window_seconds: self.window.seconds(),
            ..ScopeView::default()
        };
    }
    pub fn ring(&self) -> &HistoryRing {
        &self.ring
    }
    pub fn view(&self) -> &ScopeView {
        &self.view
    }
    pub fn stats(&self) -> IngestStats {
        self.stats
    }
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
