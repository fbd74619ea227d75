use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::drivers::{ScopeError, WindowSpec, CHANNELS, RECORD_BYTES};
use crate::types::SourceMode;
/// Environment variable consulted when no config path is given on the command line.
pub const CONFIG_ENV: &str = "TELEMETRY_SCOPE_CONFIG";
/// Runtime settings, loaded from JSON. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub mode: SourceMode,
    pub bind_addr: String,
    /// Retained samples. Size it to cover the longest window at the sender's rate,
    /// otherwise long windows silently show less history.
    pub history_capacity: usize,
    pub window_seconds: f64,
    /// Sampling period assumed when a step needs a width and the window can't supply one.
    pub nominal_period_secs: f64,
    pub tick_interval_ms: u64,
    pub recv_buffer_bytes: usize,
    pub visible_channels: [bool; CHANNELS],
    pub start_paused: bool,
    pub recording_dir: PathBuf,
}
impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::Network,
            bind_addr: "0.0.0.0:5005".to_owned(),
            history_capacity: 1000,
            window_seconds: WindowSpec::default().seconds(),
            nominal_period_secs: 0.02,
            tick_interval_ms: 20,
            recv_buffer_bytes: 2048,
            visible_channels: [true; CHANNELS],
            start_paused: false,
            recording_dir: PathBuf::from("."),
        }
    }
}
impl ScopeConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ScopeError> {
        let mut config: ScopeConfig =
            serde_json::from_str(text).map_err(|e| ScopeError::InvalidConfig(e.to_string()))?;
        config.window_seconds = WindowSpec::new(config.window_seconds).seconds();
        config.validate()?;
        Ok(config)
    }
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("failed to load config file {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
    /// First CLI argument, then `$TELEMETRY_SCOPE_CONFIG`, then built-in defaults.
    pub fn resolve() -> Result<Self> {
        let path = std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV))
            .map(PathBuf::from);
        match path {
            Some(path) => Self::load(&path),
            None => {
                log::info!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }
    pub fn validate(&self) -> Result<(), ScopeError> {
        if self.history_capacity == 0 {
            return Err(ScopeError::InvalidCapacity);
        }
        if !(self.nominal_period_secs.is_finite() && self.nominal_period_secs > 0.0) {
            return Err(ScopeError::InvalidConfig(format!(
                "nominal_period_secs must be positive, got {}",
                self.nominal_period_secs
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ScopeError::InvalidConfig(
                "tick_interval_ms must be greater than zero".into(),
            ));
        }
        // A buffer of exactly RECORD_BYTES would truncate oversize datagrams into valid ones.
        if self.recv_buffer_bytes <= RECORD_BYTES {
            return Err(ScopeError::InvalidConfig(format!(
                "recv_buffer_bytes must exceed the {RECORD_BYTES} byte record, got {}",
                self.recv_buffer_bytes
            )));
        }
        Ok(())
    }
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
