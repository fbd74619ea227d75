// src/types.rs
use serde::{Deserialize, Serialize};

// 数据来源
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    #[default]
    Network,
    Simulation,
}

// GUI 发给采集控制器的命令
#[derive(Clone, Debug, PartialEq)]
pub enum ScopeCommand {
    SetPaused(bool),
    TogglePause,
    SetWindowDuration(f64),
    SetChannelVisible(usize, bool),
    StartRecording(String),
    StopRecording,
    ClearHistory,
}
