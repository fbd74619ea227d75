// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod config;
mod drivers;
mod gui;
mod recorder;
mod types;
use anyhow::{anyhow, Context, Result};
use eframe::egui;
use crate::config::ScopeConfig;
use crate::drivers::{DatagramSource, SimulatedSource, StreamController, UdpSource};
use crate::types::SourceMode;

fn open_source(config: &ScopeConfig) -> Result<Box<dyn DatagramSource>> {
    let source: Box<dyn DatagramSource> = match config.mode {
        SourceMode::Network => Box::new(
            UdpSource::bind(&config.bind_addr)
                .with_context(|| format!("cannot listen on {}", config.bind_addr))?,
        ),
        SourceMode::Simulation => {
            log::info!("using simulated source at {} s period", config.nominal_period_secs);
            Box::new(SimulatedSource::new(config.nominal_period_secs))
        }
    };
    Ok(source)
}

// 入口函数
fn main() -> Result<()> {
    env_logger::init();
    let config = ScopeConfig::resolve()?;
    let source = open_source(&config)?;
    let controller = StreamController::new(source, &config).context("invalid configuration")?;

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 720.0])
        .with_min_inner_size([800.0, 480.0])
        .with_title("Telemetry Scope");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "telemetry-scope",
        options,
        Box::new(move |_cc| Box::new(gui::TelemetryScopeApp::new(controller, &config))),
    )
    .map_err(|e| anyhow!("window closed with error: {e}"))
}
