// src/gui.rs
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use crate::config::ScopeConfig;
use crate::drivers::{
    render_view_png, DatagramSource, PlotStyle, StreamController, TickReport, CHANNELS,
    MAX_WINDOW_SECS, MIN_WINDOW_SECS,
};
use crate::types::*;

const CHANNEL_COLORS: [Color32; CHANNELS] = [
    Color32::from_rgb(255, 80, 80),
    Color32::from_rgb(80, 220, 80),
    Color32::from_rgb(90, 140, 255),
];

pub struct TelemetryScopeApp {
    controller: StreamController<Box<dyn DatagramSource>>,
    mode: SourceMode,
    tick_interval: Duration,
    last_tick: Option<Instant>,

    // 控件状态
    window_secs: f64,
    record_label: String,
    export_dir: PathBuf,

    last_report: TickReport,
    log_messages: Vec<String>,
}

impl TelemetryScopeApp {
    pub fn new(controller: StreamController<Box<dyn DatagramSource>>, config: &ScopeConfig) -> Self {
        let window_secs = controller.window().seconds();
        let source_line = match config.mode {
            SourceMode::Network => format!("Listening on {}", config.bind_addr),
            SourceMode::Simulation => "Simulated 3-phase source".to_owned(),
        };
        Self {
            controller,
            mode: config.mode,
            tick_interval: config.tick_interval(),
            last_tick: None,
            window_secs,
            record_label: "run".to_owned(),
            export_dir: config.recording_dir.clone(),
            last_report: TickReport::default(),
            log_messages: vec!["Telemetry Scope ready.".to_owned(), source_line],
        }
    }

    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > 8 {
            self.log_messages.remove(0);
        }
    }

    fn send(&mut self, cmd: ScopeCommand) {
        if let Err(err) = self.controller.apply(cmd) {
            log::warn!("command failed: {err}");
            self.log(&err.to_string());
        }
    }

    // 定时采集：每个 tick_interval 最多执行一次
    fn tick_if_due(&mut self) {
        let now = Instant::now();
        let due = self
            .last_tick
            .map_or(true, |t| now.duration_since(t) >= self.tick_interval);
        if !due {
            return;
        }
        self.last_tick = Some(now);
        let report = self.controller.tick();
        if report.transport_faults > 0 {
            self.log(&format!("{} transport fault(s), still listening", report.transport_faults));
        }
        self.last_report = report;
    }

    fn export_png(&mut self) {
        let png = match render_view_png(self.controller.view(), PlotStyle::default()) {
            Ok(png) => png,
            Err(err) => {
                self.log(&format!("Export failed: {err}"));
                return;
            }
        };
        let unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let path = self.export_dir.join(format!("scope_{unix}.png"));
        match fs::write(&path, png) {
            Ok(()) => {
                log::info!("exported view to {}", path.display());
                self.log(&format!("Saved {}", path.display()));
            }
            Err(err) => self.log(&format!("Export failed: {err}")),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(10.0);
        ui.heading("Telemetry Scope");
        ui.label(match self.mode {
            SourceMode::Network => "UDP stream",
            SourceMode::Simulation => "Simulation",
        });
        ui.separator();

        let pause_txt = if self.controller.is_paused() { "▶ RESUME" } else { "⏸ PAUSE" };
        ui.horizontal(|ui| {
            if ui.button(pause_txt).clicked() {
                self.send(ScopeCommand::TogglePause);
            }
            if ui.button("🔄 CLEAR").clicked() {
                self.send(ScopeCommand::ClearHistory);
            }
        });

        ui.add_space(10.0);
        let slider = egui::Slider::new(&mut self.window_secs, MIN_WINDOW_SECS..=MAX_WINDOW_SECS)
            .text("window (s)");
        if ui.add(slider).changed() {
            self.send(ScopeCommand::SetWindowDuration(self.window_secs));
        }

        ui.add_space(10.0);
        ui.label("CHANNELS");
        for (ch, color) in CHANNEL_COLORS.iter().enumerate() {
            let mut visible = self.controller.is_channel_visible(ch);
            let text = egui::RichText::new(format!("Ch{ch}")).color(*color);
            if ui.checkbox(&mut visible, text).changed() {
                self.send(ScopeCommand::SetChannelVisible(ch, visible));
            }
        }

        ui.add_space(20.0);
        ui.separator();
        ui.label("RECORDING");
        ui.text_edit_singleline(&mut self.record_label);
        let recording = self.controller.is_recording();
        let rec_txt = if recording { "⏹ STOP" } else { "🔴 RECORD" };
        let rec_col = if recording { Color32::RED } else { Color32::DARK_GRAY };
        if ui
            .add(egui::Button::new(egui::RichText::new(rec_txt).color(Color32::WHITE)).fill(rec_col))
            .clicked()
        {
            if recording {
                if let Some(path) = self.controller.stop_recording() {
                    self.log(&format!("Saved {}", path.display()));
                }
            } else {
                self.send(ScopeCommand::StartRecording(self.record_label.clone()));
            }
        }
        if ui.button("📷 EXPORT PNG").clicked() {
            self.export_png();
        }

        ui.add_space(20.0);
        ui.separator();
        let stats = self.controller.stats();
        ui.monospace(format!("received   {}", stats.datagrams));
        ui.monospace(format!("kept       {}", stats.appended));
        ui.monospace(format!("paused     {}", stats.discarded_paused));
        ui.monospace(format!("malformed  {}", stats.malformed));
        ui.monospace(format!("faults     {}", stats.transport_faults));
        ui.monospace(format!("last tick  {} dgram", self.last_report.datagrams));

        ui.add_space(10.0);
        egui::ScrollArea::vertical().max_height(120.0).show(ui, |ui| {
            for m in &self.log_messages {
                ui.monospace(m);
            }
        });
    }

    fn plot(&self, ui: &mut egui::Ui) {
        let view = self.controller.view();
        ui.horizontal(|ui| {
            match view.newest_timestamp {
                Some(t) => ui.label(format!("t = {t:.3} s")),
                None => ui.label("Waiting for data..."),
            };
            if self.controller.is_paused() {
                ui.label(egui::RichText::new("PAUSED").strong().color(Color32::YELLOW));
            }
        });

        let mut plot = Plot::new("telemetry_plot")
            .legend(Legend::default())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false);
        if let Some(newest) = view.newest_timestamp.filter(|t| t.is_finite()) {
            plot = plot
                .include_x(newest - view.window_seconds)
                .include_x(newest);
        }
        plot.show(ui, |plot_ui| {
            for cs in &view.channels {
                // 隐藏的通道即使在暂停时也不绘制
                if cs.series.is_empty() || !self.controller.is_channel_visible(cs.channel) {
                    continue;
                }
                let color = CHANNEL_COLORS[cs.channel % CHANNELS];
                plot_ui.line(
                    Line::new(PlotPoints::new(cs.series.stair_points()))
                        .name(format!("Ch{}", cs.channel))
                        .color(color),
                );
            }
        });
    }
}

impl eframe::App for TelemetryScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick_if_due();

        let mut visuals = egui::Visuals::dark();
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 10, 15);
        ctx.set_visuals(visuals);

        egui::SidePanel::left("controls")
            .min_width(240.0)
            .show(ctx, |ui| self.controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.plot(ui));

        ctx.request_repaint_after(self.tick_interval);
    }
}
