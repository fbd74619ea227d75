use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use crate::drivers::{Sample, CHANNELS};

/// CSV sink for samples as they enter the history ring.
pub struct SampleRecorder {
    writer: Option<BufWriter<File>>,
    path: Option<PathBuf>,
    rows: u64,
}

impl SampleRecorder {
    pub fn new() -> Self {
        Self { writer: None, path: None, rows: 0 }
    }

    /// Opens `telemetry_<label>_<unix secs>.csv` under `dir` and writes the header.
    pub fn start(&mut self, dir: &Path, label: &str) -> io::Result<PathBuf> {
        self.stop();
        let unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let path = dir.join(format!("telemetry_{}_{}.csv", sanitize(label), unix));
        let mut w = BufWriter::new(File::create(&path)?);
        write!(w, "timestamp")?;
        for ch in 0..CHANNELS {
            write!(w, ",ch{ch}")?;
        }
        writeln!(w)?;
        log::info!("recording samples to {}", path.display());
        self.writer = Some(w);
        self.path = Some(path.clone());
        self.rows = 0;
        Ok(path)
    }

    /// Flushes and closes the file; returns where it was written.
    pub fn stop(&mut self) -> Option<PathBuf> {
        let mut w = self.writer.take()?;
        if let Err(err) = w.flush() {
            log::warn!("failed to flush recording: {err}");
        }
        let path = self.path.take();
        if let Some(p) = &path {
            log::info!("recording saved: {} ({} rows)", p.display(), self.rows);
        }
        path
    }

    pub fn record(&mut self, sample: &Sample) {
        let Some(w) = &mut self.writer else {
            return;
        };
        if let Err(err) = write_row(w, sample) {
            // 磁盘写满等情况：停止录制，不影响采集
            log::warn!("recording stopped after write failure: {err}");
            self.writer = None;
            self.path = None;
            return;
        }
        self.rows += 1;
    }

    pub fn is_recording(&self) -> bool {
        self.writer.is_some()
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }
}

impl Default for SampleRecorder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_row(w: &mut impl Write, sample: &Sample) -> io::Result<()> {
    write!(w, "{}", sample.timestamp)?;
    for v in sample.channels {
        write!(w, ",{v}")?;
    }
    writeln!(w)
}

fn sanitize(label: &str) -> String {
    let cleaned: String = label
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "session".to_owned()
    } else {
        cleaned
    }
}
