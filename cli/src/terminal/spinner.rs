use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner currently on screen, if any. Log lines are printed around it.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// A running spinner. Cleared from the terminal when dropped.
pub struct Spinner {
    pb: ProgressBar,
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
        if let Ok(mut active) = ACTIVE.lock() {
            *active = None;
        }
    }
}

/// Starts a spinner showing `msg`. Nothing is drawn when `q_level > 0`.
pub fn start(msg: impl Into<Cow<'static, str>>, q_level: u8) -> Spinner {
    if q_level > 0 {
        return Spinner {
            pb: ProgressBar::hidden(),
        };
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .map(|style| {
            style.tick_strings(&[
                "▁▁▁▁▁",
                "▁▂▂▂▁",
                "▁▄▂▄▁",
                "▂▄▆▄▂",
                "▄▆█▆▄",
                "▂▄▆▄▂",
                "▁▄▂▄▁",
                "▁▂▂▂▁",
            ])
        })
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    pb.set_style(style);
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));

    if let Ok(mut active) = ACTIVE.lock() {
        *active = Some(pb.clone());
    }
    Spinner { pb }
}

/// Log sink that keeps the active spinner intact.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let active = ACTIVE.lock().ok().and_then(|active| active.clone());
        match active {
            Some(pb) => pb.suspend(|| io::stderr().write_all(buf))?,
            None => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
