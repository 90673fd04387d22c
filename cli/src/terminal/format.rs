use std::path::Path;
use std::time::Duration;

use colored::*;
use scansheet_core::merge::Capability;

use crate::terminal::colors;

pub fn count(n: usize) -> ColoredString {
    n.to_string().color(colors::ACCENT).bold()
}

/// Like [`count`], but zero is good news and anything else is worth a look.
pub fn problem_count(n: usize) -> ColoredString {
    match n {
        0 => "0".color(colors::GOOD),
        _ => n.to_string().color(colors::DEGRADED).bold(),
    }
}

pub fn capability(capability: Capability) -> ColoredString {
    match capability {
        Capability::Supported => "applied".color(colors::GOOD),
        Capability::Degraded => "partial".color(colors::DEGRADED),
        Capability::Absent => "skipped".color(colors::BAD),
    }
}

pub fn elapsed(duration: Duration) -> ColoredString {
    format!("{:.2}s", duration.as_secs_f64()).bold().yellow()
}

pub fn path(path: &Path) -> ColoredString {
    path.display().to_string().color(colors::PRIMARY)
}
