//! Label/value view of a snapshot shared by the TUI and the plain-text output.

use crate::format::{format_hms, format_percent};
use crate::system::snapshot::{SystemSnapshot, UNKNOWN};

pub const TITLE: &str = "orbfetch";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub label: &'static str,
    pub value: String,
}

impl StatLine {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| UNKNOWN.to_string())
}

fn shown<T>(value: Option<T>, render: impl FnOnce(T) -> String) -> String {
    value.map(render).unwrap_or_else(|| UNKNOWN.to_string())
}

/// `user@host`, each half falling back to the sentinel.
pub fn identity(snapshot: &SystemSnapshot) -> String {
    format!("{}@{}", text(&snapshot.user_name), text(&snapshot.host_name))
}

pub fn stat_lines(snapshot: &SystemSnapshot) -> Vec<StatLine> {
    let mut lines = vec![
        StatLine::new("Datetime", text(&snapshot.datetime)),
        StatLine::new("OS", text(&snapshot.os_name)),
        StatLine::new("Kernel", text(&snapshot.kernel)),
        StatLine::new("Desktop", text(&snapshot.desktop)),
        StatLine::new("Shell", text(&snapshot.shell)),
        StatLine::new("Terminal", text(&snapshot.terminal)),
        StatLine::new("CPU", text(&snapshot.cpu_model)),
        StatLine::new("CPU Usage", shown(snapshot.cpu_usage, format_percent)),
    ];

    if snapshot.flags.show_gpus {
        for gpu in &snapshot.gpus {
            lines.push(StatLine::new("GPU", gpu.name.clone()));
            lines.push(StatLine::new("GPU VRAM", gpu.vram_summary()));
        }
    }

    lines.push(StatLine::new("Memory", shown(snapshot.memory, |u| u.summary(2))));
    lines.push(StatLine::new("Swap", shown(snapshot.swap, |u| u.summary(2))));

    for disk in &snapshot.disks {
        lines.push(StatLine::new("Disk", disk.label()));
        if snapshot.flags.show_disk_usage {
            lines.push(StatLine::new("Disk Usage", disk.usage_summary()));
        }
    }

    lines.push(StatLine::new(
        "Processes",
        shown(snapshot.process_count, |count| count.to_string()),
    ));
    lines.push(StatLine::new("Uptime", shown(snapshot.uptime_secs, format_hms)));
    if let Some(percent) = snapshot.battery_percent {
        lines.push(StatLine::new("Battery", format!("{percent}%")));
    }
    lines
}

/// Width of the label column including the trailing colon.
pub const LABEL_WIDTH: usize = 11;

pub fn format_line(line: &StatLine) -> String {
    format!("{:<LABEL_WIDTH$} {}", format!("{}:", line.label), line.value)
}

/// The whole report as uncolored text, one line per row.
pub fn plain_text(snapshot: &SystemSnapshot) -> String {
    let identity = identity(snapshot);
    let mut out = format!("{TITLE}\n{identity}\n{}\n", "-".repeat(identity.chars().count()));
    for line in stat_lines(snapshot) {
        out.push_str(&format_line(&line));
        out.push('\n');
    }
    out
}
