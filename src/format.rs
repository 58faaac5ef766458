use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// `"<used>GB / <total>GB (<percent>%)"` with `decimals` places on both sizes.
pub fn format_gib_summary(
    used_bytes: u64,
    total_bytes: u64,
    decimals: usize,
    percent: u64,
) -> String {
    format!(
        "{:.*}GB / {:.*}GB ({}%)",
        decimals,
        used_bytes as f64 / BYTES_PER_GIB,
        decimals,
        total_bytes as f64 / BYTES_PER_GIB,
        percent
    )
}

/// Hours are not wrapped at 24.
pub fn format_hms(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", value.clamp(0.0, 100.0).round() as u64)
}
