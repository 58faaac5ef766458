//! Scalar field extractors.
//!
//! Every public extractor reads one external source and returns `None`
//! instead of failing. The `parse_*` functions are pure and operate on the
//! text already read, so they can be exercised without a live `/proc`.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, eyre};
use sysinfo::System;

use super::command;
use super::platform;
use super::snapshot::Usage;

/// Longest text value kept for a single field, in characters.
pub const FIELD_LIMIT: usize = 255;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const OS_RELEASE_KEY: &str = "PRETTY_NAME=";
const CPU_MODEL_KEY: &str = "model name";

/// Collapses an extraction result to an optional value, logging why a field
/// is unavailable.
pub(crate) fn settle<T>(field: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(field, error = %format!("{err:#}"), "field unavailable");
            None
        }
    }
}

pub(crate) fn bounded(text: &str) -> String {
    match text.char_indices().nth(FIELD_LIMIT) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| bounded(&v))
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}

pub fn user_name() -> Option<String> {
    non_empty(std::env::var("USER").ok())
}

pub fn host_name() -> Option<String> {
    non_empty(System::host_name())
}

pub fn datetime() -> Option<String> {
    Some(chrono::Local::now().format(DATETIME_FORMAT).to_string())
}

pub fn os_name(os_release: &Path) -> Option<String> {
    settle(
        "os_name",
        read_source(os_release).and_then(|content| parse_os_release(&content)),
    )
}

/// Value of the first `PRETTY_NAME=` line with one layer of quotes removed.
pub fn parse_os_release(content: &str) -> Result<String> {
    let raw = content
        .lines()
        .find_map(|line| line.strip_prefix(OS_RELEASE_KEY))
        .ok_or_else(|| eyre!("no {OS_RELEASE_KEY} line"))?
        .trim_end();

    let value = raw
        .strip_prefix('"')
        .or_else(|| raw.strip_prefix('\''))
        .unwrap_or(raw);
    let value = value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value);

    if value.is_empty() {
        return Err(eyre!("empty {OS_RELEASE_KEY} value"));
    }
    Ok(bounded(value))
}

pub fn kernel_version() -> Option<String> {
    let identity = platform::kernel_identity()?;
    Some(bounded(&format!("{}-{}", identity.sysname, identity.release)))
}

pub fn desktop() -> Option<String> {
    desktop_session(
        std::env::var("XDG_SESSION_DESKTOP").ok().as_deref(),
        std::env::var("XDG_SESSION_TYPE").ok().as_deref(),
    )
}

/// `"name (type)"`; both halves are required.
pub fn desktop_session(desktop: Option<&str>, session_type: Option<&str>) -> Option<String> {
    match (desktop, session_type) {
        (Some(desktop), Some(session_type)) => {
            Some(bounded(&format!("{desktop} ({session_type})")))
        }
        _ => None,
    }
}

pub fn shell() -> Option<String> {
    std::env::var("SHELL").ok().as_deref().and_then(shell_basename)
}

pub fn shell_basename(path: &str) -> Option<String> {
    let name = path.trim().rsplit('/').next()?;
    (!name.is_empty()).then(|| bounded(name))
}

/// Command name of the process `ancestor_depth` parents above this one.
///
/// Depth 2 skips the shell that launched us and lands on the terminal
/// emulator in the common case.
pub fn terminal(proc_root: &Path, ancestor_depth: usize) -> Option<String> {
    settle("terminal", read_terminal(proc_root, ancestor_depth))
}

fn read_terminal(proc_root: &Path, ancestor_depth: usize) -> Result<String> {
    let mut pid = "self".to_string();
    for _ in 0..ancestor_depth {
        let stat = read_source(&proc_root.join(&pid).join("stat"))?;
        pid = parse_parent_pid(&stat)?.to_string();
    }
    let comm = read_source(&proc_root.join(&pid).join("comm"))?;
    let comm = comm.trim_end();
    if comm.is_empty() {
        return Err(eyre!("empty comm for pid {pid}"));
    }
    Ok(bounded(comm))
}

/// Fourth field of `/proc/<pid>/stat`. The command name may contain spaces
/// and parentheses, so fields are counted from the last `)`.
pub fn parse_parent_pid(stat: &str) -> Result<u32> {
    let after_comm = stat
        .rfind(')')
        .map(|idx| &stat[idx + 1..])
        .ok_or_else(|| eyre!("stat record has no command name"))?;
    let ppid: u32 = after_comm
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| eyre!("stat record has no ppid"))?
        .parse()
        .wrap_err("ppid is not numeric")?;
    if ppid == 0 {
        return Err(eyre!("process has no parent"));
    }
    Ok(ppid)
}

pub fn cpu_model(cpuinfo: &Path) -> Option<String> {
    settle(
        "cpu_model",
        read_source(cpuinfo).and_then(|content| parse_cpu_model(&content)),
    )
}

pub fn parse_cpu_model(content: &str) -> Result<String> {
    let line = content
        .lines()
        .find(|line| line.starts_with(CPU_MODEL_KEY))
        .ok_or_else(|| eyre!("no {CPU_MODEL_KEY} line"))?;
    let (_, model) = line
        .split_once(": ")
        .ok_or_else(|| eyre!("{CPU_MODEL_KEY} line has no value"))?;
    let model = model.trim_end();
    if model.is_empty() {
        return Err(eyre!("empty {CPU_MODEL_KEY}"));
    }
    Ok(bounded(model))
}

/// The `/proc/meminfo` counters we care about, in kB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total: Option<u64>,
    pub mem_available: Option<u64>,
    pub swap_total: Option<u64>,
    pub swap_free: Option<u64>,
}

impl MemInfo {
    pub fn read(meminfo: &Path) -> Option<Self> {
        settle("meminfo", read_source(meminfo).map(|content| parse_meminfo(&content)))
    }

    /// used = MemTotal - MemAvailable.
    pub fn memory(&self) -> Option<Usage> {
        let total = self.mem_total?;
        let available = self.mem_available?;
        Usage::from_kib(total.checked_sub(available)?, total)
    }

    /// used = SwapTotal - SwapFree. A host without swap has no usage.
    pub fn swap(&self) -> Option<Usage> {
        let total = self.swap_total?;
        let free = self.swap_free?;
        Usage::from_kib(total.checked_sub(free)?, total)
    }
}

pub fn parse_meminfo(content: &str) -> MemInfo {
    let mut info = MemInfo::default();
    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let slot = match key.trim() {
            "MemTotal" => &mut info.mem_total,
            "MemAvailable" => &mut info.mem_available,
            "SwapTotal" => &mut info.swap_total,
            "SwapFree" => &mut info.swap_free,
            _ => continue,
        };
        if slot.is_none() {
            *slot = rest
                .split_whitespace()
                .next()
                .and_then(|value| value.parse().ok());
        }
    }
    info
}

/// Number of lines the process listing printed, header included.
pub fn process_count(process_list: &[String]) -> Option<usize> {
    settle("process_count", read_process_count(process_list))
}

fn read_process_count(process_list: &[String]) -> Result<usize> {
    let output = command::capture(process_list)?;
    let lines = count_lines(output.as_bytes());
    output.release();
    if lines == 0 {
        return Err(eyre!("process listing printed nothing"));
    }
    Ok(lines)
}

/// Counts newline-terminated lines plus a trailing unterminated one.
pub fn count_lines(output: &[u8]) -> usize {
    let newlines = output.iter().filter(|&&b| b == b'\n').count();
    match output.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

pub fn uptime(proc_root: &Path) -> Option<u64> {
    settle(
        "uptime",
        read_source(&proc_root.join("uptime")).and_then(|content| parse_uptime(&content)),
    )
}

/// Whole seconds from the first field of `/proc/uptime`.
pub fn parse_uptime(content: &str) -> Result<u64> {
    let seconds: f64 = content
        .split_whitespace()
        .next()
        .ok_or_else(|| eyre!("empty uptime"))?
        .parse()
        .wrap_err("uptime is not numeric")?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(eyre!("uptime out of range: {seconds}"));
    }
    Ok(seconds as u64)
}

pub fn battery(capacity: &Path) -> Option<u8> {
    settle(
        "battery",
        read_source(capacity).and_then(|content| parse_battery(&content)),
    )
}

pub fn parse_battery(content: &str) -> Result<u8> {
    content
        .trim()
        .parse()
        .wrap_err_with(|| format!("battery capacity is not an integer: {:?}", content.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_release_strips_double_quotes() {
        let content = "NAME=\"Test\"\nPRETTY_NAME=\"Test OS 1.0\"\nID=test\n";
        assert_eq!(parse_os_release(content).unwrap(), "Test OS 1.0");
    }

    #[test]
    fn os_release_accepts_unquoted_and_single_quoted() {
        assert_eq!(parse_os_release("PRETTY_NAME=Plain\n").unwrap(), "Plain");
        assert_eq!(parse_os_release("PRETTY_NAME='Single OS'").unwrap(), "Single OS");
    }

    #[test]
    fn os_release_uses_first_match_and_rejects_missing_key() {
        let content = "PRETTY_NAME=\"First\"\nPRETTY_NAME=\"Second\"\n";
        assert_eq!(parse_os_release(content).unwrap(), "First");
        assert!(parse_os_release("NAME=\"Only\"\n").is_err());
        assert!(parse_os_release("PRETTY_NAME=\"\"\n").is_err());
    }

    #[test]
    fn missing_os_release_is_unavailable() {
        assert!(os_name(Path::new("/nonexistent/os-release")).is_none());
    }

    #[test]
    fn desktop_needs_both_halves() {
        assert_eq!(
            desktop_session(Some("KDE"), Some("wayland")).as_deref(),
            Some("KDE (wayland)")
        );
        assert!(desktop_session(Some("KDE"), None).is_none());
        assert!(desktop_session(None, Some("x11")).is_none());
    }

    #[test]
    fn shell_basename_takes_last_segment() {
        assert_eq!(shell_basename("/usr/bin/zsh").as_deref(), Some("zsh"));
        assert_eq!(shell_basename("fish").as_deref(), Some("fish"));
        assert!(shell_basename("/bin/").is_none());
        assert!(shell_basename("").is_none());
    }

    #[test]
    fn parent_pid_survives_odd_command_names() {
        let stat = "4242 (my (weird) proc) S 1337 4242 4242 0 -1 4194560";
        assert_eq!(parse_parent_pid(stat).unwrap(), 1337);
        assert!(parse_parent_pid("1 (init) S 0 1 1").is_err());
        assert!(parse_parent_pid("garbage").is_err());
    }

    #[test]
    fn cpu_model_splits_on_first_separator() {
        let content = "processor\t: 0\n\
                       vendor_id\t: GenuineIntel\n\
                       model name\t: Intel(R) Core(TM) i7: 3.2GHz\n";
        assert_eq!(
            parse_cpu_model(content).unwrap(),
            "Intel(R) Core(TM) i7: 3.2GHz"
        );
        assert!(parse_cpu_model("processor\t: 0\n").is_err());
    }

    #[test]
    fn meminfo_reference_host() {
        let info = parse_meminfo(
            "MemTotal:  16000000 kB\nMemFree: 1000 kB\nMemAvailable: 8000000 kB\n",
        );
        let memory = info.memory().unwrap();
        assert_eq!(memory.summary(2), "7.63GB / 15.26GB (50%)");
        assert_eq!(memory.used_bytes + 8_000_000 * 1024, memory.total_bytes);
        assert!(info.swap().is_none());
    }

    #[test]
    fn meminfo_zero_total_does_not_divide() {
        let info = parse_meminfo("SwapTotal: 0 kB\nSwapFree: 0 kB\n");
        assert_eq!(info.swap_total, Some(0));
        assert!(info.swap().is_none());
    }

    #[test]
    fn swap_fully_used_is_reported() {
        let info = parse_meminfo("SwapTotal: 2097152 kB\nSwapFree: 0 kB\n");
        assert_eq!(info.swap().unwrap().summary(2), "2.00GB / 2.00GB (100%)");
    }

    #[test]
    fn available_above_total_is_malformed() {
        let info = parse_meminfo("MemTotal: 100 kB\nMemAvailable: 200 kB\n");
        assert!(info.memory().is_none());
    }

    #[test]
    fn count_lines_matches_wc() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"USER PID\nroot 1\n"), 2);
        assert_eq!(count_lines(b"USER PID\nroot 1"), 2);
    }

    #[test]
    fn uptime_truncates_fraction() {
        assert_eq!(parse_uptime("3725.99 12000.00\n").unwrap(), 3725);
        assert!(parse_uptime("").is_err());
        assert!(parse_uptime("-4 1").is_err());
    }

    #[test]
    fn battery_reads_integer() {
        assert_eq!(parse_battery("87\n").unwrap(), 87);
        assert!(parse_battery("full\n").is_err());
        assert!(battery(Path::new("/nonexistent/BAT0/capacity")).is_none());
    }

    #[test]
    fn long_values_are_bounded() {
        let long = "x".repeat(FIELD_LIMIT + 40);
        assert_eq!(bounded(&long).chars().count(), FIELD_LIMIT);
        assert_eq!(bounded("short"), "short");
    }

    #[test]
    fn datetime_has_fixed_shape() {
        let now = datetime().unwrap();
        assert_eq!(now.len(), "YYYY-MM-DD HH:MM:SS".len());
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], " ");
    }

    #[test]
    fn missing_process_lister_is_unavailable() {
        let argv = vec!["orbfetch-no-such-binary".to_string()];
        assert!(process_count(&argv).is_none());
        assert!(process_count(&[]).is_none());
    }
}
