use super::command;
use super::fields::{bounded, settle};
use super::snapshot::GpuEntry;

pub const MAX_GPUS: usize = 256;

const AMD_NAME_OPEN: &str = "device_name: \"";
const AMD_NAME_CLOSE: &str = "\",";
const AMD_USED_MARKER: &str = ": usage";
const AMD_TOTAL_MARKER: &str = " total";

const NVIDIA_MARKER: &str = "NVIDIA";
const NVIDIA_SEPARATOR: &str = ", ";

/// Extracts the digits of `text` up to the first `terminator` and returns
/// them with the text following the terminator.
fn digits_until(text: &str, terminator: char) -> Option<(u64, &str)> {
    let end = text.find(terminator)?;
    let digits: String = text[..end].chars().filter(char::is_ascii_digit).collect();
    let value = digits.parse().ok()?;
    Some((value, &text[end + terminator.len_utf8()..]))
}

/// Device records in `amdgpu_top -d` output.
///
/// Each block holds `device_name: "<name>",`, later `: usage <used>,` and
/// then ` total <total> (` with sizes in MiB. A block that is cut short ends
/// the scan.
pub struct AmdgpuTopScanner<'a> {
    rest: &'a str,
}

impl<'a> AmdgpuTopScanner<'a> {
    pub fn new(output: &'a str) -> Self {
        Self { rest: output }
    }

    fn scan_block(&mut self) -> Option<GpuEntry> {
        let name_start = self.rest.find(AMD_NAME_OPEN)? + AMD_NAME_OPEN.len();
        let after_open = &self.rest[name_start..];
        let name_end = after_open.find(AMD_NAME_CLOSE)?;
        let name = &after_open[..name_end];

        let after_name = &after_open[name_end..];
        let used_start = after_name.find(AMD_USED_MARKER)? + AMD_USED_MARKER.len();
        let (used_mib, after_used) = digits_until(&after_name[used_start..], ',')?;

        let total_start = after_used.find(AMD_TOTAL_MARKER)? + AMD_TOTAL_MARKER.len();
        let (total_mib, after_total) = digits_until(&after_used[total_start..], '(')?;

        self.rest = after_total;
        Some(GpuEntry {
            name: bounded(name),
            used_mib,
            total_mib,
        })
    }
}

impl Iterator for AmdgpuTopScanner<'_> {
    type Item = GpuEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.scan_block();
        if entry.is_none() {
            self.rest = "";
        }
        entry
    }
}

/// Device records in `nvidia-smi --query-gpu=name,memory.used,memory.total`
/// output: `<name>, <used> MiB, <total> MiB`, where the name contains the
/// vendor marker.
pub struct NvidiaSmiScanner<'a> {
    rest: &'a str,
}

impl<'a> NvidiaSmiScanner<'a> {
    pub fn new(output: &'a str) -> Self {
        Self { rest: output }
    }

    fn scan_record(&mut self) -> Option<GpuEntry> {
        let name_start = self.rest.find(NVIDIA_MARKER)?;
        let from_name = &self.rest[name_start..];
        let name_end = from_name.find(NVIDIA_SEPARATOR)?;
        let name = &from_name[..name_end];

        let after_name = &from_name[name_end + NVIDIA_SEPARATOR.len()..];
        let (used_mib, after_used) = digits_until(after_name, 'M')?;
        let total_start = after_used.find(NVIDIA_SEPARATOR)? + NVIDIA_SEPARATOR.len();
        let (total_mib, after_total) = digits_until(&after_used[total_start..], 'M')?;

        self.rest = after_total;
        Some(GpuEntry {
            name: bounded(name),
            used_mib,
            total_mib,
        })
    }
}

impl Iterator for NvidiaSmiScanner<'_> {
    type Item = GpuEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.scan_record();
        if entry.is_none() {
            self.rest = "";
        }
        entry
    }
}

/// Merges records from both tools' output, in that order, up to `MAX_GPUS`.
pub fn scan_gpus(amdgpu_top: Option<&str>, nvidia_smi: Option<&str>) -> Vec<GpuEntry> {
    let mut gpus = Vec::new();
    if let Some(output) = amdgpu_top {
        push_capped(&mut gpus, AmdgpuTopScanner::new(output));
    }
    if let Some(output) = nvidia_smi {
        push_capped(&mut gpus, NvidiaSmiScanner::new(output));
    }
    gpus
}

fn push_capped(gpus: &mut Vec<GpuEntry>, records: impl Iterator<Item = GpuEntry>) {
    let room = MAX_GPUS.saturating_sub(gpus.len());
    gpus.extend(records.take(room));
}

/// Queries both vendor tools. Either may be absent; an empty command line
/// disables that tool.
pub fn enumerate_gpus(amdgpu_top: &[String], nvidia_smi: &[String]) -> Vec<GpuEntry> {
    let amd_output = tool_output("amdgpu_top", amdgpu_top);
    let nvidia_output = tool_output("nvidia_smi", nvidia_smi);
    let gpus = scan_gpus(amd_output.as_deref(), nvidia_output.as_deref());
    tracing::debug!(count = gpus.len(), "enumerated gpus");
    gpus
}

fn tool_output(tool: &'static str, argv: &[String]) -> Option<String> {
    if argv.is_empty() {
        return None;
    }
    let output = settle(tool, command::capture(argv))?;
    let text = output.to_text().into_owned();
    output.release();
    Some(text)
}
