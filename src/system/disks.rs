use std::fs::File;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

use super::buffer::GrowableBuffer;
use super::fields::settle;
use super::platform;
use super::snapshot::{DiskEntry, Usage};

pub const MAX_DISKS: usize = 256;

pub const DEFAULT_DISK_PREFIXES: [&str; 5] =
    ["/dev/sd", "/dev/nvme", "/dev/vd", "/dev/mmcblk", "/dev/mapper/"];

/// Device and mount point as they appear in the mount table, escapes intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountMatch<'a> {
    pub device: &'a str,
    pub mount_point: &'a str,
}

/// Yields mount-table entries whose device starts with one of `prefixes`.
pub struct MountScanner<'a> {
    lines: std::str::Lines<'a>,
    prefixes: &'a [String],
}

impl<'a> MountScanner<'a> {
    pub fn new(table: &'a str, prefixes: &'a [String]) -> Self {
        Self {
            lines: table.lines(),
            prefixes,
        }
    }
}

impl<'a> Iterator for MountScanner<'a> {
    type Item = MountMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let recognized = self
                .prefixes
                .iter()
                .any(|prefix| !prefix.is_empty() && line.starts_with(prefix.as_str()));
            if recognized && let Some(found) = parse_mount_line(line) {
                return Some(found);
            }
        }
        None
    }
}

/// The device runs to the first space not preceded by a backslash; the
/// mount point is the next space-delimited token that starts with `/`.
pub fn parse_mount_line(line: &str) -> Option<MountMatch<'_>> {
    let bytes = line.as_bytes();
    let device_end =
        (0..bytes.len()).find(|&i| bytes[i] == b' ' && (i == 0 || bytes[i - 1] != b'\\'))?;
    let device = &line[..device_end];
    if device.is_empty() {
        return None;
    }

    let rest = &line[device_end..];
    let start = rest.find(" /")? + 1;
    let token = &rest[start..];
    let end = token.find(' ').unwrap_or(token.len());
    Some(MountMatch {
        device,
        mount_point: &token[..end],
    })
}

/// Decodes the `\NNN` octal escapes the kernel uses for whitespace in paths.
pub fn unescape_mount_path(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && i + 3 < bytes.len()
            && let Some(decoded) = decode_octal(&bytes[i + 1..i + 4])
        {
            out.push(decoded);
            i += 4;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn decode_octal(digits: &[u8]) -> Option<u8> {
    if digits.len() != 3 || !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
        return None;
    }
    let text = std::str::from_utf8(digits).ok()?;
    u8::from_str_radix(text, 8).ok()
}

/// Scans the mount table at `mounts` and queries each matching filesystem.
///
/// A mount point whose statistics cannot be read keeps its device and mount
/// point from the table but an unknown usage; the scan continues with the
/// next entry.
pub fn enumerate_disks(mounts: &Path, prefixes: &[String]) -> Vec<DiskEntry> {
    let Some(table) = settle("disks", read_mount_table(mounts)) else {
        return Vec::new();
    };

    let text = table.to_text();
    let disks: Vec<DiskEntry> = MountScanner::new(&text, prefixes)
        .take(MAX_DISKS)
        .map(|found| DiskEntry {
            device: found.device.to_string(),
            mount_point: found.mount_point.to_string(),
            usage: filesystem_usage(&unescape_mount_path(found.mount_point)),
        })
        .collect();
    drop(text);
    table.release();

    tracing::debug!(count = disks.len(), "enumerated disks");
    disks
}

fn read_mount_table(mounts: &Path) -> Result<GrowableBuffer> {
    let file = File::open(mounts).wrap_err_with(|| format!("failed to open {}", mounts.display()))?;
    GrowableBuffer::read_from(file)
}

fn filesystem_usage(mount_point: &str) -> Option<Usage> {
    let Some(stats) = platform::filesystem_stats(Path::new(mount_point)) else {
        tracing::debug!(mount_point, "filesystem statistics unavailable");
        return None;
    };
    Usage::new(
        stats.total_bytes.saturating_sub(stats.free_bytes),
        stats.total_bytes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        DEFAULT_DISK_PREFIXES.iter().map(|p| p.to_string()).collect()
    }

    const TABLE: &str = "\
/dev/nvme0n1p2 / ext4 rw,relatime 0 0
proc /proc proc rw,nosuid,nodev,noexec,relatime 0 0
tmpfs /run tmpfs rw,nosuid,nodev 0 0
/dev/sda1 /mnt/My\\040Files vfat rw 0 0
/dev/sdb1 /data xfs rw 0 0
";

    #[test]
    fn scanner_yields_recognized_devices_in_order() {
        let prefixes = prefixes();
        let found: Vec<_> = MountScanner::new(TABLE, &prefixes).collect();
        assert_eq!(
            found,
            vec![
                MountMatch { device: "/dev/nvme0n1p2", mount_point: "/" },
                MountMatch { device: "/dev/sda1", mount_point: "/mnt/My\\040Files" },
                MountMatch { device: "/dev/sdb1", mount_point: "/data" },
            ]
        );
    }

    #[test]
    fn scanner_respects_custom_prefixes() {
        let prefixes = vec!["/dev/sd".to_string()];
        assert_eq!(MountScanner::new(TABLE, &prefixes).count(), 2);
        assert_eq!(MountScanner::new(TABLE, &[]).count(), 0);
    }

    #[test]
    fn device_with_escaped_space_is_kept_whole() {
        let found = parse_mount_line("/dev/sdc1\\040x /media/usb ext4 rw 0 0").unwrap();
        assert_eq!(found.device, "/dev/sdc1\\040x");
        assert_eq!(found.mount_point, "/media/usb");
    }

    #[test]
    fn line_without_mount_point_is_skipped() {
        assert!(parse_mount_line("/dev/sda1").is_none());
        assert!(parse_mount_line("/dev/sda1 relative ext4").is_none());
    }

    #[test]
    fn unescapes_octal_sequences() {
        assert_eq!(unescape_mount_path("/mnt/My\\040Files"), "/mnt/My Files");
        assert_eq!(unescape_mount_path("/a\\011b"), "/a\tb");
        assert_eq!(unescape_mount_path("/plain\\9xy"), "/plain\\9xy");
        assert_eq!(unescape_mount_path("/tail\\04"), "/tail\\04");
    }

    #[test]
    fn missing_mount_table_yields_no_disks() {
        assert!(enumerate_disks(Path::new("/nonexistent/mounts"), &prefixes()).is_empty());
    }
}
