use serde::Serialize;

use crate::format::format_gib_summary;

/// Text rendered in place of any field that could not be determined.
pub const UNKNOWN: &str = "Unknown";

const BYTES_PER_KIB: u64 = 1024;
const BYTES_PER_MIB: u64 = 1024 * 1024;

/// A used/total pair in bytes. Never constructed with a zero total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Usage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

impl Usage {
    pub fn new(used_bytes: u64, total_bytes: u64) -> Option<Self> {
        (total_bytes > 0 && used_bytes <= total_bytes).then_some(Usage {
            used_bytes,
            total_bytes,
        })
    }

    pub fn from_kib(used_kib: u64, total_kib: u64) -> Option<Self> {
        Self::new(
            used_kib.saturating_mul(BYTES_PER_KIB),
            total_kib.saturating_mul(BYTES_PER_KIB),
        )
    }

    pub fn from_mib(used_mib: u64, total_mib: u64) -> Option<Self> {
        Self::new(
            used_mib.saturating_mul(BYTES_PER_MIB),
            total_mib.saturating_mul(BYTES_PER_MIB),
        )
    }

    /// `round(100 * used / total)`.
    pub fn percent(&self) -> u64 {
        (self.used_bytes as f64 * 100.0 / self.total_bytes as f64).round() as u64
    }

    pub fn summary(&self, decimals: usize) -> String {
        format_gib_summary(self.used_bytes, self.total_bytes, decimals, self.percent())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskEntry {
    pub device: String,
    pub mount_point: String,
    pub usage: Option<Usage>,
}

impl DiskEntry {
    pub fn label(&self) -> String {
        format!("{} at {}", self.device, self.mount_point)
    }

    pub fn usage_summary(&self) -> String {
        self.usage
            .map(|usage| usage.summary(1))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpuEntry {
    pub name: String,
    pub used_mib: u64,
    pub total_mib: u64,
}

impl GpuEntry {
    pub fn used_gib(&self) -> f64 {
        self.used_mib as f64 / 1024.0
    }

    pub fn total_gib(&self) -> f64 {
        self.total_mib as f64 / 1024.0
    }

    pub fn vram(&self) -> Option<Usage> {
        Usage::from_mib(self.used_mib, self.total_mib)
    }

    pub fn vram_summary(&self) -> String {
        self.vram()
            .map(|usage| usage.summary(2))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

/// Presentation toggles carried alongside the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    pub show_disk_usage: bool,
    pub show_gpus: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        DisplayFlags {
            show_disk_usage: true,
            show_gpus: true,
        }
    }
}

/// Host state as of the last acquisition pass. `None` means unavailable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemSnapshot {
    pub user_name: Option<String>,
    pub host_name: Option<String>,
    pub datetime: Option<String>,
    pub os_name: Option<String>,
    pub kernel: Option<String>,
    pub desktop: Option<String>,
    pub shell: Option<String>,
    pub terminal: Option<String>,
    pub cpu_model: Option<String>,
    pub cpu_usage: Option<f64>,
    pub memory: Option<Usage>,
    pub swap: Option<Usage>,
    pub process_count: Option<usize>,
    pub uptime_secs: Option<u64>,
    pub battery_percent: Option<u8>,
    pub disks: Vec<DiskEntry>,
    pub gpus: Vec<GpuEntry>,
    #[serde(skip)]
    pub flags: DisplayFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_rejects_zero_total() {
        assert!(Usage::new(0, 0).is_none());
        assert!(Usage::new(5, 0).is_none());
        assert!(Usage::new(11, 10).is_none());
    }

    #[test]
    fn usage_percent_rounds() {
        assert_eq!(Usage::new(1, 3).unwrap().percent(), 33);
        assert_eq!(Usage::new(2, 3).unwrap().percent(), 67);
        assert_eq!(Usage::new(1, 200).unwrap().percent(), 1);
        assert_eq!(Usage::new(10, 10).unwrap().percent(), 100);
    }

    #[test]
    fn memory_summary_matches_reference_host() {
        let usage = Usage::from_kib(8_000_000, 16_000_000).unwrap();
        assert_eq!(usage.summary(2), "7.63GB / 15.26GB (50%)");
    }

    #[test]
    fn disk_entry_without_usage_renders_unknown() {
        let disk = DiskEntry {
            device: "/dev/sda1".to_string(),
            mount_point: "/".to_string(),
            usage: None,
        };
        assert_eq!(disk.label(), "/dev/sda1 at /");
        assert_eq!(disk.usage_summary(), UNKNOWN);
    }

    #[test]
    fn gpu_summary_converts_mib() {
        let gpu = GpuEntry {
            name: "Radeon".to_string(),
            used_mib: 2048,
            total_mib: 8192,
        };
        assert!((gpu.used_gib() - 2.0).abs() < 0.01);
        assert_eq!(gpu.vram_summary(), "2.00GB / 8.00GB (25%)");
    }

    #[test]
    fn default_snapshot_is_all_unavailable() {
        let snapshot = SystemSnapshot::default();
        assert!(snapshot.os_name.is_none());
        assert!(snapshot.disks.is_empty());
        assert!(snapshot.flags.show_disk_usage);
    }
}
