use crate::config::SourcesConfig;

use super::cpu::CpuUsageTracker;
use super::disks::enumerate_disks;
use super::fields::{self, MemInfo};
use super::gpu::enumerate_gpus;
use super::snapshot::{DisplayFlags, SystemSnapshot};

/// Runs acquisition passes over a `SystemSnapshot`.
///
/// Holds the CPU tick baseline between passes, so one collector should feed
/// one snapshot. Not reentrant.
pub struct Collector {
    sources: SourcesConfig,
    cpu: CpuUsageTracker,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(SourcesConfig::default())
    }
}

impl Collector {
    pub fn new(sources: SourcesConfig) -> Self {
        Collector {
            sources,
            cpu: CpuUsageTracker::new(),
        }
    }

    /// A fresh snapshot with every field acquired once.
    pub fn snapshot(&mut self, flags: DisplayFlags) -> SystemSnapshot {
        let mut snapshot = SystemSnapshot {
            flags,
            ..SystemSnapshot::default()
        };
        self.full_pass(&mut snapshot);
        snapshot
    }

    pub fn full_pass(&mut self, snapshot: &mut SystemSnapshot) {
        let _span = tracing::debug_span!("collector.full_pass").entered();

        snapshot.user_name = fields::user_name();
        snapshot.host_name = fields::host_name();
        snapshot.datetime = fields::datetime();
        snapshot.os_name = fields::os_name(&self.sources.os_release);
        snapshot.kernel = fields::kernel_version();
        snapshot.desktop = fields::desktop();
        snapshot.shell = fields::shell();
        snapshot.terminal =
            fields::terminal(&self.sources.proc_root, self.sources.terminal_ancestor_depth);
        snapshot.cpu_model = fields::cpu_model(&self.sources.cpuinfo());
        snapshot.cpu_usage = self.cpu.read(&self.sources.stat());
        self.refresh_memory(snapshot);
        snapshot.disks = enumerate_disks(&self.sources.mounts(), &self.sources.disk_prefixes);
        snapshot.process_count = fields::process_count(&self.sources.process_list);
        snapshot.uptime_secs = fields::uptime(&self.sources.proc_root);
        snapshot.battery_percent = fields::battery(&self.sources.battery_capacity);
        snapshot.gpus = enumerate_gpus(&self.sources.amdgpu_top, &self.sources.nvidia_smi);
    }

    /// Re-acquires only the fields that change while running.
    pub fn dynamic_pass(&mut self, snapshot: &mut SystemSnapshot) {
        let _span = tracing::debug_span!("collector.dynamic_pass").entered();

        snapshot.datetime = fields::datetime();
        snapshot.cpu_usage = self.cpu.read(&self.sources.stat());
        self.refresh_memory(snapshot);
        snapshot.process_count = fields::process_count(&self.sources.process_list);
        snapshot.uptime_secs = fields::uptime(&self.sources.proc_root);
        snapshot.battery_percent = fields::battery(&self.sources.battery_capacity);
        snapshot.gpus = enumerate_gpus(&self.sources.amdgpu_top, &self.sources.nvidia_smi);
    }

    fn refresh_memory(&self, snapshot: &mut SystemSnapshot) {
        let meminfo = MemInfo::read(&self.sources.meminfo());
        snapshot.memory = meminfo.and_then(|info| info.memory());
        snapshot.swap = meminfo.and_then(|info| info.swap());
    }
}
