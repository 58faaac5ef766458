use std::path::Path;

use sysinfo::{Disks, System};

use super::{FsStats, KernelIdentity, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn filesystem_stats(path: &Path) -> Option<FsStats> {
        // Only available space is exposed here, so reserved blocks count as used.
        let disks = Disks::new_with_refreshed_list();
        let disk = disks.list().iter().find(|disk| disk.mount_point() == path)?;
        Some(FsStats {
            total_bytes: disk.total_space(),
            free_bytes: disk.available_space(),
        })
    }

    fn kernel_identity() -> Option<KernelIdentity> {
        Some(KernelIdentity {
            sysname: System::name()?,
            release: System::kernel_version()?,
        })
    }
}
