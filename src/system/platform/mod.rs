use std::path::Path;

/// Block counts from a filesystem statistics query, in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FsStats {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KernelIdentity {
    pub sysname: String,
    pub release: String,
}

pub trait PlatformExtensions {
    fn filesystem_stats(path: &Path) -> Option<FsStats>;
    fn kernel_identity() -> Option<KernelIdentity>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod fallback;

#[cfg(not(target_os = "linux"))]
use fallback as platform_impl;
#[cfg(target_os = "linux")]
use linux as platform_impl;

pub fn filesystem_stats(path: &Path) -> Option<FsStats> {
    platform_impl::Platform::filesystem_stats(path)
}

pub fn kernel_identity() -> Option<KernelIdentity> {
    platform_impl::Platform::kernel_identity()
}
