use std::ffi::CString;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use super::{FsStats, KernelIdentity, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn filesystem_stats(path: &Path) -> Option<FsStats> {
        let c_path = CString::new(path.as_os_str().as_bytes()).ok()?;
        let mut data = MaybeUninit::<libc::statvfs>::zeroed();
        // SAFETY: c_path is NUL-terminated and data points to a statvfs-sized buffer.
        let rc = unsafe { libc::statvfs(c_path.as_ptr(), data.as_mut_ptr()) };
        if rc != 0 {
            return None;
        }
        // SAFETY: statvfs returned 0, so the struct was filled in.
        let data = unsafe { data.assume_init() };

        let fragment = data.f_frsize as u64;
        Some(FsStats {
            total_bytes: fragment.saturating_mul(data.f_blocks as u64),
            free_bytes: fragment.saturating_mul(data.f_bfree as u64),
        })
    }

    fn kernel_identity() -> Option<KernelIdentity> {
        let mut data = MaybeUninit::<libc::utsname>::zeroed();
        // SAFETY: data points to a utsname-sized buffer.
        let rc = unsafe { libc::uname(data.as_mut_ptr()) };
        if rc != 0 {
            return None;
        }
        // SAFETY: uname returned 0, so the struct was filled in.
        let data = unsafe { data.assume_init() };

        Some(KernelIdentity {
            sysname: c_field(&data.sysname)?,
            release: c_field(&data.release)?,
        })
    }
}

fn c_field(chars: &[libc::c_char]) -> Option<String> {
    let bytes: Vec<u8> = chars
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    if bytes.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
