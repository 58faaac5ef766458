use insta::assert_debug_snapshot;
use orbfetch::system::disks::{DEFAULT_DISK_PREFIXES, MountMatch, MountScanner};
use orbfetch::system::gpu::scan_gpus;

const MOUNT_TABLE: &str = "\
/dev/nvme0n1p2 / ext4 rw,relatime 0 0
proc /proc proc rw,nosuid,nodev,noexec,relatime 0 0
tmpfs /run tmpfs rw,nosuid,nodev,size=3267588k,mode=755 0 0
/dev/nvme0n1p1 /boot/efi vfat rw,relatime,fmask=0077,dmask=0077 0 0
/dev/sdb1 /mnt/backup\\040drive ext4 rw,relatime 0 0
/dev/loop3 /snap/core/1234 squashfs ro,nodev,relatime 0 0
/dev/mapper/vg-home /home xfs rw,relatime 0 0";

const AMDGPU_TOP: &str = r#"
--------
#0 [
    device_name: "AMD Radeon RX 6600",
    VRAM: usage 812, total 8176 (MiB)
]
"#;

const NVIDIA_SMI: &str = "\
NVIDIA GeForce RTX 3060, 512 MiB, 12288 MiB
NVIDIA A100-SXM4-40GB, 0 MiB, 40960 MiB
";

#[test]
fn mount_table_scan() {
    let prefixes: Vec<String> = DEFAULT_DISK_PREFIXES.iter().map(|p| p.to_string()).collect();
    let found: Vec<MountMatch> = MountScanner::new(MOUNT_TABLE, &prefixes).collect();
    assert_debug_snapshot!("mount_table_scan", found);
}

#[test]
fn gpu_tool_scan() {
    let gpus = scan_gpus(Some(AMDGPU_TOP), Some(NVIDIA_SMI));
    assert_debug_snapshot!("gpu_tool_scan", gpus);
}
