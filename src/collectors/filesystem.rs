use super::VolumeError;
use crate::models::volume::{Volume, VolumeUsage};

const MOUNTS: &str = "/proc/mounts";

/// Filesystems with no backing block device.
const SKIP_FS: &[&str] = &[
    "proc", "sysfs", "devpts", "tmpfs", "devtmpfs", "cgroup", "cgroup2",
    "pstore", "efivarfs", "securityfs", "debugfs", "tracefs", "bpf",
    "hugetlbfs", "mqueue", "fusectl", "configfs", "binfmt_misc",
    "overlay", "nsfs", "rpc_pipefs", "autofs", "squashfs", "ramfs",
];

/// Enumerate mounted volumes in mount-table order.
/// `exclude` holds mount-point patterns (`*` suffix = prefix match).
pub fn read_volumes(exclude: &[String]) -> Result<Vec<Volume>, VolumeError> {
    let content = std::fs::read_to_string(MOUNTS).map_err(VolumeError::MountTable)?;
    Ok(parse_mounts(&content, exclude))
}

pub fn parse_mounts(content: &str, exclude: &[String]) -> Vec<Volume> {
    let mut out = Vec::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 { continue; }

        let device  = unescape(fields[0]);
        let mount   = unescape(fields[1]);
        let fs_type = fields[2];

        if SKIP_FS.contains(&fs_type) { continue; }
        // Snap images and other loop mounts
        if device.starts_with("/dev/loop") { continue; }
        if device == "none" { continue; }
        if exclude.iter().any(|pat| glob_match(pat, &mount)) { continue; }

        out.push(Volume::new(&device, &mount));
    }
    out
}

/// statvfs the volume's mount point.
pub fn read_usage(volume: &Volume) -> Result<VolumeUsage, VolumeError> {
    use nix::sys::statvfs::statvfs;
    let stat = statvfs(volume.mount_path.as_str()).map_err(|source| VolumeError::Stat {
        mount: volume.mount_path.clone(),
        source,
    })?;

    Ok(VolumeUsage::from_blocks(
        stat.fragment_size() as u64,
        stat.blocks(),
        stat.blocks_free(),
        stat.blocks_available(),
    ))
}

/// Decode the octal escapes the kernel uses for whitespace in mount fields
/// (`\040` for space, `\011` for tab, `\012` newline, `\134` backslash).
fn unescape(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = std::str::from_utf8(&bytes[i + 1..i + 4]).ok();
            if let Some(v) = digits.and_then(|d| u8::from_str_radix(d, 8).ok()) {
                out.push(v);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Simple glob match: `*` suffix matches any remainder, no other wildcards.
fn glob_match(pattern: &str, name: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix('*') {
        name.starts_with(prefix)
    } else {
        pattern == name
    }
}
