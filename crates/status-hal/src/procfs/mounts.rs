//! Parsing helpers for `/proc/self/mounts` and `/proc/filesystems`.

use crate::hal::Partition;
use std::collections::HashSet;
use std::path::PathBuf;

/// Parses the fstab-style mount table (`<source> <target> <fstype> <opts> ...`).
pub fn parse_mounts(content: &str) -> Vec<Partition> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = unescape_mount_path(fields.next()?);
            let mountpoint = unescape_mount_path(fields.next()?);
            let fstype = fields.next()?.to_string();
            let opts = fields.next().unwrap_or_default().to_string();
            Some(Partition {
                device,
                mountpoint: PathBuf::from(mountpoint),
                fstype,
                opts,
            })
        })
        .collect()
}

/// Filesystem types backed by a block device (lines of `/proc/filesystems` without `nodev`).
pub fn parse_physical_fstypes(content: &str) -> HashSet<String> {
    let mut types: HashSet<String> = content
        .lines()
        .filter(|line| !line.starts_with("nodev"))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect();
    // zfs registers itself as nodev but is a real on-disk filesystem.
    if content
        .lines()
        .any(|line| line.split_whitespace().eq(["nodev", "zfs"]))
    {
        types.insert("zfs".to_string());
    }
    types
}

/// Keeps only mounts of a physical filesystem with a real source device.
pub fn physical_partitions(mounts: Vec<Partition>, fstypes: &HashSet<String>) -> Vec<Partition> {
    mounts
        .into_iter()
        .filter(|p| !p.device.is_empty() && p.device != "none")
        .filter(|p| fstypes.contains(&p.fstype))
        .collect()
}

pub fn unescape_mount_path(raw: &str) -> String {
    raw.replace("\\040", " ")
        .replace("\\011", "\t")
        .replace("\\012", "\n")
        .replace("\\134", "\\")
}
