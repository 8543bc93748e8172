//! Mounted partitions and filesystem usage.

use crate::HalResult;
use std::path::{Path, PathBuf};

/// A mounted partition as reported by the mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub device: String,
    pub mountpoint: PathBuf,
    pub fstype: String,
    pub opts: String,
}

/// Filesystem usage for a mount point, in bytes.
///
/// `free` is what unprivileged users can still allocate, so `used + free` may be
/// smaller than `total` on filesystems with root-reserved blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

impl DiskUsage {
    /// Builds usage figures from raw `statvfs` block counts.
    pub fn from_blocks(blocks: u64, blocks_free: u64, blocks_avail: u64, frsize: u64) -> Self {
        let total = blocks.saturating_mul(frsize);
        let free = blocks_avail.saturating_mul(frsize);
        let used = blocks.saturating_sub(blocks_free).saturating_mul(frsize);
        Self {
            total,
            used,
            free,
            percent: used_percent(used, used.saturating_add(free)),
        }
    }
}

fn used_percent(used: u64, user_total: u64) -> f64 {
    if user_total == 0 {
        return 0.0;
    }
    let pct = used as f64 / user_total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

pub trait DiskOps {
    /// Mounted partitions backed by a physical filesystem.
    fn partitions(&self) -> HalResult<Vec<Partition>>;

    fn usage(&self, mountpoint: &Path) -> HalResult<DiskUsage>;
}
