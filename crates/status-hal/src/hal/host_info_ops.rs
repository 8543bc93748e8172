//! Host information and hostname control.
//!
//! This is "world-touching" (reads `/proc`, `/sys`, writes `/etc/hostname`) and belongs in the HAL.

use crate::HalResult;

pub trait HostInfoOps {
    /// Current kernel hostname.
    fn hostname(&self) -> HalResult<String>;

    /// Renames the running host and persists the name for the next boot.
    fn set_hostname(&self, hostname: &str) -> HalResult<()>;

    /// Whole seconds since boot.
    fn uptime_secs(&self) -> HalResult<u64>;

    /// Total physical memory in bytes.
    fn total_memory_bytes(&self) -> HalResult<u64>;

    /// Names of all network interfaces, loopback included.
    fn interfaces(&self) -> HalResult<Vec<String>>;
}
