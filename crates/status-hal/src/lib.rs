//! Host information abstraction layer (HAL) for the gateway status service.
//!
//! Everything that reads `/proc` or `/sys`, renames the host, or spawns a
//! process goes through the traits in [`hal`], so the status logic above it
//! can run against [`FakeHal`] in CI.

pub mod error;
pub mod hal;
pub mod procfs;
pub mod sysfs;

pub use error::{HalError, HalResult};
pub use hal::{
    DiskOps, DiskUsage, FakeFailure, FakeHal, HostInfoOps, LinuxHal, Operation, Partition,
    ProcessOps, SystemInfoProvider,
};
