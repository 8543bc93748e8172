//! HAL trait definitions and implementations.
//!
//! This module defines the traits the status service needs from the host and
//! provides both a real (LinuxHal) and a fake (FakeHal) implementation.

pub mod disk_ops;
pub mod fake_hal;
pub mod host_info_ops;
pub mod linux_hal;
pub mod process_ops;

pub use disk_ops::{DiskOps, DiskUsage, Partition};
pub use fake_hal::{FakeFailure, FakeHal, Operation};
pub use host_info_ops::HostInfoOps;
pub use linux_hal::LinuxHal;
pub use process_ops::ProcessOps;

/// Everything the status component consumes from the host.
pub trait SystemInfoProvider: HostInfoOps + DiskOps + ProcessOps + Send + Sync {}

/// Automatically implement SystemInfoProvider for any type implementing all required traits.
impl<T> SystemInfoProvider for T where T: HostInfoOps + DiskOps + ProcessOps + Send + Sync {}
