//! Host status library for UC-8100 gateways.
//!
//! `status-core` answers the "what is this box" questions: hostname, product
//! version, uptime, network interfaces, memory and disks (with System/SD/USB
//! aliases). It can also rename the host and pack syslog files for support.
//! All host access goes through [`status_hal::SystemInfoProvider`].

pub mod archive;
pub mod config;
pub mod disk_alias;
pub mod errors;
pub mod hostname;
pub mod logging;
pub mod status;
pub mod store;

pub use disk_alias::{DiskAliasRule, DiskAliaser, UNKNOWN_ALIAS};
pub use errors::{StatusError, StatusResult};
pub use hostname::validate_hostname;
pub use status::{DiskInfo, Status, StatusSnapshot, Usage};
pub use store::{HostnameRecord, JsonFileStore, MemoryStore, RecordStore, HOSTNAME_RECORD_ID};
