//! The status component: read-only host getters plus hostname updates.
//!
//! Getters never fail. Each one matches the HAL error, logs it, and returns a
//! fixed default (empty string, zero, empty list). `set_hostname` is the only
//! mutating call and hands every failure back to the caller.

use crate::archive;
use crate::config::StatusConfig;
use crate::disk_alias::DiskAliaser;
use crate::errors::StatusResult;
use crate::hostname::validate_hostname;
use crate::store::{HostnameRecord, RecordStore, HOSTNAME_RECORD_ID};
use serde::Serialize;
use status_hal::{DiskUsage, HalError, SystemInfoProvider};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const VERSION_NOT_INSTALLED: &str = "(not installed)";

const VERSION_TOOL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Usage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
}

impl From<DiskUsage> for Usage {
    fn from(u: DiskUsage) -> Self {
        Self {
            total: u.total,
            used: u.used,
            free: u.free,
            percent: u.percent,
        }
    }
}

/// One mounted disk, described with its storage alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskInfo {
    /// Alias such as `System`, `SD-0-1` or `USB-a-1`.
    pub name: String,
    pub mount: PathBuf,
    pub device: String,
    pub usage: Usage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub hostname: String,
    pub version: String,
    pub uptime: u64,
    pub net_interfaces: Vec<String>,
    pub memory: u64,
    pub disks: Vec<DiskInfo>,
}

/// Drops the first two words of the version tool output (`<product> version`).
pub fn parse_product_version(output: &str) -> String {
    output
        .split_whitespace()
        .skip(2)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_listed_interface(name: &str) -> bool {
    !(name.starts_with("lo") || name.starts_with("mon."))
}

pub struct Status<H: SystemInfoProvider> {
    hal: H,
    store: Arc<dyn RecordStore>,
    aliaser: DiskAliaser,
    config: StatusConfig,
}

impl<H: SystemInfoProvider> Status<H> {
    pub fn new(hal: H, store: Arc<dyn RecordStore>, config: StatusConfig) -> Self {
        match store.get(HOSTNAME_RECORD_ID) {
            Ok(Some(record)) => log::debug!("Saved hostname: {}", record.hostname),
            Ok(None) => log::debug!("No saved hostname record"),
            Err(e) => log::warn!("Cannot read saved hostname: {}", e),
        }
        Self {
            hal,
            store,
            aliaser: DiskAliaser::new(),
            config,
        }
    }

    pub fn with_aliaser(mut self, aliaser: DiskAliaser) -> Self {
        self.aliaser = aliaser;
        self
    }

    pub fn hal(&self) -> &H {
        &self.hal
    }

    pub fn config(&self) -> &StatusConfig {
        &self.config
    }

    pub fn get_hostname(&self) -> String {
        match self.hal.hostname() {
            Ok(name) => name,
            Err(e) => {
                log::error!("Cannot get the hostname: {}", e);
                String::new()
            }
        }
    }

    /// Validates `hostname`, renames the host, then saves the record.
    ///
    /// If saving the record fails, the previous hostname is restored on a
    /// best-effort basis and the store error is returned.
    pub fn set_hostname(&self, hostname: &str) -> StatusResult<()> {
        validate_hostname(hostname)?;

        let previous = self.hal.hostname().ok();
        self.hal.set_hostname(hostname)?;

        if let Err(e) = self
            .store
            .update(HOSTNAME_RECORD_ID, &HostnameRecord::new(hostname))
        {
            log::error!("Cannot save hostname record: {}", e);
            if let Some(prev) = previous.filter(|p| p != hostname) {
                if let Err(re) = self.hal.set_hostname(&prev) {
                    log::error!("Cannot restore hostname {}: {}", prev, re);
                }
            }
            return Err(e);
        }

        log::info!("Hostname changed to {}", hostname);
        Ok(())
    }

    /// The hostname last saved by [`Status::set_hostname`].
    pub fn saved_hostname(&self) -> StatusResult<Option<String>> {
        Ok(self.store.get(HOSTNAME_RECORD_ID)?.map(|r| r.hostname))
    }

    pub fn get_product_version(&self) -> String {
        let tool = &self.config.version_tool;
        match self.hal.command_stdout(tool, &[], VERSION_TOOL_TIMEOUT) {
            Ok(out) => parse_product_version(&out),
            Err(HalError::CommandNotFound(_)) => VERSION_NOT_INSTALLED.to_string(),
            Err(e) => {
                log::warn!("Cannot get the product version from {}: {}", tool, e);
                VERSION_NOT_INSTALLED.to_string()
            }
        }
    }

    /// System uptime, unit: second.
    pub fn get_uptime(&self) -> u64 {
        match self.hal.uptime_secs() {
            Ok(secs) => secs,
            Err(e) => {
                log::error!("Cannot get the uptime: {}", e);
                0
            }
        }
    }

    /// Interface names without loopback (`lo*`) and monitor (`mon.*`) interfaces.
    pub fn get_net_interfaces(&self) -> Vec<String> {
        match self.hal.interfaces() {
            Ok(ifaces) => ifaces
                .into_iter()
                .filter(|name| is_listed_interface(name))
                .collect(),
            Err(e) => {
                log::error!("Cannot get interfaces: {}", e);
                Vec::new()
            }
        }
    }

    /// Total memory in bytes.
    pub fn get_memory(&self) -> u64 {
        match self.hal.total_memory_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("Cannot get the memory size: {}", e);
                0
            }
        }
    }

    pub fn disk_get_alias(&self, device: &str) -> String {
        self.aliaser.resolve_alias(device)
    }

    /// Usage of every mounted disk, read live.
    ///
    /// A partition whose usage cannot be read is logged and left out; the rest
    /// are still reported.
    pub fn get_disks(&self) -> Vec<DiskInfo> {
        let parts = match self.hal.partitions() {
            Ok(parts) => parts,
            Err(e) => {
                log::error!("Cannot list disk partitions: {}", e);
                return Vec::new();
            }
        };

        parts
            .into_iter()
            .filter_map(|part| match self.hal.usage(&part.mountpoint) {
                Ok(usage) => Some(DiskInfo {
                    name: self.disk_get_alias(&part.device),
                    mount: part.mountpoint,
                    device: part.device,
                    usage: usage.into(),
                }),
                Err(e) => {
                    log::error!(
                        "Cannot get usage of {} ({}): {}",
                        part.mountpoint.display(),
                        part.device,
                        e
                    );
                    None
                }
            })
            .collect()
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            hostname: self.get_hostname(),
            version: self.get_product_version(),
            uptime: self.get_uptime(),
            net_interfaces: self.get_net_interfaces(),
            memory: self.get_memory(),
            disks: self.get_disks(),
        }
    }

    /// Packs the configured log files into a gzip'd tar at `output`.
    pub fn tar_syslog_files(&self, output: &Path) -> StatusResult<PathBuf> {
        archive::tar_syslog_files(output, &self.config.log_dir, &self.config.archive_prefixes)
    }
}
