//! Fake HAL implementation for testing.
//!
//! This implementation serves canned host state and records every mutating
//! call, allowing CI-safe testing without root privileges or a real gateway.

use super::{DiskOps, DiskUsage, HostInfoOps, Partition, ProcessOps};
use crate::{HalError, HalResult};
use std::collections::HashMap;
#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    SetHostname {
        hostname: String,
    },
    Command {
        program: String,
        args: Vec<String>,
        timeout_secs: u64,
    },
}

/// Calls that can be made to fail on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FakeFailure {
    Hostname,
    SetHostname,
    Uptime,
    Memory,
    Interfaces,
    Partitions,
    Usage(PathBuf),
    /// The named program runs past its timeout.
    CommandTimeout(String),
}

#[derive(Debug, Clone)]
struct FakeCommand {
    stdout: String,
    exit_code: i32,
}

/// Shared state for FakeHal operations.
#[derive(Debug, Clone, Default)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    hostname: String,
    uptime_secs: u64,
    memory_bytes: u64,
    interfaces: Vec<String>,
    partitions: Vec<Partition>,
    usage: HashMap<PathBuf, DiskUsage>,
    commands: HashMap<String, FakeCommand>,
    failures: Vec<FakeFailure>,
}

/// Fake HAL implementation that serves configured values without touching the host.
///
/// Clones share state, so a test can keep a handle after moving one into the
/// component under test.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeHalState> {
        // A panicking test thread must not hide the recorded state from the others.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.lock().operations.clone()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.lock().operations.iter().any(check)
    }

    /// Clear all recorded operations.
    pub fn clear(&self) {
        self.lock().operations.clear();
    }

    pub fn set_hostname_value(&self, hostname: &str) {
        self.lock().hostname = hostname.to_string();
    }

    pub fn set_uptime(&self, secs: u64) {
        self.lock().uptime_secs = secs;
    }

    pub fn set_memory(&self, bytes: u64) {
        self.lock().memory_bytes = bytes;
    }

    pub fn set_interfaces(&self, names: &[&str]) {
        self.lock().interfaces = names.iter().map(|s| s.to_string()).collect();
    }

    /// Adds a mounted partition with its usage.
    pub fn add_partition(&self, device: &str, mountpoint: &str, usage: DiskUsage) {
        let mut state = self.lock();
        state.partitions.push(Partition {
            device: device.to_string(),
            mountpoint: PathBuf::from(mountpoint),
            fstype: "ext4".to_string(),
            opts: "rw".to_string(),
        });
        state.usage.insert(PathBuf::from(mountpoint), usage);
    }

    /// Registers the stdout and exit code returned for `program`.
    ///
    /// Unregistered programs fail with [`HalError::CommandNotFound`].
    pub fn set_command_output(&self, program: &str, stdout: &str, exit_code: i32) {
        self.lock().commands.insert(
            program.to_string(),
            FakeCommand {
                stdout: stdout.to_string(),
                exit_code,
            },
        );
    }

    pub fn fail(&self, failure: FakeFailure) {
        self.lock().failures.push(failure);
    }

    fn check(&self, failure: FakeFailure) -> HalResult<()> {
        if self.lock().failures.contains(&failure) {
            return Err(HalError::Other(format!("injected failure: {:?}", failure)));
        }
        Ok(())
    }

    fn record_operation(&self, op: Operation) {
        self.lock().operations.push(op);
    }
}

impl HostInfoOps for FakeHal {
    fn hostname(&self) -> HalResult<String> {
        self.check(FakeFailure::Hostname)?;
        Ok(self.lock().hostname.clone())
    }

    fn set_hostname(&self, hostname: &str) -> HalResult<()> {
        self.record_operation(Operation::SetHostname {
            hostname: hostname.to_string(),
        });
        self.check(FakeFailure::SetHostname)?;
        self.lock().hostname = hostname.to_string();
        Ok(())
    }

    fn uptime_secs(&self) -> HalResult<u64> {
        self.check(FakeFailure::Uptime)?;
        Ok(self.lock().uptime_secs)
    }

    fn total_memory_bytes(&self) -> HalResult<u64> {
        self.check(FakeFailure::Memory)?;
        Ok(self.lock().memory_bytes)
    }

    fn interfaces(&self) -> HalResult<Vec<String>> {
        self.check(FakeFailure::Interfaces)?;
        Ok(self.lock().interfaces.clone())
    }
}

impl DiskOps for FakeHal {
    fn partitions(&self) -> HalResult<Vec<Partition>> {
        self.check(FakeFailure::Partitions)?;
        Ok(self.lock().partitions.clone())
    }

    fn usage(&self, mountpoint: &Path) -> HalResult<DiskUsage> {
        self.check(FakeFailure::Usage(mountpoint.to_path_buf()))?;
        self.lock()
            .usage
            .get(mountpoint)
            .copied()
            .ok_or_else(|| HalError::Other(format!("not mounted: {}", mountpoint.display())))
    }
}

impl ProcessOps for FakeHal {
    fn command_output(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<Output> {
        self.record_operation(Operation::Command {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            timeout_secs: timeout.as_secs(),
        });
        if self
            .lock()
            .failures
            .contains(&FakeFailure::CommandTimeout(program.to_string()))
        {
            return Err(HalError::CommandTimeout {
                program: program.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
        let cmd = self
            .lock()
            .commands
            .get(program)
            .cloned()
            .ok_or_else(|| HalError::CommandNotFound(program.to_string()))?;

        #[cfg(unix)]
        let status = std::process::ExitStatus::from_raw(cmd.exit_code << 8);
        #[cfg(not(unix))]
        let status = std::process::Command::new("cmd")
            .args(["/C", &format!("exit {}", cmd.exit_code)])
            .status()?;

        Ok(Output {
            status,
            stdout: cmd.stdout.into_bytes(),
            stderr: Vec::new(),
        })
    }
}
