//! Linux HAL implementation using real system calls.

use super::{DiskOps, DiskUsage, HostInfoOps, Partition, ProcessOps};
use crate::procfs::{meminfo, mounts, uptime};
use crate::{sysfs, HalError, HalResult};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Real HAL implementation for Linux systems.
///
/// The `/proc` and `/sys` roots and the persistent hostname file can be
/// redirected, which lets tests point the HAL at a fixture tree.
#[derive(Debug, Clone)]
pub struct LinuxHal {
    proc_root: PathBuf,
    sys_root: PathBuf,
    hostname_file: PathBuf,
}

impl Default for LinuxHal {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            sys_root: PathBuf::from("/sys"),
            hostname_file: PathBuf::from("/etc/hostname"),
        }
    }
}

impl LinuxHal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hostname_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.hostname_file = path.into();
        self
    }

    pub fn with_proc_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.proc_root = path.into();
        self
    }

    pub fn with_sys_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.sys_root = path.into();
        self
    }

    fn read_proc(&self, name: &str) -> HalResult<String> {
        Ok(fs::read_to_string(self.proc_root.join(name))?)
    }
}

fn map_command_err(program: &str, err: std::io::Error) -> HalError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return HalError::CommandNotFound(program.to_string());
    }
    HalError::Io(err)
}

fn output_with_timeout(program: &str, cmd: &mut Command, timeout: Duration) -> HalResult<Output> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().map_err(|e| map_command_err(program, e))?;

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();

    // Drain pipes concurrently to avoid deadlocks on large output.
    let stdout_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout.take() {
            let _ = out.read_to_end(&mut buf);
        }
        buf
    });
    let stderr_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr.take() {
            let _ = err.read_to_end(&mut buf);
        }
        buf
    });

    let status = match child.wait_timeout(timeout).map_err(HalError::Io)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            let _ = stdout_handle.join();
            let _ = stderr_handle.join();
            return Err(HalError::CommandTimeout {
                program: program.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

fn map_nix_err(err: nix::errno::Errno) -> HalError {
    use nix::errno::Errno;
    match err {
        Errno::EACCES | Errno::EPERM => HalError::PermissionDenied,
        other => HalError::Nix(other),
    }
}

impl HostInfoOps for LinuxHal {
    fn hostname(&self) -> HalResult<String> {
        let name = nix::unistd::gethostname().map_err(map_nix_err)?;
        name.into_string()
            .map_err(|raw| HalError::Parse(format!("non UTF-8 hostname: {:?}", raw)))
    }

    fn set_hostname(&self, hostname: &str) -> HalResult<()> {
        nix::unistd::sethostname(hostname).map_err(map_nix_err)?;
        fs::write(&self.hostname_file, format!("{}\n", hostname))?;
        log::info!(
            "Hostname set to {} ({} updated)",
            hostname,
            self.hostname_file.display()
        );
        Ok(())
    }

    fn uptime_secs(&self) -> HalResult<u64> {
        let content = self.read_proc("uptime")?;
        uptime::parse_uptime_secs(&content)
            .ok_or_else(|| HalError::Parse(format!("unexpected uptime content: {:?}", content)))
    }

    fn total_memory_bytes(&self) -> HalResult<u64> {
        let content = self.read_proc("meminfo")?;
        let kb = meminfo::parse_mem_total_kb(&content)
            .ok_or_else(|| HalError::Parse("MemTotal missing from meminfo".to_string()))?;
        Ok(kb.saturating_mul(1024))
    }

    fn interfaces(&self) -> HalResult<Vec<String>> {
        Ok(sysfs::net::list_interfaces_in(
            &self.sys_root.join("class/net"),
        )?)
    }
}

impl DiskOps for LinuxHal {
    fn partitions(&self) -> HalResult<Vec<Partition>> {
        let table = self.read_proc("self/mounts")?;
        let filesystems = self.read_proc("filesystems")?;
        let fstypes = mounts::parse_physical_fstypes(&filesystems);
        Ok(mounts::physical_partitions(
            mounts::parse_mounts(&table),
            &fstypes,
        ))
    }

    #[allow(clippy::unnecessary_cast)]
    fn usage(&self, mountpoint: &Path) -> HalResult<DiskUsage> {
        let stat = nix::sys::statvfs::statvfs(mountpoint).map_err(map_nix_err)?;
        Ok(DiskUsage::from_blocks(
            stat.blocks() as u64,
            stat.blocks_free() as u64,
            stat.blocks_available() as u64,
            stat.fragment_size() as u64,
        ))
    }
}

impl ProcessOps for LinuxHal {
    fn command_output(&self, program: &str, args: &[&str], timeout: Duration) -> HalResult<Output> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        output_with_timeout(program, &mut cmd, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixture_hal() -> (tempfile::TempDir, LinuxHal) {
        let dir = tempdir().unwrap();
        let proc_root = dir.path().join("proc");
        let sys_root = dir.path().join("sys");
        fs::create_dir_all(proc_root.join("self")).unwrap();
        fs::create_dir_all(sys_root.join("class/net/eth0")).unwrap();
        fs::create_dir_all(sys_root.join("class/net/lo")).unwrap();
        fs::write(proc_root.join("uptime"), "1234.99 4000.00\n").unwrap();
        fs::write(proc_root.join("meminfo"), "MemTotal: 1024 kB\n").unwrap();
        fs::write(
            proc_root.join("self/mounts"),
            "/dev/root / ext4 rw 0 0\ntmpfs /tmp tmpfs rw 0 0\n",
        )
        .unwrap();
        fs::write(proc_root.join("filesystems"), "nodev\ttmpfs\n\text4\n").unwrap();
        let hal = LinuxHal::new()
            .with_proc_root(proc_root)
            .with_sys_root(sys_root);
        (dir, hal)
    }

    #[test]
    fn reads_uptime_and_memory_from_proc_root() {
        let (_dir, hal) = fixture_hal();
        assert_eq!(hal.uptime_secs().unwrap(), 1234);
        assert_eq!(hal.total_memory_bytes().unwrap(), 1024 * 1024);
    }

    #[test]
    fn lists_interfaces_from_sys_root() {
        let (_dir, hal) = fixture_hal();
        assert_eq!(hal.interfaces().unwrap(), vec!["eth0", "lo"]);
    }

    #[test]
    fn partitions_skip_virtual_filesystems() {
        let (_dir, hal) = fixture_hal();
        let parts = hal.partitions().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].device, "/dev/root");
    }

    #[test]
    fn missing_proc_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let hal = LinuxHal::new().with_proc_root(dir.path());
        assert!(matches!(hal.uptime_secs(), Err(HalError::Io(_))));
    }

    #[test]
    fn usage_of_tempdir_is_reported() {
        let dir = tempdir().unwrap();
        let usage = LinuxHal::new().usage(dir.path()).unwrap();
        assert!(usage.total > 0);
        assert!(usage.percent >= 0.0 && usage.percent <= 100.0);
    }

    #[test]
    fn missing_program_maps_to_command_not_found() {
        let err = LinuxHal::new()
            .command_output(
                "definitely-not-a-real-binary-xyz",
                &[],
                Duration::from_secs(1),
            )
            .unwrap_err();
        assert!(matches!(err, HalError::CommandNotFound(_)));
    }

    #[test]
    fn command_stdout_is_trimmed() {
        let out = LinuxHal::new()
            .command_stdout("echo", &["hello"], Duration::from_secs(5))
            .unwrap();
        assert_eq!(out, "hello");
    }
}
