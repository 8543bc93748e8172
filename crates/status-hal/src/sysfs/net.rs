//! Helpers related to network interfaces in sysfs.

use std::fs;
use std::io;
use std::path::Path;

/// Lists interface names from a `/sys/class/net`-style directory, sorted.
pub fn list_interfaces_in(sys_net_root: &Path) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(sys_net_root)?
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn list_interfaces_in_reads_entries_sorted() {
        let tmp = tempdir().unwrap();
        for name in ["wlan0", "eth0", "lo"] {
            fs::create_dir_all(tmp.path().join(name)).unwrap();
        }
        let names = list_interfaces_in(tmp.path()).unwrap();
        assert_eq!(names, vec!["eth0", "lo", "wlan0"]);
    }

    #[test]
    fn list_interfaces_in_missing_root_errors() {
        let tmp = tempdir().unwrap();
        assert!(list_interfaces_in(&tmp.path().join("missing")).is_err());
    }
}
