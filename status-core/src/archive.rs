//! Diagnostics archive: syslog files packed into a `.tar.gz`.

use crate::errors::{StatusError, StatusResult};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_DIR: &str = "/var/log";
pub const DEFAULT_ARCHIVE_PREFIXES: [&str; 3] = ["syslog", "uc8100-webapp", "sanji"];

/// Entries directly inside `log_dir` whose name starts with one of `prefixes`
/// (the shell glob `log_dir/prefix*`), grouped by prefix and sorted by name.
/// Both files and directories match.
///
/// A missing `log_dir` yields no files.
pub fn collect_log_files(log_dir: &Path, prefixes: &[String]) -> Vec<PathBuf> {
    let mut names: Vec<String> = match fs::read_dir(log_dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect(),
        Err(e) => {
            log::debug!("Cannot list {}: {}", log_dir.display(), e);
            return Vec::new();
        }
    };
    names.sort();

    let mut files = Vec::new();
    for prefix in prefixes {
        for name in names.iter().filter(|n| n.starts_with(prefix.as_str())) {
            let path = log_dir.join(name);
            if (path.is_file() || path.is_dir()) && !files.contains(&path) {
                files.push(path);
            }
        }
    }
    files
}

/// Tar and compress (gz) the matching log files into `output`.
///
/// Each file is stored under its base name; a matching directory is stored
/// recursively under its base name. Paths that vanish between listing and
/// packing (log rotation) are skipped.
pub fn tar_syslog_files(output: &Path, log_dir: &Path, prefixes: &[String]) -> StatusResult<PathBuf> {
    let file = File::create(output).map_err(StatusError::Archive)?;
    let mut tar = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    for path in collect_log_files(log_dir, prefixes) {
        let Some(name) = path.file_name() else {
            continue;
        };
        if path == output || !path.exists() {
            continue;
        }
        log::debug!("Packing {}", path.display());
        let packed = if path.is_dir() {
            tar.append_dir_all(name, &path)
        } else {
            tar.append_path_with_name(&path, name)
        };
        packed.map_err(StatusError::Archive)?;
    }

    tar.into_inner()
        .and_then(|gz| gz.finish())
        .map_err(StatusError::Archive)?;
    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use tempfile::tempdir;

    fn prefixes() -> Vec<String> {
        DEFAULT_ARCHIVE_PREFIXES.iter().map(|s| s.to_string()).collect()
    }

    fn entry_names(archive: &Path) -> Vec<String> {
        let mut tar = tar::Archive::new(GzDecoder::new(File::open(archive).unwrap()));
        tar.entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn collect_matches_prefixes_only() {
        let dir = tempdir().unwrap();
        for name in ["syslog", "syslog.1", "sanji-controller.log", "messages", "uc8100-webapp.log"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        fs::write(dir.path().join("auth.log"), "auth").unwrap();
        fs::create_dir(dir.path().join("sanji")).unwrap();

        let files = collect_log_files(dir.path(), &prefixes());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "syslog",
                "syslog.1",
                "uc8100-webapp.log",
                "sanji",
                "sanji-controller.log"
            ]
        );
    }

    #[test]
    fn collect_from_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert!(collect_log_files(&dir.path().join("nope"), &prefixes()).is_empty());
    }

    #[test]
    fn archive_uses_base_names() {
        let logs = tempdir().unwrap();
        fs::write(logs.path().join("syslog"), "boot ok\n").unwrap();
        fs::write(logs.path().join("sanji.log"), "ready\n").unwrap();
        let out_dir = tempdir().unwrap();
        let output = out_dir.path().join("syslog.tar.gz");

        let written = tar_syslog_files(&output, logs.path(), &prefixes()).unwrap();
        assert_eq!(written, output);
        assert_eq!(entry_names(&output), vec!["syslog", "sanji.log"]);
    }

    #[test]
    fn archive_packs_log_directories_recursively() {
        let logs = tempdir().unwrap();
        fs::create_dir_all(logs.path().join("sanji")).unwrap();
        fs::write(logs.path().join("sanji/status.log"), "status up\n").unwrap();
        fs::write(logs.path().join("syslog"), "boot ok\n").unwrap();
        let out_dir = tempdir().unwrap();
        let output = out_dir.path().join("diag.tar.gz");

        tar_syslog_files(&output, logs.path(), &prefixes()).unwrap();
        let names = entry_names(&output);
        assert!(names.contains(&"syslog".to_string()), "{names:?}");
        assert!(names.contains(&"sanji/status.log".to_string()), "{names:?}");
    }

    #[test]
    fn archive_with_no_logs_is_still_valid() {
        let logs = tempdir().unwrap();
        let output = logs.path().join("empty.tar.gz");
        tar_syslog_files(&output, &logs.path().join("missing"), &prefixes()).unwrap();
        assert!(entry_names(&output).is_empty());
    }

    #[test]
    fn archive_to_unwritable_path_fails() {
        let logs = tempdir().unwrap();
        let output = logs.path().join("no/such/dir/out.tar.gz");
        let err = tar_syslog_files(&output, logs.path(), &prefixes()).unwrap_err();
        assert!(matches!(err, StatusError::Archive(_)));
    }
}
