use std::path::Path;

/// Installs the global logger.
///
/// Logs go to `log_file` when it can be opened for appending (its directory is
/// created if needed); otherwise to stderr. `RUST_LOG` overrides `level`.
pub fn init(log_file: &Path, level: log::LevelFilter) {
    use env_logger::Target;
    use std::fs;
    use std::io;

    let target = (|| -> io::Result<Target> {
        if let Some(dir) = log_file.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        Ok(Target::Pipe(Box::new(file)))
    })()
    .unwrap_or(Target::Stderr);

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(target)
        .try_init();
}
