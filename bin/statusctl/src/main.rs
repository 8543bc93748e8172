use anyhow::{Context, Result};
use clap::Parser;
use status_core::config::StatusConfig;
use status_core::{JsonFileStore, Status};
use status_hal::LinuxHal;
use std::sync::Arc;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let config = StatusConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    status_core::logging::init(&config.log_file, level);

    let hal = LinuxHal::new().with_hostname_file(&config.hostname_file);
    let store = Arc::new(JsonFileStore::new(&config.record_path));
    let status = Status::new(hal, store, config);

    match cli.command {
        cli::Command::Show => {
            println!("{}", serde_json::to_string_pretty(&status.snapshot())?);
        }
        cli::Command::Hostname => println!("{}", status.get_hostname()),
        cli::Command::SetHostname { hostname } => {
            status
                .set_hostname(&hostname)
                .with_context(|| format!("Failed to set hostname to {:?}", hostname))?;
        }
        cli::Command::Alias { device } => println!("{}", status.disk_get_alias(&device)),
        cli::Command::Disks => {
            println!("{}", serde_json::to_string_pretty(&status.get_disks())?);
        }
        cli::Command::Archive { output } => {
            let path = status
                .tar_syslog_files(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
