//! CLI argument parsing for statusctl

use clap::{Parser, Subcommand};
use status_core::config::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "statusctl")]
#[command(about = "Gateway host status: hostname, version, uptime, interfaces, memory, disks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every status field as JSON
    Show,

    /// Print the current hostname
    Hostname,

    /// Validate, apply and save a new hostname
    SetHostname {
        hostname: String,
    },

    /// Print the storage alias of a device path (e.g. /dev/mmcblk0p1)
    Alias {
        device: String,
    },

    /// Print mounted disks with usage as JSON
    Disks,

    /// Pack syslog files into a .tar.gz
    Archive {
        /// Output archive path
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_set_hostname_with_global_flags() {
        let cli = Cli::try_parse_from(["statusctl", "set-hostname", "gw-01", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(matches!(cli.command, Command::SetHostname { hostname } if hostname == "gw-01"));
    }
}
