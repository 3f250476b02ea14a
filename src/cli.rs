//! Command line arguments

use crate::config::Config;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Ask questions about the laws of Westeros from your terminal
#[derive(Debug, Parser)]
#[command(name = "laws-tui", version, about)]
pub struct Cli {
    /// Base URL of the query service (overrides the config file)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Config file to use instead of ~/.laws-tui/config.json
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs here instead of ~/.laws-tui/laws-tui.log
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Save the effective configuration and exit
    #[arg(long)]
    pub save_config: bool,
}

impl Cli {
    /// Merge the command line over a loaded config
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        config
    }

    /// Where `--save-config` writes to
    pub fn config_target(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Config::config_path)
    }
}
