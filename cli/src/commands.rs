pub mod scan;
pub mod vendors;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use sniffr_common::config::Config;

#[derive(Parser)]
#[command(name = "sniffr")]
#[command(about = "Tracks nearby BLE advertisers and works out which identifiers belong together.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Reduce output (-q hides live events, -qq prints only the summary)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show debug logs (-vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON object of extra vendor names, e.g. {"004c": "Apple"}
    #[arg(long, global = true, value_name = "FILE")]
    pub vendor_db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Track devices from an advertisement capture and correlate identities
    #[command(alias = "s")]
    Scan {
        /// JSON-lines capture of advertisement events
        capture: PathBuf,
        /// Stop after this many seconds
        #[arg(short = 't', long, default_value_t = 30, value_name = "SECS")]
        duration: u64,
        /// Write unresolved vendor ids to this file
        #[arg(long, value_name = "FILE")]
        unknown_out: Option<PathBuf>,
        /// Report raw identifiers without correlating them
        #[arg(long)]
        no_correlation: bool,
    },
    /// Show the vendor table in use
    #[command(alias = "v")]
    Vendors,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let mut cfg = Config {
            no_banner: self.no_banner,
            quiet: self.quiet,
            vendor_db: self.vendor_db.clone(),
            ..Config::default()
        };

        if let Commands::Scan {
            duration,
            unknown_out,
            no_correlation,
            ..
        } = &self.command
        {
            cfg.duration = Duration::from_secs(*duration);
            cfg.unknown_out = unknown_out.clone();
            cfg.no_correlation = *no_correlation;
        }
        cfg
    }
}
