use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "reelsort")]
#[command(version, about = "Files finished movie downloads into a library", long_about = None)]
pub struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Poll the incoming directory until interrupted
    Run {
        /// Seconds between cycles, overrides `delay_time`
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        delay: Option<u64>,

        /// Verbose logging, overrides `debug`
        #[arg(long)]
        debug: bool,
    },
    /// Run a single cycle and print what happened
    Once {
        #[arg(long)]
        debug: bool,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate the config and print the resolved settings
    Check,
}
