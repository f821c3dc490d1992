//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "themectl", version, about = "Inspect and change the dashboard theme preference")]
pub struct Cli {
    /// JSON file holding the persisted preference
    #[arg(long, global = true, env = "THEMECTL_STORE", default_value = ".eyesante/preferences.json")]
    pub store: PathBuf,

    /// YAML theme configuration (storage key, attribute, marker, default mode)
    #[arg(long, global = true, env = "THEMECTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the persisted mode and the theme it resolves to
    Show,
    /// Set the mode: light, dark or system
    Set {
        /// The new mode
        mode: String,
    },
    /// Flip between light and dark
    Toggle,
    /// List the theme menu entries
    Options,
    /// Print the inline bootstrap script for the page head
    Script {
        /// Wrap the script in a <script> element
        #[arg(long)]
        tag: bool,
    },
    /// Follow OS colour-scheme changes until interrupted
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}
