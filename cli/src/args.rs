//! Command-line argument parsing for debt-waterfall
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// debt-waterfall - Allocate extra debt payments with a utilization waterfall
#[derive(Parser, Debug)]
#[command(name = "debt-waterfall")]
#[command(version)]
#[command(about = "Allocate extra debt payments with a utilization-aware waterfall", long_about = None)]
pub struct Args {
    /// Verbosity level: default (warn), -v (info), -vv (debug), -vvv (trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the waterfall phase and per-card utilization
    Phase {
        /// JSON file with an array of debts (amounts in cents)
        #[arg(short, long)]
        debts: PathBuf,

        /// Custom ladder configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Allocate an extra payment across the debts
    Allocate {
        /// JSON file with an array of debts (amounts in cents)
        #[arg(short, long)]
        debts: PathBuf,

        /// Extra payment available this month, in dollars (e.g. 250 or 99.95)
        #[arg(short, long)]
        extra: String,

        /// Custom ladder configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a payoff schedule for a single balance
    Amortize {
        /// Starting balance in dollars
        #[arg(short, long)]
        balance: String,

        /// Annual interest rate in percent
        #[arg(short, long)]
        rate: f64,

        /// Monthly payment in dollars
        #[arg(short, long)]
        payment: String,

        /// Maximum number of months to simulate
        #[arg(short, long, default_value_t = 360)]
        months: u32,
    },
}

impl Args {
    /// Log level filter derived from `-v` flags
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
