//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// SLA availability calculator.
///
/// Reads outage intervals per component and derives merged downtime,
/// concurrency timelines, and availability percentages over a reporting
/// period.
#[derive(Debug, Parser)]
#[command(name = "avail", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate an availability report for a period.
    Report {
        /// Path to the outage spans file (JSON).
        #[arg(long)]
        input: PathBuf,

        /// Start of the reporting period (RFC 3339).
        #[arg(long)]
        from: DateTime<Utc>,

        /// End of the reporting period (RFC 3339).
        #[arg(long)]
        to: DateTime<Utc>,

        /// Path to a maintenance windows file (JSON); outages inside these
        /// windows are not counted.
        #[arg(long)]
        maintenance: Option<PathBuf>,

        /// Path to a business hours windows file (JSON); only outages
        /// inside these windows are counted.
        #[arg(long)]
        business_hours: Option<PathBuf>,

        /// Minimum number of components down at once that counts as an
        /// outage (defaults to the configured threshold).
        #[arg(long)]
        threshold: Option<usize>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compute how much of a period is covered by a set of spans.
    Coverage {
        /// Path to the spans file (JSON).
        #[arg(long)]
        input: PathBuf,

        /// Start of the period (RFC 3339).
        #[arg(long)]
        from: DateTime<Utc>,

        /// End of the period (RFC 3339).
        #[arg(long)]
        to: DateTime<Utc>,
    },
}
