//! # fcmetrics CLI
//!
//! Reduces fuel-cell test data to catalyst performance metrics.
//!
//! ## Usage
//!
//! ```bash
//! # ECSA from the last CV cycle, bounds at 0.4 V
//! fcmetrics ecsa HAD.txt --area 50 --loading 0.253 --mode voltage --v-up 0.4 --v-down 0.4 \
//!     --range 13801 18400 --point 0.08,-30 --point 0.35,-8 --point 0.35,8 --point 0.08,25
//!
//! # Mass activity across aging stages
//! fcmetrics --config cell.toml mass-activity data_BOT data_30K data_60K data_90K
//!
//! # Candidate picking points
//! fcmetrics extrema HAD.txt --area 50 --range 13801 18400
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
