use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;
pub mod help;
pub mod runner;

#[derive(Parser)]
#[command(name = "etfcalc")]
#[command(
    version,
    about = "ETF round-trip profit calculator with brokerage, charges and income tax"
)]
#[command(
    long_about = "Calculate the net profit of buying and selling ETF units after brokerage, STT, stamp duty, exchange fees, DP charges, GST and income tax, under the intraday or delivery regime."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Config file (defaults to <config dir>/etfcalc/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Calculate costs, taxes and net profit of one round trip
    Calc {
        /// Fee regime: intraday or delivery (defaults to the configured regime)
        #[arg(short, long)]
        regime: Option<String>,

        #[command(flatten)]
        trade: TradeArgs,
    },

    /// Compare the same round trip under both regimes
    Compare {
        #[command(flatten)]
        trade: TradeArgs,
    },

    /// Show the fee schedule of each regime
    Regimes,

    /// Launch the interactive calculator (default)
    Interactive {
        /// Start directly on the calculator with this regime
        #[arg(short, long)]
        regime: Option<String>,
    },
}

/// The three calculator inputs, kept as text so validation can tell a
/// blank field from a malformed or non-positive one.
#[derive(Args, Debug, Clone, Default)]
pub struct TradeArgs {
    /// Buy price per unit
    #[arg(short, long, allow_hyphen_values = true)]
    pub buy: Option<String>,

    /// Sell price per unit
    #[arg(short, long, allow_hyphen_values = true)]
    pub sell: Option<String>,

    /// Number of units (fractional allowed)
    #[arg(short, long, allow_hyphen_values = true)]
    pub qty: Option<String>,
}
